//! Data structures for the Gemini AI API requests and responses.

mod generation_config;
mod model_params;
mod part;
mod request;
mod request_type;
mod response;
mod safety;

pub use generation_config::GenerationConfig;
pub use model_params::{ModelParams, DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use part::{InlineData, Part};
pub use request::{Content, Request, Role};
pub use request_type::RequestType;
pub use response::{
    Candidate, ErrorDetail, ErrorResponse, FinishReason, PromptFeedback, Response, UsageMetadata,
};
pub use safety::{HarmCategory, SafetyProbability, SafetyRating};
