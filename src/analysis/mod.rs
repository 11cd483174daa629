//! Meal analysis: upload validation, prompt composition and the model call.

mod analyzer;
mod image;
mod outcome;
pub mod prompt;
mod request;
mod vision;

pub use analyzer::{MealAnalyzer, DEFAULT_MAX_IMAGE_BYTES};
pub use image::{ImageMime, ImagePayload, UploadedImage};
pub use outcome::{
    AnalysisFailure, AnalysisOutcome, FailureKind, EMPTY_RESULT_MESSAGE, MISSING_IMAGE_MESSAGE,
};
pub use request::AnalysisRequest;
pub use vision::VisionModel;
