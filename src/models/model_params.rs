use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::GenerationConfig;

/// Default API endpoint for Google's Generative AI service
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default API version
pub const DEFAULT_API_VERSION: &str = "v1beta";
/// Default vision-capable model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration parameters for the generative model
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct ModelParams {
    /// Model identifier (e.g., "gemini-2.5-flash")
    #[builder(setter(into), default = String::from(DEFAULT_MODEL))]
    pub model: String,
    /// Scheme and host of the API, without a trailing slash
    #[builder(setter(into), default = String::from(DEFAULT_BASE_URL))]
    pub base_url: String,
    /// API version path segment
    #[builder(setter(into), default = String::from(DEFAULT_API_VERSION))]
    pub api_version: String,
    /// Generation settings applied to requests that carry none of their own
    #[builder(default)]
    pub generation_config: Option<GenerationConfig>,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self::builder().build()
    }
}
