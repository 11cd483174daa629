//! Error types for the NutriVision client and configuration layers.

use thiserror::Error;

/// Errors that can occur when configuring or calling the Gemini AI API.
#[derive(Debug, Error)]
pub enum NutriVisionError {
    /// Base error carrying a plain message.
    #[error("[NutriVision Error]: {message}")]
    Base {
        /// Error message
        message: String,
    },

    /// The API answered with a non-success status.
    #[error("Request failed with status {status}: {message}")]
    ApiError {
        /// HTTP status returned by the API
        status: reqwest::StatusCode,
        /// Message extracted from the error body
        message: String,
    },

    /// Error occurred during an API request.
    #[error("API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error occurred when accessing environment variables.
    #[error("Environment variable not found: {0}")]
    EnvError(#[from] std::env::VarError),

    /// Error occurred when parsing JSON.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The settings could not be extracted from their providers.
    #[error("Invalid configuration: {0}")]
    ConfigError(#[from] figment::Error),

    /// The API credential is missing or blank.
    #[error("Missing {0} in environment. Please add it to your .env file.")]
    MissingCredential(&'static str),
}

impl NutriVisionError {
    /// Creates a new Base error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::Base {
            message: message.into(),
        }
    }
}
