//! Startup configuration: the API credential and server settings.

use std::{fmt, net::SocketAddr};

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::{
    analysis::DEFAULT_MAX_IMAGE_BYTES,
    error::NutriVisionError,
    models::{GenerationConfig, ModelParams, DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_MODEL},
};

/// Environment variable holding the Gemini API key.
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Prefix of the environment variables that override [`Settings`].
pub const SETTINGS_ENV_PREFIX: &str = "NUTRIVISION_";

/// A non-blank Gemini API key. Its `Debug` output is redacted.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a key, rejecting empty or whitespace-only values.
    pub fn new(value: impl Into<String>) -> Result<Self, NutriVisionError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(NutriVisionError::MissingCredential(API_KEY_VAR));
        }
        Ok(Self(value))
    }

    /// Reads the key from `GOOGLE_API_KEY`.
    pub fn from_env() -> Result<Self, NutriVisionError> {
        match std::env::var(API_KEY_VAR) {
            Ok(value) => Self::new(value),
            Err(std::env::VarError::NotPresent) => {
                Err(NutriVisionError::MissingCredential(API_KEY_VAR))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The raw key, for use in request headers only.
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// Server and model settings, overridable through `NUTRIVISION_*` variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Address the web server binds to.
    pub listen_addr: SocketAddr,
    /// Gemini model identifier.
    pub model: String,
    /// Gemini API base URL.
    pub base_url: String,
    /// Gemini API version.
    pub api_version: String,
    /// Largest accepted upload, in bytes.
    pub max_image_bytes: usize,
    /// Sampling temperature; the model default applies when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Output token cap; the model default applies when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8501)),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            temperature: None,
            max_output_tokens: None,
        }
    }
}

impl Settings {
    /// Defaults merged with the `NUTRIVISION_*` environment.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Env::prefixed(SETTINGS_ENV_PREFIX))
    }

    /// Loads settings from [`Settings::figment`].
    pub fn load() -> Result<Self, NutriVisionError> {
        Self::from_figment(Self::figment())
    }

    /// Extracts settings from any figment, e.g. one built in tests.
    pub fn from_figment(figment: Figment) -> Result<Self, NutriVisionError> {
        Ok(figment.extract()?)
    }

    /// Model parameters derived from these settings.
    pub fn model_params(&self) -> ModelParams {
        let generation = GenerationConfig {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        };

        ModelParams::builder()
            .model(self.model.as_str())
            .base_url(self.base_url.as_str())
            .api_version(self.api_version.as_str())
            .generation_config(generation.non_empty())
            .build()
    }
}
