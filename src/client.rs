//! Client implementation for the Gemini AI API.

use tracing::debug;

use crate::{
    analysis::{AnalysisRequest, VisionModel},
    config::ApiKey,
    error::NutriVisionError,
    models::{ErrorResponse, ModelParams, Request, RequestType, Response},
};

/// Header carrying the API key, which keeps it out of URLs and error messages.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// A client for interacting with the Gemini AI API.
#[derive(Debug, Clone)]
pub struct GenerativeModel {
    api_key: ApiKey,
    params: ModelParams,
    client: reqwest::Client,
}

impl GenerativeModel {
    /// Creates a new GenerativeModel with the specified API key and model.
    ///
    /// # Arguments
    ///
    /// * `api_key` - The validated API key for authentication
    /// * `params` - The model parameters
    pub fn new(api_key: ApiKey, params: ModelParams) -> Self {
        Self {
            api_key,
            params,
            client: reqwest::Client::new(),
        }
    }

    fn build_url(&self, request_type: RequestType) -> String {
        format!(
            "{}/{}/models/{}:{}",
            self.params.base_url.trim_end_matches('/'),
            self.params.api_version,
            self.params.model,
            request_type
        )
    }

    /// Makes a request to the Gemini AI API.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or the API answers with
    /// a non-success status.
    async fn make_request(
        &self,
        url: &str,
        mut request: Request,
    ) -> Result<reqwest::Response, NutriVisionError> {
        request.generation_config = request
            .generation_config
            .or_else(|| self.params.generation_config.clone());

        debug!(url, "Sending request to Gemini");
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, self.api_key.expose())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&error_body)
                .map(|body| body.error.message)
                .unwrap_or(error_body);
            return Err(NutriVisionError::ApiError { status, message });
        }

        Ok(response)
    }

    /// Generates content using the Gemini AI API.
    ///
    /// # Arguments
    ///
    /// * `request` - The request to send to the API
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or if the response cannot be parsed.
    pub async fn generate_response(&self, request: Request) -> Result<Response, NutriVisionError> {
        let url = self.build_url(RequestType::GenerateContent);
        let body = self.make_request(&url, request).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl VisionModel for GenerativeModel {
    async fn describe_image(&self, request: &AnalysisRequest) -> Result<String, NutriVisionError> {
        let response = self.generate_response(request.to_model_request()).await?;
        if let Some(reason) = response.block_reason() {
            debug!(reason, "Prompt was blocked");
        }
        Ok(response.text())
    }
}
