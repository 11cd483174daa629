use std::future::Future;

use crate::error::NutriVisionError;

use super::AnalysisRequest;

/// A vision-capable model that answers a prompt about an image with free text.
pub trait VisionModel: Send + Sync {
    /// Sends the request's prompt and image as a single multimodal call.
    ///
    /// Returns the model's text, which may be empty.
    fn describe_image(
        &self,
        request: &AnalysisRequest,
    ) -> impl Future<Output = Result<String, NutriVisionError>> + Send;
}
