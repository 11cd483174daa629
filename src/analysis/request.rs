use crate::models::{Part, Request};

use super::{image::ImagePayload, prompt::compose_prompt};

/// One meal analysis: an image plus the optional description typed with it.
///
/// There is no way to build one without an image.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    image: ImagePayload,
    user_context: Option<String>,
}

impl AnalysisRequest {
    /// Creates a request; a blank `user_context` is dropped.
    pub fn new(image: ImagePayload, user_context: Option<String>) -> Self {
        Self {
            image,
            user_context: user_context.filter(|ctx| !ctx.trim().is_empty()),
        }
    }

    /// The validated image.
    pub fn image(&self) -> &ImagePayload {
        &self.image
    }

    /// The user's description, if one was given.
    pub fn user_context(&self) -> Option<&str> {
        self.user_context.as_deref()
    }

    /// The instruction text sent ahead of the image.
    pub fn prompt(&self) -> String {
        compose_prompt(self.user_context().unwrap_or_default())
    }

    /// The two-part `[prompt, image]` request for the Gemini API.
    pub fn to_model_request(&self) -> Request {
        Request::with_parts(vec![Part::text(self.prompt()), self.image.to_part()])
    }
}
