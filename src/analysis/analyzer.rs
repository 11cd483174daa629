use tracing::{error, info, warn};

use super::{
    image::{ImagePayload, UploadedImage},
    outcome::{AnalysisFailure, AnalysisOutcome},
    AnalysisRequest, VisionModel,
};

/// Largest accepted upload, in bytes.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024; // 10MB

/// Runs meal analyses against an injected vision model.
#[derive(Debug)]
pub struct MealAnalyzer<M> {
    model: M,
    max_image_bytes: usize,
}

impl<M: VisionModel> MealAnalyzer<M> {
    /// Creates an analyzer around an already configured model.
    pub fn new(model: M) -> Self {
        Self {
            model,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    /// Overrides the upload size cap.
    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }

    /// The upload size cap.
    pub fn max_image_bytes(&self) -> usize {
        self.max_image_bytes
    }

    /// The underlying model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Validates a submission into a request without calling the model.
    pub fn prepare(
        &self,
        upload: Option<UploadedImage>,
        user_context: &str,
    ) -> Result<AnalysisRequest, AnalysisFailure> {
        let upload = upload.ok_or_else(AnalysisFailure::missing_image)?;
        let image = ImagePayload::from_upload(upload, self.max_image_bytes)?;
        Ok(AnalysisRequest::new(image, Some(user_context.to_owned())))
    }

    /// Handles one submission end to end. Never fails: every error becomes
    /// an [`AnalysisOutcome::Failure`].
    pub async fn analyze(
        &self,
        upload: Option<UploadedImage>,
        user_context: &str,
    ) -> AnalysisOutcome {
        match self.prepare(upload, user_context) {
            Ok(request) => self.run(&request).await,
            Err(failure) => {
                warn!(kind = ?failure.kind, "Rejected meal submission: {}", failure.message);
                failure.into()
            }
        }
    }

    /// Sends a validated request to the model.
    pub async fn run(&self, request: &AnalysisRequest) -> AnalysisOutcome {
        info!(
            mime = %request.image().mime(),
            bytes = request.image().bytes().len(),
            with_context = request.user_context().is_some(),
            "Analyzing meal image"
        );

        match self.model.describe_image(request).await {
            Ok(text) => {
                let outcome = AnalysisOutcome::from_text(text);
                if outcome == AnalysisOutcome::Empty {
                    warn!("Model returned no analysis text");
                }
                outcome
            }
            Err(e) => {
                error!("Meal analysis failed: {}", e);
                AnalysisFailure::external(e).into()
            }
        }
    }
}
