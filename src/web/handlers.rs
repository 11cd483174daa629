use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::Html,
};
use tracing::warn;

use crate::analysis::{AnalysisFailure, AnalysisOutcome, UploadedImage, VisionModel};

use super::{
    response::{AnalyzeResponse, ApiError},
    AppState,
};

const INDEX_PAGE: &str = include_str!("pages/index.html");
const CONFIG_ERROR_PAGE: &str = include_str!("pages/config_error.html");

/// Multipart field carrying the optional meal description.
pub const DESCRIPTION_FIELD: &str = "description";
/// Multipart field carrying the meal photo.
pub const IMAGE_FIELD: &str = "image";

/// Serves the upload form.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}

/// Answers every route when no API key is configured.
pub async fn configuration_error() -> (StatusCode, Html<&'static str>) {
    (StatusCode::SERVICE_UNAVAILABLE, Html(CONFIG_ERROR_PAGE))
}

/// Runs one analysis for the submitted form.
pub async fn analyze_meal<M: VisionModel + 'static>(
    State(state): State<AppState<M>>,
    multipart: Multipart,
) -> Result<AnalyzeResponse, ApiError> {
    let (description, upload) = match read_form(multipart).await {
        Ok(form) => form,
        // The body limit trips before the analyzer can check the image size itself.
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            let max_bytes = state.analyzer.max_image_bytes();
            warn!(max_bytes, "Rejected an upload over the body limit");
            let failure = AnalysisFailure::image_too_large(max_bytes);
            return Ok(AnalysisOutcome::from(failure).into());
        }
        Err(e) => return Err(e.into()),
    };

    let outcome = state.analyzer.analyze(upload, &description).await;
    Ok(outcome.into())
}

/// Collects the description and the image part, skipping unknown fields.
async fn read_form(
    mut multipart: Multipart,
) -> Result<(String, Option<UploadedImage>), MultipartError> {
    let mut description = String::new();
    let mut upload: Option<UploadedImage> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            DESCRIPTION_FIELD => description = field.text().await?,
            IMAGE_FIELD => {
                let file_name = field.file_name().map(str::to_owned);
                let content_type = field.content_type().map(str::to_owned);
                let bytes = field.bytes().await?;

                // A file input left untouched still submits an empty, unnamed part.
                let untouched =
                    bytes.is_empty() && file_name.as_deref().map_or(true, str::is_empty);
                if !untouched {
                    upload = Some(UploadedImage {
                        file_name: file_name.filter(|name| !name.is_empty()),
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok((description, upload))
}
