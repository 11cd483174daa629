use std::fmt;

use serde::Serialize;

/// Warning shown when the model answered without any text.
pub const EMPTY_RESULT_MESSAGE: &str =
    "No analysis returned. Try adding a short description of the meal or upload a clearer image.";

/// Message shown when no image was submitted.
pub const MISSING_IMAGE_MESSAGE: &str = "Please upload an image.";

/// Classification of a failed analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No image was supplied.
    MissingImage,
    /// The upload is empty or not a JPEG/PNG image.
    UnsupportedImage,
    /// The upload exceeds the configured size cap.
    ImageTooLarge,
    /// The model call failed for any reason.
    ExternalService,
}

/// A failed analysis with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisFailure {
    /// What went wrong.
    pub kind: FailureKind,
    /// Message suitable for display in place of the result.
    pub message: String,
}

impl AnalysisFailure {
    /// Creates a failure of the given kind.
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The failure for a submission without an image.
    pub fn missing_image() -> Self {
        Self::new(FailureKind::MissingImage, MISSING_IMAGE_MESSAGE)
    }

    /// The failure for an upload over `max_bytes`.
    pub fn image_too_large(max_bytes: usize) -> Self {
        Self::new(
            FailureKind::ImageTooLarge,
            format!("Image too large. Max size is {max_bytes} bytes."),
        )
    }

    /// Wraps any error raised by the model call.
    pub fn external(detail: impl fmt::Display) -> Self {
        Self::new(
            FailureKind::ExternalService,
            format!("An error occurred while analyzing the image: {detail}"),
        )
    }
}

impl fmt::Display for AnalysisFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AnalysisFailure {}

/// The result of one analysis, consumed once for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// The model's answer, verbatim.
    Success(String),
    /// The model answered with no text.
    Empty,
    /// Validation or the model call failed.
    Failure(AnalysisFailure),
}

impl AnalysisOutcome {
    /// Maps the model's text to `Success`, or `Empty` when there is none.
    pub fn from_text(text: String) -> Self {
        if text.is_empty() {
            Self::Empty
        } else {
            Self::Success(text)
        }
    }
}

impl From<AnalysisFailure> for AnalysisOutcome {
    fn from(failure: AnalysisFailure) -> Self {
        Self::Failure(failure)
    }
}
