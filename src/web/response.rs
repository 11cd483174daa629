use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::analysis::{AnalysisOutcome, FailureKind, EMPTY_RESULT_MESSAGE};

/// JSON body returned by `POST /api/analyze`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalyzeResponse {
    /// The model's analysis, verbatim.
    Success {
        /// Analysis text
        text: String,
    },
    /// The model answered with no text.
    Empty {
        /// Retry hint for the user
        message: String,
    },
    /// Validation or the model call failed.
    Failure {
        /// Failure classification
        kind: FailureKind,
        /// User-facing message
        message: String,
    },
}

impl AnalyzeResponse {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Success { .. } | Self::Empty { .. } => StatusCode::OK,
            Self::Failure { kind, .. } => match kind {
                FailureKind::MissingImage => StatusCode::BAD_REQUEST,
                FailureKind::UnsupportedImage => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                FailureKind::ImageTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
                FailureKind::ExternalService => StatusCode::BAD_GATEWAY,
            },
        }
    }
}

impl From<AnalysisOutcome> for AnalyzeResponse {
    fn from(outcome: AnalysisOutcome) -> Self {
        match outcome {
            AnalysisOutcome::Success(text) => Self::Success { text },
            AnalysisOutcome::Empty => Self::Empty {
                message: EMPTY_RESULT_MESSAGE.to_string(),
            },
            AnalysisOutcome::Failure(failure) => Self::Failure {
                kind: failure.kind,
                message: failure.message,
            },
        }
    }
}

impl IntoResponse for AnalyzeResponse {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

/// A malformed form submission, rejected before analysis.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    status: &'static str,
    kind: &'static str,
    message: &'a str,
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        Self {
            status: e.status(),
            message: format!("Failed to read the submitted form: {}", e.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: "failure",
            kind: "invalid_request",
            message: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
