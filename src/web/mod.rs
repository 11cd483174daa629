//! Browser boundary: the upload form and the analyze endpoint.

mod handlers;
mod response;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info_span;

use crate::analysis::{MealAnalyzer, VisionModel};

pub use handlers::{DESCRIPTION_FIELD, IMAGE_FIELD};
pub use response::{AnalyzeResponse, ApiError};

/// Room left in the request body for multipart framing and the description.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Shared state handed to every handler.
pub struct AppState<M> {
    /// The analyzer, built once at startup.
    pub analyzer: Arc<MealAnalyzer<M>>,
}

impl<M> Clone for AppState<M> {
    fn clone(&self) -> Self {
        Self {
            analyzer: Arc::clone(&self.analyzer),
        }
    }
}

impl<M: VisionModel> AppState<M> {
    /// Wraps an analyzer for sharing across requests.
    pub fn new(analyzer: MealAnalyzer<M>) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}

/// Returns the [`Router`] serving the form and the analyze endpoint.
pub fn router<M: VisionModel + 'static>(state: AppState<M>) -> Router {
    let body_limit = state.analyzer.max_image_bytes() + FORM_OVERHEAD_BYTES;

    let router = Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/analyze", post(handlers::analyze_meal::<M>))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    with_tracing(router)
}

/// Returns the [`Router`] used when the API key is missing: every request
/// gets the configuration error page and no model client exists.
pub fn unconfigured_router() -> Router {
    with_tracing(Router::new().fallback(handlers::configuration_error))
}

fn with_tracing(router: Router) -> Router {
    router.layer(TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    ))
}
