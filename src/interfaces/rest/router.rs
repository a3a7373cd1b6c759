use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::handlers;
use crate::application::ml::service::PredictionService;

/// Application state shared across handlers. `service` is `None` when the
/// artifacts failed to load; prediction endpoints then answer 503 while
/// `/health` keeps reporting the degraded state.
pub struct AppState {
    pub service: Option<Arc<PredictionService>>,
}

impl AppState {
    pub fn new(service: Option<Arc<PredictionService>>) -> Self {
        AppState { service }
    }
}

/// Create the REST API router
pub fn create_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/model-info", get(handlers::model_info))
        .route("/predict", post(handlers::predict))
        .route(
            "/predict-single",
            get(handlers::predict_single_get).post(handlers::predict_single_post),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
