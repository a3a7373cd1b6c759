use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::error;

use crate::domain::ml::types::PredictionResult;
use crate::interfaces::rest::dto::*;
use crate::interfaces::rest::error::ApiError;

use super::AppState;

/// GET /health
///
/// Never fails; reports whether the artifacts were loaded.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let loaded = state.service.is_some();
    Json(HealthResponse {
        status: if loaded { "healthy" } else { "degraded" },
        model_loaded: loaded,
        scaler_loaded: loaded,
        timestamp: Utc::now(),
    })
}

/// GET /model-info
pub async fn model_info(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ModelInfoResponse>, ApiError> {
    let service = state.service.as_ref().ok_or_else(ApiError::not_ready)?;
    Ok(Json(ModelInfoResponse::from_metadata(service.metadata())))
}

/// POST /predict
///
/// Scores an ordered batch of observations; the response lists stay parallel
/// to the request order. The first failing observation aborts the batch.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let service = state.service.as_ref().ok_or_else(ApiError::not_ready)?;

    let mut predictions = Vec::with_capacity(request.stock_data.len());
    let mut confidence_scores = Vec::with_capacity(request.stock_data.len());

    for observation in &request.stock_data {
        let result = service
            .predict(observation.vix, observation.timestamp)
            .map_err(|e| {
                error!("Prediction error: {}", e);
                ApiError::from(e)
            })?;
        confidence_scores.push(result.confidence);
        predictions.push(result);
    }

    let metadata = service.metadata();
    Ok(Json(PredictResponse {
        model_info: ModelInfoSummary {
            model_type: metadata.model_type.clone(),
            features_used: metadata.feature_names.clone(),
            prediction_count: predictions.len(),
        },
        predictions,
        confidence_scores,
        timestamp: Utc::now(),
    }))
}

/// GET /predict-single?vix_value=...
pub async fn predict_single_get(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SinglePredictParams>,
) -> Result<Json<PredictionResult>, ApiError> {
    predict_single(&state, params.vix_value)
}

/// POST /predict-single
pub async fn predict_single_post(
    State(state): State<Arc<AppState>>,
    Json(params): Json<SinglePredictParams>,
) -> Result<Json<PredictionResult>, ApiError> {
    predict_single(&state, params.vix_value)
}

fn predict_single(state: &AppState, vix_value: f64) -> Result<Json<PredictionResult>, ApiError> {
    let service = state.service.as_ref().ok_or_else(ApiError::not_ready)?;
    let result = service.predict(vix_value, None).map_err(|e| {
        error!("Single prediction error: {}", e);
        ApiError::from(e)
    })?;
    Ok(Json(result))
}
