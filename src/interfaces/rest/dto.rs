use crate::domain::ml::feature_registry;
use crate::domain::ml::types::{ModelMetadata, PredictionResult, TrainingParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observation in a batch predict request. The timestamp is optional
/// and defaults to the server's current time.
#[derive(Debug, Clone, Deserialize)]
pub struct StockObservation {
    pub vix: f64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    pub stock_data: Vec<StockObservation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictResponse {
    pub predictions: Vec<PredictionResult>,
    pub confidence_scores: Vec<f64>,
    pub model_info: ModelInfoSummary,
    pub timestamp: DateTime<Utc>,
}

/// Compact model echo attached to batch responses.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfoSummary {
    pub model_type: String,
    pub features_used: Vec<String>,
    pub prediction_count: usize,
}

/// Single-prediction input, accepted both as a query string and as a JSON
/// body.
#[derive(Debug, Clone, Deserialize)]
pub struct SinglePredictParams {
    pub vix_value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    pub scaler_loaded: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfoResponse {
    pub model_type: String,
    pub feature_names: Vec<String>,
    pub training_date: String,
    pub model_params: TrainingParams,
    pub features_required: usize,
    pub prediction_type: &'static str,
    pub description: String,
}

impl ModelInfoResponse {
    pub fn from_metadata(metadata: &ModelMetadata) -> Self {
        ModelInfoResponse {
            model_type: metadata.model_type.clone(),
            feature_names: metadata.feature_names.clone(),
            training_date: metadata.training_date.clone(),
            model_params: metadata.model_params.clone(),
            features_required: feature_registry::feature_count(),
            prediction_type: "classification",
            description: metadata.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
