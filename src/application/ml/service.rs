use crate::application::ml::pipeline::{PredictionPipeline, VixClassifier};
use crate::domain::errors::PredictionError;
use crate::domain::ml::scaler::StandardScaler;
use crate::domain::ml::types::{ModelMetadata, PredictionResult};
use chrono::{DateTime, Utc};

/// Immutable bundle built once at startup from the loaded artifacts and
/// shared (behind an `Arc`) with every request handler.
pub struct PredictionService {
    pipeline: PredictionPipeline,
    metadata: ModelMetadata,
}

impl PredictionService {
    pub fn new(model: VixClassifier, scaler: StandardScaler, metadata: ModelMetadata) -> Self {
        Self {
            pipeline: PredictionPipeline::new(model, scaler),
            metadata,
        }
    }

    pub fn predict(
        &self,
        vix: f64,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<PredictionResult, PredictionError> {
        self.pipeline.predict(vix, timestamp)
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}
