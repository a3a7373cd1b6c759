use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the prediction pipeline.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Model artifacts are not loaded")]
    NotReady,

    #[error("VIX must be a finite number, got {value}")]
    InvalidInput { value: f64 },

    #[error("Inference failed: {reason}")]
    Inference { reason: String },
}

/// Errors raised while loading or writing model artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {path:?}")]
    Missing { path: PathBuf },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to deserialize {path:?}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Artifact {path:?} contains non-finite parameters")]
    Invalid { path: PathBuf },
}

/// Errors raised while fitting a new model.
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("Training dataset is empty")]
    EmptyDataset,

    #[error("Model fit failed: {reason}")]
    Fit { reason: String },
}
