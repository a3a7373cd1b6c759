use crate::domain::errors::TrainingError;
use serde::{Deserialize, Serialize};

/// Standardization parameters learned at training time and applied as
/// `(x - mean) / std` before the classifier sees a value.
///
/// A degenerate fit (zero variance) keeps `std = 1.0` so transform
/// degrades to a plain shift instead of dividing by zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: f64,
    pub std: f64,
}

impl StandardScaler {
    pub fn fit(values: &[f64]) -> Result<Self, TrainingError> {
        if values.is_empty() {
            return Err(TrainingError::EmptyDataset);
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();
        let std = if std > f64::EPSILON { std } else { 1.0 };

        Ok(Self { mean, std })
    }

    pub fn transform(&self, value: f64) -> f64 {
        (value - self.mean) / self.std
    }

    pub fn is_finite(&self) -> bool {
        self.mean.is_finite() && self.std.is_finite() && self.std > 0.0
    }
}
