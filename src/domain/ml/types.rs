use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed description reported by the introspection endpoint and stored in
/// the metadata artifact.
pub const MODEL_DESCRIPTION: &str = "Stock market prediction model based on VIX volatility index";

/// The two output classes, encoded as bearish=0 / bullish=1 on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketOutlook {
    Bearish,
    Bullish,
}

impl MarketOutlook {
    /// Decision threshold is 0.5: bullish wins ties.
    pub fn from_probability(p_bullish: f64) -> Self {
        if p_bullish >= 0.5 {
            MarketOutlook::Bullish
        } else {
            MarketOutlook::Bearish
        }
    }

    pub fn class_index(&self) -> u8 {
        match self {
            MarketOutlook::Bearish => 0,
            MarketOutlook::Bullish => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarketOutlook::Bearish => "bearish",
            MarketOutlook::Bullish => "bullish",
        }
    }
}

/// One scored observation.
///
/// Invariants: `probability_bullish + probability_bearish == 1.0` (within
/// floating-point tolerance), `prediction_label` is the argmax of the pair and
/// `confidence` is the probability of the predicted label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: u8,
    pub prediction_label: MarketOutlook,
    pub confidence: f64,
    pub probability_bullish: f64,
    pub probability_bearish: f64,
    pub vix_value: f64,
    pub timestamp: DateTime<Utc>,
}

/// Hyperparameters recorded at fit time, echoed by `/model-info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingParams {
    pub alpha: f64,
    pub samples: usize,
    pub seed: u64,
    pub label_noise: f64,
    pub bearish_threshold: f64,
}

/// Descriptive record about the trained model. Read-only after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_type: String,
    pub feature_names: Vec<String>,
    pub training_date: String,
    pub model_params: TrainingParams,
    pub description: String,
}
