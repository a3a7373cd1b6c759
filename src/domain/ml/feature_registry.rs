/// Ordered list of feature names.
/// This order MUST match the column order used by the trainer; changing it
/// invalidates every saved model and scaler.
pub const FEATURE_NAMES: &[&str] = &["VIX"];

/// Builds the single-row feature vector fed to the scaler and classifier.
pub fn observation_row(vix: f64) -> Vec<f64> {
    vec![vix]
}

pub fn feature_count() -> usize {
    FEATURE_NAMES.len()
}

pub fn feature_names() -> Vec<String> {
    FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
}
