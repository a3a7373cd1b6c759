use crate::domain::errors::PredictionError;
use crate::domain::ml::scaler::StandardScaler;
use crate::domain::ml::types::{MarketOutlook, PredictionResult};
use chrono::{DateTime, Utc};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::LogisticRegression;

/// Trained binary classifier over the single scaled VIX feature.
pub type VixClassifier = LogisticRegression<f64, i64, DenseMatrix<f64>, Vec<i64>>;

/// Deterministic mapping from a raw VIX value to a scored prediction:
/// scale, linear score, logistic link, argmax label.
///
/// Stateless per call; the fitted artifacts are never mutated.
pub struct PredictionPipeline {
    model: VixClassifier,
    scaler: StandardScaler,
}

impl PredictionPipeline {
    pub fn new(model: VixClassifier, scaler: StandardScaler) -> Self {
        Self { model, scaler }
    }

    /// Scores one observation. Accepts any finite value, including
    /// out-of-distribution ones; NaN and infinities are rejected.
    pub fn predict(
        &self,
        vix: f64,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<PredictionResult, PredictionError> {
        if !vix.is_finite() {
            return Err(PredictionError::InvalidInput { value: vix });
        }

        let scaled = self.scaler.transform(vix);
        let score = self.decision_score(scaled);
        if !score.is_finite() {
            return Err(PredictionError::Inference {
                reason: format!("non-finite decision score for vix={}", vix),
            });
        }

        let probability_bullish = sigmoid(score);
        let probability_bearish = 1.0 - probability_bullish;
        let outlook = MarketOutlook::from_probability(probability_bullish);

        Ok(PredictionResult {
            prediction: outlook.class_index(),
            prediction_label: outlook,
            confidence: probability_bullish.max(probability_bearish),
            probability_bullish,
            probability_bearish,
            vix_value: vix,
            timestamp: timestamp.unwrap_or_else(Utc::now),
        })
    }

    /// Linear score of the fitted decision boundary over the scaled feature.
    /// With a single feature both coefficient matrices are 1x1.
    fn decision_score(&self, scaled: f64) -> f64 {
        let weight = *self.model.coefficients().get((0, 0));
        let bias = *self.model.intercept().get((0, 0));
        weight * scaled + bias
    }
}

/// Numerically stable logistic link.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fits a small model on cleanly labeled data: bullish (1) at or below
    /// VIX 25, bearish (0) above.
    fn fitted_pipeline() -> PredictionPipeline {
        let vix: Vec<f64> = (10..=50).map(|v| v as f64).collect();
        let labels: Vec<i64> = vix
            .iter()
            .map(|v| if *v <= 25.0 { 1 } else { 0 })
            .collect();

        let scaler = StandardScaler::fit(&vix).unwrap();
        let rows: Vec<Vec<f64>> = vix.iter().map(|v| vec![scaler.transform(*v)]).collect();
        let x = DenseMatrix::from_2d_vec(&rows).unwrap();
        let model = LogisticRegression::fit(&x, &labels, Default::default()).unwrap();

        PredictionPipeline::new(model, scaler)
    }

    #[test]
    fn test_sigmoid_bounds() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(40.0) > 0.999);
        assert!(sigmoid(-40.0) < 0.001);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let pipeline = fitted_pipeline();
        for vix in [0.0, 9.5, 15.0, 25.0, 33.3, 40.0, 80.0] {
            let result = pipeline.predict(vix, None).unwrap();
            let sum = result.probability_bullish + result.probability_bearish;
            assert!((sum - 1.0).abs() < 1e-6, "sum={} for vix={}", sum, vix);
        }
    }

    #[test]
    fn test_confidence_is_max_probability() {
        let pipeline = fitted_pipeline();
        for vix in [12.0, 24.9, 25.1, 47.0] {
            let result = pipeline.predict(vix, None).unwrap();
            let expected = result.probability_bullish.max(result.probability_bearish);
            assert_eq!(result.confidence, expected);
        }
    }

    #[test]
    fn test_label_matches_probability_threshold() {
        let pipeline = fitted_pipeline();
        for vix in [10.0, 20.0, 25.0, 30.0, 45.0] {
            let result = pipeline.predict(vix, None).unwrap();
            let expect_bullish = result.probability_bullish >= 0.5;
            assert_eq!(result.prediction_label == MarketOutlook::Bullish, expect_bullish);
            assert_eq!(result.prediction, if expect_bullish { 1 } else { 0 });
        }
    }

    #[test]
    fn test_low_vix_is_bullish_high_vix_is_bearish() {
        let pipeline = fitted_pipeline();

        let calm = pipeline.predict(15.0, None).unwrap();
        assert_eq!(calm.prediction_label, MarketOutlook::Bullish);
        assert!(calm.confidence > 0.7, "confidence={}", calm.confidence);

        let fearful = pipeline.predict(40.0, None).unwrap();
        assert_eq!(fearful.prediction_label, MarketOutlook::Bearish);
        assert!(fearful.confidence > 0.7, "confidence={}", fearful.confidence);
    }

    #[test]
    fn test_agrees_with_library_predict() {
        let pipeline = fitted_pipeline();
        // Stay away from the fitted boundary where 0.5-threshold rounding
        // could legitimately differ.
        for vix in [12.0, 16.0, 20.0, 31.0, 38.0, 46.0] {
            let rows = vec![vec![pipeline.scaler.transform(vix)]];
            let x = DenseMatrix::from_2d_vec(&rows).unwrap();
            let lib_label = pipeline.model.predict(&x).unwrap()[0];
            let result = pipeline.predict(vix, None).unwrap();
            assert_eq!(result.prediction as i64, lib_label, "vix={}", vix);
        }
    }

    #[test]
    fn test_deterministic_for_identical_input() {
        let pipeline = fitted_pipeline();
        let a = pipeline.predict(27.3, None).unwrap();
        let b = pipeline.predict(27.3, None).unwrap();
        assert_eq!(a.probability_bullish.to_bits(), b.probability_bullish.to_bits());
        assert_eq!(a.probability_bearish.to_bits(), b.probability_bearish.to_bits());
        assert_eq!(a.confidence.to_bits(), b.confidence.to_bits());
        assert_eq!(a.prediction, b.prediction);
    }

    #[test]
    fn test_rejects_non_finite_input() {
        let pipeline = fitted_pipeline();
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                pipeline.predict(bad, None),
                Err(PredictionError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_echoes_input_and_client_timestamp() {
        let pipeline = fitted_pipeline();
        let ts = "2024-06-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let result = pipeline.predict(18.25, Some(ts)).unwrap();
        assert_eq!(result.vix_value, 18.25);
        assert_eq!(result.timestamp, ts);
    }
}
