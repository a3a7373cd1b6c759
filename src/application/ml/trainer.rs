use crate::application::ml::pipeline::VixClassifier;
use crate::domain::errors::TrainingError;
use crate::domain::ml::feature_registry;
use crate::domain::ml::scaler::StandardScaler;
use crate::domain::ml::types::{MODEL_DESCRIPTION, ModelMetadata, TrainingParams};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::{LogisticRegression, LogisticRegressionParameters};

#[derive(Debug, Clone)]
pub struct TrainerConfig {
    pub samples: usize,
    pub seed: u64,
    /// VIX above this level is labeled bearish in the synthetic set.
    pub bearish_threshold: f64,
    /// Fraction of labels flipped to simulate noisy outcomes.
    pub label_noise: f64,
    /// L2 regularization strength passed to the optimizer.
    pub alpha: f64,
    /// Tail fraction held out for the out-of-sample accuracy report.
    pub test_fraction: f64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            samples: 1000,
            seed: 42,
            bearish_threshold: 25.0,
            label_noise: 0.1,
            alpha: 0.0,
            test_fraction: 0.2,
        }
    }
}

/// Everything the trainer produces: the three artifacts plus the numbers
/// printed by the CLI report.
pub struct TrainedArtifacts {
    pub model: VixClassifier,
    pub scaler: StandardScaler,
    pub metadata: ModelMetadata,
    pub report: EvaluationReport,
}

#[derive(Debug, Clone)]
pub struct EvaluationReport {
    pub train_samples: usize,
    pub test_samples: usize,
    pub train_accuracy: f64,
    pub test_accuracy: Option<f64>,
    pub bullish_share: f64,
    /// Fitted coefficient over the scaled feature.
    pub weight: f64,
    pub bias: f64,
}

/// Synthetic VIX observations labeled by a volatility threshold rule:
/// values above the threshold are bearish (0), at or below bullish (1),
/// with a fraction of labels flipped as noise. Seeded, so a given config
/// reproduces the same dataset.
pub fn generate_training_set(cfg: &TrainerConfig) -> (Vec<f64>, Vec<i64>) {
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut vix = Vec::with_capacity(cfg.samples);
    let mut labels = Vec::with_capacity(cfg.samples);

    for _ in 0..cfg.samples {
        let value: f64 = rng.random_range(10.0..50.0);
        let mut label: i64 = if value > cfg.bearish_threshold { 0 } else { 1 };
        if rng.random::<f64>() < cfg.label_noise {
            label = 1 - label;
        }
        vix.push(value);
        labels.push(label);
    }

    (vix, labels)
}

/// Fits the scaler and classifier on the head of the dataset, evaluates on
/// the held-out tail, and assembles the metadata record.
pub fn train(
    vix: &[f64],
    labels: &[i64],
    cfg: &TrainerConfig,
) -> Result<TrainedArtifacts, TrainingError> {
    if vix.is_empty() || labels.is_empty() {
        return Err(TrainingError::EmptyDataset);
    }
    if vix.len() != labels.len() {
        return Err(TrainingError::Fit {
            reason: format!(
                "feature/label length mismatch: {} vs {}",
                vix.len(),
                labels.len()
            ),
        });
    }

    let split = ((vix.len() as f64) * (1.0 - cfg.test_fraction)).floor() as usize;
    let split = split.clamp(1, vix.len());
    let (train_v, test_v) = vix.split_at(split);
    let (train_y, test_y) = labels.split_at(split);

    // Scaler is fitted on the training portion only, then applied everywhere.
    let scaler = StandardScaler::fit(train_v)?;

    let x_train = design_matrix(train_v, &scaler)?;
    let y_train: Vec<i64> = train_y.to_vec();

    let params = LogisticRegressionParameters::default().with_alpha(cfg.alpha);
    let model = LogisticRegression::fit(&x_train, &y_train, params).map_err(|e| {
        TrainingError::Fit {
            reason: e.to_string(),
        }
    })?;

    let train_accuracy = accuracy(&model, &x_train, train_y)?;
    let test_accuracy = if test_v.is_empty() {
        None
    } else {
        let x_test = design_matrix(test_v, &scaler)?;
        Some(accuracy(&model, &x_test, test_y)?)
    };

    let bullish = labels.iter().filter(|&&l| l == 1).count();
    let report = EvaluationReport {
        train_samples: train_v.len(),
        test_samples: test_v.len(),
        train_accuracy,
        test_accuracy,
        bullish_share: bullish as f64 / labels.len() as f64,
        weight: *model.coefficients().get((0, 0)),
        bias: *model.intercept().get((0, 0)),
    };

    let metadata = ModelMetadata {
        model_type: "LogisticRegression".to_string(),
        feature_names: feature_registry::feature_names(),
        training_date: Utc::now().format("%Y-%m-%d").to_string(),
        model_params: TrainingParams {
            alpha: cfg.alpha,
            samples: vix.len(),
            seed: cfg.seed,
            label_noise: cfg.label_noise,
            bearish_threshold: cfg.bearish_threshold,
        },
        description: MODEL_DESCRIPTION.to_string(),
    };

    Ok(TrainedArtifacts {
        model,
        scaler,
        metadata,
        report,
    })
}

fn design_matrix(
    values: &[f64],
    scaler: &StandardScaler,
) -> Result<DenseMatrix<f64>, TrainingError> {
    let rows: Vec<Vec<f64>> = values
        .iter()
        .map(|v| feature_registry::observation_row(scaler.transform(*v)))
        .collect();
    DenseMatrix::from_2d_vec(&rows).map_err(|e| TrainingError::Fit {
        reason: e.to_string(),
    })
}

fn accuracy(
    model: &VixClassifier,
    x: &DenseMatrix<f64>,
    y: &[i64],
) -> Result<f64, TrainingError> {
    let predicted = model.predict(x).map_err(|e| TrainingError::Fit {
        reason: e.to_string(),
    })?;
    let hits = predicted.iter().zip(y.iter()).filter(|(p, t)| p == t).count();
    Ok(hits as f64 / y.len() as f64)
}
