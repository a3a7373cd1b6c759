//! Regenerates the model artifacts (classifier, scaler, metadata).
//!
//! By default fits on a seeded synthetic dataset (VIX above the threshold
//! biases bearish); pass `--input` to fit on real labeled observations
//! instead.

use clap::Parser;
use serde::Deserialize;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use vixcast::application::ml::pipeline::PredictionPipeline;
use vixcast::application::ml::trainer::{self, TrainerConfig};
use vixcast::infrastructure::persistence::artifact_store::ArtifactStore;

#[derive(Debug, Deserialize)]
struct ObservationRecord {
    vix: f64,
    label: i64,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory to write the model artifacts into
    #[arg(long, default_value = "models")]
    output: PathBuf,

    /// Optional CSV of labeled observations (columns: vix,label). Overrides
    /// synthetic generation.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Number of synthetic observations to generate
    #[arg(long, default_value_t = 1000)]
    samples: usize,

    /// RNG seed for the synthetic dataset
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// VIX level above which synthetic labels turn bearish
    #[arg(long, default_value_t = 25.0)]
    bearish_threshold: f64,

    /// Fraction of synthetic labels flipped as noise
    #[arg(long, default_value_t = 0.1)]
    label_noise: f64,

    /// L2 regularization strength
    #[arg(long, default_value_t = 0.0)]
    alpha: f64,

    /// Disable train/test split (train on 100% of data). Use after validation.
    #[arg(long)]
    no_split: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let cfg = TrainerConfig {
        samples: args.samples,
        seed: args.seed,
        bearish_threshold: args.bearish_threshold,
        label_noise: args.label_noise,
        alpha: args.alpha,
        test_fraction: if args.no_split { 0.0 } else { 0.2 },
    };

    let (vix, labels) = if let Some(input) = &args.input {
        if !input.exists() {
            println!("Training data not found at {:?}.", input);
            return Ok(());
        }
        println!("Loading observations from {:?}", input);
        read_observations(input)?
    } else {
        println!(
            "Generating {} synthetic observations (seed {})",
            cfg.samples, cfg.seed
        );
        trainer::generate_training_set(&cfg)
    };

    let bullish = labels.iter().filter(|&&l| l == 1).count();
    let bearish = labels.len() - bullish;
    println!("\nTarget Distribution:");
    println!("  Total:   {}", labels.len());
    println!(
        "  Bullish: {} ({:.1}%)",
        bullish,
        bullish as f64 / labels.len() as f64 * 100.0
    );
    println!(
        "  Bearish: {} ({:.1}%)",
        bearish,
        bearish as f64 / labels.len() as f64 * 100.0
    );

    println!("\nTraining logistic regression (alpha={})...", cfg.alpha);
    let artifacts = trainer::train(&vix, &labels, &cfg)?;

    let report = &artifacts.report;
    println!(
        "Train accuracy: {:.3} ({} samples)",
        report.train_accuracy, report.train_samples
    );
    if let Some(acc) = report.test_accuracy {
        println!("OOS accuracy:   {:.3} ({} samples)", acc, report.test_samples);
    }
    println!("Coefficient: {:.4}", report.weight);
    println!("Intercept:   {:.4}", report.bias);

    let store = ArtifactStore::new(&args.output);
    store.save(&artifacts.model, &artifacts.scaler, &artifacts.metadata)?;
    println!("\nArtifacts saved to {:?}", args.output);

    println!("\nSample predictions:");
    let pipeline = PredictionPipeline::new(artifacts.model, artifacts.scaler);
    for vix_value in [15.0, 20.0, 25.0, 30.0, 35.0, 40.0] {
        let result = pipeline.predict(vix_value, None)?;
        println!(
            "  VIX {:>4.1} -> {:<7} (confidence {:.3})",
            vix_value,
            result.prediction_label.label(),
            result.confidence
        );
    }

    Ok(())
}

fn read_observations(path: &PathBuf) -> Result<(Vec<f64>, Vec<i64>), Box<dyn Error>> {
    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(BufReader::new(file));

    let mut vix = Vec::new();
    let mut labels = Vec::new();
    for result in rdr.deserialize() {
        let record: ObservationRecord = result?;
        vix.push(record.vix);
        labels.push(record.label);
    }

    Ok((vix, labels))
}
