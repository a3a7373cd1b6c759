//! Vixcast server - VIX market-outlook prediction service
//!
//! Loads the trained classifier, scaler and metadata once at startup and
//! serves them over HTTP. If any artifact is missing or corrupt the server
//! starts degraded: `/health` stays available and reports the state, while
//! prediction endpoints answer 503 until the artifacts are fixed and the
//! process is restarted.
//!
//! # Usage
//! ```sh
//! cargo run --bin train_model   # regenerate models/
//! cargo run --bin vixcast
//! ```
//!
//! # Environment Variables
//! - `HOST` / `PORT` - bind address (default 0.0.0.0:8000)
//! - `MODELS_DIR` - artifact directory (default: models)
//! - `ALLOWED_ORIGINS` - comma-separated CORS allow-list
//! - `RUST_LOG` - log level filter

use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{Level, error, info};
use tracing_subscriber::prelude::*;
use vixcast::application::ml::service::PredictionService;
use vixcast::config::Config;
use vixcast::infrastructure::persistence::artifact_store::ArtifactStore;
use vixcast::interfaces::rest::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Setup logging (stdout only)
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Vixcast {} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: bind={}, models_dir={:?}, origins={:?}",
        config.bind_addr(),
        config.models_dir,
        config.allowed_origins
    );

    // Load artifacts once; the service object is immutable afterwards.
    let store = ArtifactStore::new(config.models_dir.clone());
    let service = match store.load() {
        Ok(artifacts) => {
            info!(
                "Model ready: {} over features {:?} (trained {})",
                artifacts.metadata.model_type,
                artifacts.metadata.feature_names,
                artifacts.metadata.training_date
            );
            Some(Arc::new(PredictionService::new(
                artifacts.model,
                artifacts.scaler,
                artifacts.metadata,
            )))
        }
        Err(e) => {
            error!(
                "Failed to load model artifacts: {}. Starting degraded; run train_model and restart.",
                e
            );
            None
        }
    };

    let state = Arc::new(AppState::new(service));
    let router = create_router(state, &config.allowed_origins);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received. Exiting...");
        })
        .await?;

    Ok(())
}
