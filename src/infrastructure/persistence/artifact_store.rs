use crate::application::ml::pipeline::VixClassifier;
use crate::domain::errors::ArtifactError;
use crate::domain::ml::scaler::StandardScaler;
use crate::domain::ml::types::ModelMetadata;
use serde::Serialize;
use serde::de::DeserializeOwned;
use smartcore::linalg::basic::arrays::Array;
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub const MODEL_FILE: &str = "stock_prediction_model.json";
pub const SCALER_FILE: &str = "stock_scaler.json";
pub const METADATA_FILE: &str = "model_metadata.json";

/// The three artifacts written by the trainer and read once at startup.
pub struct LoadedArtifacts {
    pub model: VixClassifier,
    pub scaler: StandardScaler,
    pub metadata: ModelMetadata,
}

/// Serializes the model artifacts as JSON files at fixed relative paths
/// under a models directory.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.dir.join(SCALER_FILE)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.dir.join(METADATA_FILE)
    }

    /// Loads all three artifacts. Any missing or corrupt file fails the
    /// whole load; callers never observe partial state.
    pub fn load(&self) -> Result<LoadedArtifacts, ArtifactError> {
        let model: VixClassifier = self.read_json(self.model_path())?;
        let weight: f64 = *model.coefficients().get((0, 0));
        let bias: f64 = *model.intercept().get((0, 0));
        if !weight.is_finite() || !bias.is_finite() {
            return Err(ArtifactError::Invalid {
                path: self.model_path(),
            });
        }

        let scaler: StandardScaler = self.read_json(self.scaler_path())?;
        if !scaler.is_finite() {
            return Err(ArtifactError::Invalid {
                path: self.scaler_path(),
            });
        }

        let metadata: ModelMetadata = self.read_json(self.metadata_path())?;

        info!("Loaded model artifacts from {:?}", self.dir);
        Ok(LoadedArtifacts {
            model,
            scaler,
            metadata,
        })
    }

    pub fn save(
        &self,
        model: &VixClassifier,
        scaler: &StandardScaler,
        metadata: &ModelMetadata,
    ) -> Result<(), ArtifactError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| ArtifactError::Io {
                path: self.dir.clone(),
                source: e,
            })?;
        }

        self.write_json(self.model_path(), model)?;
        self.write_json(self.scaler_path(), scaler)?;
        self.write_json(self.metadata_path(), metadata)?;

        info!("Saved model artifacts to {:?}", self.dir);
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, path: PathBuf) -> Result<T, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::Missing { path });
        }
        let content = fs::read_to_string(&path).map_err(|e| ArtifactError::Io {
            path: path.clone(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| ArtifactError::Corrupt { path, source: e })
    }

    fn write_json<T: Serialize>(&self, path: PathBuf, value: &T) -> Result<(), ArtifactError> {
        let content = serde_json::to_string(value).map_err(|e| ArtifactError::Corrupt {
            path: path.clone(),
            source: e,
        })?;

        // Atomic write: temp file then rename.
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content).map_err(|e| ArtifactError::Io {
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &path).map_err(|e| ArtifactError::Io {
            path: path.clone(),
            source: e,
        })?;
        Ok(())
    }
}
