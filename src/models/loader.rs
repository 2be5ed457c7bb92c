//! Artifact loading and the process-wide artifact cache

use crate::config::ArtifactsConfig;
use crate::error::{CalculatorError, Result};
use crate::models::{FeatureScaler, LinearRegressor, OnnxRegressor, Regressor, StandardScaler};
use once_cell::sync::OnceCell;
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::path::Path;
use tracing::{debug, info};

static ARTIFACTS: OnceCell<ArtifactStore> = OnceCell::new();

/// Loader for the regressor and scaler files
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ModelLoader {
    pub fn new() -> Self {
        Self::with_threads(1)
    }

    pub fn with_threads(onnx_threads: usize) -> Self {
        Self {
            onnx_threads: onnx_threads.max(1),
        }
    }

    /// Load the regressor, choosing the format from the file extension.
    pub fn load_model(&self, path: &Path) -> Result<Box<dyn Regressor>> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match extension {
            "onnx" => Ok(Box::new(self.load_onnx(path)?)),
            "json" => {
                let raw = read_artifact(path)?;
                info!(path = %path.display(), format = "linear-json", "Loading regressor");
                Ok(Box::new(LinearRegressor::from_json(&raw)?))
            }
            other => Err(CalculatorError::malformed(format!(
                "unsupported model format '{}' for {}",
                other,
                path.display()
            ))),
        }
    }

    /// Load the fitted feature scaler.
    pub fn load_scaler(&self, path: &Path) -> Result<Box<dyn FeatureScaler>> {
        let raw = read_artifact(path)?;
        info!(path = %path.display(), format = "standard-json", "Loading feature scaler");
        Ok(Box::new(StandardScaler::from_json(&raw)?))
    }

    fn load_onnx(&self, path: &Path) -> Result<OnnxRegressor> {
        let bytes = std::fs::read(path).map_err(|e| CalculatorError::ArtifactNotFound {
            path: path.to_path_buf(),
            source: Some(e),
        })?;

        info!(path = %path.display(), threads = self.onnx_threads, "Loading ONNX regressor");

        let session = Session::builder()
            .map_err(|e| onnx_load_error(path, e))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| onnx_load_error(path, e))?
            .with_intra_threads(self.onnx_threads)
            .map_err(|e| onnx_load_error(path, e))?
            .commit_from_memory(&bytes)
            .map_err(|e| onnx_load_error(path, e))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        // skl2onnx names regressor outputs "variable"
        let output_name = session
            .outputs
            .iter()
            .find(|o| o.name == "variable" || o.name.contains("predict"))
            .or_else(|| session.outputs.first())
            .map(|o| o.name.clone())
            .unwrap_or_else(|| "variable".to_string());

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("onnx")
            .to_string();

        info!(
            model = %name,
            input = %input_name,
            output = %output_name,
            "Model loaded successfully"
        );

        Ok(OnnxRegressor::new(name, session, input_name, output_name))
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn onnx_load_error(path: &Path, e: impl std::fmt::Display) -> CalculatorError {
    CalculatorError::malformed(format!("failed to load {}: {}", path.display(), e))
}

fn read_artifact(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| CalculatorError::ArtifactNotFound {
        path: path.to_path_buf(),
        source: Some(e),
    })
}

/// The trained regressor and scaler, loaded once and shared read-only.
pub struct ArtifactStore {
    model: Box<dyn Regressor>,
    scaler: Box<dyn FeatureScaler>,
}

impl ArtifactStore {
    /// Assemble a store from already-loaded artifacts.
    pub fn from_parts(model: Box<dyn Regressor>, scaler: Box<dyn FeatureScaler>) -> Self {
        Self { model, scaler }
    }

    /// Read both artifacts from disk.
    ///
    /// Both paths are checked before either is parsed, so a missing file is always
    /// reported as `ArtifactNotFound`.
    pub fn load(config: &ArtifactsConfig) -> Result<Self> {
        let model_path = config.model_path();
        let scaler_path = config.scaler_path();

        for path in [&model_path, &scaler_path] {
            if !path.is_file() {
                debug!(path = %path.display(), "Artifact file not found");
                return Err(CalculatorError::artifact_not_found(path.as_path()));
            }
        }

        let loader = ModelLoader::with_threads(config.onnx_threads);
        let model = loader.load_model(&model_path)?;
        let scaler = loader.load_scaler(&scaler_path)?;

        info!(model = %model.name(), "Artifacts loaded");

        Ok(Self::from_parts(model, scaler))
    }

    /// Process-wide artifacts; the first caller loads, later callers share.
    ///
    /// A failed load leaves the cache empty.
    pub fn global(config: &ArtifactsConfig) -> Result<&'static ArtifactStore> {
        ARTIFACTS.get_or_try_init(|| Self::load(config))
    }

    pub fn model(&self) -> &dyn Regressor {
        self.model.as_ref()
    }

    pub fn scaler(&self) -> &dyn FeatureScaler {
        self.scaler.as_ref()
    }
}
