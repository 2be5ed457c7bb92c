//! ONNX regressor inference

use crate::error::{CalculatorError, Result};
use crate::feature_extractor::{FeatureRow, FEATURE_COUNT};
use crate::models::Regressor;
use ort::session::Session;
use ort::value::Tensor;
use std::sync::Mutex;
use tracing::debug;

/// A strength regressor exported to ONNX and run through ONNX Runtime.
pub struct OnnxRegressor {
    /// Model name
    name: String,
    /// ONNX Runtime session (runs need exclusive access)
    session: Mutex<Session>,
    /// Input name for the feature tensor
    input_name: String,
    /// Output name for the predicted strengths
    output_name: String,
}

impl OnnxRegressor {
    pub(crate) fn new(
        name: String,
        session: Session,
        input_name: String,
        output_name: String,
    ) -> Self {
        Self {
            name,
            session: Mutex::new(session),
            input_name,
            output_name,
        }
    }
}

impl Regressor for OnnxRegressor {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>> {
        // Prepare input tensor - shape [rows, features]
        let shape = vec![rows.len() as i64, FEATURE_COUNT as i64];
        let data: Vec<f32> = rows
            .iter()
            .flat_map(|row| row.values().iter().map(|&v| v as f32))
            .collect();
        let input_tensor = Tensor::from_array((shape, data))
            .map_err(|e| CalculatorError::Runtime(format!("failed to create input tensor: {}", e)))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| CalculatorError::Runtime(format!("session lock poisoned: {}", e)))?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input_tensor])
            .map_err(|e| CalculatorError::Runtime(e.to_string()))?;

        let output = outputs.get(self.output_name.as_str()).ok_or_else(|| {
            CalculatorError::malformed(format!(
                "model {} produced no output named {}",
                self.name, self.output_name
            ))
        })?;

        let (shape, data) = output.try_extract_tensor::<f32>().map_err(|e| {
            CalculatorError::malformed(format!(
                "model {} output is not a float tensor: {}",
                self.name, e
            ))
        })?;

        // Regressors export as [batch, 1] or [batch]
        let dims: Vec<i64> = shape.iter().copied().collect();
        if data.len() != rows.len() {
            return Err(CalculatorError::malformed(format!(
                "model {} returned shape {:?} for {} rows",
                self.name,
                dims,
                rows.len()
            )));
        }

        debug!(model = %self.name, rows = rows.len(), shape = ?dims, "ONNX inference complete");

        Ok(data.iter().map(|&v| f64::from(v)).collect())
    }
}
