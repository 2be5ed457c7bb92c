//! Error types for the strength comparison pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by artifact loading, input handling and inference.
#[derive(Debug, Error)]
pub enum CalculatorError {
    /// A trained artifact is missing or cannot be read. Fatal for all calculations.
    #[error("artifact not found or unreadable: {}", .path.display())]
    ArtifactNotFound {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Input or artifact does not have the shape the pipeline expects.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A mix quantity is outside the accepted range.
    #[error("invalid mix: {field} = {value} ({reason})")]
    InvalidMix {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// ONNX Runtime reported an error while running the model.
    #[error("inference runtime error: {0}")]
    Runtime(String),
}

impl CalculatorError {
    pub fn artifact_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ArtifactNotFound {
            path: path.into(),
            source: None,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput(message.into())
    }

    /// Whether this error disables calculation for the rest of the process.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ArtifactNotFound { .. })
    }
}

pub type Result<T, E = CalculatorError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_not_found_names_path() {
        let err = CalculatorError::artifact_not_found("models/missing.onnx");
        assert!(err.to_string().contains("models/missing.onnx"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_malformed_is_not_fatal() {
        let err = CalculatorError::malformed("model returned 4 predictions for 5 rows");
        assert!(!err.is_fatal());
        assert_eq!(
            err.to_string(),
            "malformed input: model returned 4 predictions for 5 rows"
        );
    }
}
