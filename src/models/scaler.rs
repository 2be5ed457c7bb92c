//! Standardization scaler loaded from its fitted parameters

use crate::error::{CalculatorError, Result};
use crate::feature_extractor::{FeatureExtractor, FeatureRow, FEATURE_COUNT};
use crate::models::FeatureScaler;
use serde::Deserialize;

/// Fitted parameters as exported from training.
#[derive(Debug, Clone, Deserialize)]
struct ScalerParams {
    #[serde(alias = "mean_")]
    mean: Vec<f64>,
    #[serde(alias = "scale_")]
    scale: Vec<f64>,
    #[serde(default, alias = "feature_names_in_")]
    feature_names: Option<Vec<String>>,
}

/// `(x - mean) / scale` per column.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    /// Build a scaler from explicit parameters.
    ///
    /// A zero scale marks a constant training column and is treated as 1.
    pub fn new(mean: [f64; FEATURE_COUNT], scale: [f64; FEATURE_COUNT]) -> Self {
        let scale = scale.map(|s| if s == 0.0 { 1.0 } else { s });
        Self { mean, scale }
    }

    /// Parse fitted parameters from JSON and check them against the feature layout.
    pub fn from_json(raw: &str) -> Result<Self> {
        let params: ScalerParams = serde_json::from_str(raw)
            .map_err(|e| CalculatorError::malformed(format!("scaler artifact: {}", e)))?;

        if let Some(names) = &params.feature_names {
            check_feature_names(names)?;
        }

        let mean = to_feature_array("mean", &params.mean)?;
        let scale = to_feature_array("scale", &params.scale)?;

        if let Some(bad) = scale.iter().find(|s| !s.is_finite() || **s < 0.0) {
            return Err(CalculatorError::malformed(format!(
                "scaler artifact: invalid scale entry {}",
                bad
            )));
        }

        Ok(Self::new(mean, scale))
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, rows: &[FeatureRow]) -> Result<Vec<FeatureRow>> {
        Ok(rows
            .iter()
            .map(|row| {
                let mut scaled = *row.values();
                for (i, value) in scaled.iter_mut().enumerate() {
                    *value = (*value - self.mean[i]) / self.scale[i];
                }
                FeatureRow::new(scaled)
            })
            .collect())
    }
}

fn to_feature_array(field: &str, values: &[f64]) -> Result<[f64; FEATURE_COUNT]> {
    <[f64; FEATURE_COUNT]>::try_from(values).map_err(|_| {
        CalculatorError::malformed(format!(
            "scaler artifact: expected {} {} values, found {}",
            FEATURE_COUNT,
            field,
            values.len()
        ))
    })
}

/// Artifacts that record their training columns must match ours exactly.
pub(crate) fn check_feature_names(names: &[String]) -> Result<()> {
    let expected = FeatureExtractor::new().feature_names();

    if names.len() != expected.len() || names.iter().zip(&expected).any(|(a, b)| a != b) {
        return Err(CalculatorError::malformed(format!(
            "artifact feature columns {:?} do not match expected {:?}",
            names, expected
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCALER_JSON: &str = r#"{
        "mean_": [300.0, 20.0, 10.0, 10.0, 180.0, 2.0, 1000.0, 800.0, 2.0, 40.0],
        "scale_": [50.0, 10.0, 5.0, 5.0, 20.0, 1.0, 100.0, 50.0, 1.0, 0.0]
    }"#;

    #[test]
    fn test_transform_standardizes_columns() {
        let scaler = StandardScaler::from_json(SCALER_JSON).unwrap();
        let row = FeatureRow::new([350.0, 30.0, 10.0, 0.0, 170.0, 2.0, 1050.0, 750.0, 3.0, 28.0]);

        let scaled = scaler.transform(&[row]).unwrap();

        assert_eq!(scaled.len(), 1);
        let values = scaled[0].values();
        assert!((values[0] - 1.0).abs() < 1e-12);
        assert!((values[1] - 1.0).abs() < 1e-12);
        assert!((values[3] + 2.0).abs() < 1e-12);
        assert!((values[4] + 0.5).abs() < 1e-12);
        // Zero scale behaves as 1: only centering applies
        assert!((values[9] + 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_wrong_length() {
        let raw = r#"{"mean": [1.0, 2.0], "scale": [1.0, 1.0]}"#;
        let err = StandardScaler::from_json(raw).unwrap_err();
        assert!(matches!(err, CalculatorError::MalformedInput(_)));
    }

    #[test]
    fn test_rejects_reordered_feature_names() {
        let raw = r#"{
            "mean": [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            "scale": [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            "feature_names_in_": [
                "pac_kg_m3", "cemento_kg_m3", "escoria_alto_horno_kg_m3",
                "ceniza_volante_kg_m3", "agua_kg_m3", "superplastificante_kg_m3",
                "agregado_grueso_kg_m3", "agregado_fino_kg_m3",
                "activador_quimico_pct", "edad_curado_dias"
            ]
        }"#;

        let err = StandardScaler::from_json(raw).unwrap_err();
        assert!(err.to_string().contains("do not match"));
    }

    #[test]
    fn test_accepts_matching_feature_names() {
        let raw = r#"{
            "mean": [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            "scale": [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            "feature_names": [
                "cemento_kg_m3", "pac_kg_m3", "escoria_alto_horno_kg_m3",
                "ceniza_volante_kg_m3", "agua_kg_m3", "superplastificante_kg_m3",
                "agregado_grueso_kg_m3", "agregado_fino_kg_m3",
                "activador_quimico_pct", "edad_curado_dias"
            ]
        }"#;

        assert!(StandardScaler::from_json(raw).is_ok());
    }
}
