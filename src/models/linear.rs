//! Linear regressor loaded from exported coefficients

use crate::error::{CalculatorError, Result};
use crate::feature_extractor::{FeatureRow, FEATURE_COUNT};
use crate::models::scaler::check_feature_names;
use crate::models::Regressor;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
struct LinearParams {
    #[serde(alias = "coef_")]
    coefficients: Vec<f64>,
    #[serde(alias = "intercept_")]
    intercept: f64,
    #[serde(default, alias = "feature_names_in_")]
    feature_names: Option<Vec<String>>,
}

/// `intercept + Σ coefficient·x` over the scaled features.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressor {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let params: LinearParams = serde_json::from_str(raw)
            .map_err(|e| CalculatorError::malformed(format!("model artifact: {}", e)))?;

        if let Some(names) = &params.feature_names {
            check_feature_names(names)?;
        }

        let coefficients = <[f64; FEATURE_COUNT]>::try_from(params.coefficients.as_slice())
            .map_err(|_| {
                CalculatorError::malformed(format!(
                    "model artifact: expected {} coefficients, found {}",
                    FEATURE_COUNT,
                    params.coefficients.len()
                ))
            })?;

        Ok(Self::new(coefficients, params.intercept))
    }
}

impl Regressor for LinearRegressor {
    fn name(&self) -> &str {
        "linear"
    }

    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>> {
        Ok(rows
            .iter()
            .map(|row| {
                row.values()
                    .iter()
                    .zip(&self.coefficients)
                    .map(|(x, w)| x * w)
                    .sum::<f64>()
                    + self.intercept
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_weighted_sum() {
        let mut coefficients = [0.0; FEATURE_COUNT];
        coefficients[0] = 2.0;
        coefficients[9] = 0.5;
        let model = LinearRegressor::new(coefficients, 10.0);

        let mut values = [0.0; FEATURE_COUNT];
        values[0] = 3.0;
        values[9] = 4.0;

        let predictions = model.predict(&[FeatureRow::new(values)]).unwrap();
        assert_eq!(predictions, vec![18.0]);
    }

    #[test]
    fn test_from_json_sklearn_names() {
        let raw = r#"{
            "coef_": [1.0, 0.5, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.2, 3.0],
            "intercept_": 35.0
        }"#;

        let model = LinearRegressor::from_json(raw).unwrap();
        let predictions = model.predict(&[FeatureRow::new([0.0; FEATURE_COUNT])]).unwrap();
        assert_eq!(predictions, vec![35.0]);
    }

    #[test]
    fn test_from_json_wrong_coefficient_count() {
        let raw = r#"{"coefficients": [1.0, 2.0, 3.0], "intercept": 0.0}"#;
        let err = LinearRegressor::from_json(raw).unwrap_err();
        assert!(err.to_string().contains("expected 10 coefficients"));
    }
}
