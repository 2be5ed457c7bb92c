//! Prediction and comparison result structures

use crate::types::curing::CuringAge;
use serde::{Deserialize, Serialize};

/// Predicted strength (MPa) at each curing age, in age order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSeries {
    pub points: Vec<(CuringAge, f64)>,
}

impl PredictionSeries {
    pub fn strengths(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, strength)| *strength)
    }
}

/// One curing age of a treatment-vs-control comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub curing_age_days: CuringAge,
    /// Predicted strength of the submitted mix (MPa)
    pub treatment_mpa: f64,
    /// Predicted strength of the control mix (MPa)
    pub control_mpa: f64,
    /// Relative change of treatment over control (%)
    pub improvement_pct: f64,
}

/// Treatment and control predictions across all curing ages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonResult {
    pub fn treatment(&self) -> PredictionSeries {
        PredictionSeries {
            points: self
                .rows
                .iter()
                .map(|r| (r.curing_age_days, r.treatment_mpa))
                .collect(),
        }
    }

    pub fn control(&self) -> PredictionSeries {
        PredictionSeries {
            points: self
                .rows
                .iter()
                .map(|r| (r.curing_age_days, r.control_mpa))
                .collect(),
        }
    }

    /// Largest strength in either series, 0.0 when empty.
    pub fn peak_strength(&self) -> f64 {
        self.rows
            .iter()
            .flat_map(|r| [r.treatment_mpa, r.control_mpa])
            .fold(0.0, f64::max)
    }
}
