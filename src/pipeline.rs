//! Treatment-vs-control strength comparison.
//!
//! Given a mix design, predicts strength at every curing age for the mix as
//! submitted (treatment) and for the same mix without PAC sludge or activator
//! (control), then reports the relative change per age.

use crate::error::{CalculatorError, Result};
use crate::feature_extractor::{FeatureExtractor, FeatureRow};
use crate::models::{ArtifactStore, FeatureScaler, Regressor};
use crate::types::{ComparisonResult, ComparisonRow, CuringAge, MixInputs};
use tracing::debug;

/// Added to the control strength before dividing, so a zero control stays finite.
pub const IMPROVEMENT_EPSILON: f64 = 1e-6;

/// Runs the scale → predict → compare sequence against fixed artifacts.
pub struct ComparisonPipeline<'a> {
    model: &'a dyn Regressor,
    scaler: &'a dyn FeatureScaler,
    extractor: FeatureExtractor,
}

impl<'a> ComparisonPipeline<'a> {
    pub fn new(model: &'a dyn Regressor, scaler: &'a dyn FeatureScaler) -> Self {
        Self {
            model,
            scaler,
            extractor: FeatureExtractor::new(),
        }
    }

    pub fn from_store(store: &'a ArtifactStore) -> Self {
        Self::new(store.model(), store.scaler())
    }

    /// Compare the submitted mix against its control across all curing ages.
    ///
    /// Input ranges are not checked here; see [`MixInputs::validate`].
    pub fn run(&self, mix: &MixInputs) -> Result<ComparisonResult> {
        let treatment_rows = self.extractor.extract_series(mix);
        let control_rows = self.extractor.extract_series(&mix.control());

        let treatment = self.predict_series(&treatment_rows)?;
        let control = self.predict_series(&control_rows)?;

        let rows: Vec<ComparisonRow> = CuringAge::ALL
            .iter()
            .zip(treatment.iter().zip(&control))
            .map(|(&age, (&treatment_mpa, &control_mpa))| ComparisonRow {
                curing_age_days: age,
                treatment_mpa,
                control_mpa,
                improvement_pct: improvement_pct(treatment_mpa, control_mpa),
            })
            .collect();

        debug!(
            model = %self.model.name(),
            treatment = ?treatment,
            control = ?control,
            "Comparison complete"
        );

        Ok(ComparisonResult { rows })
    }

    /// Scale and predict one batch, flooring strengths at zero.
    fn predict_series(&self, rows: &[FeatureRow]) -> Result<Vec<f64>> {
        let scaled = self.scaler.transform(rows)?;
        if scaled.len() != rows.len() {
            return Err(CalculatorError::malformed(format!(
                "scaler returned {} rows for {}",
                scaled.len(),
                rows.len()
            )));
        }

        let predictions = self.model.predict(&scaled)?;
        if predictions.len() != rows.len() {
            return Err(CalculatorError::malformed(format!(
                "model {} returned {} predictions for {} rows",
                self.model.name(),
                predictions.len(),
                rows.len()
            )));
        }

        predictions
            .into_iter()
            .map(|p| {
                if p.is_finite() {
                    Ok(p.max(0.0))
                } else {
                    Err(CalculatorError::malformed(format!(
                        "model {} returned non-finite prediction {}",
                        self.model.name(),
                        p
                    )))
                }
            })
            .collect()
    }
}

/// Relative change of `treatment` over `control`, in percent.
pub fn improvement_pct(treatment: f64, control: f64) -> f64 {
    (treatment - control) / (control + IMPROVEMENT_EPSILON) * 100.0
}

/// One-shot form of [`ComparisonPipeline::run`].
pub fn run(
    mix: &MixInputs,
    model: &dyn Regressor,
    scaler: &dyn FeatureScaler,
) -> Result<ComparisonResult> {
    ComparisonPipeline::new(model, scaler).run(mix)
}
