//! Feature extraction for strength model inference.
//!
//! Rows are laid out in the exact column order the scaler and regressor were
//! fitted with. Reordering these columns silently corrupts every prediction.

use crate::types::{CuringAge, MixInputs};

/// Number of model input features.
pub const FEATURE_COUNT: usize = 10;

/// Model input columns, in training order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureColumn {
    Cement,
    PacSludge,
    Slag,
    FlyAsh,
    Water,
    Superplasticizer,
    CoarseAggregate,
    FineAggregate,
    ActivatorPct,
    CuringAgeDays,
}

impl FeatureColumn {
    pub const ALL: [FeatureColumn; FEATURE_COUNT] = [
        FeatureColumn::Cement,
        FeatureColumn::PacSludge,
        FeatureColumn::Slag,
        FeatureColumn::FlyAsh,
        FeatureColumn::Water,
        FeatureColumn::Superplasticizer,
        FeatureColumn::CoarseAggregate,
        FeatureColumn::FineAggregate,
        FeatureColumn::ActivatorPct,
        FeatureColumn::CuringAgeDays,
    ];

    /// Position in a feature row.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column identifier used in the training data.
    pub fn training_name(self) -> &'static str {
        match self {
            FeatureColumn::Cement => "cemento_kg_m3",
            FeatureColumn::PacSludge => "pac_kg_m3",
            FeatureColumn::Slag => "escoria_alto_horno_kg_m3",
            FeatureColumn::FlyAsh => "ceniza_volante_kg_m3",
            FeatureColumn::Water => "agua_kg_m3",
            FeatureColumn::Superplasticizer => "superplastificante_kg_m3",
            FeatureColumn::CoarseAggregate => "agregado_grueso_kg_m3",
            FeatureColumn::FineAggregate => "agregado_fino_kg_m3",
            FeatureColumn::ActivatorPct => "activador_quimico_pct",
            FeatureColumn::CuringAgeDays => "edad_curado_dias",
        }
    }
}

/// One model input row: a mix design at a single curing age.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow([f64; FEATURE_COUNT]);

impl FeatureRow {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn get(&self, column: FeatureColumn) -> f64 {
        self.0[column.index()]
    }
}

/// Turns mix designs into model input rows.
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Row for one mix at one curing age.
    pub fn extract(&self, mix: &MixInputs, age: CuringAge) -> FeatureRow {
        FeatureRow([
            mix.cement,
            mix.pac_sludge,
            mix.slag,
            mix.fly_ash,
            mix.water,
            mix.superplasticizer,
            mix.coarse_aggregate,
            mix.fine_aggregate,
            mix.activator_pct,
            f64::from(age.days()),
        ])
    }

    /// One row per curing age, in age order.
    pub fn extract_series(&self, mix: &MixInputs) -> Vec<FeatureRow> {
        CuringAge::ALL
            .iter()
            .map(|&age| self.extract(mix, age))
            .collect()
    }

    pub fn feature_names(&self) -> Vec<&'static str> {
        FeatureColumn::ALL
            .iter()
            .map(|c| c.training_name())
            .collect()
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
