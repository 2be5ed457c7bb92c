//! Mix design data structures

use crate::error::{CalculatorError, Result};
use serde::{Deserialize, Serialize};

/// Upper bound accepted for the chemical activator dosage (%).
pub const MAX_ACTIVATOR_PCT: f64 = 20.0;

/// Mix design quantities per cubic metre of concrete.
///
/// All masses are kg/m³; the activator is a percentage. Field aliases match the
/// column identifiers the model was trained with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MixInputs {
    /// Portland cement
    #[serde(alias = "cemento_kg_m3")]
    pub cement: f64,

    /// PAC sludge substituted as supplementary cementitious material
    #[serde(alias = "pac_kg_m3")]
    pub pac_sludge: f64,

    /// Ground granulated blast-furnace slag
    #[serde(alias = "escoria_alto_horno_kg_m3")]
    pub slag: f64,

    /// Fly ash
    #[serde(alias = "ceniza_volante_kg_m3")]
    pub fly_ash: f64,

    /// Mixing water
    #[serde(alias = "agua_kg_m3")]
    pub water: f64,

    /// Superplasticizer
    #[serde(alias = "superplastificante_kg_m3")]
    pub superplasticizer: f64,

    /// Coarse aggregate
    #[serde(alias = "agregado_grueso_kg_m3")]
    pub coarse_aggregate: f64,

    /// Fine aggregate
    #[serde(alias = "agregado_fino_kg_m3")]
    pub fine_aggregate: f64,

    /// Chemical activator dosage, percent in [0, 20]
    #[serde(alias = "activador_quimico_pct")]
    pub activator_pct: f64,
}

impl MixInputs {
    /// Parse a mix from JSON. Missing or unknown fields are rejected.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| CalculatorError::malformed(format!("mix design: {}", e)))
    }

    /// The baseline mix: identical, minus PAC sludge and its activator.
    pub fn control(&self) -> Self {
        Self {
            pac_sludge: 0.0,
            activator_pct: 0.0,
            ..*self
        }
    }

    /// Named quantities in declaration order.
    pub fn quantities(&self) -> [(&'static str, f64); 9] {
        [
            ("cement", self.cement),
            ("pac_sludge", self.pac_sludge),
            ("slag", self.slag),
            ("fly_ash", self.fly_ash),
            ("water", self.water),
            ("superplasticizer", self.superplasticizer),
            ("coarse_aggregate", self.coarse_aggregate),
            ("fine_aggregate", self.fine_aggregate),
            ("activator_pct", self.activator_pct),
        ]
    }

    /// Range check applied by callers before running the pipeline.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.quantities() {
            if !value.is_finite() {
                return Err(CalculatorError::InvalidMix {
                    field,
                    value,
                    reason: "must be a finite number",
                });
            }
            if value < 0.0 {
                return Err(CalculatorError::InvalidMix {
                    field,
                    value,
                    reason: "must not be negative",
                });
            }
        }

        if self.activator_pct > MAX_ACTIVATOR_PCT {
            return Err(CalculatorError::InvalidMix {
                field: "activator_pct",
                value: self.activator_pct,
                reason: "must be at most 20%",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_mix() -> MixInputs {
        MixInputs {
            cement: 350.0,
            pac_sludge: 50.0,
            slag: 0.0,
            fly_ash: 0.0,
            water: 170.0,
            superplasticizer: 0.0,
            coarse_aggregate: 1050.0,
            fine_aggregate: 750.0,
            activator_pct: 3.0,
        }
    }

    #[test]
    fn test_control_zeroes_pac_and_activator_only() {
        let mix = reference_mix();
        let control = mix.control();

        assert_eq!(control.pac_sludge, 0.0);
        assert_eq!(control.activator_pct, 0.0);
        assert_eq!(control.cement, mix.cement);
        assert_eq!(control.water, mix.water);
        assert_eq!(control.coarse_aggregate, mix.coarse_aggregate);
        assert_eq!(control.fine_aggregate, mix.fine_aggregate);
    }

    #[test]
    fn test_from_json_with_training_column_names() {
        let raw = r#"{
            "cemento_kg_m3": 350.0,
            "pac_kg_m3": 50.0,
            "escoria_alto_horno_kg_m3": 0.0,
            "ceniza_volante_kg_m3": 0.0,
            "agua_kg_m3": 170.0,
            "superplastificante_kg_m3": 0.0,
            "agregado_grueso_kg_m3": 1050.0,
            "agregado_fino_kg_m3": 750.0,
            "activador_quimico_pct": 3.0
        }"#;

        let mix = MixInputs::from_json(raw).unwrap();
        assert_eq!(mix, reference_mix());
    }

    #[test]
    fn test_from_json_missing_field_is_malformed() {
        let raw = r#"{"cement": 350.0, "pac_sludge": 50.0}"#;

        let err = MixInputs::from_json(raw).unwrap_err();
        assert!(matches!(err, CalculatorError::MalformedInput(_)));
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_validate_accepts_reference_mix() {
        assert!(reference_mix().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_mass() {
        let mix = MixInputs {
            water: -1.0,
            ..reference_mix()
        };

        match mix.validate() {
            Err(CalculatorError::InvalidMix { field, .. }) => assert_eq!(field, "water"),
            other => panic!("expected InvalidMix, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_activator_bounds() {
        let at_limit = MixInputs {
            activator_pct: 20.0,
            ..reference_mix()
        };
        assert!(at_limit.validate().is_ok());

        let over = MixInputs {
            activator_pct: 20.5,
            ..reference_mix()
        };
        assert!(matches!(
            over.validate(),
            Err(CalculatorError::InvalidMix {
                field: "activator_pct",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mix = MixInputs {
            cement: f64::NAN,
            ..reference_mix()
        };
        assert!(mix.validate().is_err());
    }
}
