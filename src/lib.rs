//! Concrete Strength Pipeline Library
//!
//! Predicts compressive-strength evolution over curing age for a concrete mix
//! containing PAC sludge, and compares it against a control mix without PAC
//! sludge or chemical activator, using a pre-trained regressor and scaler.

pub mod cli;
pub mod config;
pub mod error;
pub mod feature_extractor;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod types;

pub use config::AppConfig;
pub use error::CalculatorError;
pub use feature_extractor::{FeatureExtractor, FeatureRow};
pub use models::{ArtifactStore, FeatureScaler, Regressor};
pub use pipeline::ComparisonPipeline;
pub use types::{ComparisonResult, CuringAge, MixInputs};
