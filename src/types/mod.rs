//! Type definitions for the strength comparison pipeline

pub mod curing;
pub mod mix;
pub mod result;

pub use curing::CuringAge;
pub use mix::MixInputs;
pub use result::{ComparisonResult, ComparisonRow, PredictionSeries};
