//! Trained artifacts: regressors, the feature scaler and their loader

pub mod inference;
pub mod linear;
pub mod loader;
pub mod scaler;

pub use inference::OnnxRegressor;
pub use linear::LinearRegressor;
pub use loader::{ArtifactStore, ModelLoader};
pub use scaler::StandardScaler;

use crate::error::Result;
use crate::feature_extractor::FeatureRow;

/// A fitted regressor mapping scaled feature rows to compressive strength (MPa).
pub trait Regressor: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &str;

    /// One prediction per input row, in input order.
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>>;
}

/// A feature transformation fixed at training time.
pub trait FeatureScaler: Send + Sync {
    /// Scale every row with the fitted parameters. Never re-fits.
    fn transform(&self, rows: &[FeatureRow]) -> Result<Vec<FeatureRow>>;
}
