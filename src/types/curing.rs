//! Curing ages the model is evaluated at

use serde::{Deserialize, Serialize};
use std::fmt;

/// Days since casting at which strength is predicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum CuringAge {
    Days7,
    Days14,
    Days28,
    Days56,
    Days90,
}

impl CuringAge {
    /// Every curing age, in ascending order.
    pub const ALL: [CuringAge; 5] = [
        CuringAge::Days7,
        CuringAge::Days14,
        CuringAge::Days28,
        CuringAge::Days56,
        CuringAge::Days90,
    ];

    pub fn days(self) -> u32 {
        match self {
            CuringAge::Days7 => 7,
            CuringAge::Days14 => 14,
            CuringAge::Days28 => 28,
            CuringAge::Days56 => 56,
            CuringAge::Days90 => 90,
        }
    }
}

impl From<CuringAge> for u32 {
    fn from(age: CuringAge) -> Self {
        age.days()
    }
}

impl TryFrom<u32> for CuringAge {
    type Error = String;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        CuringAge::ALL
            .into_iter()
            .find(|age| age.days() == days)
            .ok_or_else(|| format!("unsupported curing age: {} days", days))
    }
}

impl fmt::Display for CuringAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.days())
    }
}
