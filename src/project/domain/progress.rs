//! Derived project progress percentage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Completion percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    /// Progress of a project without completed tasks.
    pub const ZERO: Self = Self(0);

    /// Computes `round(100 * completed / total)`, rounding halves up.
    ///
    /// Returns zero when `total` is zero. `completed` is capped at `total`.
    #[must_use]
    pub fn from_counts(completed: usize, total: usize) -> Self {
        let done = completed.min(total);
        let doubled_total = total.saturating_mul(2);
        let percent = done
            .saturating_mul(200)
            .saturating_add(total)
            .checked_div(doubled_total)
            .unwrap_or(0)
            .min(100);
        Self(u8::try_from(percent).unwrap_or(100))
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
