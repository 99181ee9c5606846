//! Hour estimates and time tracking.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};

/// Finite, non-negative number of hours.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Hours(f64);

impl Hours {
    /// Zero hours.
    pub const ZERO: Self = Self(0.0);

    /// Creates a validated hour value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidHours`] for negative, NaN, or
    /// infinite values.
    pub fn new(value: f64) -> Result<Self, TaskDomainError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(TaskDomainError::InvalidHours(value))
        }
    }

    /// Returns the number of hours.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Hours {
    type Error = TaskDomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hours> for f64 {
    fn from(hours: Hours) -> Self {
        hours.0
    }
}

/// Estimated against actual effort of a task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeTracking {
    /// Estimated hours, zero when unset.
    pub estimated: f64,
    /// Actual hours, zero when unset.
    pub actual: f64,
    /// `estimated - actual`; negative when the task ran over.
    pub difference: f64,
}

impl TimeTracking {
    /// Computes time tracking from optional estimates.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "hour difference is a float by definition"
    )]
    pub fn from_hours(estimated: Option<Hours>, actual: Option<Hours>) -> Self {
        let estimated_value = estimated.unwrap_or(Hours::ZERO).value();
        let actual_value = actual.unwrap_or(Hours::ZERO).value();
        Self {
            estimated: estimated_value,
            actual: actual_value,
            difference: estimated_value - actual_value,
        }
    }
}
