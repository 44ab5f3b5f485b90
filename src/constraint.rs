//! Constraint names, thresholds, and violations.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;

/// Every limit a validator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintName {
    /// Upper bound on width.
    MaxX,
    /// Upper bound on height.
    MaxY,
    /// Lower bound on video duration in seconds.
    MinLength,
    /// Upper bound on video duration in seconds.
    MaxLength,
}

impl ConstraintName {
    /// The option key, e.g. `max_x`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintName::MaxX => "max_x",
            ConstraintName::MaxY => "max_y",
            ConstraintName::MinLength => "min_length",
            ConstraintName::MaxLength => "max_length",
        }
    }
}

impl fmt::Display for ConstraintName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signature of a threshold computed from the record under validation.
pub type ThresholdFn<C> = dyn Fn(&C) -> Option<f64> + Send + Sync;

/// A numeric limit, known up front or computed per record.
///
/// Deferred thresholds let one validator carry different limits per record,
/// e.g. 1920 pixels for `image/gif` but no limit for `image/png`.
pub enum Threshold<C = ()> {
    /// A fixed limit.
    Limit(f64),
    /// Explicitly no limit.
    NoLimit,
    /// Computed from the record at validation time; `None` means no limit.
    Deferred(Arc<ThresholdFn<C>>),
}

impl<C> Threshold<C> {
    /// Wrap a closure as a deferred threshold.
    pub fn deferred<F>(f: F) -> Self
    where
        F: Fn(&C) -> Option<f64> + Send + Sync + 'static,
    {
        Threshold::Deferred(Arc::new(f))
    }

    /// Resolve against `record`. Called once per evaluation, right before
    /// comparing.
    pub fn resolve(&self, record: &C) -> Option<f64> {
        match self {
            Threshold::Limit(limit) => Some(*limit),
            Threshold::NoLimit => None,
            Threshold::Deferred(f) => f(record),
        }
    }
}

impl<C> Clone for Threshold<C> {
    fn clone(&self) -> Self {
        match self {
            Threshold::Limit(limit) => Threshold::Limit(*limit),
            Threshold::NoLimit => Threshold::NoLimit,
            Threshold::Deferred(f) => Threshold::Deferred(Arc::clone(f)),
        }
    }
}

impl<C> fmt::Debug for Threshold<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Limit(limit) => f.debug_tuple("Limit").field(limit).finish(),
            Threshold::NoLimit => f.write_str("NoLimit"),
            Threshold::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl<C> From<f64> for Threshold<C> {
    fn from(limit: f64) -> Self {
        Threshold::Limit(limit)
    }
}

impl<C> From<u32> for Threshold<C> {
    fn from(limit: u32) -> Self {
        Threshold::Limit(f64::from(limit))
    }
}

impl<C> From<Option<f64>> for Threshold<C> {
    fn from(limit: Option<f64>) -> Self {
        limit.map_or(Threshold::NoLimit, Threshold::Limit)
    }
}

/// A JSON number is a fixed limit; `null` is "no limit".
impl<'de, C> Deserialize<'de> for Threshold<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<f64>::deserialize(deserializer).map(Threshold::from)
    }
}

/// Keeps an explicit `null` distinct from a missing key: the former is a
/// requested-but-blank constraint, the latter is not requested at all.
pub(crate) fn requested<'de, D, C>(deserializer: D) -> Result<Option<Threshold<C>>, D::Error>
where
    D: Deserializer<'de>,
{
    Threshold::deserialize(deserializer).map(Some)
}

/// A failed constraint check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// The constraint that failed.
    pub constraint: ConstraintName,
    /// Message for the end user.
    pub message: String,
}

impl Violation {
    pub fn new(constraint: ConstraintName, message: impl Into<String>) -> Self {
        Self {
            constraint,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
