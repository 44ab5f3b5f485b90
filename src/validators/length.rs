//! Duration limits for videos.

use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

use super::{Attachment, AttachmentValidator};
use crate::constraint::{requested, ConstraintName, Threshold, Violation};
use crate::media::{MediaKind, MediaProber, ToolProber};
use crate::{Error, Result};

const VALIDATOR: &str = "video length";

/// Requested duration limits in seconds.
///
/// Unlike dimension limits, a requested limit that resolves to no value is
/// simply skipped.
#[derive(Deserialize)]
#[serde(bound = "")]
pub struct LengthConstraints<C = ()> {
    #[serde(default, deserialize_with = "requested")]
    pub min_length: Option<Threshold<C>>,
    #[serde(default, deserialize_with = "requested")]
    pub max_length: Option<Threshold<C>>,
}

impl<C> LengthConstraints<C> {
    /// Constraints this validator understands.
    pub const AVAILABLE_CHECKS: [ConstraintName; 2] =
        [ConstraintName::MinLength, ConstraintName::MaxLength];

    pub fn new() -> Self {
        Self {
            min_length: None,
            max_length: None,
        }
    }

    pub fn min_length(mut self, seconds: impl Into<Threshold<C>>) -> Self {
        self.min_length = Some(seconds.into());
        self
    }

    pub fn max_length(mut self, seconds: impl Into<Threshold<C>>) -> Self {
        self.max_length = Some(seconds.into());
        self
    }

    /// True when no limit was requested at all.
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none() && self.max_length.is_none()
    }
}

impl<C> Default for LengthConstraints<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for LengthConstraints<C> {
    fn clone(&self) -> Self {
        Self {
            min_length: self.min_length.clone(),
            max_length: self.max_length.clone(),
        }
    }
}

impl<C> fmt::Debug for LengthConstraints<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LengthConstraints")
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .finish()
    }
}

/// Compare a probed duration against the requested limits.
///
/// An unknown duration fails every limit that resolves to a value. A known
/// one fails `min_length` when shorter and `max_length` when strictly longer;
/// running exactly `max_length` seconds passes.
pub fn evaluate_duration<C>(
    duration_seconds: Option<f64>,
    constraints: &LengthConstraints<C>,
    record: &C,
) -> Vec<Violation> {
    let checks = [
        (ConstraintName::MinLength, "minimum length", &constraints.min_length),
        (ConstraintName::MaxLength, "maximum length", &constraints.max_length),
    ];

    let mut violations = Vec::new();
    for (constraint, label, threshold) in checks {
        let Some(limit) = threshold.as_ref().and_then(|t| t.resolve(record)) else {
            continue;
        };

        let failed = match (duration_seconds, constraint) {
            (None, _) => true,
            (Some(seconds), ConstraintName::MinLength) => seconds < limit,
            (Some(seconds), _) => seconds > limit,
        };

        if failed {
            // Same wording for both directions.
            violations.push(Violation::new(
                constraint,
                format!("Asset cannot exceed {label} of {limit}"),
            ));
        }
    }

    violations
}

/// Validates the running time of video attachments.
pub struct VideoLengthValidator<C = ()> {
    constraints: LengthConstraints<C>,
    prober: Arc<dyn MediaProber>,
}

impl<C> VideoLengthValidator<C> {
    /// Build a validator, probing with a default [`ToolProber`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] when neither `min_length` nor
    /// `max_length` is requested.
    pub fn new(constraints: LengthConstraints<C>) -> Result<Self> {
        if constraints.is_empty() {
            return Err(Error::InvalidConfiguration {
                validator: VALIDATOR,
                message: format!(
                    "one of {} must be given",
                    LengthConstraints::<C>::AVAILABLE_CHECKS.map(|c| c.as_str()).join(", ")
                ),
            });
        }

        Ok(Self {
            constraints,
            prober: Arc::new(ToolProber::default()),
        })
    }

    /// Build a validator from a JSON object such as `{"max_length": 60}`.
    pub fn from_json(json_str: &str) -> Result<Self> {
        Self::new(serde_json::from_str(json_str)?)
    }

    /// Replace the prober.
    pub fn with_prober(mut self, prober: Arc<dyn MediaProber>) -> Self {
        self.prober = prober;
        self
    }

    pub fn constraints(&self) -> &LengthConstraints<C> {
        &self.constraints
    }
}

impl<C> AttachmentValidator<C> for VideoLengthValidator<C> {
    fn validate(&self, record: &C, attachment: &Attachment) -> Result<Vec<Violation>> {
        let Some((path, kind)) = attachment.target() else {
            return Ok(Vec::new());
        };
        if kind != MediaKind::Video {
            return Ok(Vec::new());
        }

        let duration = self.prober.video_duration(path);
        let violations = evaluate_duration(duration, &self.constraints, record);

        tracing::debug!(
            path = %path.display(),
            duration = ?duration,
            violations = violations.len(),
            "validated video length"
        );

        Ok(violations)
    }
}

impl<C> fmt::Debug for VideoLengthValidator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoLengthValidator")
            .field("constraints", &self.constraints)
            .finish_non_exhaustive()
    }
}
