//! Width/height limits for images and videos.

use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

use super::{Attachment, AttachmentValidator};
use crate::constraint::{requested, ConstraintName, Threshold, Violation};
use crate::media::{MediaKind, MediaProber, ProbeResult, ToolProber};
use crate::{Error, Result};

const VALIDATOR: &str = "attachment dimensions";

/// Requested dimension limits.
///
/// `None` means the limit was not requested. `Some(Threshold::NoLimit)` was
/// requested but is blank, which [`evaluate_dimensions`] rejects.
#[derive(Deserialize)]
#[serde(bound = "")]
pub struct DimensionConstraints<C = ()> {
    #[serde(default, deserialize_with = "requested")]
    pub max_x: Option<Threshold<C>>,
    #[serde(default, deserialize_with = "requested")]
    pub max_y: Option<Threshold<C>>,
}

impl<C> DimensionConstraints<C> {
    /// Constraints this validator understands.
    pub const AVAILABLE_CHECKS: [ConstraintName; 2] = [ConstraintName::MaxX, ConstraintName::MaxY];

    pub fn new() -> Self {
        Self {
            max_x: None,
            max_y: None,
        }
    }

    pub fn max_x(mut self, limit: impl Into<Threshold<C>>) -> Self {
        self.max_x = Some(limit.into());
        self
    }

    pub fn max_y(mut self, limit: impl Into<Threshold<C>>) -> Self {
        self.max_y = Some(limit.into());
        self
    }

    /// True when no limit was requested at all.
    pub fn is_empty(&self) -> bool {
        self.max_x.is_none() && self.max_y.is_none()
    }
}

impl<C> Default for DimensionConstraints<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for DimensionConstraints<C> {
    fn clone(&self) -> Self {
        Self {
            max_x: self.max_x.clone(),
            max_y: self.max_y.clone(),
        }
    }
}

impl<C> fmt::Debug for DimensionConstraints<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DimensionConstraints")
            .field("max_x", &self.max_x)
            .field("max_y", &self.max_y)
            .finish()
    }
}

/// Compare probed dimensions against the requested limits.
///
/// Reaching a limit already counts as exceeding it. Only requested limits
/// are checked, in `max_x`, `max_y` order. Unknown media is never evaluated.
///
/// # Errors
///
/// [`Error::BlankThreshold`] when a requested limit resolves to no value.
pub fn evaluate_dimensions<C>(
    result: &ProbeResult,
    constraints: &DimensionConstraints<C>,
    record: &C,
) -> Result<Vec<Violation>> {
    if result.kind == MediaKind::Unknown {
        return Ok(Vec::new());
    }

    let axes = [
        (ConstraintName::MaxX, "X-axis", result.width, &constraints.max_x),
        (ConstraintName::MaxY, "Y-axis", result.height, &constraints.max_y),
    ];

    let mut violations = Vec::new();
    for (constraint, axis, value, threshold) in axes {
        let Some(threshold) = threshold else {
            continue;
        };
        let limit = threshold
            .resolve(record)
            .ok_or(Error::BlankThreshold { constraint })?;

        if f64::from(value) >= limit {
            violations.push(Violation::new(
                constraint,
                format!("{axis} cannot exceed {limit}"),
            ));
        }
    }

    Ok(violations)
}

/// Validates the pixel dimensions of image and video attachments.
pub struct DimensionsValidator<C = ()> {
    constraints: DimensionConstraints<C>,
    prober: Arc<dyn MediaProber>,
}

impl<C> DimensionsValidator<C> {
    /// Build a validator, probing with a default [`ToolProber`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] when neither `max_x` nor `max_y` is
    /// requested.
    pub fn new(constraints: DimensionConstraints<C>) -> Result<Self> {
        if constraints.is_empty() {
            return Err(Error::InvalidConfiguration {
                validator: VALIDATOR,
                message: format!(
                    "one of {} must be given",
                    DimensionConstraints::<C>::AVAILABLE_CHECKS.map(|c| c.as_str()).join(", ")
                ),
            });
        }

        Ok(Self {
            constraints,
            prober: Arc::new(ToolProber::default()),
        })
    }

    /// Build a validator from a JSON object such as `{"max_x": 1920}`.
    pub fn from_json(json_str: &str) -> Result<Self> {
        Self::new(serde_json::from_str(json_str)?)
    }

    /// Replace the prober.
    pub fn with_prober(mut self, prober: Arc<dyn MediaProber>) -> Self {
        self.prober = prober;
        self
    }

    pub fn constraints(&self) -> &DimensionConstraints<C> {
        &self.constraints
    }
}

impl<C> AttachmentValidator<C> for DimensionsValidator<C> {
    fn validate(&self, record: &C, attachment: &Attachment) -> Result<Vec<Violation>> {
        let Some((path, kind)) = attachment.target() else {
            return Ok(Vec::new());
        };
        if !matches!(kind, MediaKind::Image | MediaKind::Video) {
            return Ok(Vec::new());
        }

        let result = ProbeResult::from_geometry(kind, self.prober.geometry(path, kind));
        let violations = evaluate_dimensions(&result, &self.constraints, record)?;

        tracing::debug!(
            path = %path.display(),
            width = result.width,
            height = result.height,
            complete = result.complete,
            violations = violations.len(),
            "validated attachment dimensions"
        );

        Ok(violations)
    }
}

impl<C> fmt::Debug for DimensionsValidator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DimensionsValidator")
            .field("constraints", &self.constraints)
            .finish_non_exhaustive()
    }
}
