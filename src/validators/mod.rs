//! Attachment validators.
//!
//! The host framework extracts an [`Attachment`] from its record and calls
//! [`AttachmentValidator::validate`]; any returned [`Violation`]s belong on the
//! attachment field of that record.

mod dimensions;
mod length;

pub use dimensions::{evaluate_dimensions, DimensionConstraints, DimensionsValidator};
pub use length::{evaluate_duration, LengthConstraints, VideoLengthValidator};

use std::path::{Path, PathBuf};

use crate::media::MediaKind;
use crate::{Result, Violation};

/// The file under validation, as handed over by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attachment {
    /// Where the queued upload was written.
    pub file_path: Option<PathBuf>,
    /// Declared MIME type, e.g. `video/mp4`.
    pub content_type: Option<String>,
}

impl Attachment {
    pub fn new(file_path: impl Into<PathBuf>, content_type: impl Into<String>) -> Self {
        Self {
            file_path: Some(file_path.into()),
            content_type: Some(content_type.into()),
        }
    }

    /// Path and media class, or `None` when either input is blank.
    pub fn target(&self) -> Option<(&Path, MediaKind)> {
        let path = self
            .file_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())?;
        let content_type = self
            .content_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())?;
        Some((path, MediaKind::from_content_type(content_type)))
    }
}

/// A validator the host can run against any record of type `C`.
pub trait AttachmentValidator<C> {
    /// Check `attachment` against this validator's constraints.
    ///
    /// Blank attachments and content types outside the validator's scope
    /// yield no violations.
    fn validate(&self, record: &C, attachment: &Attachment) -> Result<Vec<Violation>>;
}
