//! # mediaguard
//!
//! Dimension and duration validators for uploaded media attachments.
//!
//! The host framework hands over a file path and declared content type; the
//! validators probe the file (via `mediaguard-av`) and return the
//! [`Violation`]s the host should report on the attachment field.
//!
//! ## Example
//!
//! ```no_run
//! use mediaguard::{
//!     Attachment, AttachmentValidator, DimensionConstraints, DimensionsValidator,
//! };
//!
//! let validator = DimensionsValidator::new(
//!     DimensionConstraints::new().max_x(1920u32).max_y(1080u32),
//! )?;
//!
//! let upload = Attachment::new("/tmp/upload.png", "image/png");
//! for violation in validator.validate(&(), &upload)? {
//!     println!("avatar: {violation}");
//! }
//! # Ok::<(), mediaguard::Error>(())
//! ```

pub mod constraint;
mod error;
pub mod media;
pub mod validators;

// Re-exports
pub use constraint::{ConstraintName, Threshold, Violation};
pub use error::{Error, Result};
pub use media::{MediaKind, MediaProber, ProbeResult, ToolProber};
pub use mediaguard_av::ProbeSettings;
pub use validators::{
    evaluate_dimensions, evaluate_duration, Attachment, AttachmentValidator,
    DimensionConstraints, DimensionsValidator, LengthConstraints, VideoLengthValidator,
};
