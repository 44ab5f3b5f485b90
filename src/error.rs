//! Error types for mediaguard.

use crate::constraint::ConstraintName;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while setting up or running a validator.
///
/// Constraint violations are not errors; they are returned as
/// [`Violation`](crate::Violation)s.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A validator was built without any constraint it understands.
    #[error("invalid {validator} validator: {message}")]
    InvalidConfiguration {
        /// Which validator rejected its configuration.
        validator: &'static str,
        /// What is missing.
        message: String,
    },

    /// A requested dimension limit resolved to no value for this record.
    #[error("{constraint} was requested but resolved to no value")]
    BlankThreshold {
        /// The constraint whose threshold was blank.
        constraint: ConstraintName,
    },

    /// Probing tools are missing or misconfigured.
    #[error("probe error: {0}")]
    Probe(#[from] mediaguard_av::Error),

    /// Constraint configuration could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
