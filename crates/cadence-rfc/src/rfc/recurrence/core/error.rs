//! Structural validation errors for directly constructed rules.

use thiserror::Error;

/// Result type for model validation.
pub type StructuralResult<T> = Result<T, StructuralError>;

/// A directly constructed rule violates one of the model invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("UNTIL and COUNT are mutually exclusive")]
    UntilCountConflict,

    #[error("INTERVAL must be at least 1")]
    ZeroInterval,

    #[error("{field} must not be an empty list")]
    EmptyList { field: &'static str },

    #[error("UNTIL of an all-day rule must fall at midnight")]
    UntilNotMidnight,
}
