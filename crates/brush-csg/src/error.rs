//! Error types for brush operations.

use thiserror::Error;

/// Result type alias for kernel operations.
pub type CsgResult<T> = Result<T, CsgError>;

/// Errors that can occur while building or operating on brushes.
///
/// Public operation entry points never return these directly; they are
/// folded into the `error_message` of the operation's result envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsgError {
    /// Malformed input: bad mesh arrays, too few brushes, invalid brushes.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Geometry that cannot support the operation (collinear or coplanar
    /// point sets, zero-length normals, bad wall thickness).
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A lower-level construction failed where it was expected to succeed.
    #[error("internal failure: {0}")]
    InternalFailure(String),
}

impl CsgError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(details: impl Into<String>) -> Self {
        Self::InvalidInput(details.into())
    }

    /// Create a degenerate geometry error.
    #[must_use]
    pub fn degenerate(details: impl Into<String>) -> Self {
        Self::DegenerateGeometry(details.into())
    }

    /// Create an internal failure error.
    #[must_use]
    pub fn internal(details: impl Into<String>) -> Self {
        Self::InternalFailure(details.into())
    }
}
