//! Capability port error types.

use thiserror::Error;

/// Failures raised by a collaborator, as opposed to an operation that ran
/// and reported `success = false` through `ActionOutcome`.
#[derive(Debug, Error)]
pub enum PortError {
    #[error("capability unavailable: {0}")]
    Unavailable(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("{0}")]
    Other(String),
}

/// Convenience alias for port results.
pub type PortResult<T> = Result<T, PortError>;
