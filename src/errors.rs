//! Error types for the change-tracking core
//!
//! Error codes:
//! - SVO_INVALID_ARGUMENT: argument lacks the required capability
//! - SVO_UNSUPPORTED_OPERATION: operation not meaningful for the receiver
//! - SVO_EXHAUSTED_SEQUENCE: iterator advanced past its end
//!
//! Errors are raised at the call site and never recovered internally.

use thiserror::Error;

use crate::container::ContainerKind;

/// Errors raised by version state, containers and graph access
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackError {
    /// Argument is not Versionable, or not a container, where one is required
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation is not supported by this receiver
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A filtered sequence was advanced with nothing left
    #[error("sequence exhausted")]
    ExhaustedSequence,
}

impl TrackError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            TrackError::InvalidArgument(_) => "SVO_INVALID_ARGUMENT",
            TrackError::UnsupportedOperation(_) => "SVO_UNSUPPORTED_OPERATION",
            TrackError::ExhaustedSequence => "SVO_EXHAUSTED_SEQUENCE",
        }
    }

    /// Node does not expose the Versionable capability
    pub fn not_versionable(type_name: &str) -> Self {
        TrackError::InvalidArgument(format!("{} is not versionable", type_name))
    }

    /// Node is not a change-tracking container
    pub fn not_container(type_name: &str) -> Self {
        TrackError::InvalidArgument(format!("{} is not a change-tracking container", type_name))
    }

    /// Keyed operation requested on a container without keys
    pub fn keyed_unsupported(kind: ContainerKind, op: &str) -> Self {
        TrackError::UnsupportedOperation(format!("{} on a {} container", op, kind))
    }

    /// Generic unsupported operation
    pub fn unsupported(op: impl Into<String>) -> Self {
        TrackError::UnsupportedOperation(op.into())
    }
}

/// Result type for tracking operations
pub type TrackResult<T> = Result<T, TrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(TrackError::not_versionable("i32").code(), "SVO_INVALID_ARGUMENT");
        assert_eq!(TrackError::unsupported("remove").code(), "SVO_UNSUPPORTED_OPERATION");
        assert_eq!(TrackError::ExhaustedSequence.code(), "SVO_EXHAUSTED_SEQUENCE");
    }

    #[test]
    fn test_keyed_unsupported_message() {
        let err = TrackError::keyed_unsupported(ContainerKind::Collection, "get");
        let display = err.to_string();
        assert!(display.contains("get"));
        assert!(display.contains("collection"));
    }
}
