//! Mediator errors

use thiserror::Error;

use crate::errors::TrackError;
use crate::version::VersionId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediatorError {
    /// No graph stored under the requested key
    #[error("graph not found: {0}")]
    NotFound(String),

    /// The graph was checked out at a different version than the one stored
    #[error("stale version: stored {expected}, graph carries {found}")]
    StaleVersion { expected: VersionId, found: VersionId },

    #[error(transparent)]
    Tracking(#[from] TrackError),

    /// Failure reported by the storage behind the mediator
    #[error("backend failure: {0}")]
    Backend(String),
}

impl MediatorError {
    pub fn code(&self) -> &'static str {
        match self {
            MediatorError::NotFound(_) => "SVO_MEDIATOR_NOT_FOUND",
            MediatorError::StaleVersion { .. } => "SVO_MEDIATOR_STALE_VERSION",
            MediatorError::Tracking(err) => err.code(),
            MediatorError::Backend(_) => "SVO_MEDIATOR_BACKEND",
        }
    }

    /// Concurrency conflicts can be retried after reloading the graph
    pub fn is_conflict(&self) -> bool {
        matches!(self, MediatorError::StaleVersion { .. })
    }
}

pub type MediatorResult<T> = Result<T, MediatorError>;
