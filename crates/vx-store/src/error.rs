//! Error types for project persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by a [`crate::ProjectStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("project not found: {project_id}")]
    NotFound { project_id: String },

    /// The record exists but belongs to someone else.
    #[error("project {project_id} is not owned by {owner}")]
    Forbidden { project_id: String, owner: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse project record at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize project {project_id}: {source}")]
    Serialize {
        project_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("project store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether repeating the same call later may succeed unchanged.
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Unavailable(_) => true,
            StoreError::Io { source, .. } => matches!(
                source.kind(),
                std::io::ErrorKind::Interrupted
                    | std::io::ErrorKind::WouldBlock
                    | std::io::ErrorKind::TimedOut
            ),
            _ => false,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<StoreError> for vx_common::Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { project_id } => vx_common::Error::ProjectNotFound { project_id },
            StoreError::Forbidden { project_id, owner } => {
                vx_common::Error::Forbidden { project_id, owner }
            }
            StoreError::Io { source, .. } => vx_common::Error::Io(source),
            StoreError::Corrupt { .. } => vx_common::Error::StoreCorrupted(err.to_string()),
            other => vx_common::Error::StoreUnavailable(other.to_string()),
        }
    }
}
