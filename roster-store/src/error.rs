//! Error types for the store crate.

use roster_core::StudentId;

/// Errors that can occur during record store operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// No record carries the requested id.
    #[error("no student found with id {0}")]
    NotFound(StudentId),

    /// The underlying database rejected or failed the operation.
    #[error("storage error: {0}")]
    Storage(String),

    /// Filesystem failure while preparing the database location.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Storage(format!("store task failed: {err}"))
    }
}
