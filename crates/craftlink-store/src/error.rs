//! Error types for the craftlink-store crate.
//!
//! All storage operations return [`StoreError`] via [`StoreResult`].
//! Note that a malformed stored blob is deliberately NOT an error:
//! [`crate::kv::KvStore::read`] absorbs it and returns the default value
//! (fail-open), so only infrastructure failures surface here.

use thiserror::Error;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite operation failed.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// JSON serialization failed while writing a blob.
    ///
    /// Deserialization failures never produce this variant — reads fail
    /// open to the default value instead.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A schema migration failed.
    #[error("migration v{version} failed: {message}")]
    Migration { version: u32, message: String },

    /// A blocking task was cancelled or panicked.
    #[error("background task failed: {0}")]
    TaskJoin(String),
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskJoin(err.to_string())
    }
}
