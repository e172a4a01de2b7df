//! Error types for the atlas-store crate.
//!
//! All storage operations return [`StoreError`] via [`StoreResult`].

use thiserror::Error;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the storage engine.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite operation failed.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// JSON serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The database was written by a newer layout than this build knows.
    #[error("database schema v{found} is newer than supported v{supported}")]
    UnsupportedSchema { found: i32, supported: i32 },

    /// A record with the same identifier is already in the collection.
    #[error("{entity} already exists: {id}")]
    Duplicate { entity: &'static str, id: String },

    /// A record was rejected by the intent engine.
    #[error("intent error: {0}")]
    Intent(#[from] atlas_intent::IntentError),

    /// A blocking task was cancelled or panicked.
    #[error("background task failed: {0}")]
    TaskJoin(String),
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskJoin(err.to_string())
    }
}
