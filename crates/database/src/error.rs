//! Store error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage substrate cannot be reached or opened. The only condition
    /// callers should treat as fatal to the current operation.
    #[error("storage unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    /// Any other database failure (query, decode, constraint).
    #[error("database error: {0}")]
    Sqlx(#[source] sqlx::Error),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Label lookup matched nothing. A normal outcome, not a failure.
    #[error("{entity} not found: {label}")]
    NotFound { entity: &'static str, label: String },

    /// A write violated input constraints (empty label, oversized value).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err),
            other => StoreError::Sqlx(other),
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
