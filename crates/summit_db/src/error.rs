//! Error types for the database client

use summit_config::ResolveError;
use thiserror::Error;

/// Errors that can occur when working with the database client
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// The connection target could not be resolved from the environment
    #[error("Database configuration error: {0}")]
    ResolveError(#[from] ResolveError),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with database connection
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// Error with database transaction
    #[error("Database transaction error: {0}")]
    TransactionError(String),

    /// A unique constraint rejected the write
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),
}

impl DbError {
    /// Whether the storage engine rejected a write because of a unique constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DbError::UniqueViolation(_) => true,
            DbError::SqlxError(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
            _ => false,
        }
    }

    /// Whether the error comes from configuration rather than the database itself.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DbError::ResolveError(_) | DbError::ConfigError(_) | DbError::UrlError(_)
        )
    }
}
