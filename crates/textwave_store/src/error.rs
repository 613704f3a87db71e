//! Error types for the store client

use thiserror::Error;

/// Errors that can occur when working with the store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    Config(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    Url(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    Pool(String),

    /// Error with a database query
    #[error("Database query error: {0}")]
    Query(String),

    /// A stored row holds data that cannot be decoded (e.g. malformed
    /// credentials JSON)
    #[error("Invalid stored data: {0}")]
    Data(String),
}
