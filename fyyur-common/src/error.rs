//! Common error types for Fyyur

use thiserror::Error;

/// Common result type for Fyyur operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by data access, form handling and view assembly
#[derive(Error, Debug)]
pub enum Error {
    /// The store rejected or failed an operation (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Submitted form field missing or malformed
    #[error("Invalid input: {0}")]
    Validation(String),
}

impl Error {
    /// Shorthand for a missing record of the given kind
    pub fn not_found(kind: &str, id: i64) -> Self {
        Error::NotFound(format!("{} {} does not exist", kind, id))
    }
}
