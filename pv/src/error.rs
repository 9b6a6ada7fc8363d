//! Error types for collection operations

use thiserror::Error;

/// Errors from collection and transfer operations
///
/// None of these are fatal. An operation that returns an error has left
/// the collection exactly as it found it.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("{field} must not be empty")]
    EmptyInput { field: &'static str },

    #[error("Invalid import format: {0}")]
    Format(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for collection operations
pub type VaultResult<T> = Result<T, VaultError>;
