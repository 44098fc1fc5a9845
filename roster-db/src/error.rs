//! Error types for roster-db

use thiserror::Error;

/// Failure while turning a fetched row into an entity
#[derive(Error, Debug)]
pub enum RowError {
    #[error("column '{column}' missing from row")]
    MissingColumn { column: String },

    #[error("column '{column}' is NULL but a value is required")]
    UnexpectedNull { column: String },

    #[error("column '{column}' is empty but a value is required")]
    EmptyValue { column: String },

    #[error("column '{column}' could not be decoded: {message}")]
    Decode { column: String, message: String },
}

/// Database error type
#[derive(Debug, Error)]
pub enum DbError {
    /// Anything raised by the driver or the server, including constraint violations
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("row mapping failed: {0}")]
    Mapping(#[from] RowError),
}
