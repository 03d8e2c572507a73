//! Error types for store operations.
//!
//! The first three variants are the gateway's contract with its callers:
//! an unrecognized path, an invalid field, or a write the store rejected.
//! The rest surface lifecycle and conversion failures.

use inventory_core::{Column, CoreError, ValidationError};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The path is not recognized, or the operation is not supported on it.
    #[error("unsupported path: {0}")]
    UnsupportedPath(String),

    /// A required field is missing or a value is out of range. Carries the
    /// field name.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The underlying store rejected a write statement. Covers anything
    /// SQLite raises for an insert, update or delete, including a malformed
    /// caller selection on those paths.
    #[error("storage failure: {0}")]
    StorageFailure(String),

    /// SQLite operation failure outside a write, such as a query with a
    /// malformed selection or a lifecycle statement.
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    /// Schema lifecycle failure.
    #[error("migration error: {0}")]
    MigrationError(String),

    /// The file was written by a newer schema version.
    #[error("cannot downgrade database from version {from} to {to}")]
    Downgrade {
        /// Version found in the file.
        from: u32,
        /// Version requested by the caller.
        to: u32,
    },

    /// A row could not be converted into the requested type.
    #[error("conversion error: {0}")]
    ConversionError(String),

    /// A full item was requested from a cursor whose projection lacks a column.
    #[error("column {0} is not part of the projection")]
    IncompleteProjection(Column),

    /// Image or configuration failure from the core crate.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::InvalidArgument(err.field())
    }
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
