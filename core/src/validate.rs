//! Field-level validation of write payloads.
//!
//! Inserts must carry a non-empty `name` and a non-negative `price`;
//! `quantity` is optional but non-negative when given. Updates apply the same
//! rule to each field they carry and leave absent fields alone. The identifier
//! column is never writable.
//!
//! Validation also normalizes integer fields given as numeric text into
//! [`Value::Integer`], so the returned payload can be bound as-is.
//!
//! # Examples
//!
//! ```
//! use inventory_core::{Column, ItemValues, ValidationError, validate_insert};
//!
//! let ok = ItemValues::new().with(Column::Name, "Theraband").with(Column::Price, 5);
//! assert!(validate_insert(&ok).is_ok());
//!
//! let negative = ItemValues::new().with(Column::Name, "Theraband").with(Column::Price, -1);
//! assert_eq!(validate_insert(&negative), Err(ValidationError::InvalidPrice));
//! ```

use thiserror::Error;

use crate::types::{Column, ItemValues, Value};

/// Validation failures. Each names the offending field via
/// [`field`](Self::field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `name` missing, null, not text, or blank.
    #[error("Item requires a name")]
    MissingName,
    /// `price` missing, not an integer, or negative.
    #[error("Item requires valid price")]
    InvalidPrice,
    /// `quantity` not an integer or negative.
    #[error("Item requires valid quantity")]
    InvalidQuantity,
    /// `supplier` is neither text nor null.
    #[error("Item supplier must be text")]
    InvalidSupplier,
    /// `image` is neither a blob nor null.
    #[error("Item image must be binary data")]
    InvalidImage,
    /// Attempt to write a store-managed column.
    #[error("column {0} is read-only")]
    ReadOnlyColumn(Column),
}

impl ValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingName => Column::Name.name(),
            Self::InvalidPrice => Column::Price.name(),
            Self::InvalidQuantity => Column::Quantity.name(),
            Self::InvalidSupplier => Column::Supplier.name(),
            Self::InvalidImage => Column::Image.name(),
            Self::ReadOnlyColumn(column) => column.name(),
        }
    }
}

/// Validates an insert payload and returns its normalized form.
///
/// # Errors
///
/// Fails on a missing `name` or `price` and on any present field that breaks
/// its rule. Fields are checked in table order, so the first failure
/// reported for a payload is deterministic.
pub fn validate_insert(values: &ItemValues) -> Result<ItemValues, ValidationError> {
    if !values.contains(Column::Name) {
        return Err(ValidationError::MissingName);
    }
    if !values.contains(Column::Price) {
        return Err(ValidationError::InvalidPrice);
    }
    normalize(values)
}

/// Validates an update payload and returns its normalized form.
///
/// Only the fields present are checked; an empty payload is valid.
pub fn validate_update(values: &ItemValues) -> Result<ItemValues, ValidationError> {
    normalize(values)
}

fn normalize(values: &ItemValues) -> Result<ItemValues, ValidationError> {
    values
        .iter()
        .map(|(column, value)| check_field(column, value).map(|v| (column, v)))
        .collect()
}

fn check_field(column: Column, value: &Value) -> Result<Value, ValidationError> {
    match column {
        Column::Id => Err(ValidationError::ReadOnlyColumn(column)),
        Column::Name => match value {
            Value::Text(name) if !name.trim().is_empty() => Ok(value.clone()),
            _ => Err(ValidationError::MissingName),
        },
        Column::Supplier => match value {
            Value::Null | Value::Text(_) => Ok(value.clone()),
            _ => Err(ValidationError::InvalidSupplier),
        },
        Column::Price => non_negative(value)
            .map(Value::Integer)
            .ok_or(ValidationError::InvalidPrice),
        Column::Quantity => non_negative(value)
            .map(Value::Integer)
            .ok_or(ValidationError::InvalidQuantity),
        Column::Image => match value {
            Value::Null | Value::Blob(_) => Ok(value.clone()),
            _ => Err(ValidationError::InvalidImage),
        },
    }
}

fn non_negative(value: &Value) -> Option<i64> {
    value.as_integer().filter(|n| *n >= 0)
}
