//! Conversion between [`Value`] cells and SQLite values.

use inventory_core::Value;
use rusqlite::types::{Value as SqlValue, ValueRef};

use crate::error::{Result, StoreError};

/// Converts a cell into an owned SQLite value for binding.
pub(crate) fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Integer(n) => SqlValue::Integer(*n),
        Value::Text(s) => SqlValue::Text(s.clone()),
        Value::Blob(b) => SqlValue::Blob(b.clone()),
    }
}

/// Reads a SQLite value into a cell.
///
/// The items table has no REAL columns, so a floating-point value can only
/// come from a corrupted or foreign file and is reported as an error.
pub(crate) fn from_sql(value: ValueRef<'_>) -> Result<Value> {
    match value {
        ValueRef::Null => Ok(Value::Null),
        ValueRef::Integer(n) => Ok(Value::Integer(n)),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(|s| Value::Text(s.to_string()))
            .map_err(|e| StoreError::ConversionError(format!("invalid UTF-8 text: {e}"))),
        ValueRef::Blob(bytes) => Ok(Value::Blob(bytes.to_vec())),
        ValueRef::Real(r) => Err(StoreError::ConversionError(format!(
            "unexpected real value: {r}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_sql_maps_each_variant() {
        assert_eq!(to_sql(&Value::Null), SqlValue::Null);
        assert_eq!(to_sql(&Value::Integer(3)), SqlValue::Integer(3));
        assert_eq!(to_sql(&Value::from("x")), SqlValue::Text("x".into()));
        assert_eq!(to_sql(&Value::Blob(vec![1])), SqlValue::Blob(vec![1]));
    }

    #[test]
    fn test_from_sql_maps_each_variant() {
        assert_eq!(from_sql(ValueRef::Null).unwrap(), Value::Null);
        assert_eq!(from_sql(ValueRef::Integer(7)).unwrap(), Value::Integer(7));
        assert_eq!(from_sql(ValueRef::Text(b"abc")).unwrap(), Value::from("abc"));
        assert_eq!(from_sql(ValueRef::Blob(&[9, 9])).unwrap(), Value::Blob(vec![9, 9]));
    }

    #[test]
    fn test_from_sql_rejects_real_and_bad_utf8() {
        assert!(from_sql(ValueRef::Real(1.5)).is_err());
        assert!(from_sql(ValueRef::Text(&[0xff, 0xfe])).is_err());
    }
}
