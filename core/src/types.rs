//! Item data model.
//!
//! [`Column`] names the six columns of the items table, [`Value`] is the
//! dynamically typed cell shared by write payloads, filter arguments and
//! query results, [`ItemValues`] is a write payload, and [`Item`] is a fully
//! materialized row.

use std::collections::BTreeMap;
use std::fmt;

use crate::contract::{
    COLUMN_ID, COLUMN_IMAGE, COLUMN_NAME, COLUMN_PRICE, COLUMN_QUANTITY, COLUMN_SUPPLIER,
};

/// A column of the items table.
///
/// Ordering follows table order, so iterating an [`ItemValues`] visits
/// `name` before `price` before `quantity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    /// `_id`, assigned by the store on insert and never written afterwards.
    Id,
    /// `name`
    Name,
    /// `supplier`
    Supplier,
    /// `price`
    Price,
    /// `quantity`
    Quantity,
    /// `image`
    Image,
}

impl Column {
    /// Every column, in table order.
    pub const ALL: [Column; 6] = [
        Column::Id,
        Column::Name,
        Column::Supplier,
        Column::Price,
        Column::Quantity,
        Column::Image,
    ];

    /// SQL name of the column.
    pub fn name(self) -> &'static str {
        match self {
            Column::Id => COLUMN_ID,
            Column::Name => COLUMN_NAME,
            Column::Supplier => COLUMN_SUPPLIER,
            Column::Price => COLUMN_PRICE,
            Column::Quantity => COLUMN_QUANTITY,
            Column::Image => COLUMN_IMAGE,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dynamically typed cell value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    /// SQL `NULL`.
    #[default]
    Null,
    /// 64-bit integer.
    Integer(i64),
    /// UTF-8 text.
    Text(String),
    /// Raw bytes.
    Blob(Vec<u8>),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Reads the value as an integer.
    ///
    /// Text that parses as a base-10 integer (after trimming) is accepted as
    /// well, so values typed into a form can be written without conversion.
    ///
    /// ```
    /// use inventory_core::Value;
    ///
    /// assert_eq!(Value::Integer(4).as_integer(), Some(4));
    /// assert_eq!(Value::from(" 12 ").as_integer(), Some(12));
    /// assert_eq!(Value::from("twelve").as_integer(), None);
    /// assert_eq!(Value::Null.as_integer(), None);
    /// ```
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns the text when the value is [`Value::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the bytes when the value is [`Value::Blob`].
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Value::Blob(b) => Some(b),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Blob(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// A set of column values to write.
///
/// Only the columns that were put are written; everything else is left to
/// the schema default (on insert) or untouched (on update).
///
/// # Examples
///
/// ```
/// use inventory_core::{Column, ItemValues, Value};
///
/// let values = ItemValues::new()
///     .with(Column::Name, "Theraband")
///     .with(Column::Price, 5);
/// assert_eq!(values.len(), 2);
/// assert_eq!(values.get(Column::Price), Some(&Value::Integer(5)));
/// assert!(!values.contains(Column::Quantity));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemValues {
    values: BTreeMap<Column, Value>,
}

impl ItemValues {
    /// Creates an empty value set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`put`](Self::put).
    pub fn with(mut self, column: Column, value: impl Into<Value>) -> Self {
        self.put(column, value);
        self
    }

    /// Sets `column`, replacing any previous value.
    pub fn put(&mut self, column: Column, value: impl Into<Value>) -> &mut Self {
        self.values.insert(column, value.into());
        self
    }

    /// Sets `column` to `NULL`.
    pub fn put_null(&mut self, column: Column) -> &mut Self {
        self.values.insert(column, Value::Null);
        self
    }

    /// Returns the value of `column` if it was put.
    pub fn get(&self, column: Column) -> Option<&Value> {
        self.values.get(&column)
    }

    /// Returns `true` if `column` was put (even as `NULL`).
    pub fn contains(&self, column: Column) -> bool {
        self.values.contains_key(&column)
    }

    /// Removes `column`, returning its value.
    pub fn remove(&mut self, column: Column) -> Option<Value> {
        self.values.remove(&column)
    }

    /// Number of columns put.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when nothing was put.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates `(column, value)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Column, &Value)> {
        self.values.iter().map(|(c, v)| (*c, v))
    }
}

impl FromIterator<(Column, Value)> for ItemValues {
    fn from_iter<I: IntoIterator<Item = (Column, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// One stored item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Store-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Supplier, if known.
    pub supplier: Option<String>,
    /// Unit price.
    pub price: i64,
    /// Units in stock.
    pub quantity: i64,
    /// JPEG thumbnail bytes.
    pub image: Vec<u8>,
}

impl Item {
    /// Returns every writable column of this item.
    pub fn to_values(&self) -> ItemValues {
        ItemValues::new()
            .with(Column::Name, self.name.as_str())
            .with(Column::Supplier, self.supplier.clone())
            .with(Column::Price, self.price)
            .with(Column::Quantity, self.quantity)
            .with(Column::Image, self.image.clone())
    }
}
