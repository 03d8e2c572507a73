//! Query results.
//!
//! An [`ItemCursor`] is a fully materialized result set: the projected
//! columns, the rows, and the path the query was made against. That path is
//! the cursor's notification path; observers registered on it learn when the
//! rows may be stale and re-query.

use inventory_core::{Column, Item, Value};

use crate::error::{Result, StoreError};

/// Rows returned by [`ItemProvider::query`](crate::ItemProvider::query).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCursor {
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
    notification_path: String,
}

impl ItemCursor {
    pub(crate) fn new(
        columns: Vec<Column>,
        rows: Vec<Vec<Value>>,
        notification_path: impl Into<String>,
    ) -> Self {
        Self {
            columns,
            rows,
            notification_path: notification_path.into(),
        }
    }

    /// Projected columns, in result order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Position of `column` in the projection.
    pub fn column_index(&self, column: Column) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when the query matched nothing.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Path whose changes make this result stale.
    pub fn notification_path(&self) -> &str {
        &self.notification_path
    }

    /// Row at `index`.
    pub fn row(&self, index: usize) -> Option<CursorRow<'_>> {
        self.rows.get(index).map(|values| CursorRow {
            columns: &self.columns,
            values,
        })
    }

    /// First row, if any.
    pub fn first(&self) -> Option<CursorRow<'_>> {
        self.row(0)
    }

    /// Iterates the rows in result order.
    pub fn rows(&self) -> impl Iterator<Item = CursorRow<'_>> {
        self.rows.iter().map(|values| CursorRow {
            columns: &self.columns,
            values,
        })
    }

    /// Materializes every row as an [`Item`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IncompleteProjection`] if the projection lacks
    /// a column.
    pub fn items(&self) -> Result<Vec<Item>> {
        self.rows().map(|row| row.to_item()).collect()
    }
}

/// Borrowed view of one cursor row.
#[derive(Debug, Clone, Copy)]
pub struct CursorRow<'a> {
    columns: &'a [Column],
    values: &'a [Value],
}

impl<'a> CursorRow<'a> {
    /// Value of `column`, or `None` if it is not projected.
    pub fn get(&self, column: Column) -> Option<&'a Value> {
        let index = self.columns.iter().position(|c| *c == column)?;
        self.values.get(index)
    }

    /// Integer value of `column`.
    pub fn get_i64(&self, column: Column) -> Option<i64> {
        match self.get(column)? {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Text value of `column`; `None` when not projected or null.
    pub fn get_str(&self, column: Column) -> Option<&'a str> {
        self.get(column)?.as_str()
    }

    /// Blob value of `column`; `None` when not projected or null.
    pub fn get_blob(&self, column: Column) -> Option<&'a [u8]> {
        self.get(column)?.as_blob()
    }

    /// Converts the row into an [`Item`].
    pub fn to_item(&self) -> Result<Item> {
        Ok(Item {
            id: self.required_i64(Column::Id)?,
            name: self
                .required(Column::Name)?
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| type_mismatch(Column::Name))?,
            supplier: match self.required(Column::Supplier)? {
                Value::Null => None,
                Value::Text(s) => Some(s.clone()),
                _ => return Err(type_mismatch(Column::Supplier)),
            },
            price: self.required_i64(Column::Price)?,
            quantity: self.required_i64(Column::Quantity)?,
            image: self
                .required(Column::Image)?
                .as_blob()
                .map(<[u8]>::to_vec)
                .ok_or_else(|| type_mismatch(Column::Image))?,
        })
    }

    fn required(&self, column: Column) -> Result<&'a Value> {
        self.get(column)
            .ok_or(StoreError::IncompleteProjection(column))
    }

    fn required_i64(&self, column: Column) -> Result<i64> {
        match self.required(column)? {
            Value::Integer(n) => Ok(*n),
            _ => Err(type_mismatch(column)),
        }
    }
}

fn type_mismatch(column: Column) -> StoreError {
    StoreError::ConversionError(format!("unexpected value type in column {column}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_cursor() -> ItemCursor {
        ItemCursor::new(
            Column::ALL.to_vec(),
            vec![vec![
                Value::Integer(1),
                Value::from("Theraband"),
                Value::Null,
                Value::Integer(5),
                Value::Integer(10),
                Value::Blob(vec![0xFF, 0xD8]),
            ]],
            "items",
        )
    }

    #[test]
    fn test_items_materializes_rows() {
        let items = full_cursor().items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Theraband");
        assert_eq!(items[0].supplier, None);
        assert_eq!(items[0].quantity, 10);
    }

    #[test]
    fn test_typed_accessors() {
        let cursor = full_cursor();
        let row = cursor.first().unwrap();
        assert_eq!(row.get_i64(Column::Price), Some(5));
        assert_eq!(row.get_str(Column::Name), Some("Theraband"));
        assert_eq!(row.get_str(Column::Supplier), None);
        assert_eq!(row.get_blob(Column::Image), Some(&[0xFF, 0xD8][..]));
        assert_eq!(row.get_i64(Column::Name), None);
    }

    #[test]
    fn test_partial_projection() {
        let cursor = ItemCursor::new(
            vec![Column::Name],
            vec![vec![Value::from("Bolt")]],
            "items/3",
        );
        assert_eq!(cursor.column_index(Column::Name), Some(0));
        assert_eq!(cursor.column_index(Column::Price), None);
        assert_eq!(cursor.notification_path(), "items/3");
        assert!(matches!(
            cursor.items(),
            Err(StoreError::IncompleteProjection(Column::Id))
        ));
    }

    #[test]
    fn test_empty_cursor() {
        let cursor = ItemCursor::new(Column::ALL.to_vec(), Vec::new(), "items");
        assert!(cursor.is_empty());
        assert!(cursor.first().is_none());
        assert!(cursor.items().unwrap().is_empty());
    }
}
