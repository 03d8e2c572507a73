//! Row filters and sort orders accepted by the provider.

use inventory_core::{Column, Value};

/// A `WHERE` clause fragment with positional `?` placeholders.
///
/// # Examples
///
/// ```
/// use inventory_sqlite::Selection;
///
/// let cheap = Selection::new("price < ?", [10]);
/// assert_eq!(cheap.clause(), "price < ?");
/// assert_eq!(cheap.args().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    clause: String,
    args: Vec<Value>,
}

impl Selection {
    /// Creates a selection from a clause and its arguments.
    pub fn new<I, V>(clause: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            clause: clause.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Selects the single row with identifier `id`.
    pub fn by_id(id: i64) -> Self {
        Self::new(format!("{} = ?", Column::Id.name()), [id])
    }

    /// The clause text.
    pub fn clause(&self) -> &str {
        &self.clause
    }

    /// The positional arguments.
    pub fn args(&self) -> &[Value] {
        &self.args
    }
}

/// Result ordering for queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    /// Column to sort by.
    pub column: Column,
    /// Sort largest first.
    pub descending: bool,
}

impl SortOrder {
    /// Ascending order on `column`.
    pub fn ascending(column: Column) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    /// Descending order on `column`.
    pub fn descending(column: Column) -> Self {
        Self {
            column,
            descending: true,
        }
    }

    pub(crate) fn to_sql(self) -> String {
        let direction = if self.descending { "DESC" } else { "ASC" };
        format!("{} {direction}", self.column.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_id() {
        let selection = Selection::by_id(4);
        assert_eq!(selection.clause(), "_id = ?");
        assert_eq!(selection.args(), &[Value::Integer(4)]);
    }

    #[test]
    fn test_sort_order_sql() {
        assert_eq!(SortOrder::ascending(Column::Name).to_sql(), "name ASC");
        assert_eq!(SortOrder::descending(Column::Price).to_sql(), "price DESC");
    }
}
