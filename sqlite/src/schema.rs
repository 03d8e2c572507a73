//! SQL schema for the items table.
//!
//! One table, five data columns plus an autoincrementing primary key:
//!
//! | column     | type    | constraint            |
//! |------------|---------|-----------------------|
//! | `_id`      | INTEGER | primary key           |
//! | `name`     | TEXT    | NOT NULL              |
//! | `supplier` | TEXT    | nullable              |
//! | `price`    | INTEGER | NOT NULL              |
//! | `quantity` | INTEGER | NOT NULL DEFAULT 0    |
//! | `image`    | BLOB    | NOT NULL              |
//!
//! The statements are only used when the table is created or recreated; the
//! gateway refers to columns through [`Column`].

use inventory_core::Column;
use inventory_core::contract::TABLE_NAME;

/// Column definitions in table order.
const COLUMN_DEFINITIONS: [(Column, &str); 6] = [
    (Column::Id, "INTEGER PRIMARY KEY AUTOINCREMENT"),
    (Column::Name, "TEXT NOT NULL"),
    (Column::Supplier, "TEXT"),
    (Column::Price, "INTEGER NOT NULL"),
    (Column::Quantity, "INTEGER NOT NULL DEFAULT 0"),
    (Column::Image, "BLOB NOT NULL"),
];

/// Generates the `CREATE TABLE` statement for the items table.
pub fn create_table_sql() -> String {
    let columns: Vec<String> = COLUMN_DEFINITIONS
        .iter()
        .map(|(column, definition)| format!("{} {definition}", column.name()))
        .collect();
    format!("CREATE TABLE {TABLE_NAME} ({});", columns.join(", "))
}

/// Generates the statement dropping the items table.
pub fn drop_table_sql() -> String {
    format!("DROP TABLE IF EXISTS {TABLE_NAME};")
}
