//! List and detail presentation of items.

use inventory_core::{Column, Item};
use inventory_sqlite::{CursorRow, ItemCursor, StoreError};
use serde::Serialize;

/// Shown in place of an empty or missing supplier.
pub const UNKNOWN_SUPPLIER: &str = "Unknown supplier";

/// One line of the item list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    pub id: i64,
    pub name: String,
    pub supplier: String,
    pub price: i64,
    pub quantity: i64,
    /// Size of the stored thumbnail in bytes; `0` when not projected.
    pub image_bytes: usize,
}

impl ListRow {
    /// Binds a cursor row. The projection must include every column except
    /// `image`.
    pub fn bind(row: &CursorRow<'_>) -> Result<Self, StoreError> {
        let require_i64 = |column| {
            row.get_i64(column)
                .ok_or(StoreError::IncompleteProjection(column))
        };
        let supplier = row
            .get_str(Column::Supplier)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SUPPLIER);

        Ok(Self {
            id: require_i64(Column::Id)?,
            name: row
                .get_str(Column::Name)
                .ok_or(StoreError::IncompleteProjection(Column::Name))?
                .to_string(),
            supplier: supplier.to_string(),
            price: require_i64(Column::Price)?,
            quantity: require_i64(Column::Quantity)?,
            image_bytes: row.get_blob(Column::Image).map_or(0, <[u8]>::len),
        })
    }
}

/// The whole list, as serialized for `--format json|yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub count: usize,
    pub items: Vec<ListRow>,
}

impl ListView {
    pub fn from_cursor(cursor: &ItemCursor) -> Result<Self, StoreError> {
        let items = cursor
            .rows()
            .map(|row| ListRow::bind(&row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            count: items.len(),
            items,
        })
    }
}

/// A single item, as shown by `show`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemDetail {
    pub id: i64,
    pub name: String,
    pub supplier: Option<String>,
    pub price: i64,
    pub quantity: i64,
    pub image_bytes: usize,
}

impl From<&Item> for ItemDetail {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            supplier: item.supplier.clone(),
            price: item.price,
            quantity: item.quantity,
            image_bytes: item.image.len(),
        }
    }
}

impl ItemDetail {
    /// Renders `label: value` lines.
    pub fn render(&self) -> String {
        let supplier = self
            .supplier
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SUPPLIER);
        format!(
            "Id:       {}\nName:     {}\nSupplier: {}\nPrice:    {}\nQuantity: {}\nImage:    {} bytes\n",
            self.id, self.name, supplier, self.price, self.quantity, self.image_bytes
        )
    }
}

/// Lays rows out in aligned columns under a header.
pub fn render_table(rows: &[ListRow]) -> String {
    const HEADERS: [&str; 6] = ["ID", "NAME", "SUPPLIER", "PRICE", "QTY", "IMAGE"];

    let cells: Vec<[String; 6]> = rows
        .iter()
        .map(|r| {
            [
                r.id.to_string(),
                r.name.clone(),
                r.supplier.clone(),
                r.price.to_string(),
                r.quantity.to_string(),
                format!("{}B", r.image_bytes),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
