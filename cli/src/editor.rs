//! The item editor: raw form input to store values.

use std::path::PathBuf;

use inventory_core::thumbnail::load_thumbnail;
use inventory_core::{Column, CoreError, Item, ItemValues, Value};
use inventory_sqlite::{ItemProvider, StoreError};
use thiserror::Error;

/// Form input that cannot be turned into store values.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Item requires valid price")]
    MissingPrice,

    #[error("{field} must be a whole number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Image could not be loaded: {0}")]
    Image(#[from] CoreError),
}

/// Editor fields as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorForm {
    pub name: String,
    pub supplier: String,
    pub price: String,
    pub quantity: String,
    /// Image file picked for the item.
    pub image: Option<PathBuf>,
}

impl EditorForm {
    /// Fills the form from a stored item. The stored image is kept unless a
    /// new one is picked.
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            supplier: item.supplier.clone().unwrap_or_default(),
            price: item.price.to_string(),
            quantity: item.quantity.to_string(),
            image: None,
        }
    }

    /// Converts the form into values for the gateway.
    ///
    /// Every field is trimmed. A blank quantity becomes `0` and a blank
    /// supplier becomes null. The name is passed through as typed and left
    /// for the gateway to reject.
    pub fn to_values(&self, thumbnail_edge: u32) -> Result<ItemValues, FormError> {
        let price = self.price.trim();
        if price.is_empty() {
            return Err(FormError::MissingPrice);
        }
        let price = parse_number(Column::Price, price)?;

        let quantity = match self.quantity.trim() {
            "" => 0,
            raw => parse_number(Column::Quantity, raw)?,
        };

        let supplier = match self.supplier.trim() {
            "" => Value::Null,
            s => Value::from(s),
        };

        let mut values = ItemValues::new()
            .with(Column::Name, self.name.trim())
            .with(Column::Supplier, supplier)
            .with(Column::Price, price)
            .with(Column::Quantity, quantity);
        if let Some(path) = &self.image {
            values.put(Column::Image, load_thumbnail(path, thumbnail_edge)?);
        }
        Ok(values)
    }
}

fn parse_number(column: Column, raw: &str) -> Result<i64, FormError> {
    raw.parse().map_err(|_| FormError::InvalidNumber {
        field: column.name(),
        value: raw.to_string(),
    })
}

/// Whether the editor creates a new item or edits the one at a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(String),
}

/// Result of a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Path of the new item.
    Inserted(String),
    /// Rows changed; `0` means the item no longer exists.
    Updated(usize),
}

impl SaveOutcome {
    /// User-facing message for the outcome.
    pub fn message(&self) -> &'static str {
        match self {
            SaveOutcome::Inserted(_) => "Item saved",
            SaveOutcome::Updated(0) => "Error with updating item",
            SaveOutcome::Updated(_) => "Item updated",
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, SaveOutcome::Updated(0))
    }
}

impl EditorMode {
    /// Inserts or updates depending on the mode.
    pub fn save(
        &self,
        provider: &ItemProvider,
        values: &ItemValues,
    ) -> Result<SaveOutcome, StoreError> {
        match self {
            EditorMode::Create => provider
                .insert(inventory_core::contract::PATH_ITEMS, values)
                .map(SaveOutcome::Inserted),
            EditorMode::Edit(path) => provider
                .update(path, values, None)
                .map(SaveOutcome::Updated),
        }
    }
}

/// The sample item offered by "insert dummy data".
pub fn dummy_item() -> ItemValues {
    ItemValues::new()
        .with(Column::Name, "Theraband")
        .with(Column::Supplier, "DJO Global")
        .with(Column::Price, 5)
        .with(Column::Quantity, 10)
}
