//! Core types for the inventory store.
//!
//! This crate holds everything about the inventory that does not need a
//! database:
//!
//! - [`contract`]: authority, path, table, column and MIME constants.
//! - [`UriMatch`]: classification of a resource path into the collection,
//!   a single item, or unsupported.
//! - [`Column`], [`Value`], [`ItemValues`], [`Item`]: the data model.
//! - [`validate_insert`] / [`validate_update`]: field rules for writes.
//! - [`thumbnail`]: JPEG encoding helpers and the [`Placeholder`] image.
//! - [`InventoryConfig`]: YAML configuration.
//!
//! # Example
//!
//! ```
//! use inventory_core::*;
//!
//! let values = ItemValues::new()
//!     .with(Column::Name, "Theraband")
//!     .with(Column::Supplier, "DJO Global")
//!     .with(Column::Price, 5);
//! assert!(validate_insert(&values).is_ok());
//! assert_eq!(UriMatch::classify("items/3"), UriMatch::SingleItem(3));
//! ```

pub mod contract;
mod config;
mod error;
pub mod thumbnail;
mod types;
pub mod uri;
mod validate;

pub use config::{DEFAULT_CONFIG_FILE, InventoryConfig};
pub use error::{CoreError, Result};
pub use thumbnail::Placeholder;
pub use types::*;
pub use uri::UriMatch;
pub use validate::{ValidationError, validate_insert, validate_update};
