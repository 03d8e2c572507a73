//! SQLite persistence for the inventory.
//!
//! This crate keeps the items table in a single SQLite file and exposes it
//! through a path-addressed gateway. It includes schema lifecycle management,
//! validated CRUD, and change notification so that open views can refresh
//! after a write.
//!
//! # Architecture
//!
//! - **`schema`**: the items table DDL
//! - **`helper`**: opening the file and keeping its schema version current
//! - **`provider`**: the validating CRUD gateway
//! - **`notify`**: change signals keyed by path
//! - **`loader`**: queries that re-run when their data changes
//!
//! # Quick start
//!
//! ```no_run
//! use inventory_core::{Column, ItemValues};
//! use inventory_sqlite::{ItemProvider, SortOrder};
//!
//! let provider = ItemProvider::open("inventory.db").unwrap();
//!
//! let values = ItemValues::new()
//!     .with(Column::Name, "Theraband")
//!     .with(Column::Price, 5);
//! let path = provider.insert("items", &values).unwrap();
//! println!("inserted {path}");
//!
//! let cursor = provider
//!     .query("items", None, None, Some(SortOrder::ascending(Column::Name)))
//!     .unwrap();
//! for item in cursor.items().unwrap() {
//!     println!("{} x{}", item.name, item.quantity);
//! }
//! ```
//!
//! # Schema versions
//!
//! The file's schema version is kept in SQLite's `user_version`. Opening an
//! older file discards its rows and recreates the table; opening a newer one
//! fails with [`StoreError::Downgrade`].

mod convert;
mod cursor;
mod error;
mod helper;
mod loader;
mod notify;
mod provider;
pub mod schema;
mod selection;

pub use cursor::{CursorRow, ItemCursor};
pub use error::{Result, StoreError};
pub use helper::{DbHelper, StoreStatus};
pub use loader::ItemLoader;
pub use notify::{Change, ChangeNotifier, Subscription};
pub use provider::ItemProvider;
pub use selection::{Selection, SortOrder};
