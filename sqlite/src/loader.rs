//! Self-refreshing queries.
//!
//! An [`ItemLoader`] remembers a query, runs it, and observes the result's
//! notification path. When a write lands on that path (or on an item under
//! it) the loader re-runs the query on request.

use std::sync::Arc;
use std::time::Duration;

use inventory_core::Column;
use tracing::debug;

use crate::cursor::ItemCursor;
use crate::error::Result;
use crate::notify::Subscription;
use crate::provider::ItemProvider;
use crate::selection::{Selection, SortOrder};

/// A stored query bound to its change notifications.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use inventory_core::{Column, ItemValues};
/// use inventory_sqlite::{ItemLoader, ItemProvider};
///
/// let provider = Arc::new(ItemProvider::open_in_memory().unwrap());
/// let mut loader = ItemLoader::new(provider.clone(), "items");
/// assert!(loader.load().unwrap().is_empty());
///
/// let values = ItemValues::new()
///     .with(Column::Name, "Bolt")
///     .with(Column::Price, 2);
/// provider.insert("items", &values).unwrap();
///
/// let refreshed = loader.take_refresh().unwrap().unwrap();
/// assert_eq!(refreshed.len(), 1);
/// assert!(loader.take_refresh().unwrap().is_none());
/// ```
pub struct ItemLoader {
    provider: Arc<ItemProvider>,
    path: String,
    projection: Option<Vec<Column>>,
    selection: Option<Selection>,
    sort_order: Option<SortOrder>,
    subscription: Option<Subscription>,
}

impl ItemLoader {
    /// Creates a loader for every column at `path`.
    pub fn new(provider: Arc<ItemProvider>, path: impl Into<String>) -> Self {
        Self {
            provider,
            path: path.into(),
            projection: None,
            selection: None,
            sort_order: None,
            subscription: None,
        }
    }

    /// Restricts the loaded columns.
    pub fn with_projection(mut self, projection: impl Into<Vec<Column>>) -> Self {
        self.projection = Some(projection.into());
        self
    }

    /// Filters the loaded rows.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Orders the loaded rows.
    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    /// Path the loader queries.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Runs the query and observes its notification path.
    ///
    /// Changes signalled before this call are discarded.
    pub fn load(&mut self) -> Result<ItemCursor> {
        // Register first so a write racing the query is not missed.
        let subscription = self.provider.notifier().register(&self.path, true);
        let cursor = self.provider.query(
            &self.path,
            self.projection.as_deref(),
            self.selection.as_ref(),
            self.sort_order,
        )?;
        debug!(path = %self.path, rows = cursor.len(), "loaded");
        self.subscription = Some(subscription);
        Ok(cursor)
    }

    /// Re-runs the query if a change is pending.
    ///
    /// Several pending changes result in a single query. Returns `None` when
    /// nothing changed or [`load`](Self::load) was never called.
    pub fn take_refresh(&mut self) -> Result<Option<ItemCursor>> {
        let changed = self
            .subscription
            .as_ref()
            .is_some_and(Subscription::drain);
        if changed { self.load().map(Some) } else { Ok(None) }
    }

    /// Waits up to `timeout` for a change, then re-runs the query.
    pub fn wait_refresh(&mut self, timeout: Duration) -> Result<Option<ItemCursor>> {
        let changed = self
            .subscription
            .as_ref()
            .and_then(|sub| sub.recv_timeout(timeout))
            .is_some();
        if changed { self.load().map(Some) } else { Ok(None) }
    }
}
