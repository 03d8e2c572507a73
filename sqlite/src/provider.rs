//! The item gateway.
//!
//! [`ItemProvider`] is the only way clients read or write items. Every
//! request is addressed by a path that is classified once, up front, into the
//! collection, a single item, or unsupported. Writes are validated, get the
//! placeholder image substituted where the image is missing, and on success
//! signal observers of the written path.
//!
//! A single-item path always targets exactly that row: any selection the
//! caller passes alongside it is discarded.
//!
//! # Example
//!
//! ```
//! use inventory_core::{Column, ItemValues};
//! use inventory_sqlite::ItemProvider;
//!
//! let provider = ItemProvider::open_in_memory().unwrap();
//!
//! let values = ItemValues::new()
//!     .with(Column::Name, "Theraband")
//!     .with(Column::Supplier, "DJO Global")
//!     .with(Column::Price, 5)
//!     .with(Column::Quantity, 10);
//! let path = provider.insert("items", &values).unwrap();
//! assert_eq!(path, "items/1");
//!
//! let cursor = provider.query(&path, None, None, None).unwrap();
//! assert_eq!(cursor.items().unwrap()[0].name, "Theraband");
//!
//! let update = ItemValues::new().with(Column::Quantity, 7);
//! assert_eq!(provider.update(&path, &update, None).unwrap(), 1);
//! assert_eq!(provider.delete(&path, None).unwrap(), 1);
//! ```

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use inventory_core::contract::{CONTENT_ITEM_TYPE, CONTENT_LIST_TYPE, TABLE_NAME};
use inventory_core::thumbnail::DEFAULT_THUMBNAIL_EDGE;
use inventory_core::uri::with_appended_id;
use inventory_core::{
    Column, ItemValues, Placeholder, UriMatch, Value, validate_insert, validate_update,
};
use rusqlite::params_from_iter;
use tracing::{debug, error};

use crate::convert;
use crate::cursor::ItemCursor;
use crate::error::{Result, StoreError};
use crate::helper::{DbHelper, StoreStatus};
use crate::notify::{ChangeNotifier, Subscription};
use crate::selection::{Selection, SortOrder};

/// Validating CRUD gateway over the items table.
///
/// Owns its [`DbHelper`]; store access is serialized so one write completes
/// before the next begins. The provider is `Send + Sync` and can be shared
/// through an `Arc` by callers that keep I/O off their interactive thread.
pub struct ItemProvider {
    helper: Mutex<DbHelper>,
    notifier: Arc<ChangeNotifier>,
    placeholder: Placeholder,
}

impl ItemProvider {
    /// Creates a provider over an opened store.
    pub fn new(helper: DbHelper, placeholder: Placeholder) -> Self {
        Self {
            helper: Mutex::new(helper),
            notifier: Arc::new(ChangeNotifier::new()),
            placeholder,
        }
    }

    /// Opens the database at `path` with the built-in placeholder image.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let helper = DbHelper::open(path)?;
        Ok(Self::new(
            helper,
            Placeholder::builtin(DEFAULT_THUMBNAIL_EDGE)?,
        ))
    }

    /// Opens a private in-memory store with the built-in placeholder image.
    pub fn open_in_memory() -> Result<Self> {
        let helper = DbHelper::open_in_memory()?;
        Ok(Self::new(
            helper,
            Placeholder::builtin(DEFAULT_THUMBNAIL_EDGE)?,
        ))
    }

    /// Runs a query.
    ///
    /// `projection` of `None` (or an empty slice) selects every column. On a
    /// single-item path `selection` is replaced by an identifier match.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnsupportedPath`] for an unrecognized path;
    /// [`StoreError::DatabaseError`] if SQLite rejects the query (for
    /// example a malformed selection).
    pub fn query(
        &self,
        path: &str,
        projection: Option<&[Column]>,
        selection: Option<&Selection>,
        sort_order: Option<SortOrder>,
    ) -> Result<ItemCursor> {
        let matched = UriMatch::classify(path);
        debug!(path, ?matched, "query");
        let selection = resolve_selection(path, matched, selection)?;

        let columns: Vec<Column> = match projection {
            Some(columns) if !columns.is_empty() => columns.to_vec(),
            _ => Column::ALL.to_vec(),
        };
        let column_list: Vec<&str> = columns.iter().map(|c| c.name()).collect();

        let mut sql = format!("SELECT {} FROM {TABLE_NAME}", column_list.join(", "));
        push_where(&mut sql, selection.as_ref());
        if let Some(order) = sort_order {
            sql.push_str(" ORDER BY ");
            sql.push_str(&order.to_sql());
        }

        let helper = self.lock();
        let mut stmt = helper.connection().prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(selection_args(selection.as_ref())))?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let values = (0..columns.len())
                .map(|i| convert::from_sql(row.get_ref(i)?))
                .collect::<Result<Vec<_>>>()?;
            result.push(values);
        }

        Ok(ItemCursor::new(columns, result, path))
    }

    /// Inserts one item into the collection and returns its path.
    ///
    /// The returned path is `path` with the new identifier appended.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnsupportedPath`] unless `path` is the collection;
    /// [`StoreError::InvalidArgument`] naming the first invalid field;
    /// [`StoreError::StorageFailure`] if SQLite rejects the statement.
    pub fn insert(&self, path: &str, values: &ItemValues) -> Result<String> {
        let matched = UriMatch::classify(path);
        debug!(path, ?matched, "insert");
        if matched != UriMatch::Collection {
            return Err(StoreError::UnsupportedPath(format!(
                "insertion is not supported for {path}"
            )));
        }

        let mut values = validate_insert(values)?;
        if values.get(Column::Image).is_none_or(Value::is_null) {
            values.put(Column::Image, self.placeholder.bytes().to_vec());
        }

        let column_list: Vec<&str> = values.iter().map(|(c, _)| c.name()).collect();
        let placeholders = vec!["?"; column_list.len()].join(", ");
        let sql = format!(
            "INSERT INTO {TABLE_NAME} ({}) VALUES ({placeholders})",
            column_list.join(", ")
        );

        let id = {
            let helper = self.lock();
            let conn = helper.connection();
            conn.execute(&sql, params_from_iter(values.iter().map(|(_, v)| convert::to_sql(v))))
                .map_err(|e| {
                    error!(path, error = %e, "failed to insert row");
                    StoreError::StorageFailure(format!("failed to insert row for {path}: {e}"))
                })?;
            conn.last_insert_rowid()
        };

        self.notifier.notify_change(path);
        Ok(with_appended_id(path, id))
    }

    /// Updates the rows addressed by `path` and returns how many changed.
    ///
    /// Only the fields present in `values` are validated and written. An
    /// empty payload returns `0` without touching the store, and so does a
    /// path that matches no row.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnsupportedPath`] for an unrecognized path;
    /// [`StoreError::InvalidArgument`] naming the first invalid field;
    /// [`StoreError::StorageFailure`] if SQLite rejects the statement,
    /// including a malformed `selection`.
    pub fn update(
        &self,
        path: &str,
        values: &ItemValues,
        selection: Option<&Selection>,
    ) -> Result<usize> {
        let matched = UriMatch::classify(path);
        debug!(path, ?matched, fields = values.len(), "update");
        let selection = resolve_selection(path, matched, selection)?;

        let mut values = validate_update(values)?;
        if values.get(Column::Image).is_some_and(Value::is_null) {
            values.put(Column::Image, self.placeholder.bytes().to_vec());
        }
        if values.is_empty() {
            return Ok(0);
        }

        let assignments: Vec<String> = values
            .iter()
            .map(|(c, _)| format!("{} = ?", c.name()))
            .collect();
        let mut sql = format!("UPDATE {TABLE_NAME} SET {}", assignments.join(", "));
        push_where(&mut sql, selection.as_ref());

        let params = values
            .iter()
            .map(|(_, v)| convert::to_sql(v))
            .chain(selection_args(selection.as_ref()));
        let rows = self
            .lock()
            .connection()
            .execute(&sql, params_from_iter(params))
            .map_err(|e| {
                error!(path, error = %e, "failed to update rows");
                StoreError::StorageFailure(format!("failed to update {path}: {e}"))
            })?;

        if rows > 0 {
            self.notifier.notify_change(path);
        }
        Ok(rows)
    }

    /// Deletes the rows addressed by `path` and returns how many went.
    ///
    /// On the collection path with no selection every row is deleted.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnsupportedPath`] for an unrecognized path;
    /// [`StoreError::StorageFailure`] if SQLite rejects the statement,
    /// including a malformed `selection`.
    pub fn delete(&self, path: &str, selection: Option<&Selection>) -> Result<usize> {
        let matched = UriMatch::classify(path);
        debug!(path, ?matched, "delete");
        let selection = resolve_selection(path, matched, selection)?;

        let mut sql = format!("DELETE FROM {TABLE_NAME}");
        push_where(&mut sql, selection.as_ref());

        let rows = self
            .lock()
            .connection()
            .execute(&sql, params_from_iter(selection_args(selection.as_ref())))
            .map_err(|e| {
                error!(path, error = %e, "failed to delete rows");
                StoreError::StorageFailure(format!("failed to delete {path}: {e}"))
            })?;

        if rows > 0 {
            self.notifier.notify_change(path);
        }
        Ok(rows)
    }

    /// MIME type of the data at `path`.
    ///
    /// ```
    /// # use inventory_sqlite::ItemProvider;
    /// let provider = ItemProvider::open_in_memory().unwrap();
    /// assert_eq!(
    ///     provider.get_type("items/1").unwrap(),
    ///     "vnd.android.cursor.item/com.example.android.inventory/items"
    /// );
    /// assert!(provider.get_type("pets").is_err());
    /// ```
    pub fn get_type(&self, path: &str) -> Result<&'static str> {
        match UriMatch::classify(path) {
            UriMatch::Collection => Ok(CONTENT_LIST_TYPE),
            UriMatch::SingleItem(_) => Ok(CONTENT_ITEM_TYPE),
            UriMatch::Unsupported => Err(StoreError::UnsupportedPath(format!(
                "unknown path {path}"
            ))),
        }
    }

    /// The notifier writes are signalled through.
    pub fn notifier(&self) -> &Arc<ChangeNotifier> {
        &self.notifier
    }

    /// Observes the notification path of `cursor`, including changes to any
    /// single item under it.
    pub fn register_observer(&self, cursor: &ItemCursor) -> Subscription {
        self.notifier.register(cursor.notification_path(), true)
    }

    /// The image substituted for missing images.
    pub fn placeholder(&self) -> &Placeholder {
        &self.placeholder
    }

    /// Current state of the underlying store.
    pub fn status(&self) -> Result<StoreStatus> {
        self.lock().status()
    }

    /// Closes the underlying store.
    pub fn close(self) -> Result<()> {
        self.helper
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .close()
    }

    fn lock(&self) -> MutexGuard<'_, DbHelper> {
        self.helper.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Applies the path to the caller's selection: the collection keeps it, a
/// single item replaces it with an identifier match.
fn resolve_selection(
    path: &str,
    matched: UriMatch,
    selection: Option<&Selection>,
) -> Result<Option<Selection>> {
    match matched {
        UriMatch::Collection => Ok(selection.cloned()),
        UriMatch::SingleItem(id) => Ok(Some(Selection::by_id(id))),
        UriMatch::Unsupported => Err(StoreError::UnsupportedPath(path.to_string())),
    }
}

fn push_where(sql: &mut String, selection: Option<&Selection>) {
    if let Some(selection) = selection.filter(|s| !s.clause().trim().is_empty()) {
        sql.push_str(" WHERE ");
        sql.push_str(selection.clause());
    }
}

fn selection_args(selection: Option<&Selection>) -> Vec<rusqlite::types::Value> {
    selection
        .map(|s| s.args().iter().map(convert::to_sql).collect())
        .unwrap_or_default()
}
