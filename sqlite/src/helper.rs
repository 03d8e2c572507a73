//! Database lifecycle management.
//!
//! [`DbHelper`] owns the connection to the single database file and keeps its
//! schema at the expected version. The version lives in SQLite's
//! `user_version` pragma:
//!
//! - `0` means a fresh file: the table is created ([`DbHelper::on_create`]).
//! - An older version triggers [`DbHelper::on_upgrade`], which drops and
//!   recreates the table. Stored rows are discarded; the database is a cache.
//! - A newer version is refused with [`StoreError::Downgrade`].
//!
//! # Example
//!
//! ```no_run
//! use inventory_sqlite::DbHelper;
//!
//! let helper = DbHelper::open("inventory.db").unwrap();
//! let status = helper.status().unwrap();
//! println!("{} items at schema version {}", status.item_count, status.version);
//! ```

use std::cmp::Ordering;
use std::path::Path;

use inventory_core::contract::{DATABASE_VERSION, TABLE_NAME};
use rusqlite::{Connection, Transaction};
use tracing::{info, warn};

use crate::error::{Result, StoreError};
use crate::schema::{create_table_sql, drop_table_sql};

/// Owns the database connection and its schema lifecycle.
pub struct DbHelper {
    conn: Connection,
    version: u32,
}

impl DbHelper {
    /// Opens (creating if absent) the database at `path` at the current
    /// schema version.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_version(path, DATABASE_VERSION)
    }

    /// Opens the database at `path`, bringing it to `version`.
    pub fn open_with_version(path: impl AsRef<Path>, version: u32) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn, version)
    }

    /// Opens a private in-memory database at the current schema version.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, DATABASE_VERSION)
    }

    /// Wraps an existing connection, bringing it to `version`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MigrationError`] for version `0`,
    /// [`StoreError::Downgrade`] if the file is newer than `version`, and
    /// [`StoreError::DatabaseError`] if the schema cannot be written.
    pub fn from_connection(conn: Connection, version: u32) -> Result<Self> {
        if version == 0 {
            return Err(StoreError::MigrationError(
                "schema version must be at least 1".to_string(),
            ));
        }
        let mut helper = Self { conn, version };
        helper.ensure_version()?;
        Ok(helper)
    }

    fn ensure_version(&mut self) -> Result<()> {
        let current = self.user_version()?;
        match current.cmp(&self.version) {
            Ordering::Equal => Ok(()),
            // An unstamped file that already has the table was written by a
            // create that never got its version; rebuild it.
            Ordering::Less if current == 0 && !self.table_exists()? => self.on_create(),
            Ordering::Less => self.on_upgrade(current, self.version),
            Ordering::Greater => Err(StoreError::Downgrade {
                from: current,
                to: self.version,
            }),
        }
    }

    /// Creates the items table and stamps the helper's schema version.
    ///
    /// Both happen in one transaction. Runs once per fresh file; calling it
    /// when the table exists fails and leaves the version untouched.
    pub fn on_create(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(&create_table_sql())
            .map_err(|e| StoreError::MigrationError(format!("failed to create table: {e}")))?;
        stamp_version(&tx, self.version)?;
        tx.commit()?;
        info!(table = TABLE_NAME, version = self.version, "created table");
        Ok(())
    }

    /// Drops and recreates the items table, discarding every row, and stamps
    /// `new_version`. All in one transaction.
    pub fn on_upgrade(&mut self, old_version: u32, new_version: u32) -> Result<()> {
        warn!(
            old_version,
            new_version, "upgrading schema; existing items are discarded"
        );
        let tx = self.conn.transaction()?;
        tx.execute_batch(&drop_table_sql())
            .map_err(|e| StoreError::MigrationError(format!("failed to drop table: {e}")))?;
        tx.execute_batch(&create_table_sql())
            .map_err(|e| StoreError::MigrationError(format!("failed to create table: {e}")))?;
        stamp_version(&tx, new_version)?;
        tx.commit()?;
        Ok(())
    }

    /// Schema version recorded in the file.
    pub fn user_version(&self) -> Result<u32> {
        Ok(self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?)
    }


    /// Returns the current state of the store.
    pub fn status(&self) -> Result<StoreStatus> {
        let table_exists = self.table_exists()?;
        let item_count = if table_exists {
            self.conn
                .query_row(&format!("SELECT COUNT(*) FROM {TABLE_NAME}"), [], |row| {
                    row.get::<_, i64>(0)
                })? as usize
        } else {
            0
        };

        Ok(StoreStatus {
            table_exists,
            version: self.user_version()?,
            item_count,
        })
    }

    fn table_exists(&self) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            [TABLE_NAME],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the connection, reporting any error SQLite raises on close.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| StoreError::DatabaseError(e))
    }
}

/// Writes `version` into the file header; rolled back with `tx`.
fn stamp_version(tx: &Transaction<'_>, version: u32) -> Result<()> {
    tx.execute_batch(&format!("PRAGMA user_version = {version};"))?;
    Ok(())
}

/// Snapshot of the store returned by [`DbHelper::status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStatus {
    /// Whether the items table exists.
    pub table_exists: bool,
    /// Schema version recorded in the file.
    pub version: u32,
    /// Number of stored items.
    pub item_count: usize,
}
