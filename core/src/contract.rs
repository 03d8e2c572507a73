//! Public contract of the inventory store.
//!
//! Names every constant shared between the storage layer and its clients:
//! the content authority, the resource path, the table and column names,
//! the MIME types reported for each path shape, and the on-disk database
//! name and schema version.

/// Name of the whole content provider.
pub const CONTENT_AUTHORITY: &str = "com.example.android.inventory";

/// Scheme prefix of fully qualified content URIs.
pub const CONTENT_SCHEME: &str = "content://";

/// Path segment addressing the items collection.
pub const PATH_ITEMS: &str = "items";

/// Fully qualified URI of the items collection.
///
/// ```
/// assert_eq!(
///     inventory_core::contract::CONTENT_URI,
///     "content://com.example.android.inventory/items"
/// );
/// ```
pub const CONTENT_URI: &str = "content://com.example.android.inventory/items";

/// MIME type reported for the collection path (a directory of many items).
pub const CONTENT_LIST_TYPE: &str = "vnd.android.cursor.dir/com.example.android.inventory/items";

/// MIME type reported for a single-item path.
pub const CONTENT_ITEM_TYPE: &str = "vnd.android.cursor.item/com.example.android.inventory/items";

/// File name of the on-disk database.
pub const DATABASE_NAME: &str = "inventory.db";

/// Current schema version. Bumping it drops and recreates the table.
pub const DATABASE_VERSION: u32 = 1;

/// Name of the single table.
pub const TABLE_NAME: &str = "items";

/// Autogenerated primary key.
pub const COLUMN_ID: &str = "_id";
/// Item name (text, required).
pub const COLUMN_NAME: &str = "name";
/// Supplier name (text, nullable).
pub const COLUMN_SUPPLIER: &str = "supplier";
/// Unit price (integer, required, non-negative).
pub const COLUMN_PRICE: &str = "price";
/// Units in stock (integer, defaults to 0, non-negative).
pub const COLUMN_QUANTITY: &str = "quantity";
/// JPEG thumbnail (blob, never null once stored).
pub const COLUMN_IMAGE: &str = "image";
