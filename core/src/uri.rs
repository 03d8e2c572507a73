//! Resource path classification.
//!
//! Every request against the store is addressed by a path that is either the
//! items collection or one identified item. Paths may be written in the bare
//! form (`items`, `items/7`) or as full content URIs
//! (`content://com.example.android.inventory/items/7`); both classify the
//! same way.
//!
//! # Examples
//!
//! ```
//! use inventory_core::UriMatch;
//!
//! assert_eq!(UriMatch::classify("items"), UriMatch::Collection);
//! assert_eq!(UriMatch::classify("items/42"), UriMatch::SingleItem(42));
//! assert_eq!(
//!     UriMatch::classify("content://com.example.android.inventory/items/42"),
//!     UriMatch::SingleItem(42)
//! );
//! assert_eq!(UriMatch::classify("pets/1"), UriMatch::Unsupported);
//! ```

use crate::contract::{CONTENT_AUTHORITY, CONTENT_SCHEME, PATH_ITEMS};

/// Result of classifying a resource path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UriMatch {
    /// The whole items collection.
    Collection,
    /// Exactly one item, by identifier.
    SingleItem(i64),
    /// Anything else.
    Unsupported,
}

impl UriMatch {
    /// Classifies `path`.
    ///
    /// The rule is purely structural: after stripping an optional
    /// `content://<authority>` prefix and surrounding slashes, the path must
    /// be `items` or `items/<digits>`. A foreign authority, an extra segment,
    /// a signed or non-numeric identifier, or an identifier that overflows
    /// `i64` all classify as [`UriMatch::Unsupported`].
    pub fn classify(path: &str) -> Self {
        let Some(rest) = strip_authority(path) else {
            return Self::Unsupported;
        };

        let mut segments = rest.trim_matches('/').split('/');
        if segments.next() != Some(PATH_ITEMS) {
            return Self::Unsupported;
        }

        match (segments.next(), segments.next()) {
            (None, _) => Self::Collection,
            (Some(id), None) => parse_id(id).map_or(Self::Unsupported, Self::SingleItem),
            _ => Self::Unsupported,
        }
    }

    /// Returns the normalized bare path (`items` or `items/<id>`), or `None`
    /// for unsupported paths.
    ///
    /// ```
    /// use inventory_core::UriMatch;
    ///
    /// let m = UriMatch::classify("content://com.example.android.inventory/items/007/");
    /// assert_eq!(m.canonical_path().as_deref(), Some("items/7"));
    /// ```
    pub fn canonical_path(&self) -> Option<String> {
        match self {
            Self::Collection => Some(PATH_ITEMS.to_string()),
            Self::SingleItem(id) => Some(format!("{PATH_ITEMS}/{id}")),
            Self::Unsupported => None,
        }
    }
}

/// Appends a row identifier to a collection path.
///
/// ```
/// use inventory_core::uri::with_appended_id;
///
/// assert_eq!(with_appended_id("items", 3), "items/3");
/// assert_eq!(with_appended_id("items/", 3), "items/3");
/// ```
pub fn with_appended_id(path: &str, id: i64) -> String {
    format!("{}/{id}", path.trim_end_matches('/'))
}

/// Strips `content://<authority>` when present.
///
/// Returns `None` when the path is a content URI for another authority.
fn strip_authority(path: &str) -> Option<&str> {
    match path.strip_prefix(CONTENT_SCHEME) {
        None => Some(path),
        Some(rest) => {
            let (authority, tail) = rest.split_once('/').unwrap_or((rest, ""));
            (authority == CONTENT_AUTHORITY).then_some(tail)
        }
    }
}

fn parse_id(segment: &str) -> Option<i64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
