//! Store configuration.
//!
//! Loaded from a YAML file (by default `inventory.yml` in the working
//! directory). Every field is optional in the file and falls back to its
//! default.
//!
//! # Example YAML
//!
//! ```yaml
//! database: inventory.db
//! placeholder_image: assets/placeholder.png
//! thumbnail_edge: 96
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::contract::DATABASE_NAME;
use crate::error::Result;
use crate::thumbnail::DEFAULT_THUMBNAIL_EDGE;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "inventory.yml";

/// Store configuration.
///
/// # Examples
///
/// ```
/// use inventory_core::InventoryConfig;
///
/// let config: InventoryConfig = serde_yaml::from_str("thumbnail_edge: 64").unwrap();
/// assert_eq!(config.thumbnail_edge, 64);
/// assert_eq!(config.database.to_str(), Some("inventory.db"));
/// assert!(config.placeholder_image.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Path of the database file.
    pub database: PathBuf,
    /// Image used instead of the built-in placeholder.
    pub placeholder_image: Option<PathBuf>,
    /// Longest edge, in pixels, of stored thumbnails.
    pub thumbnail_edge: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DATABASE_NAME),
            placeholder_image: None,
            thumbnail_edge: DEFAULT_THUMBNAIL_EDGE,
        }
    }
}

impl InventoryConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::CoreError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::CoreError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: InventoryConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, InventoryConfig::default());
    }

    #[test]
    fn test_deserialize_complete() {
        let yaml = r#"
database: /var/lib/inventory/items.db
placeholder_image: /usr/share/inventory/placeholder.png
thumbnail_edge: 128
"#;
        let config: InventoryConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.database, PathBuf::from("/var/lib/inventory/items.db"));
        assert_eq!(
            config.placeholder_image,
            Some(PathBuf::from("/usr/share/inventory/placeholder.png"))
        );
        assert_eq!(config.thumbnail_edge, 128);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = InventoryConfig::load_or_default(dir.path().join("absent.yml")).unwrap();
        assert_eq!(config, InventoryConfig::default());
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.yml");

        let original = InventoryConfig {
            database: PathBuf::from("stock.db"),
            placeholder_image: None,
            thumbnail_edge: 48,
        };
        original.save(&path).unwrap();

        let loaded = InventoryConfig::load(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_rejects_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yml");
        std::fs::write(&path, "thumbnail_edge: [not, a, number]").unwrap();
        assert!(InventoryConfig::load(&path).is_err());
    }
}
