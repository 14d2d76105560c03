//! Static tile catalog
//!
//! The catalog is a JSON array of tile image names loaded once at startup
//! and treated as read-only for the lifetime of the process.

use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading the tile catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read tile catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse tile catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Tile catalog is empty")]
    Empty,
}

/// Fixed list of tile identifiers available for labeling.
#[derive(Debug, Clone)]
pub struct TileCatalog {
    tiles: Vec<String>,
}

impl TileCatalog {
    /// Build a catalog from a list of tile ids.
    ///
    /// An empty list is rejected here so the picker can rely on the
    /// catalog never being empty.
    pub fn new(tiles: Vec<String>) -> Result<Self, CatalogError> {
        if tiles.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { tiles })
    }

    /// Load the catalog from a JSON array file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let tiles: Vec<String> = serde_json::from_str(&raw)?;
        Self::new(tiles)
    }

    pub fn tiles(&self) -> &[String] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn contains(&self, tile: &str) -> bool {
        self.tiles.iter().any(|t| t == tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_rejects_empty_list() {
        let result = TileCatalog::new(Vec::new());
        assert!(matches!(result, Err(CatalogError::Empty)));
    }

    #[test]
    fn test_catalog_membership() {
        let catalog =
            TileCatalog::new(vec!["12_7.png".to_string(), "12_8.png".to_string()]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("12_7.png"));
        assert!(!catalog.contains("13_0.png"));
    }

    #[test]
    fn test_catalog_load_from_file() {
        let path = std::env::temp_dir().join(format!("catalog-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, r#"["0_0.png", "0_1.png", "1_0.png"]"#).unwrap();

        let catalog = TileCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains("0_1.png"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_catalog_load_rejects_malformed_file() {
        let path = std::env::temp_dir().join(format!("catalog-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, "not json").unwrap();

        let result = TileCatalog::load(&path);
        assert!(matches!(result, Err(CatalogError::Parse(_))));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_catalog_load_missing_file() {
        let path = std::env::temp_dir().join(format!("catalog-{}.json", uuid::Uuid::new_v4()));
        let result = TileCatalog::load(&path);
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
