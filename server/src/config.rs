//! Server configuration
//!
//! Configuration is loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Main server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Maximum request body size in bytes
    pub max_body_bytes: usize,

    /// Store configuration
    pub store: StoreConfig,

    /// Tile configuration
    pub tiles: TilesConfig,
}

/// Overlay store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Database URL for the overlay collection
    pub database_url: String,
}

/// Tile catalog configuration
#[derive(Debug, Clone)]
pub struct TilesConfig {
    /// Directory holding the static tile images
    pub tiles_dir: PathBuf,
    /// JSON file listing the tile catalog
    pub catalog_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_body_bytes: 1024 * 1024, // 1 MiB
            store: StoreConfig::default(),
            tiles: TilesConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://maplabel.db".to_string(),
        }
    }
}

impl Default for TilesConfig {
    fn default() -> Self {
        Self {
            tiles_dir: PathBuf::from("tiles"),
            catalog_path: PathBuf::from("tiles.json"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Server config
        if let Ok(host) = env::var("HOST") {
            config.host = host;
        }
        if let Ok(port) = env::var("PORT")
            && let Ok(p) = port.parse()
        {
            config.port = p;
        }
        if let Ok(val) = env::var("MAX_UPLOAD_BYTES")
            && let Ok(bytes) = val.parse()
        {
            config.max_body_bytes = bytes;
        }

        // Store config
        if let Ok(url) = env::var("DATABASE_URL") {
            config.store.database_url = url;
        }

        // Tile config
        if let Ok(dir) = env::var("TILES_DIR") {
            config.tiles.tiles_dir = PathBuf::from(dir);
        }
        if let Ok(path) = env::var("TILE_CATALOG") {
            config.tiles.catalog_path = PathBuf::from(path);
        }

        config
    }
}
