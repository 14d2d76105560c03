//! Map Labeling Server Library
//!
//! This module exports the server components for use in integration tests
//! and external tooling.

pub mod config;
pub mod overlay;
pub mod tiles;

// Re-export commonly used types
pub use config::Config;
pub use overlay::{AppState, LabelOverlay, OverlayStore, SqliteOverlayStore, labeling_routes};
pub use tiles::{LabeledTiles, TileCatalog, pick_tile};
