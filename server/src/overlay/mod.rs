//! Label overlay module
//!
//! Handles persistence of submitted label overlays and the HTTP
//! labeling/review workflow.

pub mod routes;
pub mod sqlite;
pub mod store;
pub mod types;

pub use routes::{AppState, labeling_routes};
pub use sqlite::SqliteOverlayStore;
pub use store::OverlayStore;
pub use types::{LabelOverlay, OverlaySummary, StoreError};
