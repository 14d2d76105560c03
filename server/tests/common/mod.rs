//! Common Test Utilities for Integration Tests
//!
//! Shared helpers used across integration test modules.

use axum::{
    Json, Router,
    body::Body,
    extract::connect_info::MockConnectInfo,
    http::Request,
    routing::get,
};
use maplabel_server::overlay::{AppState, SqliteOverlayStore, labeling_routes};
use maplabel_server::tiles::{LabeledTiles, TileCatalog};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;

/// Request-body ceiling used by the test apps, matching the default
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Create a test application router backed by an in-memory store
pub async fn create_test_app_with_state(tiles: &[&str]) -> (Router, AppState) {
    let store = SqliteOverlayStore::connect_in_memory()
        .await
        .expect("Failed to open in-memory store");
    let catalog = TileCatalog::new(tiles.iter().map(|t| t.to_string()).collect())
        .expect("Test catalog must not be empty");

    let state = AppState {
        store: Arc::new(store),
        catalog: Arc::new(catalog),
        labeled: Arc::new(LabeledTiles::new()),
    };

    let app = Router::new()
        .route("/health", get(health))
        .merge(labeling_routes(state.clone(), MAX_BODY_BYTES))
        .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));

    (app, state)
}

/// Create a test application router with a default two-tile catalog
pub async fn create_test_app() -> Router {
    create_test_app_with_state(&["0_0.png", "0_1.png"]).await.0
}

/// Build a POST /save request for the given submission fields
pub fn save_request(tile: &str, name: &str, email: &str, image: &str) -> Request<Body> {
    let body = serde_json::json!({
        "tile": tile,
        "authorName": name,
        "authorEmail": email,
        "image": image,
    });

    Request::builder()
        .method("POST")
        .uri("/save")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body to a string
pub async fn body_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
