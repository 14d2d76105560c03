use anyhow::Context;
use axum::{Json, Router, routing::get};
use maplabel_server::config::Config;
use maplabel_server::overlay::{AppState, OverlayStore, SqliteOverlayStore, labeling_routes};
use maplabel_server::tiles::{LabeledTiles, TileCatalog};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maplabel=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = Config::from_env();
    info!(
        "Loaded configuration: host={}, port={}",
        config.host, config.port
    );

    // The catalog is fixed for the lifetime of the process
    let catalog = TileCatalog::load(&config.tiles.catalog_path).with_context(|| {
        format!(
            "Failed to load tile catalog from {:?}",
            config.tiles.catalog_path
        )
    })?;
    info!("Loaded tile catalog: {} tiles", catalog.len());

    // The server never accepts requests if the store is unreachable
    let store = SqliteOverlayStore::connect(&config.store.database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to overlay store at {}",
                config.store.database_url
            )
        })?;

    // Seed the labeled-tile cache from existing submissions
    let labeled = LabeledTiles::new();
    labeled.seed(store.list_tiles().await?);
    info!(
        "Seeded labeled-tile cache: {} of {} tiles have submissions",
        labeled.len(),
        catalog.len()
    );

    let state = AppState {
        store: Arc::new(store),
        catalog: Arc::new(catalog),
        labeled: Arc::new(labeled),
    };

    let app = Router::new()
        .route("/health", get(health))
        .merge(labeling_routes(state, config.max_body_bytes))
        .nest_service("/tiles", ServeDir::new(&config.tiles.tiles_dir))
        .layer(TraceLayer::new_for_http());

    // Start the server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Map labeling server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
