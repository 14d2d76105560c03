//! HTTP route handlers for the labeling and review workflow

use askama::Template;
use axum::{
    Json, Router,
    extract::{ConnectInfo, DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use uuid::Uuid;

use super::store::OverlayStore;
use super::types::LabelOverlay;
use crate::tiles::{LabeledTiles, TileCatalog, pick_tile};

/// Shared state for the labeling and review handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OverlayStore>,
    pub catalog: Arc<TileCatalog>,
    pub labeled: Arc<LabeledTiles>,
}

/// Labeling form, blank for a new submission or pre-filled when viewing
/// an existing one.
#[derive(Template)]
#[template(path = "labeling_tool.html")]
struct LabelingToolTemplate {
    tile: String,
    data: String,
    author: Option<AuthorInfo>,
}

/// Original author identity, shown when viewing a stored submission
struct AuthorInfo {
    name: String,
    email: String,
}

/// Review list with aggregate counts
#[derive(Template)]
#[template(path = "overlay_list.html")]
struct OverlayListTemplate {
    overlays: Vec<OverlayRow>,
    count: usize,
    reviewed_count: usize,
    approved_count: usize,
}

struct OverlayRow {
    id: Uuid,
    tile: String,
    author_name: String,
    author_email: String,
    timestamp: String,
    reviewed: bool,
    approved: bool,
}

fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template rendering failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET / - render the labeling form for a freshly picked tile
pub async fn labeling_form(State(state): State<AppState>) -> Response {
    let tile = pick_tile(&state.catalog, &state.labeled);

    render(&LabelingToolTemplate {
        tile: tile.to_string(),
        data: String::new(),
        author: None,
    })
}

/// GET /view/:id - render the form pre-filled with a stored overlay
pub async fn view_overlay(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    match state.store.get(id).await {
        Ok(overlay) => render(&LabelingToolTemplate {
            tile: overlay.tile,
            data: overlay.image,
            author: Some(AuthorInfo {
                name: overlay.author_name,
                email: overlay.author_email,
            }),
        }),
        Err(e) => {
            tracing::warn!("Failed to load overlay {}: {}", id, e);
            StatusCode::BAD_REQUEST.into_response()
        }
    }
}

/// Submission body for POST /save
///
/// Field presence is not validated; absent fields are stored empty.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveRequest {
    pub tile: String,
    pub author_name: String,
    pub author_email: String,
    pub image: String,
}

/// POST /save - persist a new overlay and mark its tile labeled
pub async fn save_overlay(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(request): Json<SaveRequest>,
) -> Response {
    tracing::info!(
        "Received label overlay for {} from {} <{}>",
        request.tile,
        request.author_name,
        request.author_email
    );

    let overlay = LabelOverlay {
        tile: request.tile.clone(),
        author_name: request.author_name,
        author_email: request.author_email,
        author_ip_address: addr.ip().to_string(),
        timestamp: chrono::Utc::now(),
        image: request.image,
        reviewed: false,
        approved: false,
    };

    match state.store.create(&overlay).await {
        Ok(id) => {
            state.labeled.mark_labeled(&request.tile);
            tracing::debug!("Stored overlay {} for tile {}", id, request.tile);
            "OK".into_response()
        }
        Err(e) => {
            tracing::error!("Failed to store overlay for {}: {}", request.tile, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// POST /remove-review/:id - clear the reviewed flag
///
/// The approved flag is carried through as stored; only reviewed is
/// cleared. A missing record or storage failure is logged server-side
/// and not distinguished in the response.
pub async fn remove_review(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let result = match state.store.get(id).await {
        Ok(overlay) => state.store.set_review_state(id, false, overlay.approved).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::warn!("Failed to remove review on overlay {}: {}", id, e);
    }

    "OK".into_response()
}

/// POST /set-approved/:id/:approved - mark reviewed with a verdict
///
/// Any path parameter other than the literal "true" counts as a
/// rejection. Failures are logged and not distinguished in the response.
pub async fn set_approved(
    State(state): State<AppState>,
    Path((id, approved)): Path<(Uuid, String)>,
) -> Response {
    let approved = approved == "true";

    if let Err(e) = state.store.set_review_state(id, true, approved).await {
        tracing::warn!("Failed to set approval on overlay {}: {}", id, e);
    }

    "OK".into_response()
}

/// GET /labeled-tiles-list - review list with aggregate counts
pub async fn overlay_list(State(state): State<AppState>) -> Response {
    let summaries = match state.store.list_summaries().await {
        Ok(summaries) => summaries,
        Err(e) => {
            tracing::error!("Failed to list overlays: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let count = summaries.len();
    let reviewed_count = summaries.iter().filter(|s| s.reviewed).count();
    // An approval only counts while its overlay is reviewed, keeping
    // approved <= reviewed through remove-review.
    let approved_count = summaries.iter().filter(|s| s.reviewed && s.approved).count();

    let overlays = summaries
        .into_iter()
        .map(|s| OverlayRow {
            id: s.id,
            tile: s.tile,
            author_name: s.author_name,
            author_email: s.author_email,
            timestamp: s.timestamp.format("%Y-%m-%d %H:%M UTC").to_string(),
            reviewed: s.reviewed,
            approved: s.approved,
        })
        .collect();

    render(&OverlayListTemplate {
        overlays,
        count,
        reviewed_count,
        approved_count,
    })
}

/// Build the labeling and review routes
pub fn labeling_routes(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(labeling_form))
        .route("/save", post(save_overlay))
        .route("/view/:id", get(view_overlay))
        .route("/labeled-tiles-list", get(overlay_list))
        .route("/remove-review/:id", post(remove_review))
        .route("/set-approved/:id/:approved", post(set_approved))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
