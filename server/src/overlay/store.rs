//! OverlayStore trait definition

use async_trait::async_trait;
use std::collections::HashSet;
use uuid::Uuid;

use super::types::{LabelOverlay, OverlaySummary, StoreError};

/// Persisted collection of label overlays, keyed by store-assigned id.
#[async_trait]
pub trait OverlayStore: Send + Sync {
    /// Insert a new overlay and return its assigned id.
    async fn create(&self, overlay: &LabelOverlay) -> Result<Uuid, StoreError>;

    /// Point lookup by id.
    ///
    /// A missing record surfaces as `StoreError::NotFound`, distinct
    /// from other storage failures.
    async fn get(&self, id: Uuid) -> Result<LabelOverlay, StoreError>;

    /// All overlays in insertion order, projected for the review list.
    /// No pagination; the full collection is returned on every call.
    async fn list_summaries(&self) -> Result<Vec<OverlaySummary>, StoreError>;

    /// Update exactly the two review flags of one overlay, leaving all
    /// other attributes untouched.
    async fn set_review_state(
        &self,
        id: Uuid,
        reviewed: bool,
        approved: bool,
    ) -> Result<(), StoreError>;

    /// Distinct tile ids currently represented in the store. Used once
    /// at startup to seed the labeled-tile cache.
    async fn list_tiles(&self) -> Result<HashSet<String>, StoreError>;
}
