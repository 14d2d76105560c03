//! Overlay-related types and error definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when working with the overlay store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Overlay not found: {0}")]
    NotFound(Uuid),

    #[error("Storage unavailable: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Malformed overlay document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("Corrupt overlay id: {0}")]
    CorruptId(#[from] uuid::Error),
}

/// A contributor's submitted label overlay for one tile.
///
/// This is the persisted document shape, camelCase on the wire and in
/// storage. The review flags were added after the first batch of
/// submissions went in, so both default to false when reading older
/// documents that lack them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelOverlay {
    /// Catalog tile the overlay annotates
    pub tile: String,
    /// Contributor display name
    pub author_name: String,
    /// Contributor email
    pub author_email: String,
    /// Peer address captured server-side at submission, never
    /// client-supplied
    pub author_ip_address: String,
    /// Submission time
    pub timestamp: DateTime<Utc>,
    /// Encoded drawing (base64 data URL), stored as text
    pub image: String,
    /// Whether a reviewer has acted on this overlay
    #[serde(default)]
    pub reviewed: bool,
    /// Reviewer verdict; meaningful only once reviewed
    #[serde(default)]
    pub approved: bool,
}

/// Projection of an overlay for the review list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlaySummary {
    pub id: Uuid,
    pub tile: String,
    pub author_name: String,
    pub author_email: String,
    pub timestamp: DateTime<Utc>,
    pub reviewed: bool,
    pub approved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_document_uses_camel_case_fields() {
        let overlay = LabelOverlay {
            tile: "0_0.png".to_string(),
            author_name: "Ana".to_string(),
            author_email: "a@x.com".to_string(),
            author_ip_address: "127.0.0.1".to_string(),
            timestamp: Utc::now(),
            image: "data:image/png;base64,".to_string(),
            reviewed: false,
            approved: false,
        };

        let doc = serde_json::to_value(&overlay).unwrap();
        assert!(doc.get("authorName").is_some());
        assert!(doc.get("authorIpAddress").is_some());
        assert!(doc.get("author_name").is_none());
    }

    #[test]
    fn test_review_flags_default_on_older_documents() {
        // Documents written before the review workflow existed carry no
        // reviewed/approved fields.
        let doc = r#"{
            "tile": "0_0.png",
            "authorName": "Ana",
            "authorEmail": "a@x.com",
            "authorIpAddress": "10.0.0.1",
            "timestamp": "2019-03-02T10:00:00Z",
            "image": "data:image/png;base64,"
        }"#;

        let overlay: LabelOverlay = serde_json::from_str(doc).unwrap();
        assert!(!overlay.reviewed);
        assert!(!overlay.approved);
    }
}
