//! SQLite-backed overlay store
//!
//! Overlays are stored as JSON documents in a single table, keyed by a
//! store-assigned UUID. Insertion order is the rowid order. The document
//! shape predates this server, so reads tolerate older documents that
//! lack the review flags.

use async_trait::async_trait;
use sqlx::{
    Row,
    sqlite::{
        SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
    },
};
use std::collections::HashSet;
use std::str::FromStr;
use uuid::Uuid;

use super::store::OverlayStore;
use super::types::{LabelOverlay, OverlaySummary, StoreError};

pub struct SqliteOverlayStore {
    pool: SqlitePool,
}

impl SqliteOverlayStore {
    /// Connect to the database at `url`, creating the file and schema
    /// if missing.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.create_schema().await?;

        Ok(store)
    }

    /// In-memory database, used by tests.
    pub async fn connect_in_memory() -> Result<Self, StoreError> {
        Self::connect("sqlite::memory:").await
    }

    async fn create_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS label_overlays (
                id TEXT PRIMARY KEY,
                doc TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl OverlayStore for SqliteOverlayStore {
    async fn create(&self, overlay: &LabelOverlay) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let doc = serde_json::to_string(overlay)?;

        sqlx::query("INSERT INTO label_overlays (id, doc) VALUES (?1, ?2)")
            .bind(id.to_string())
            .bind(doc)
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<LabelOverlay, StoreError> {
        let row = sqlx::query("SELECT doc FROM label_overlays WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))?;

        let doc: String = row.get("doc");
        Ok(serde_json::from_str(&doc)?)
    }

    async fn list_summaries(&self) -> Result<Vec<OverlaySummary>, StoreError> {
        let rows = sqlx::query("SELECT id, doc FROM label_overlays ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.get("id");
            let doc: String = row.get("doc");
            let overlay: LabelOverlay = serde_json::from_str(&doc)?;
            summaries.push(OverlaySummary {
                id: Uuid::parse_str(&id)?,
                tile: overlay.tile,
                author_name: overlay.author_name,
                author_email: overlay.author_email,
                timestamp: overlay.timestamp,
                reviewed: overlay.reviewed,
                approved: overlay.approved,
            });
        }

        Ok(summaries)
    }

    async fn set_review_state(
        &self,
        id: Uuid,
        reviewed: bool,
        approved: bool,
    ) -> Result<(), StoreError> {
        // Read-modify-write of the whole document. Concurrent updates to
        // the same record are last-writer-wins.
        let mut overlay = self.get(id).await?;
        overlay.reviewed = reviewed;
        overlay.approved = approved;

        let doc = serde_json::to_string(&overlay)?;
        let result = sqlx::query("UPDATE label_overlays SET doc = ?1 WHERE id = ?2")
            .bind(doc)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }

    async fn list_tiles(&self) -> Result<HashSet<String>, StoreError> {
        let rows = sqlx::query("SELECT doc FROM label_overlays")
            .fetch_all(&self.pool)
            .await?;

        let mut tiles = HashSet::with_capacity(rows.len());
        for row in rows {
            let doc: String = row.get("doc");
            let overlay: LabelOverlay = serde_json::from_str(&doc)?;
            tiles.insert(overlay.tile);
        }

        Ok(tiles)
    }
}
