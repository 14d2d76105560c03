//! In-memory cache of tiles that already have at least one overlay

use dashmap::DashSet;

/// Set of tile ids with at least one submitted overlay.
///
/// Owned by the server instance: seeded from the store at startup and
/// appended to on each successful save. Entries are never removed, and
/// the set is not reconciled with the store after startup, so it is
/// best-effort when the process restarts mid-flight or multiple
/// instances share one store.
#[derive(Debug, Default)]
pub struct LabeledTiles {
    tiles: DashSet<String>,
}

impl LabeledTiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the set from tile ids already present in the store.
    pub fn seed<I>(&self, tiles: I)
    where
        I: IntoIterator<Item = String>,
    {
        for tile in tiles {
            self.tiles.insert(tile);
        }
    }

    pub fn contains(&self, tile: &str) -> bool {
        self.tiles.contains(tile)
    }

    /// Record that a tile now has at least one overlay.
    pub fn mark_labeled(&self, tile: &str) {
        self.tiles.insert(tile.to_string());
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
