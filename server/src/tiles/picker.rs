//! Tile selection for new contributors

use rand::Rng;

use super::catalog::TileCatalog;
use super::labeled::LabeledTiles;

/// Pick a tile to present to a contributor.
///
/// Samples uniformly at random from the catalog tiles that have no
/// submission yet. Once every tile has at least one overlay, falls back
/// to sampling from the full catalog so tiles can be re-labeled.
pub fn pick_tile<'a>(catalog: &'a TileCatalog, labeled: &LabeledTiles) -> &'a str {
    let mut rng = rand::rng();
    let unlabeled: Vec<&String> = catalog
        .tiles()
        .iter()
        .filter(|tile| !labeled.contains(tile))
        .collect();

    if unlabeled.is_empty() {
        // Catalogs are validated non-empty at load time.
        &catalog.tiles()[rng.random_range(0..catalog.len())]
    } else {
        unlabeled[rng.random_range(0..unlabeled.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(tiles: &[&str]) -> TileCatalog {
        TileCatalog::new(tiles.iter().map(|t| t.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_pick_returns_catalog_member() {
        let catalog = catalog(&["a.png", "b.png", "c.png"]);
        let labeled = LabeledTiles::new();
        for _ in 0..50 {
            let tile = pick_tile(&catalog, &labeled);
            assert!(catalog.contains(tile));
        }
    }

    #[test]
    fn test_pick_prefers_unlabeled_tiles() {
        let catalog = catalog(&["a.png", "b.png", "c.png"]);
        let labeled = LabeledTiles::new();
        labeled.mark_labeled("a.png");
        labeled.mark_labeled("c.png");
        for _ in 0..50 {
            assert_eq!(pick_tile(&catalog, &labeled), "b.png");
        }
    }

    #[test]
    fn test_pick_falls_back_once_all_tiles_labeled() {
        let catalog = catalog(&["a.png", "b.png"]);
        let labeled = LabeledTiles::new();
        labeled.mark_labeled("a.png");
        labeled.mark_labeled("b.png");
        for _ in 0..50 {
            let tile = pick_tile(&catalog, &labeled);
            assert!(catalog.contains(tile));
        }
    }
}
