//! Stop-to-stop paths, loaded from the distance cache or computed.

use log::{info, warn};
use std::collections::HashMap;
use storeroute_cache::{CacheKey, DistanceCache};
use storeroute_core::{Cost, NodeIndex, PairwiseRoutes, Result};
use storeroute_grid::GridRouter;

use crate::layout::StoreLayout;

/// Where a planner's pairwise routes came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairwiseSource {
    /// Searched on the grid while building the planner
    Computed,
    /// Read back from the distance cache
    Cache,
}

/// Cached routes for `layout` if the cache holds a complete entry, else a
/// fresh all-pairs computation that is then written back.
///
/// A cache that cannot be read counts as a miss. A cache that cannot be
/// written is logged and otherwise ignored.
pub fn load_or_compute(
    router: &GridRouter<'_>,
    layout: &StoreLayout,
    cache: Option<&DistanceCache>,
) -> Result<(PairwiseRoutes, PairwiseSource)> {
    let stops = layout.coordinates();
    let key = CacheKey::for_stops(&stops);

    if let Some(cache) = cache {
        match cache.load(&key) {
            Some(routes) if routes.is_complete(stops.len()) => {
                info!(
                    "Loaded {} pairwise paths for {} stops from {}",
                    routes.edges.len(),
                    stops.len(),
                    cache.path().display()
                );
                return Ok((routes, PairwiseSource::Cache));
            }
            Some(_) => warn!("Cache entry {key} is incomplete; recomputing"),
            None => {}
        }
    }

    let routes = router.all_pairs(&stops)?;
    if let Some(cache) = cache {
        if let Err(e) = cache.store(&key, &routes) {
            warn!("{e}; continuing without persisting");
        }
    }
    Ok((routes, PairwiseSource::Computed))
}

/// Edge costs keyed by the unordered node pair, smaller index first.
pub fn cost_table(routes: &PairwiseRoutes) -> HashMap<(NodeIndex, NodeIndex), Cost> {
    routes
        .edges
        .iter()
        .map(|e| ((e.a.min(e.b), e.a.max(e.b)), e.cost))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Stop;
    use std::fs;
    use storeroute_core::{Coordinate, DistanceEdge};
    use storeroute_grid::CostGrid;

    fn layout() -> StoreLayout {
        StoreLayout::new(vec![
            Stop::new("a", (0, 0)),
            Stop::new("b", (4, 4)),
            Stop::new("c", (2, 2)),
        ])
        .unwrap()
    }

    #[test]
    fn without_cache_always_computes() {
        let grid = CostGrid::uniform(5, 5, 1);
        let router = GridRouter::new(&grid);
        let (routes, source) = load_or_compute(&router, &layout(), None).unwrap();
        assert_eq!(source, PairwiseSource::Computed);
        assert!(routes.is_complete(3));
    }

    #[test]
    fn second_load_hits_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DistanceCache::new(dir.path().join("cache.json"));
        let grid = CostGrid::uniform(5, 5, 1);
        let router = GridRouter::new(&grid);

        let (first, source) = load_or_compute(&router, &layout(), Some(&cache)).unwrap();
        assert_eq!(source, PairwiseSource::Computed);
        let (second, source) = load_or_compute(&router, &layout(), Some(&cache)).unwrap();
        assert_eq!(source, PairwiseSource::Cache);
        assert_eq!(first, second);
    }

    #[test]
    fn incomplete_entry_is_recomputed() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DistanceCache::new(dir.path().join("cache.json"));
        let key = CacheKey::for_stops(&layout().coordinates());
        let mut partial = PairwiseRoutes::default();
        partial.edges.push(DistanceEdge::new(1, 2, 4));
        partial
            .segments
            .insert(1, 2, vec![Coordinate::new(0, 0), Coordinate::new(4, 4)]);
        cache.store(&key, &partial).unwrap();

        let grid = CostGrid::uniform(5, 5, 1);
        let router = GridRouter::new(&grid);
        let (routes, source) = load_or_compute(&router, &layout(), Some(&cache)).unwrap();
        assert_eq!(source, PairwiseSource::Computed);
        assert!(routes.is_complete(3));
        assert!(cache.load(&key).unwrap().is_complete(3));
    }

    #[test]
    fn unwritable_cache_does_not_fail() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the cache directory should be.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        let cache = DistanceCache::new(blocker.join("cache.json"));

        let grid = CostGrid::uniform(5, 5, 1);
        let router = GridRouter::new(&grid);
        let (routes, source) = load_or_compute(&router, &layout(), Some(&cache)).unwrap();
        assert_eq!(source, PairwiseSource::Computed);
        assert_eq!(routes.edges.len(), 3);
    }

    #[test]
    fn cost_table_ignores_edge_direction() {
        let mut routes = PairwiseRoutes::default();
        routes.edges.push(DistanceEdge::new(3, 1, 9));
        let table = cost_table(&routes);
        assert_eq!(table.get(&(1, 3)), Some(&9));
    }
}
