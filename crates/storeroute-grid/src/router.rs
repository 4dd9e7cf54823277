//! Weighted shortest paths on the cost grid.
//!
//! 8-connected Dijkstra: cardinal and diagonal steps are both allowed and a
//! step costs whatever the entered cell costs, so a path's cost is the sum
//! of the cells it walks into. The heap is ordered by (cost, cell index),
//! which makes tie-breaking independent of how many targets a search has.
//! A one-to-many sweep therefore returns the same path to a target as a
//! one-to-one search would.
//!
//! Graph edges built here weigh a path by every cell it visits, the start
//! cell included, so an edge costs the same in both directions.

use crate::grid::CostGrid;
use log::{debug, info, trace};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Instant;
use storeroute_core::{
    Coordinate, Cost, DistanceEdge, NodeIndex, PairwiseRoutes, Result, RouteError,
    CURRENT_POSITION,
};

const NEIGHBOURS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const NO_PARENT: usize = usize::MAX;

/// A path on the grid and what it costs to walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridPath {
    /// Cells from start to end, both included
    pub path: Vec<Coordinate>,
    pub cost: Cost,
}

/// Settled distances and parents of one search.
struct SearchTree {
    dist: Vec<Cost>,
    parent: Vec<usize>,
}

pub struct GridRouter<'a> {
    grid: &'a CostGrid,
}

impl<'a> GridRouter<'a> {
    pub fn new(grid: &'a CostGrid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &CostGrid {
        self.grid
    }

    /// Cheapest path between two cells.
    pub fn shortest_path(&self, start: Coordinate, end: Coordinate) -> Result<GridPath> {
        let mut paths = self.shortest_paths_from(start, &[end])?;
        Ok(paths.remove(0))
    }

    /// Cheapest paths from `origin` to each target, in target order, from a
    /// single search.
    pub fn shortest_paths_from(
        &self,
        origin: Coordinate,
        targets: &[Coordinate],
    ) -> Result<Vec<GridPath>> {
        let origin_index = self.grid.index_of(origin)?;
        let target_indices = targets
            .iter()
            .map(|&t| self.grid.index_of(t))
            .collect::<Result<Vec<_>>>()?;
        if targets.is_empty() {
            return Ok(Vec::new());
        }

        trace!(
            "[GridRouter] search from {} to {} target(s)",
            origin,
            targets.len()
        );
        let tree = self.search(origin_index, &target_indices);

        targets
            .iter()
            .zip(&target_indices)
            .map(|(&target, &target_index)| {
                let cost = tree.dist[target_index];
                if cost == Cost::MAX {
                    return Err(RouteError::InternalInvariant(format!(
                        "no path from {origin} to {target}"
                    )));
                }
                if cost == 0 && target != origin {
                    return Err(RouteError::InternalInvariant(format!(
                        "path from {origin} to {target} has zero cost"
                    )));
                }
                Ok(GridPath {
                    path: self.walk_back(&tree, origin_index, target_index),
                    cost,
                })
            })
            .collect()
    }

    /// Distances and paths between every unordered pair of `stops`.
    ///
    /// Stop `i` of the slice becomes node `i + 1`; node 0 stays reserved for
    /// the current position. Each pair is searched once and its segment is
    /// stored in the lower-to-higher direction.
    pub fn all_pairs(&self, stops: &[Coordinate]) -> Result<PairwiseRoutes> {
        let started = Instant::now();
        let n = stops.len();
        let mut routes = PairwiseRoutes::default();

        for (i, &from) in stops.iter().enumerate() {
            if i + 1 == n {
                break;
            }
            let start_cost = self.grid.cost(from)? as Cost;
            let paths = self.shortest_paths_from(from, &stops[i + 1..])?;
            for (offset, found) in paths.into_iter().enumerate() {
                let a = i + 1;
                let b = i + 2 + offset;
                if found.cost == 0 {
                    return Err(RouteError::InternalInvariant(format!(
                        "stops {a} and {b} share the location {from}"
                    )));
                }
                routes
                    .edges
                    .push(DistanceEdge::new(a, b, start_cost + found.cost));
                routes.segments.insert(a, b, found.path);
            }
            debug!(
                "[GridRouter] all_pairs: stop {}/{} done ({} edges)",
                i + 1,
                n,
                routes.edges.len()
            );
        }

        info!(
            "Computed {} pairwise paths between {} stops in {:.2?}",
            routes.edges.len(),
            n,
            started.elapsed()
        );
        Ok(routes)
    }

    /// Distances and paths from the caller's current position to `targets`.
    ///
    /// Edges and segments run from [`CURRENT_POSITION`] to each target's node
    /// index. The result is per-query and never persisted.
    pub fn from_point(
        &self,
        origin: Coordinate,
        targets: &[(NodeIndex, Coordinate)],
    ) -> Result<PairwiseRoutes> {
        let coords: Vec<Coordinate> = targets.iter().map(|&(_, c)| c).collect();
        let start_cost = self.grid.cost(origin)? as Cost;
        let paths = self.shortest_paths_from(origin, &coords)?;

        let mut routes = PairwiseRoutes::default();
        for (&(node, _), found) in targets.iter().zip(paths) {
            routes
                .edges
                .push(DistanceEdge::new(CURRENT_POSITION, node, start_cost + found.cost));
            routes.segments.insert(CURRENT_POSITION, node, found.path);
        }
        Ok(routes)
    }

    fn search(&self, origin: usize, targets: &[usize]) -> SearchTree {
        let cells = self.grid.len();
        let mut dist = vec![Cost::MAX; cells];
        let mut parent = vec![NO_PARENT; cells];
        let mut settled = vec![false; cells];

        let mut is_target = vec![false; cells];
        let mut remaining = 0usize;
        for &t in targets {
            if !is_target[t] {
                is_target[t] = true;
                remaining += 1;
            }
        }

        let rows = self.grid.rows() as i32;
        let cols = self.grid.cols() as i32;
        let mut heap = BinaryHeap::new();
        dist[origin] = 0;
        heap.push(Reverse((0, origin)));

        while let Some(Reverse((cost, index))) = heap.pop() {
            if settled[index] {
                continue;
            }
            settled[index] = true;

            if is_target[index] {
                remaining -= 1;
                if remaining == 0 {
                    break;
                }
            }

            let here = self.grid.coordinate_of(index);
            for (dr, dc) in NEIGHBOURS {
                let row = here.row + dr;
                let col = here.col + dc;
                if row < 0 || col < 0 || row >= rows || col >= cols {
                    continue;
                }
                let next = row as usize * cols as usize + col as usize;
                if settled[next] {
                    continue;
                }
                let candidate = cost + self.grid.cost_at(next) as Cost;
                if candidate < dist[next] {
                    dist[next] = candidate;
                    parent[next] = index;
                    heap.push(Reverse((candidate, next)));
                }
            }
        }

        SearchTree { dist, parent }
    }

    fn walk_back(&self, tree: &SearchTree, origin: usize, target: usize) -> Vec<Coordinate> {
        let mut path = vec![self.grid.coordinate_of(target)];
        let mut current = target;
        while current != origin {
            current = tree.parent[current];
            path.push(self.grid.coordinate_of(current));
        }
        path.reverse();
        path
    }
}
