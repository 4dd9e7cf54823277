#![deny(clippy::all)]

//! Exact closed-tour solver.
//!
//! Held-Karp dynamic programming over subsets: O(2^n * n^2) time and
//! O(2^n * n) memory, so it is limited to [`MAX_NODES`] nodes. The planner's
//! graphs are the requested stops plus the current position and the auxiliary
//! node, which keeps small shopping lists well inside the limit. Results are
//! deterministic, which is what the tests of the heuristic solvers lean on.

pub mod context;
pub mod tsp;
pub mod types;

use context::HeldKarpContext;
use log::debug;
use storeroute_core::optimizer::{finish_tour, trivial_tour};
use storeroute_core::{DistanceEdge, DistanceMatrix, Result, RouteError, RouteOptimizer, Tour};
use tsp::{best_tour, fill_table};

/// Largest graph the exact solver accepts.
pub const MAX_NODES: usize = 16;

#[derive(Clone, Copy, Debug, Default)]
pub struct HeldKarpOptimizer;

impl HeldKarpOptimizer {
    pub fn new() -> Self {
        Self
    }
}

impl RouteOptimizer for HeldKarpOptimizer {
    fn name(&self) -> &str {
        "exact"
    }

    fn optimize(&self, edges: &[DistanceEdge], num_nodes: usize) -> Result<Tour> {
        let matrix = DistanceMatrix::from_edges(edges, num_nodes)?;
        if let Some(tour) = trivial_tour(num_nodes) {
            return finish_tour(&matrix, tour.into_nodes(), edges);
        }
        if num_nodes > MAX_NODES {
            return Err(RouteError::optimization(
                format!("exact solver supports at most {MAX_NODES} nodes, got {num_nodes}"),
                edges,
            ));
        }

        let mut ctx = HeldKarpContext::new(&matrix);
        fill_table(&mut ctx);
        let (cost, tour) = best_tour(&ctx)
            .ok_or_else(|| RouteError::optimization("graph has no Hamiltonian cycle", edges))?;

        debug!("[HeldKarp] {} nodes, optimal tour cost {}", num_nodes, cost);
        finish_tour(&matrix, tour.to_vec(), edges)
    }
}
