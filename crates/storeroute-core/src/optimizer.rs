//! The seam between the planner and the tour solvers.

use crate::error::{Result, RouteError};
use crate::matrix::DistanceMatrix;
use crate::models::{DistanceEdge, NodeIndex};

/// A cyclic visiting order over every node of a graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tour(Vec<NodeIndex>);

impl Tour {
    pub fn new(nodes: Vec<NodeIndex>) -> Self {
        Self(nodes)
    }

    pub fn nodes(&self) -> &[NodeIndex] {
        &self.0
    }

    pub fn into_nodes(self) -> Vec<NodeIndex> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the tour visits each of `0..num_nodes` exactly once.
    pub fn is_permutation(&self, num_nodes: usize) -> bool {
        if self.0.len() != num_nodes {
            return false;
        }
        let mut seen = vec![false; num_nodes];
        for &node in &self.0 {
            if node >= num_nodes || seen[node] {
                return false;
            }
            seen[node] = true;
        }
        true
    }
}

/// Closed-tour solver over a small weighted graph.
///
/// Implementations minimise the total cost of a cyclic order through every
/// node. They may be stochastic; callers only rely on the result being a
/// feasible permutation.
pub trait RouteOptimizer: Send + Sync {
    fn name(&self) -> &str;

    fn optimize(&self, edges: &[DistanceEdge], num_nodes: usize) -> Result<Tour>;
}

/// Small graphs have a single cyclic order up to rotation and direction.
pub fn trivial_tour(num_nodes: usize) -> Option<Tour> {
    (num_nodes <= 3).then(|| Tour::new((0..num_nodes).collect()))
}

/// Checks a solver's result before handing it back to the planner.
pub fn finish_tour(
    matrix: &DistanceMatrix,
    order: Vec<NodeIndex>,
    edges: &[DistanceEdge],
) -> Result<Tour> {
    let tour = Tour::new(order);
    if !tour.is_permutation(matrix.len()) {
        return Err(RouteError::optimization(
            format!(
                "solver returned {:?}, not a permutation of 0..{}",
                tour.nodes(),
                matrix.len()
            ),
            edges,
        ));
    }
    if matrix.len() > 1 && !DistanceMatrix::is_feasible(matrix.tour_cost(tour.nodes())) {
        return Err(RouteError::optimization("no feasible tour found", edges));
    }
    Ok(tour)
}
