//! Dense distance matrix shared by the tour solvers.

use crate::error::{Result, RouteError};
use crate::models::{Cost, DistanceEdge, NodeIndex, UNREACHABLE};

/// Symmetric cost matrix built from an edge list.
///
/// Flattened row-major for cache locality. Pairs without an edge hold
/// [`UNREACHABLE`], so any tour that uses one is infeasible.
#[derive(Clone, Debug)]
pub struct DistanceMatrix {
    num_nodes: usize,
    costs: Vec<Cost>,
}

impl DistanceMatrix {
    pub fn from_edges(edges: &[DistanceEdge], num_nodes: usize) -> Result<Self> {
        if num_nodes == 0 {
            return Err(RouteError::optimization("graph has no nodes", edges));
        }

        let mut costs = vec![UNREACHABLE; num_nodes * num_nodes];
        for i in 0..num_nodes {
            costs[i * num_nodes + i] = 0;
        }

        for edge in edges {
            if edge.max_node() >= num_nodes {
                return Err(RouteError::optimization(
                    format!("edge {edge} references a node outside 0..{num_nodes}"),
                    edges,
                ));
            }
            if edge.a == edge.b {
                return Err(RouteError::optimization(
                    format!("edge {edge} is a self loop"),
                    edges,
                ));
            }
            // Duplicate pairs keep the cheaper cost.
            let forward = edge.a * num_nodes + edge.b;
            let backward = edge.b * num_nodes + edge.a;
            let cost = costs[forward].min(edge.cost);
            costs[forward] = cost;
            costs[backward] = cost;
        }

        Ok(Self { num_nodes, costs })
    }

    pub fn len(&self) -> usize {
        self.num_nodes
    }

    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    #[inline(always)]
    pub fn get(&self, a: NodeIndex, b: NodeIndex) -> Cost {
        self.costs[a * self.num_nodes + b]
    }

    /// Cost of the closed tour visiting `order` and returning to its start.
    pub fn tour_cost(&self, order: &[NodeIndex]) -> Cost {
        if order.len() < 2 {
            return 0;
        }
        let mut total: Cost = 0;
        for pair in order.windows(2) {
            total = total.saturating_add(self.get(pair[0], pair[1]));
        }
        total.saturating_add(self.get(order[order.len() - 1], order[0]))
    }

    pub fn is_feasible(cost: Cost) -> bool {
        cost < UNREACHABLE
    }

    /// Greedy tour: from `start`, always move to the cheapest unvisited node.
    pub fn nearest_neighbour_tour(&self, start: NodeIndex) -> Vec<NodeIndex> {
        let n = self.num_nodes;
        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);

        let mut current = start;
        visited[current] = true;
        order.push(current);

        for _ in 1..n {
            let next = (0..n)
                .filter(|&j| !visited[j])
                .min_by_key(|&j| self.get(current, j));
            match next {
                Some(j) => {
                    visited[j] = true;
                    order.push(j);
                    current = j;
                }
                None => break,
            }
        }

        order
    }
}
