//! The small graph handed to the optimizer for one query.
//!
//! Nodes are renumbered locally: 0 is the current position, `1..=k` are the
//! requested stops in request order and `k + 1` is the auxiliary node. The
//! auxiliary node is joined to the current position and the end stop only,
//! so every feasible closed tour passes `current, auxiliary, end` in a row.
//! Dropping the auxiliary node from such a tour leaves an open route from
//! the current position to the end.

use std::collections::HashMap;
use storeroute_core::{
    Cost, DistanceEdge, NodeIndex, PairwiseRoutes, Result, RouteError, CURRENT_POSITION,
};

/// Cost of both edges touching the auxiliary node.
pub const AUXILIARY_EDGE_COST: Cost = 1;

#[derive(Clone, Debug)]
pub struct QueryGraph {
    /// Layout node index of each local node, the current position included
    nodes: Vec<NodeIndex>,
    end: NodeIndex,
    edges: Vec<DistanceEdge>,
}

impl QueryGraph {
    /// Builds the graph over `stops` (layout node indices, distinct, `end`
    /// among them).
    ///
    /// `pairwise` holds stop-to-stop costs keyed by ordered pair, and
    /// `from_current` the per-query edges out of the current position.
    pub fn build(
        stops: &[NodeIndex],
        end: NodeIndex,
        pairwise: &HashMap<(NodeIndex, NodeIndex), Cost>,
        from_current: &PairwiseRoutes,
    ) -> Result<Self> {
        let mut nodes = Vec::with_capacity(stops.len() + 1);
        nodes.push(CURRENT_POSITION);
        nodes.extend_from_slice(stops);

        let local: HashMap<NodeIndex, NodeIndex> =
            nodes.iter().enumerate().map(|(l, &g)| (g, l)).collect();
        let end_local = *local.get(&end).ok_or_else(|| {
            RouteError::InternalInvariant(format!("end node {end} is not among the query stops"))
        })?;

        let mut edges = Vec::new();
        for edge in &from_current.edges {
            let stop = if edge.a == CURRENT_POSITION { edge.b } else { edge.a };
            if let Some(&l) = local.get(&stop) {
                edges.push(DistanceEdge::new(0, l, edge.cost));
            }
        }
        for i in 1..nodes.len() {
            for j in i + 1..nodes.len() {
                let (a, b) = (nodes[i].min(nodes[j]), nodes[i].max(nodes[j]));
                let cost = pairwise.get(&(a, b)).ok_or_else(|| {
                    RouteError::InternalInvariant(format!("no distance between stops {a} and {b}"))
                })?;
                edges.push(DistanceEdge::new(i, j, *cost));
            }
        }

        let auxiliary = nodes.len();
        edges.push(DistanceEdge::new(auxiliary, 0, AUXILIARY_EDGE_COST));
        edges.push(DistanceEdge::new(auxiliary, end_local, AUXILIARY_EDGE_COST));

        Ok(Self {
            nodes,
            end: end_local,
            edges,
        })
    }

    /// Number of nodes including the auxiliary one.
    pub fn node_count(&self) -> usize {
        self.nodes.len() + 1
    }

    pub fn auxiliary(&self) -> NodeIndex {
        self.nodes.len()
    }

    /// Local index of the end stop.
    pub fn end(&self) -> NodeIndex {
        self.end
    }

    pub fn edges(&self) -> &[DistanceEdge] {
        &self.edges
    }

    /// Layout node index of a local, non-auxiliary node.
    pub fn layout_node(&self, local: NodeIndex) -> Option<NodeIndex> {
        self.nodes.get(local).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storeroute_core::DistanceMatrix;

    fn pairwise(
        entries: &[(NodeIndex, NodeIndex, Cost)],
    ) -> HashMap<(NodeIndex, NodeIndex), Cost> {
        entries.iter().map(|&(a, b, c)| ((a, b), c)).collect()
    }

    fn from_current(entries: &[(NodeIndex, Cost)]) -> PairwiseRoutes {
        let mut routes = PairwiseRoutes::default();
        for &(node, cost) in entries {
            routes
                .edges
                .push(DistanceEdge::new(CURRENT_POSITION, node, cost));
        }
        routes
    }

    #[test]
    fn renumbers_stops_and_adds_the_auxiliary_node() {
        // Layout nodes 2, 5 and 7 requested, 5 is the end.
        let graph = QueryGraph::build(
            &[7, 2, 5],
            5,
            &pairwise(&[(2, 7, 10), (5, 7, 11), (2, 5, 12), (1, 2, 99)]),
            &from_current(&[(7, 1), (2, 2), (5, 3)]),
        )
        .unwrap();

        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.auxiliary(), 4);
        assert_eq!(graph.end(), 3);
        assert_eq!(graph.layout_node(1), Some(7));
        assert_eq!(graph.layout_node(3), Some(5));
        assert_eq!(graph.layout_node(4), None);

        let m = DistanceMatrix::from_edges(graph.edges(), graph.node_count()).unwrap();
        assert_eq!(m.get(0, 1), 1);
        assert_eq!(m.get(0, 3), 3);
        assert_eq!(m.get(1, 2), 10);
        assert_eq!(m.get(2, 3), 12);
        assert_eq!(m.get(4, 0), AUXILIARY_EDGE_COST);
        assert_eq!(m.get(4, 3), AUXILIARY_EDGE_COST);
        assert!(!DistanceMatrix::is_feasible(m.get(4, 1)));
        assert!(!DistanceMatrix::is_feasible(m.get(4, 2)));
    }

    #[test]
    fn missing_pairwise_cost_is_an_invariant_error() {
        let err = QueryGraph::build(
            &[1, 2],
            2,
            &pairwise(&[]),
            &from_current(&[(1, 1), (2, 1)]),
        );
        assert!(matches!(err, Err(RouteError::InternalInvariant(_))));
    }
}
