//! Turns a closed tour into the walking route.

use crate::graph::QueryGraph;
use storeroute_core::{Coordinate, NodeIndex, Result, RouteError, SegmentTable, Tour};

/// Open visit order in local indices: the current position first, the end
/// stop last, the auxiliary node removed.
pub fn orient(tour: &Tour, graph: &QueryGraph) -> Result<Vec<NodeIndex>> {
    if !tour.is_permutation(graph.node_count()) {
        return Err(RouteError::optimization(
            format!(
                "tour {:?} is not a permutation of 0..{}",
                tour.nodes(),
                graph.node_count()
            ),
            graph.edges(),
        ));
    }

    let nodes = tour.nodes();
    let auxiliary = graph.auxiliary();
    let at = nodes.iter().position(|&n| n == auxiliary).unwrap_or_default();
    let mut around = [
        nodes[(at + nodes.len() - 1) % nodes.len()],
        nodes[(at + 1) % nodes.len()],
    ];
    around.sort_unstable();
    if around != [0, graph.end()] {
        return Err(RouteError::optimization(
            format!(
                "tour {nodes:?} does not pass the auxiliary node between the current position and the end"
            ),
            graph.edges(),
        ));
    }

    let mut order: Vec<NodeIndex> = nodes.iter().copied().filter(|&n| n != auxiliary).collect();
    if let Some(start) = order.iter().position(|&n| n == 0) {
        order.rotate_left(start);
    }
    if order.get(1) == Some(&graph.end()) {
        order[1..].reverse();
    }
    Ok(order)
}

/// Concatenates the stored segments for each consecutive pair of `order`.
///
/// Each pair is looked up in the given tables in turn, in either direction.
/// The coordinate shared by two adjacent segments appears once.
pub fn stitch(order: &[NodeIndex], tables: &[&SegmentTable]) -> Result<Vec<Coordinate>> {
    let mut path: Vec<Coordinate> = Vec::new();
    for pair in order.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let segment = tables
            .iter()
            .find_map(|table| table.get(from, to))
            .ok_or(RouteError::MissingSegment { from, to })?;

        let skip = usize::from(!path.is_empty());
        path.extend(segment.iter().skip(skip).copied());
    }
    Ok(path)
}
