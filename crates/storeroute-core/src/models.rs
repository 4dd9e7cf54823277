use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node in a distance graph.
///
/// Index 0 is always the caller's current position; registered stops occupy
/// `1..=N` in registration order.
pub type NodeIndex = usize;

/// Accumulated traversal cost.
pub type Cost = u64;

/// Node index reserved for the caller's current position.
pub const CURRENT_POSITION: NodeIndex = 0;

/// Cost assigned to node pairs that have no edge.
///
/// Kept well below `u64::MAX` so a handful of them can be summed without
/// wrapping; tour sums saturate anyway.
pub const UNREACHABLE: Cost = u64::MAX / 4;

/// A cell in grid space, addressed as (row, column).
///
/// Serialized as a `[row, col]` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

impl Coordinate {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Number of 8-connected steps between two cells.
    pub fn chebyshev(&self, other: &Coordinate) -> u32 {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr.max(dc)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl From<Coordinate> for (i32, i32) {
    fn from(c: Coordinate) -> Self {
        (c.row, c.col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Opaque identifier of a stop location.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(String);

impl StopId {
    /// Id reserved for the current-position sentinel. Registries may not use it.
    pub const CURRENT_POSITION: &'static str = "_current";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_current_position(&self) -> bool {
        self.0 == Self::CURRENT_POSITION
    }
}

impl From<&str> for StopId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StopId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Undirected weighted edge between two graph nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceEdge {
    pub a: NodeIndex,
    pub b: NodeIndex,
    pub cost: Cost,
}

impl DistanceEdge {
    pub fn new(a: NodeIndex, b: NodeIndex, cost: Cost) -> Self {
        Self { a, b, cost }
    }

    /// Whether this edge joins `x` and `y`, in either direction.
    pub fn joins(&self, x: NodeIndex, y: NodeIndex) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    pub fn max_node(&self) -> NodeIndex {
        self.a.max(self.b)
    }
}

impl fmt::Display for DistanceEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}:{}", self.a, self.b, self.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chebyshev_counts_diagonal_steps_once() {
        let a = Coordinate::new(0, 4);
        assert_eq!(a.chebyshev(&Coordinate::new(0, 0)), 4);
        assert_eq!(a.chebyshev(&Coordinate::new(4, 4)), 4);
        assert_eq!(Coordinate::new(4, 4).chebyshev(&Coordinate::new(2, 2)), 2);
        assert_eq!(a.chebyshev(&a), 0);
    }

    #[test]
    fn coordinate_serializes_as_pair() {
        let json = serde_json::to_string(&Coordinate::new(3, -2)).unwrap();
        assert_eq!(json, "[3,-2]");
        let back: Coordinate = serde_json::from_str("[7,1]").unwrap();
        assert_eq!(back, Coordinate::new(7, 1));
    }

    #[test]
    fn stop_id_serializes_as_plain_string() {
        let id = StopId::new("0007873");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"0007873\"");
        assert!(StopId::new("_current").is_current_position());
        assert!(!id.is_current_position());
    }

    #[test]
    fn edge_joins_is_direction_free() {
        let e = DistanceEdge::new(2, 5, 9);
        assert!(e.joins(2, 5));
        assert!(e.joins(5, 2));
        assert!(!e.joins(2, 3));
        assert_eq!(e.max_node(), 5);
    }
}
