//! Stored grid paths between graph nodes.

use crate::models::{Coordinate, DistanceEdge, NodeIndex};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

/// Coordinates walking from node `from` to node `to`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
    pub from: NodeIndex,
    pub to: NodeIndex,
    pub path: Vec<Coordinate>,
}

/// Path segments keyed by the direction they were computed in.
///
/// Each unordered pair is stored once. Looking a pair up in the other
/// direction reverses the stored sequence on the fly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PathSegment>", into = "Vec<PathSegment>")]
pub struct SegmentTable {
    segments: HashMap<(NodeIndex, NodeIndex), Vec<Coordinate>>,
}

impl SegmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `path` under `(from, to)` unless the pair is already present in
    /// either direction. Returns whether the path was stored.
    pub fn insert(&mut self, from: NodeIndex, to: NodeIndex, path: Vec<Coordinate>) -> bool {
        if self.contains_pair(from, to) {
            return false;
        }
        self.segments.insert((from, to), path);
        true
    }

    pub fn contains_pair(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.segments.contains_key(&(a, b)) || self.segments.contains_key(&(b, a))
    }

    /// The path from `from` to `to`, reversed from storage if needed.
    pub fn get(&self, from: NodeIndex, to: NodeIndex) -> Option<Cow<'_, [Coordinate]>> {
        if let Some(path) = self.segments.get(&(from, to)) {
            return Some(Cow::Borrowed(path.as_slice()));
        }
        self.segments.get(&(to, from)).map(|path| {
            let mut reversed = path.clone();
            reversed.reverse();
            Cow::Owned(reversed)
        })
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl From<Vec<PathSegment>> for SegmentTable {
    fn from(segments: Vec<PathSegment>) -> Self {
        let mut table = SegmentTable::new();
        for segment in segments {
            table.insert(segment.from, segment.to, segment.path);
        }
        table
    }
}

impl From<SegmentTable> for Vec<PathSegment> {
    fn from(table: SegmentTable) -> Self {
        let mut segments: Vec<PathSegment> = table
            .segments
            .into_iter()
            .map(|((from, to), path)| PathSegment { from, to, path })
            .collect();
        segments.sort_by_key(|s| (s.from, s.to));
        segments
    }
}

/// Distances and paths between every pair of a node set.
///
/// This is what the distance cache persists for one stop configuration, and
/// also what a per-query search from the current position produces.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairwiseRoutes {
    pub edges: Vec<DistanceEdge>,
    pub segments: SegmentTable,
}

impl PairwiseRoutes {
    /// Whether every unordered pair of the stops `1..=stop_count` has both an
    /// edge and a segment.
    pub fn is_complete(&self, stop_count: usize) -> bool {
        let expected = stop_count * stop_count.saturating_sub(1) / 2;
        if self.edges.len() != expected || self.segments.len() != expected {
            return false;
        }
        (1..=stop_count).all(|i| {
            (i + 1..=stop_count).all(|j| {
                self.segments.contains_pair(i, j) && self.edges.iter().any(|e| e.joins(i, j))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: i32, col: i32) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn reverse_lookup_reverses_stored_path() {
        let mut table = SegmentTable::new();
        table.insert(1, 2, vec![c(0, 0), c(0, 1), c(1, 2)]);

        assert_eq!(table.get(1, 2).unwrap().as_ref(), &[c(0, 0), c(0, 1), c(1, 2)]);
        assert_eq!(table.get(2, 1).unwrap().as_ref(), &[c(1, 2), c(0, 1), c(0, 0)]);
        assert!(table.get(1, 3).is_none());
    }

    #[test]
    fn pairs_are_stored_once() {
        let mut table = SegmentTable::new();
        assert!(table.insert(1, 2, vec![c(0, 0), c(0, 1)]));
        assert!(!table.insert(2, 1, vec![c(0, 1), c(0, 0)]));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn table_survives_json() {
        let mut routes = PairwiseRoutes::default();
        routes.edges.push(DistanceEdge::new(1, 2, 3));
        routes.segments.insert(1, 2, vec![c(0, 0), c(1, 1)]);

        let json = serde_json::to_string(&routes).unwrap();
        let back: PairwiseRoutes = serde_json::from_str(&json).unwrap();
        assert_eq!(back, routes);
        assert!(back.is_complete(2));
    }

    #[test]
    fn completeness_requires_every_pair() {
        let mut routes = PairwiseRoutes::default();
        routes.edges.push(DistanceEdge::new(1, 2, 3));
        routes.edges.push(DistanceEdge::new(1, 3, 3));
        routes.edges.push(DistanceEdge::new(1, 3, 3));
        routes.segments.insert(1, 2, vec![c(0, 0), c(1, 1)]);
        routes.segments.insert(1, 3, vec![c(0, 0), c(2, 2)]);
        routes.segments.insert(3, 1, vec![c(2, 2), c(0, 0)]);
        assert!(!routes.is_complete(3));
        assert!(PairwiseRoutes::default().is_complete(0));
        assert!(PairwiseRoutes::default().is_complete(1));
    }
}
