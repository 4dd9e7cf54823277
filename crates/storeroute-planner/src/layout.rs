//! The registry of stop locations a planner is built over.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use storeroute_core::{Coordinate, NodeIndex, Result, RouteError, StopId};

/// A named location on the map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    pub id: StopId,
    pub coordinate: Coordinate,
}

impl Stop {
    pub fn new(id: impl Into<StopId>, coordinate: impl Into<Coordinate>) -> Self {
        Self {
            id: id.into(),
            coordinate: coordinate.into(),
        }
    }
}

/// Ordered, immutable set of stops.
///
/// The stop at position `i` is node `i + 1` in every distance graph; node 0
/// belongs to the caller's current position. Ids are unique and never equal
/// to the reserved [`StopId::CURRENT_POSITION`].
#[derive(Clone, Debug, Default)]
pub struct StoreLayout {
    stops: Vec<Stop>,
    nodes: HashMap<StopId, NodeIndex>,
}

impl StoreLayout {
    pub fn new(stops: Vec<Stop>) -> Result<Self> {
        let mut nodes = HashMap::with_capacity(stops.len());
        for (i, stop) in stops.iter().enumerate() {
            if stop.id.is_current_position() {
                return Err(RouteError::InvalidQuery(format!(
                    "stop id {:?} is reserved for the current position",
                    stop.id.as_str()
                )));
            }
            if nodes.insert(stop.id.clone(), i + 1).is_some() {
                return Err(RouteError::InvalidQuery(format!(
                    "stop id {:?} is registered twice",
                    stop.id.as_str()
                )));
            }
        }
        Ok(Self { stops, nodes })
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Stop coordinates in registration order.
    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.stops.iter().map(|s| s.coordinate).collect()
    }

    /// Node index of a registered stop.
    pub fn node_of(&self, id: &StopId) -> Option<NodeIndex> {
        self.nodes.get(id).copied()
    }

    /// The stop registered as `node`. Node 0 has no stop.
    pub fn stop(&self, node: NodeIndex) -> Option<&Stop> {
        node.checked_sub(1).and_then(|i| self.stops.get(i))
    }
}
