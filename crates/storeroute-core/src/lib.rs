#![deny(clippy::all)]

//! Shared types for the store route planner.
//!
//! Every other crate in the workspace speaks in these terms: grid
//! [`Coordinate`]s, opaque [`StopId`]s, node indices into the distance graph,
//! [`DistanceEdge`]s between nodes and the stored [`PathSegment`]s that realise
//! them on the grid.

pub mod error;
pub mod matrix;
pub mod models;
pub mod optimizer;
pub mod segments;

pub use error::{Result, RouteError};
pub use matrix::DistanceMatrix;
pub use models::{
    Coordinate, Cost, DistanceEdge, NodeIndex, StopId, CURRENT_POSITION, UNREACHABLE,
};
pub use optimizer::{RouteOptimizer, Tour};
pub use segments::{PairwiseRoutes, PathSegment, SegmentTable};
