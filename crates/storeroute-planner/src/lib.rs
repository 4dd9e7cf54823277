#![deny(clippy::all)]

//! Route planning over a store map.
//!
//! A [`RoutePlanner`] owns the cost grid, the immutable [`StoreLayout`] and
//! the stop-to-stop paths computed (or loaded from the distance cache) when it
//! is built. Each [`RoutePlanner::plan_route`] call adds fresh paths from the
//! caller's position, asks the configured optimizer for a closed tour over the
//! requested stops plus one auxiliary node, and turns that tour into an open
//! route that starts at the caller and finishes at the requested end stop.

pub mod assemble;
pub mod engine;
pub mod graph;
pub mod layout;
pub mod pairwise;

pub use engine::{PlannedRoute, RoutePlanner};
pub use layout::{Stop, StoreLayout};
pub use pairwise::PairwiseSource;
