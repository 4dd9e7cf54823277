//! Grid side of the planner: the cost surface and shortest paths over it.

pub mod grid;
pub mod router;

pub use grid::CostGrid;
pub use router::{GridPath, GridRouter};
