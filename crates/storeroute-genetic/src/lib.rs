#![deny(clippy::all)]

//! Genetic tour solver, the planner's default [`RouteOptimizer`].
//!
//! [`RouteOptimizer`]: storeroute_core::RouteOptimizer

pub mod config;
pub mod operators;
pub mod solver;

pub use config::GeneticConfig;
pub use solver::GeneticOptimizer;
