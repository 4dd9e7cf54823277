#![deny(clippy::all)]

//! Simulated annealing tour solver.

pub mod annealing;
pub mod config;

pub use annealing::AnnealingOptimizer;
pub use config::AnnealingConfig;
