//! Error taxonomy shared by every crate in the workspace.

use crate::models::{Coordinate, DistanceEdge, NodeIndex};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("coordinate {coordinate} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        coordinate: Coordinate,
        rows: usize,
        cols: usize,
    },

    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),

    #[error("distance cache {path:?} is unusable: {reason}")]
    CacheCorruption { path: PathBuf, reason: String },

    #[error("failed to read distance cache {path:?}: {source}")]
    CacheRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write distance cache {path:?}: {source}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("route optimization failed: {reason} (edges: {})", format_edges(.edges))]
    RouteOptimization {
        reason: String,
        edges: Vec<DistanceEdge>,
    },

    #[error("no path segment stored between nodes {from} and {to}")]
    MissingSegment { from: NodeIndex, to: NodeIndex },

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("failed to load map: {0}")]
    MapLoad(String),
}

impl RouteError {
    pub fn optimization(reason: impl Into<String>, edges: &[DistanceEdge]) -> Self {
        RouteError::RouteOptimization {
            reason: reason.into(),
            edges: edges.to_vec(),
        }
    }
}

fn format_edges(edges: &[DistanceEdge]) -> String {
    edges
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, RouteError>;
