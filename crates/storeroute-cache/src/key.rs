use serde::{Deserialize, Serialize};
use std::fmt;
use storeroute_core::Coordinate;

/// Identifies one stop configuration in the cache.
///
/// A blake3 digest over the ordered stop coordinates, hex encoded. Reordering
/// the stops or moving any of them yields a different key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn for_stops(stops: &[Coordinate]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"[");
        for (i, stop) in stops.iter().enumerate() {
            if i > 0 {
                hasher.update(b",");
            }
            hasher.update(format!("({},{})", stop.row, stop.col).as_bytes());
        }
        hasher.update(b"]");
        CacheKey(hex::encode(hasher.finalize().as_bytes()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
