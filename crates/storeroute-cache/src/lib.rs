//! Distance cache.
//!
//! Pairwise stop-to-stop searches are the expensive part of planner start-up.
//! Their results are persisted in one JSON document holding an entry per stop
//! configuration, so restarting with an unchanged registry skips the work and
//! switching between registries does not evict older entries.
//!
//! A missing, empty or unreadable document is a cache miss. Writes replace
//! the whole document through a temporary file and a rename. There is no
//! locking: one writing process at a time.

mod key;
mod store;

pub use key::CacheKey;
pub use store::DistanceCache;
