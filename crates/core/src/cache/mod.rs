//! Caching of evaluated configuration properties

pub mod snapshot_cache;

pub use snapshot_cache::SnapshotCache;
