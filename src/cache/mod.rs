//! Cache Module
//!
//! Disk-backed request/response caching with lazy expiration and an optional
//! gzip byte-stream transform.

mod entry;
mod key;
mod stats;
mod store;
mod transform;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{CacheEntry, EntryMetadata};
pub use key::{shard_prefix, FingerprintFn, KeyDeriver};
pub use stats::CacheStats;
pub use store::{ClockFn, FilesystemCacheStore};
pub use transform::ByteTransform;
