//! httpcache - A disk-backed HTTP request/response cache
//!
//! Persists completed request/response pairs so a later, logically identical
//! request can be served without re-issuing the network call. Entries expire
//! lazily based on a configurable age and every artifact can optionally pass
//! through a gzip byte-stream transform.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use cache::{
    ByteTransform, CacheEntry, CacheStats, ClockFn, EntryMetadata, FilesystemCacheStore,
    FingerprintFn, KeyDeriver,
};
pub use config::Config;
pub use error::{CacheError, Result};
pub use models::{CacheRequest, CacheResponse, Headers};
