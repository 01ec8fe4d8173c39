//! Error types for the cache store
//!
//! Provides unified error handling using thiserror.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the disk-backed cache.
///
/// A cache miss is not an error: lookups return `Ok(None)` for absent or
/// expired entries. Errors are reserved for corrupt entries and refused
/// writes, and always surface to the caller untouched.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Metadata was present and fresh, but a required artifact is missing,
    /// unreadable, or failed to deserialize.
    ///
    /// This is a hard error rather than a miss: it indicates a crash
    /// mid-write by an older cache version or external tampering. The store
    /// never repairs or deletes the entry on its own.
    #[error("corrupt cache entry artifact {path}: {detail}")]
    CorruptEntry { path: PathBuf, detail: String },

    /// The filesystem refused a directory creation, artifact write, or
    /// entry removal.
    #[error("cache write failed at {path}")]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CacheError {
    pub(crate) fn corrupt(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::CorruptEntry {
            path: path.into(),
            detail: detail.into(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::StorageWrite {
            path: path.into(),
            source,
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
