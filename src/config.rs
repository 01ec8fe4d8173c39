//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults. The cache directory may be relative; resolving it against a
/// project root is the caller's concern.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory for all cache scopes
    pub cache_dir: PathBuf,
    /// Maximum entry age in seconds before it reads back as a miss.
    /// Zero or negative disables expiration entirely.
    pub expiration_secs: i64,
    /// Wrap every artifact read and write in gzip compression
    pub use_gzip: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `HTTPCACHE_DIR` - Base cache directory (default: ".httpcache")
    /// - `HTTPCACHE_EXPIRATION_SECS` - Max entry age in seconds (default: 0 = never expire)
    /// - `HTTPCACHE_GZIP` - Enable gzip for stored artifacts (default: false)
    pub fn from_env() -> Self {
        Self {
            cache_dir: env::var("HTTPCACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".httpcache")),
            expiration_secs: env::var("HTTPCACHE_EXPIRATION_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            use_gzip: env::var("HTTPCACHE_GZIP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(".httpcache"),
            expiration_secs: 0,
            use_gzip: false,
        }
    }
}
