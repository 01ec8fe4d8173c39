//! Key Derivation Module
//!
//! Produces the stable, deterministic identifier used to shard storage and
//! detect cache hits.

use std::fmt;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::models::CacheRequest;

/// Injected fingerprint function mapping a request to its identity string.
pub type FingerprintFn = Arc<dyn Fn(&CacheRequest) -> String + Send + Sync>;

// == Key Deriver ==
/// Derives deterministic cache keys from request identity.
///
/// The fingerprint function is injected; the default hashes method, URL, and
/// body with SHA-256. Two requests the fingerprint considers identical always
/// map to the same key, across calls and process restarts.
#[derive(Clone)]
pub struct KeyDeriver {
    fingerprint: FingerprintFn,
}

impl KeyDeriver {
    // == Constructor ==
    /// Creates a deriver around a caller-supplied fingerprint function.
    pub fn new(fingerprint: FingerprintFn) -> Self {
        Self { fingerprint }
    }

    // == Derive ==
    /// Derives the key for `request`. Pure: no side effects, no failure modes.
    pub fn derive(&self, request: &CacheRequest) -> String {
        (self.fingerprint)(request)
    }
}

impl Default for KeyDeriver {
    /// SHA-256 hex digest over method, URL, and body.
    fn default() -> Self {
        Self::new(Arc::new(|request: &CacheRequest| {
            let mut hasher = Sha256::new();
            hasher.update(request.method.as_bytes());
            hasher.update(b"\n");
            hasher.update(request.url.as_bytes());
            hasher.update(b"\n");
            hasher.update(&request.body);
            hex::encode(hasher.finalize())
        }))
    }
}

impl fmt::Debug for KeyDeriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyDeriver").finish_non_exhaustive()
    }
}

// == Shard Prefix ==
/// First two characters of `key`, used as an intermediate directory to bound
/// directory fan-out. Keys shorter than two characters shard under themselves.
pub fn shard_prefix(key: &str) -> &str {
    key.get(..2).unwrap_or(key)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_is_deterministic() {
        let keys = KeyDeriver::default();
        let request = CacheRequest::new("GET", "http://example.com/a");
        assert_eq!(keys.derive(&request), keys.derive(&request));
    }

    #[test]
    fn test_derive_stable_across_instances() {
        let request = CacheRequest::new("GET", "http://example.com/a");
        let first = KeyDeriver::default().derive(&request);
        let second = KeyDeriver::default().derive(&request);
        assert_eq!(first, second);
    }

    #[test]
    fn test_distinct_urls_yield_distinct_keys() {
        let keys = KeyDeriver::default();
        let a = keys.derive(&CacheRequest::new("GET", "http://example.com/a"));
        let b = keys.derive(&CacheRequest::new("GET", "http://example.com/b"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_method_and_body_affect_key() {
        let keys = KeyDeriver::default();
        let get = CacheRequest::new("GET", "http://example.com/a");
        let post = CacheRequest::new("POST", "http://example.com/a");
        let post_body = CacheRequest::new("POST", "http://example.com/a").with_body(b"x=1".to_vec());
        assert_ne!(keys.derive(&get), keys.derive(&post));
        assert_ne!(keys.derive(&post), keys.derive(&post_body));
    }

    #[test]
    fn test_default_key_is_hex_sha256() {
        let key = KeyDeriver::default().derive(&CacheRequest::new("GET", "http://example.com/"));
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_shard_prefix() {
        assert_eq!(shard_prefix("abcdef"), "ab");
        assert_eq!(shard_prefix("a"), "a");
        assert_eq!(shard_prefix(""), "");
    }

    #[test]
    fn test_injected_fingerprint() {
        let keys = KeyDeriver::new(Arc::new(|request: &CacheRequest| request.url.clone()));
        let request = CacheRequest::new("GET", "http://example.com/a");
        assert_eq!(keys.derive(&request), "http://example.com/a");
    }
}
