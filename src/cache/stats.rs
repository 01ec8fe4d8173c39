//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and stores.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (entry absent or expired)
    pub misses: u64,
    /// Number of misses caused specifically by expired entries
    pub expired: u64,
    /// Number of entries written
    pub stores: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Records a miss caused by an expired entry.
    pub fn record_expired(&mut self) {
        self.expired += 1;
        self.misses += 1;
    }

    /// Increments the store counter.
    pub fn record_store(&mut self) {
        self.stores += 1;
    }
}
