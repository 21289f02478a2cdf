//! Cache Statistics Module
//!
//! Tracks read cache behaviour: hits, misses, coalesced joins and clears.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups answered by a fresh resolved entry
    pub hits: u64,
    /// Lookups that found nothing usable and went to the network
    pub misses: u64,
    /// Lookups that joined a fetch already in flight
    pub coalesced: u64,
    /// Resolved entries dropped because their TTL lapsed
    pub expirations: u64,
    /// Number of times the whole store was emptied
    pub clears: u64,
    /// When the store was last emptied
    pub last_cleared_at: Option<DateTime<Utc>>,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Share of lookups that did not trigger a network call.
    ///
    /// Returns (hits + coalesced) / all lookups, or 0.0 if no lookups were made.
    pub fn hit_rate(&self) -> f64 {
        let served = self.hits + self.coalesced;
        let total = served + self.misses;
        if total == 0 {
            0.0
        } else {
            served as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_coalesced(&mut self) {
        self.coalesced += 1;
    }

    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    // == Record Clear ==
    /// Counts a full clear and stamps its time.
    pub fn record_clear(&mut self) {
        self.clears += 1;
        self.last_cleared_at = Some(Utc::now());
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.coalesced, 0);
        assert_eq!(stats.clears, 0);
        assert!(stats.last_cleared_at.is_none());
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_counts_coalesced_as_served() {
        let mut stats = CacheStats::new();
        stats.record_miss();
        stats.record_coalesced();
        stats.record_coalesced();
        stats.record_hit();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_hit_rate_all_misses() {
        let mut stats = CacheStats::new();
        stats.record_miss();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_record_clear_stamps_time() {
        let mut stats = CacheStats::new();
        stats.record_clear();
        stats.record_clear();
        assert_eq!(stats.clears, 2);
        assert!(stats.last_cleared_at.is_some());
    }

    #[test]
    fn test_stats_serialize() {
        let mut stats = CacheStats::new();
        stats.record_expiration();
        stats.set_total_entries(3);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["expirations"], 1);
        assert_eq!(json["total_entries"], 3);
        assert!(json["last_cleared_at"].is_null());
    }
}
