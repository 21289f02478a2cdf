//! Cache Store Module
//!
//! Map from cache key to entry, with lazy TTL expiry.

use std::collections::HashMap;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Storage for cached reads.
///
/// Holds at most one entry per key. The store is a plain synchronous
/// structure; callers share it behind a mutex and never hold the lock
/// across an await.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-entry storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Source of ids for pending entries
    next_fetch_id: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new empty CacheStore.
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Looks up an entry by key.
    ///
    /// An expired resolved entry is dropped and reported as absent.
    /// Every lookup counts as a hit, a coalesced join or a miss.
    pub fn get(&mut self, key: &str) -> Option<CacheEntry> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            return None;
        }

        let entry = self.entries.get(key).cloned();
        match &entry {
            Some(CacheEntry::Pending { .. }) => self.stats.record_coalesced(),
            Some(CacheEntry::Resolved { .. }) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        entry
    }

    // == Put ==
    /// Stores an entry, overwriting whatever the key held.
    pub fn put(&mut self, key: String, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    // == Remove ==
    /// Removes an entry by key. Returns whether anything was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Empties the whole store. Returns the number of entries dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        self.stats.record_clear();
        dropped
    }

    // == Pending Ownership ==
    /// Returns true if `key` still holds the pending entry registered with `id`.
    pub fn holds_pending(&self, key: &str, id: u64) -> bool {
        matches!(
            self.entries.get(key),
            Some(CacheEntry::Pending { id: current, .. }) if *current == id
        )
    }

    /// Hands out a fresh id for a pending entry.
    pub fn next_fetch_id(&mut self) -> u64 {
        self.next_fetch_id += 1;
        self.next_fetch_id
    }

    // == Prune Expired ==
    /// Removes all expired resolved entries.
    ///
    /// Returns the number of entries removed.
    pub fn prune_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        let removed = before - self.entries.len();
        for _ in 0..removed {
            self.stats.record_expiration();
        }
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Keys currently held, pending or resolved, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
