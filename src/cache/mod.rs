//! Cache Module
//!
//! Read cache for API responses: canonical keys, pending/resolved entries
//! with lazy TTL expiry, and hit/miss statistics.

mod entry;
pub mod key;
mod stats;
mod store;


use std::sync::{Arc, Mutex, MutexGuard};

// Re-export public types
pub use entry::{CacheEntry, SharedFetch, MAX_TTL};
pub use key::build_key;
pub use stats::CacheStats;
pub use store::CacheStore;

/// Store handle shared by the dispatcher, the invalidation controller and the sweeper.
pub type SharedStore = Arc<Mutex<CacheStore>>;

/// Locks the shared store, recovering from poisoning.
pub fn lock_store(store: &SharedStore) -> MutexGuard<'_, CacheStore> {
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
