//! Invalidation Controller
//!
//! Empties the whole read cache after every successful mutation.
//!
//! Invalidation is deliberately coarse: a sale clears cached inventory and
//! audit listings too, and screens elsewhere depend on that.

use tracing::info;

use crate::cache::{lock_store, SharedStore};

#[derive(Debug, Clone)]
pub struct InvalidationController {
    store: SharedStore,
}

impl InvalidationController {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Called once per successful non-GET request.
    pub fn on_mutation_succeeded(&self, target: &str) {
        let dropped = lock_store(&self.store).clear();
        info!(target_path = %target, dropped, "mutation succeeded, read cache cleared");
    }

    /// Unconditional reset, e.g. between test cases or on a forced refresh.
    pub fn clear_all(&self) {
        let dropped = lock_store(&self.store).clear();
        info!(dropped, "read cache cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheEntry, CacheStore};
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn seeded_store() -> SharedStore {
        let mut store = CacheStore::new();
        let entry = CacheEntry::resolved(Arc::new(json!([])), Duration::from_secs(60));
        store.put("GET /inventory".to_string(), entry.clone());
        store.put("GET /audit".to_string(), entry);
        Arc::new(Mutex::new(store))
    }

    #[test]
    fn test_mutation_clears_unrelated_keys() {
        let store = seeded_store();
        let controller = InvalidationController::new(store.clone());

        controller.on_mutation_succeeded("/sales");

        assert!(lock_store(&store).is_empty());
    }

    #[test]
    fn test_clear_all_repeated() {
        let store = seeded_store();
        let controller = InvalidationController::new(store.clone());

        controller.clear_all();
        controller.clear_all();
        controller.clear_all();

        let guard = lock_store(&store);
        assert!(guard.is_empty());
        assert_eq!(guard.stats().clears, 3);
    }
}
