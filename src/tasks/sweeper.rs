//! Expired Entry Sweeper
//!
//! Background task that periodically drops expired cache entries.
//!
//! Lookups already treat expired entries as absent; the sweeper only keeps
//! memory bounded for keys that are never read again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{lock_store, SharedStore};

/// Spawns a background task that periodically prunes expired cache entries.
///
/// # Arguments
/// * `store` - shared handle to the cache store
/// * `interval` - time between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
pub fn spawn_sweeper(store: SharedStore, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(?interval, "starting cache sweeper");

        loop {
            tokio::time::sleep(interval).await;

            let removed = lock_store(&store).prune_expired();

            if removed > 0 {
                info!("cache sweep: removed {} expired entries", removed);
            } else {
                debug!("cache sweep: no expired entries found");
            }
        }
    })
}
