//! Request Dispatcher
//!
//! `ApiClient::request` is the single entry point for HTTP access. GET
//! requests go through the read cache and are coalesced per key; every other
//! method goes straight to the network and clears the cache on success.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::FutureExt;
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::{
    build_key, lock_store, CacheEntry, CacheStats, CacheStore, SharedFetch, SharedStore,
};
use crate::client::invalidation::InvalidationController;
use crate::client::transport::{ReqwestTransport, Transport};
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::models::{Download, HttpRequest, Payload, RequestOptions};
use crate::tasks::spawn_sweeper;

// == Api Client ==
/// REST API client with a coalescing read cache.
///
/// Cloning is cheap; clones share the same cache and transport. Separate
/// clients built with `new`/`with_transport` never share a cache.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    cache_ttl: Duration,
    store: SharedStore,
    transport: Arc<dyn Transport>,
    invalidation: InvalidationController,
}

impl ApiClient {
    /// Creates a client that talks HTTP through reqwest.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Creates a client over a custom transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        let store: SharedStore = Arc::new(Mutex::new(CacheStore::new()));
        debug!(transport = transport.name(), base_url = %config.base_url, "api client ready");
        Ok(Self {
            base_url: config.base_url,
            cache_ttl: config.cache_ttl,
            invalidation: InvalidationController::new(store.clone()),
            store,
            transport,
        })
    }

    // == Request ==
    /// Performs a request and decodes the JSON response into `T`.
    ///
    /// # Arguments
    /// * `path` - Path relative to the base URL, may include a query string
    /// * `options` - Method, query, body and headers
    /// * `token` - Bearer token; not part of the cache key
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
        token: Option<&str>,
    ) -> Result<T> {
        let http = HttpRequest::build(&self.base_url, path, &options, token)?;
        let payload = if options.is_read() {
            let key = build_key(&options.method, path, &options.query);
            self.cached_read(key, http).await?
        } else {
            self.mutate(http).await?
        };
        payload.decode()
    }

    // == Download ==
    /// Fetches a raw body (PDF, CSV, ...) without touching the read cache.
    ///
    /// A successful non-GET download still counts as a mutation.
    pub async fn download(
        &self,
        path: &str,
        options: RequestOptions,
        token: Option<&str>,
    ) -> Result<Download> {
        let http = HttpRequest::build(&self.base_url, path, &options, token)?;
        let target = http.target();
        let response = self.transport.send(http).await?;
        if !response.is_success() {
            return Err(ApiError::from_status(response.status, &response.body));
        }
        if !options.is_read() {
            self.invalidation.on_mutation_succeeded(&target);
        }
        Ok(Download {
            content_type: response.content_type,
            bytes: response.body,
        })
    }

    // == Clear Request Cache ==
    /// Drops every cached read. Idempotent.
    pub fn clear_request_cache(&self) {
        self.invalidation.clear_all();
    }

    pub fn cache_stats(&self) -> CacheStats {
        lock_store(&self.store).stats()
    }

    /// Keys currently held by the cache, sorted.
    pub fn cached_entries(&self) -> Vec<String> {
        let mut keys = lock_store(&self.store).keys();
        keys.sort();
        keys
    }

    /// Starts a background task that prunes expired entries every `interval`.
    pub fn spawn_sweeper(&self, interval: Duration) -> JoinHandle<()> {
        spawn_sweeper(self.store.clone(), interval)
    }

    // == Cached Read ==
    /// Serves a GET from the cache, joins an in-flight fetch, or starts one.
    ///
    /// The lookup and the registration of a new pending entry happen under
    /// one lock, before the first await.
    async fn cached_read(&self, key: String, http: HttpRequest) -> Result<Payload> {
        let fetch = {
            let mut store = lock_store(&self.store);
            match store.get(&key) {
                Some(CacheEntry::Resolved { value, .. }) => {
                    debug!(%key, "cache hit");
                    return Ok(Payload::Json(value));
                }
                Some(CacheEntry::Pending { fetch, .. }) => {
                    debug!(%key, "joining in-flight request");
                    fetch
                }
                None => {
                    debug!(%key, "cache miss");
                    let id = store.next_fetch_id();
                    let fetch = self.spawn_fetch(key.clone(), id, http);
                    store.put(key, CacheEntry::pending(id, fetch.clone()));
                    fetch
                }
            }
        };
        fetch.await
    }

    /// Spawns the network call for a pending entry.
    ///
    /// The call runs on its own task, so it completes and settles the store
    /// even if every awaiting caller goes away.
    fn spawn_fetch(&self, key: String, id: u64, http: HttpRequest) -> SharedFetch {
        let store = self.store.clone();
        let transport = self.transport.clone();
        let ttl = self.cache_ttl;

        let handle = tokio::spawn(async move {
            let guard = PendingGuard::new(store, key, id);
            let outcome = match transport.send(http).await {
                Ok(response) => Payload::from_response(response),
                Err(e) => Err(e),
            };
            guard.settle(&outcome, ttl);
            outcome
        });

        async move {
            handle
                .await
                .unwrap_or_else(|e| Err(ApiError::Internal(format!("fetch task failed: {}", e))))
        }
        .boxed()
        .shared()
    }

    // == Mutate ==
    /// Sends a non-GET request; clears the cache if the server accepted it.
    async fn mutate(&self, http: HttpRequest) -> Result<Payload> {
        let target = http.target();
        let response = match self.transport.send(http).await {
            Ok(response) => response,
            Err(e) => {
                warn!(%target, error = %e, "mutation failed");
                return Err(e);
            }
        };
        if response.is_success() {
            self.invalidation.on_mutation_succeeded(&target);
        } else {
            warn!(%target, status = response.status, "mutation rejected");
        }
        Payload::from_response(response)
    }
}

/// Owns the pending entry of one fetch task.
///
/// If the task ends without settling (panic, runtime shutdown), dropping the
/// guard removes the entry so the next read goes back to the network.
struct PendingGuard {
    store: SharedStore,
    key: String,
    id: u64,
    settled: bool,
}

impl PendingGuard {
    fn new(store: SharedStore, key: String, id: u64) -> Self {
        Self {
            store,
            key,
            id,
            settled: false,
        }
    }

    fn settle(mut self, outcome: &Result<Payload>, ttl: Duration) {
        settle(&self.store, &self.key, self.id, outcome, ttl);
        self.settled = true;
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut store = lock_store(&self.store);
        if store.holds_pending(&self.key, self.id) {
            warn!(key = %self.key, "fetch task ended without a result, entry dropped");
            store.remove(&self.key);
        }
    }
}

/// Replaces the pending entry with the outcome of its fetch.
///
/// Only the fetch that registered the entry may settle it; if the entry was
/// cleared or replaced meanwhile the store is left alone.
fn settle(store: &SharedStore, key: &str, id: u64, outcome: &Result<Payload>, ttl: Duration) {
    let mut store = lock_store(store);
    if !store.holds_pending(key, id) {
        debug!(%key, "entry cleared while in flight, result not cached");
        return;
    }
    match outcome {
        Ok(Payload::Json(value)) => {
            store.put(key.to_string(), CacheEntry::resolved(value.clone(), ttl));
        }
        Ok(Payload::Raw { content_type, .. }) => {
            debug!(%key, %content_type, "non-JSON response, not cached");
            store.remove(key);
        }
        Err(e) => {
            warn!(%key, error = %e, "read failed, entry dropped");
            store.remove(key);
        }
    }
}
