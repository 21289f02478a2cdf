//! Cache Entry Module
//!
//! Defines the two states of a cached read: in flight, or resolved with a TTL.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::{BoxFuture, Shared};
use serde_json::Value;

use crate::error::Result;
use crate::models::Payload;

/// A network fetch that any number of callers can await.
///
/// Every clone resolves to the same outcome, success or failure.
pub type SharedFetch = Shared<BoxFuture<'static, Result<Payload>>>;

/// Longest freshness a resolved entry can have (one year).
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

// == Cache Entry ==
/// One cached read.
#[derive(Clone)]
pub enum CacheEntry {
    /// A fetch is in flight; `id` identifies the fetch that registered it
    Pending { id: u64, fetch: SharedFetch },
    /// The fetch succeeded and the value is fresh until `expires_at`
    Resolved {
        value: Arc<Value>,
        created_at: Instant,
        expires_at: Instant,
    },
}

impl CacheEntry {
    // == Constructors ==
    /// Creates an entry for a fetch that has not settled yet.
    pub fn pending(id: u64, fetch: SharedFetch) -> Self {
        CacheEntry::Pending { id, fetch }
    }

    /// Creates a resolved entry that expires `ttl` from now.
    ///
    /// `ttl` is capped at `MAX_TTL`.
    pub fn resolved(value: Arc<Value>, ttl: Duration) -> Self {
        let now = Instant::now();
        CacheEntry::Resolved {
            value,
            created_at: now,
            expires_at: now.checked_add(ttl.min(MAX_TTL)).unwrap_or(now),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// A resolved entry is expired once the current time reaches `expires_at`.
    /// Pending entries never expire; they are settled by their fetch.
    pub fn is_expired(&self) -> bool {
        match self {
            CacheEntry::Pending { .. } => false,
            CacheEntry::Resolved { expires_at, .. } => Instant::now() >= *expires_at,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, CacheEntry::Pending { .. })
    }

    // == Time To Live ==
    /// Returns remaining freshness of a resolved entry, or None while pending.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has expired
    /// - `Some(remaining)` if the entry is resolved and fresh
    /// - `None` if the entry is still pending
    pub fn ttl_remaining(&self) -> Option<Duration> {
        match self {
            CacheEntry::Pending { .. } => None,
            CacheEntry::Resolved { expires_at, .. } => {
                Some(expires_at.saturating_duration_since(Instant::now()))
            }
        }
    }
}

impl fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheEntry::Pending { id, .. } => f.debug_struct("Pending").field("id", id).finish(),
            CacheEntry::Resolved {
                value,
                created_at,
                expires_at,
            } => f
                .debug_struct("Resolved")
                .field("value", value)
                .field("created_at", created_at)
                .field("expires_at", expires_at)
                .finish(),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use futures::FutureExt;
    use serde_json::json;
    use std::thread::sleep;

    fn ready_fetch() -> SharedFetch {
        async { Ok::<_, ApiError>(Payload::Json(Arc::new(json!(1)))) }
            .boxed()
            .shared()
    }

    #[test]
    fn test_pending_never_expires() {
        let entry = CacheEntry::pending(1, ready_fetch());

        assert!(entry.is_pending());
        assert!(!entry.is_expired());
        assert!(entry.ttl_remaining().is_none());
    }

    #[test]
    fn test_resolved_entry_is_fresh() {
        let entry = CacheEntry::resolved(Arc::new(json!([])), Duration::from_secs(60));

        assert!(!entry.is_pending());
        assert!(!entry.is_expired());
        let remaining = entry.ttl_remaining().unwrap();
        assert!(remaining <= Duration::from_secs(60));
        assert!(remaining >= Duration::from_secs(59));
    }

    #[test]
    fn test_resolved_entry_expiration() {
        let entry = CacheEntry::resolved(Arc::new(json!([])), Duration::from_millis(20));

        assert!(!entry.is_expired());

        // Wait for expiration
        sleep(Duration::from_millis(40));

        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn test_huge_ttl_is_capped() {
        let entry = CacheEntry::resolved(Arc::new(json!([])), Duration::MAX);

        assert!(!entry.is_expired());
        let remaining = entry.ttl_remaining().unwrap();
        assert!(remaining <= MAX_TTL);
        assert!(remaining > MAX_TTL - Duration::from_secs(1));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry::Resolved {
            value: Arc::new(Value::Null),
            created_at: now,
            expires_at: now, // Expires exactly at creation time
        };

        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }

    #[test]
    fn test_debug_hides_future() {
        let entry = CacheEntry::pending(7, ready_fetch());
        assert_eq!(format!("{:?}", entry), "Pending { id: 7 }");
    }
}
