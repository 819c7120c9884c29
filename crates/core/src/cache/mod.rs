//! In-memory request cache with a fixed time-to-live.
//!
//! Best-effort deduplication of identical upstream requests inside one
//! process. Entries are only ever replaced or treated as absent once older than
//! the TTL; there is no eviction, size bound or single-flight.

pub mod hash;

pub use hash::cache_key;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Default TTL for client-side response caching (15 minutes).
pub const CLIENT_CACHE_TTL: Duration = Duration::from_secs(15 * 60);

/// Default TTL for proxy-side response caching (5 minutes).
pub const PROXY_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Cached value with its write time.
#[derive(Debug, Clone)]
struct CachedEntry<V> {
    value: V,
    stored_at: Instant,
}

impl<V> CachedEntry<V> {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

/// TTL cache keyed by [`cache_key`] strings.
///
/// Cloning shares the underlying storage, so one instance can be created by
/// the owner and handed to every component that should see the same entries.
#[derive(Debug)]
pub struct RequestCache<V> {
    entries: Arc<RwLock<HashMap<String, CachedEntry<V>>>>,
    ttl: Duration,
}

impl<V> Clone for RequestCache<V> {
    fn clone(&self) -> Self {
        Self { entries: Arc::clone(&self.entries), ttl: self.ttl }
    }
}

impl<V: Clone> RequestCache<V> {
    /// Create an empty cache whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self { entries: Arc::new(RwLock::new(HashMap::new())), ttl }
    }

    /// Return the stored value if present and younger than the TTL.
    pub async fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) if entry.is_fresh(self.ttl) => {
                tracing::debug!("request cache hit for {}", key);
                Some(entry.value.clone())
            }
            Some(_) => {
                tracing::debug!("request cache entry expired for {}", key);
                None
            }
            None => None,
        }
    }

    /// Store a value, stamping it with the current time.
    pub async fn set(&self, key: impl Into<String>, value: V) {
        let mut entries = self.entries.write().await;
        entries.insert(key.into(), CachedEntry { value, stored_at: Instant::now() });
    }

    /// Number of stored entries, including expired ones.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_after_set() {
        let cache = RequestCache::new(CLIENT_CACHE_TTL);
        cache.set("top-headlines", "payload".to_string()).await;

        assert_eq!(cache.get("top-headlines").await, Some("payload".to_string()));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_missing_key() {
        let cache: RequestCache<String> = RequestCache::new(CLIENT_CACHE_TTL);
        assert_eq!(cache.get("nope").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = RequestCache::new(Duration::from_secs(60));
        cache.set("k", 1u32).await;

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get("k").await, Some(1));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_refreshes_timestamp() {
        let cache = RequestCache::new(Duration::from_secs(10));
        cache.set("k", 1u32).await;
        tokio::time::advance(Duration::from_secs(8)).await;
        cache.set("k", 2u32).await;
        tokio::time::advance(Duration::from_secs(8)).await;

        assert_eq!(cache.get("k").await, Some(2));
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = RequestCache::new(PROXY_CACHE_TTL);
        let shared = cache.clone();
        shared.set("k", "v").await;

        assert_eq!(cache.get("k").await, Some("v"));
        cache.clear().await;
        assert!(shared.is_empty().await);
    }

    #[test]
    fn test_default_ttls() {
        assert_eq!(CLIENT_CACHE_TTL, Duration::from_secs(900));
        assert_eq!(PROXY_CACHE_TTL, Duration::from_secs(300));
    }
}
