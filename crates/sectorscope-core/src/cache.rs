//! Keyed TTL cache for upstream payloads.
//!
//! Entries remember when they were stored; freshness is decided at lookup
//! against the store-wide TTL, so a shorter TTL takes effect immediately.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// How a single fetch interacts with the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheMode {
    /// Serve a fresh entry if present, otherwise fetch and store.
    #[default]
    Use,
    /// Always fetch, then store the new payload.
    Refresh,
    /// Always fetch; never read or write the cache.
    Bypass,
}

impl CacheMode {
    pub const fn reads(self) -> bool {
        matches!(self, Self::Use)
    }

    pub const fn writes(self) -> bool {
        !matches!(self, Self::Bypass)
    }
}

#[derive(Debug, Clone)]
struct CachedPayload {
    body: String,
    stored_at: Instant,
}

#[derive(Debug)]
struct CacheInner {
    entries: HashMap<String, CachedPayload>,
    ttl: Duration,
}

impl CacheInner {
    fn is_fresh(&self, payload: &CachedPayload) -> bool {
        payload.stored_at.elapsed() < self.ttl
    }
}

/// Shared payload cache keyed by request URL.
#[derive(Debug, Clone)]
pub struct CacheStore {
    inner: Arc<tokio::sync::RwLock<CacheInner>>,
}

impl CacheStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(tokio::sync::RwLock::new(CacheInner {
                entries: HashMap::new(),
                ttl,
            })),
        }
    }

    /// A cache that never holds anything.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Fresh payload stored under `key`, if any.
    pub async fn get(&self, key: &str) -> Option<String> {
        let inner = self.inner.read().await;
        inner
            .entries
            .get(key)
            .filter(|payload| inner.is_fresh(payload))
            .map(|payload| payload.body.clone())
    }

    /// Store `body` under `key`. No-op when the TTL is zero.
    pub async fn put(&self, key: impl Into<String>, body: impl Into<String>) {
        let mut inner = self.inner.write().await;
        if inner.ttl.is_zero() {
            return;
        }
        inner.entries.insert(
            key.into(),
            CachedPayload {
                body: body.into(),
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop entries whose TTL has elapsed.
    pub async fn evict_stale(&self) {
        let mut inner = self.inner.write().await;
        let ttl = inner.ttl;
        inner
            .entries
            .retain(|_, payload| payload.stored_at.elapsed() < ttl);
    }

    /// Stored entries, stale ones included.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn is_disabled(&self) -> bool {
        self.inner.read().await.ttl.is_zero()
    }
}
