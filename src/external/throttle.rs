// ABOUTME: Sliding-window rate limiter and TTL response cache for remote API clients
// ABOUTME: Keeps remote tiers under their request quotas and avoids repeat lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};

/// Sliding one-window request limiter
#[derive(Debug)]
pub struct RateLimiter {
    requests: Mutex<Vec<Instant>>,
    limit: usize,
    window: Duration,
}

impl RateLimiter {
    /// `limit` requests per `window`
    #[must_use]
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            limit: limit.max(1) as usize,
            window,
        }
    }

    /// `limit` requests per minute
    #[must_use]
    pub fn per_minute(limit: u32) -> Self {
        Self::new(limit, Duration::from_secs(60))
    }

    /// Wait until a slot is free, then claim it
    pub async fn acquire(&self) {
        let mut requests = self.requests.lock().await;
        loop {
            let now = Instant::now();
            requests.retain(|&t| now.duration_since(t) < self.window);
            if requests.len() < self.limit {
                requests.push(now);
                return;
            }
            let oldest = requests.first().copied().unwrap_or(now);
            let wait = self.window.saturating_sub(now.duration_since(oldest));
            tokio::time::sleep(wait.max(Duration::from_millis(10))).await;
        }
    }

    /// Requests recorded in the current window
    pub async fn in_window(&self) -> usize {
        let now = Instant::now();
        let mut requests = self.requests.lock().await;
        requests.retain(|&t| now.duration_since(t) < self.window);
        requests.len()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

/// Expiring in-memory cache for decoded responses
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Cache whose entries live for `ttl`
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Live value for `key`
    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| Instant::now() < entry.expires_at)
            .map(|entry| entry.data.clone())
    }

    /// Store `value`, replacing any previous entry
    pub async fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        entries.retain(|_, entry| now < entry.expires_at);
        entries.insert(
            key,
            CacheEntry {
                data: value,
                expires_at: now + self.ttl,
            },
        );
    }

    /// Number of stored entries (live or not yet pruned)
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ttl_cache_expiry() {
        let cache: TtlCache<String, u32> = TtlCache::new(Duration::from_millis(20));
        cache.insert("apple".to_owned(), 1).await;
        assert_eq!(cache.get(&"apple".to_owned()).await, Some(1));
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(cache.get(&"apple".to_owned()).await, None);

        cache.insert("pear".to_owned(), 2).await;
        assert_eq!(cache.len().await, 1);
        assert!(!cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_rate_limiter_counts_requests() {
        let limiter = RateLimiter::per_minute(3);
        limiter.acquire().await;
        limiter.acquire().await;
        assert_eq!(limiter.in_window().await, 2);
    }
}
