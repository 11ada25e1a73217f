//! In-process TTL cache and token-bucket rate limiter.
//!
//! Both maps are bounded: expired or refilled entries are swept on write and
//! the oldest entry gives way once the capacity is reached.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

pub const DEFAULT_CACHE_ENTRIES: usize = 1_024;
pub const DEFAULT_LIMITER_BUCKETS: usize = 10_000;

/// How often the limiter drops buckets that have refilled.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

pub struct TtlCache<K, V> {
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
    ttl: Duration,
    max_entries: usize,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, DEFAULT_CACHE_ENTRIES)
    }

    pub fn with_capacity(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    /// Returns a live entry; expired entries are dropped on read.
    pub async fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub async fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.lock().await;
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.inserted_at.elapsed() < ttl);

        if !entries.contains_key(&key) && entries.len() >= self.max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.inserted_at)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }

        entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub capacity: f64,
    pub refill_per_sec: f64,
    pub max_buckets: usize,
}

impl RateLimitConfig {
    pub fn per_minute(requests: u32) -> Self {
        let capacity = f64::from(requests.max(1));
        Self {
            capacity,
            refill_per_sec: capacity / 60.0,
            max_buckets: DEFAULT_LIMITER_BUCKETS,
        }
    }
}

#[derive(Debug, Clone)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl Bucket {
    fn tokens_at(&self, now: Instant, cfg: &RateLimitConfig) -> f64 {
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        (self.tokens + elapsed * cfg.refill_per_sec).min(cfg.capacity)
    }
}

struct Buckets {
    by_key: HashMap<String, Bucket>,
    last_sweep: Instant,
}

pub struct RateLimiter {
    buckets: Mutex<Buckets>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            buckets: Mutex::new(Buckets {
                by_key: HashMap::new(),
                last_sweep: Instant::now(),
            }),
            config,
        }
    }

    pub async fn allow(&self, key: &str) -> bool {
        let now = Instant::now();
        let cfg = self.config;
        let mut lock = self.buckets.lock().await;

        if !lock.by_key.contains_key(key) {
            if now.duration_since(lock.last_sweep) >= SWEEP_INTERVAL
                || lock.by_key.len() >= cfg.max_buckets
            {
                sweep(&mut lock, now, &cfg);
            }
            if lock.by_key.len() >= cfg.max_buckets.max(1) {
                evict_stalest(&mut lock.by_key);
            }
        }

        let bucket = lock.by_key.entry(key.to_string()).or_insert_with(|| Bucket {
            tokens: cfg.capacity,
            last_refill: now,
        });
        bucket.tokens = bucket.tokens_at(now, &cfg);
        bucket.last_refill = now;
        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    pub async fn len(&self) -> usize {
        self.buckets.lock().await.by_key.len()
    }
}

/// Drops buckets that have refilled; a fresh bucket starts full anyway.
fn sweep(buckets: &mut Buckets, now: Instant, cfg: &RateLimitConfig) {
    buckets
        .by_key
        .retain(|_, bucket| bucket.tokens_at(now, cfg) < cfg.capacity);
    buckets.last_sweep = now;
}

fn evict_stalest(by_key: &mut HashMap<String, Bucket>) {
    let stalest = by_key
        .iter()
        .min_by_key(|(_, bucket)| bucket.last_refill)
        .map(|(key, _)| key.clone());
    if let Some(stalest) = stalest {
        by_key.remove(&stalest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_refill(capacity: f64, max_buckets: usize) -> RateLimitConfig {
        RateLimitConfig {
            capacity,
            refill_per_sec: 0.0,
            max_buckets,
        }
    }

    #[tokio::test]
    async fn test_cache_returns_fresh_entries() {
        let cache = TtlCache::new(Duration::from_secs(600));
        cache.insert("CO".to_string(), vec!["Bogotá".to_string()]).await;

        assert_eq!(
            cache.get(&"CO".to_string()).await,
            Some(vec!["Bogotá".to_string()])
        );
        assert_eq!(cache.get(&"PE".to_string()).await, None);
    }

    #[tokio::test]
    async fn test_cache_evicts_expired_entries() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.insert("CO", 1).await;

        assert_eq!(cache.get(&"CO").await, None);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_cache_insert_sweeps_expired_keys() {
        let cache = TtlCache::new(Duration::ZERO);
        for n in 0..1_000 {
            cache.insert(n, n).await;
        }

        // Only the entry just written survives the sweep.
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_cache_capacity_drops_oldest_entry() {
        let cache = TtlCache::with_capacity(Duration::from_secs(600), 2);
        cache.insert("CO", 1).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        cache.insert("PE", 2).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        cache.insert("CO", 3).await;
        assert_eq!(cache.len().await, 2);

        cache.insert("MX", 4).await;
        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.get(&"CO").await, Some(3));
        assert_eq!(cache.get(&"PE").await, None);
        assert_eq!(cache.get(&"MX").await, Some(4));
    }

    #[tokio::test]
    async fn test_rate_limiter_exhausts_bucket() {
        let limiter = RateLimiter::new(no_refill(2.0, DEFAULT_LIMITER_BUCKETS));

        assert!(limiter.allow("10.0.0.1").await);
        assert!(limiter.allow("10.0.0.1").await);
        assert!(!limiter.allow("10.0.0.1").await);
        assert!(limiter.allow("10.0.0.2").await);
    }

    #[tokio::test]
    async fn test_rate_limiter_bucket_count_is_bounded() {
        let limiter = RateLimiter::new(no_refill(5.0, 100));
        for n in 0..1_000 {
            assert!(limiter.allow(&format!("198.51.100.{n}")).await);
        }

        assert!(limiter.len().await <= 100);
    }

    #[tokio::test]
    async fn test_rate_limiter_drops_refilled_buckets() {
        let limiter = RateLimiter::new(RateLimitConfig {
            capacity: 1.0,
            refill_per_sec: 1_000_000.0,
            max_buckets: 3,
        });
        for n in 0..3 {
            assert!(limiter.allow(&format!("10.0.0.{n}")).await);
        }
        tokio::time::sleep(Duration::from_millis(5)).await;

        // Every existing bucket has refilled, so the sweep clears them all.
        assert!(limiter.allow("10.0.0.9").await);
        assert_eq!(limiter.len().await, 1);
    }

    #[test]
    fn test_per_minute_config() {
        let cfg = RateLimitConfig::per_minute(120);
        assert_eq!(cfg.capacity, 120.0);
        assert_eq!(cfg.refill_per_sec, 2.0);
        assert_eq!(cfg.max_buckets, DEFAULT_LIMITER_BUCKETS);
        assert_eq!(RateLimitConfig::per_minute(0).capacity, 1.0);
    }
}
