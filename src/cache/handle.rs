//! Cache Handle Module
//!
//! Thread-safe cache front end: one lock over the store, plus an optional
//! background sweeper.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use tracing::warn;

use crate::cache::CacheStore;
use crate::config::CacheConfig;
use crate::error::Result;
use crate::tasks::Sweeper;

// == Cache ==
/// Concurrency-safe key-value cache with per-entry TTL and FIFO capacity
/// eviction.
///
/// Share it across threads with `Arc<Cache<K, V>>`. Lookups take a shared
/// lock; everything that can remove entries, including [`Cache::keys`],
/// takes the exclusive one.
///
/// Dropping the cache stops its sweeper.
#[derive(Debug)]
pub struct Cache<K, V> {
    /// Entry store and insertion order, guarded together
    store: Arc<RwLock<CacheStore<K, V>>>,
    /// Background sweeper, None when disabled or closed
    sweeper: Mutex<Option<Sweeper>>,
    /// Configured sweep period
    sweep_interval: Duration,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // == Constructors ==
    /// Creates a cache and starts its sweeper.
    ///
    /// # Arguments
    /// * `sweep_interval` - Period between background sweeps, `Duration::ZERO` disables them
    /// * `max_size` - Maximum number of entries, 0 disables capacity eviction
    pub fn new(sweep_interval: Duration, max_size: usize) -> Self {
        Self::with_config(CacheConfig::new(sweep_interval, max_size))
    }

    /// Creates a cache from a [`CacheConfig`].
    ///
    /// If the sweeper cannot be started, a warning is logged and expired
    /// entries are only purged by [`Cache::keys`] and
    /// [`Cache::purge_expired`].
    pub fn with_config(config: CacheConfig) -> Self {
        match Self::try_with_config(config.clone()) {
            Ok(cache) => cache,
            Err(err) => {
                warn!("{}; falling back to lazy expiration", err);
                Self::assemble(new_store(config.max_size), None, config.sweep_interval)
            }
        }
    }

    /// Creates a cache from a [`CacheConfig`], failing if the sweeper
    /// cannot be started.
    pub fn try_with_config(config: CacheConfig) -> Result<Self> {
        let store = new_store(config.max_size);

        let sweeper = if config.sweeping_enabled() {
            Some(Sweeper::spawn(Arc::clone(&store), config.sweep_interval)?)
        } else {
            None
        };

        Ok(Self::assemble(store, sweeper, config.sweep_interval))
    }

    fn assemble(
        store: Arc<RwLock<CacheStore<K, V>>>,
        sweeper: Option<Sweeper>,
        sweep_interval: Duration,
    ) -> Self {
        Self {
            store,
            sweeper: Mutex::new(sweeper),
            sweep_interval,
        }
    }

    // == Set ==
    /// Stores a value under `key`.
    ///
    /// A zero `ttl` means the entry never expires. Overwriting a key keeps
    /// its original eviction position; inserting a new key into a full
    /// cache evicts the oldest insertion.
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        self.store.write().set(key, value, ttl, Instant::now());
    }

    // == Get ==
    /// Returns a clone of the value if the key is present and unexpired.
    ///
    /// An expired entry reads as absent but is not removed.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.read().get(key, Instant::now()).cloned()
    }

    // == Exists ==
    /// Checks whether the key is present and unexpired.
    pub fn exists<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.read().contains(key, Instant::now())
    }

    // == Delete ==
    /// Removes the key if present.
    pub fn delete<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.write().delete(key);
    }

    // == Keys ==
    /// Returns every live key, in no particular order.
    ///
    /// Expired entries met during the scan are removed from the cache, so
    /// a call to `keys` also acts as a sweep.
    pub fn keys(&self) -> Vec<K> {
        self.store.write().live_keys(Instant::now())
    }

    /// Removes every expired entry now and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.store.write().purge_expired(Instant::now())
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.store.write().clear();
    }

    /// Number of stored entries, counting expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    /// Capacity bound, 0 = unbounded.
    pub fn max_size(&self) -> usize {
        self.store.read().max_size()
    }

    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    /// Whether a background sweeper is running.
    pub fn is_sweeping(&self) -> bool {
        self.sweeper.lock().is_some()
    }

    // == Close ==
    /// Stops the background sweeper.
    ///
    /// Safe to call more than once. The cache stays usable afterwards;
    /// expired entries are then only purged by [`Cache::keys`] and
    /// [`Cache::purge_expired`].
    pub fn close(&self) {
        let sweeper = self.sweeper.lock().take();
        if let Some(sweeper) = sweeper {
            sweeper.stop();
        }
    }
}

fn new_store<K, V>(max_size: usize) -> Arc<RwLock<CacheStore<K, V>>>
where
    K: Eq + Hash + Clone,
{
    Arc::new(RwLock::new(CacheStore::new(max_size)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_cache_disabled_sweeper() {
        let cache: Cache<String, i32> = Cache::new(Duration::ZERO, 10);

        assert!(!cache.is_sweeping());
        assert_eq!(cache.sweep_interval(), Duration::ZERO);
        assert_eq!(cache.max_size(), 10);
    }

    #[test]
    fn test_cache_set_get_delete() {
        let cache = Cache::new(Duration::ZERO, 10);

        cache.set("key".to_string(), 42, Duration::ZERO);
        assert_eq!(cache.get("key"), Some(42));
        assert!(cache.exists("key"));

        cache.delete("key");
        assert_eq!(cache.get("key"), None);
        assert!(!cache.exists("key"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expired_read_does_not_purge() {
        let cache = Cache::new(Duration::ZERO, 10);

        cache.set("key".to_string(), "value".to_string(), Duration::from_millis(20));
        sleep(Duration::from_millis(60));

        assert_eq!(cache.get("key"), None);
        assert!(!cache.exists("key"));
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.purge_expired(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_close_is_idempotent() {
        let cache: Cache<String, i32> = Cache::new(Duration::from_millis(20), 10);
        assert!(cache.is_sweeping());

        cache.close();
        cache.close();

        assert!(!cache.is_sweeping());
        cache.set("still".to_string(), 1, Duration::ZERO);
        assert_eq!(cache.get("still"), Some(1));
    }

    #[test]
    fn test_try_with_config() {
        let config = CacheConfig::default().with_sweep_interval(Duration::from_millis(20));
        let cache: Cache<u64, u64> = Cache::try_with_config(config).unwrap();

        assert!(cache.is_sweeping());
        assert_eq!(cache.max_size(), 1000);
    }

    #[test]
    fn test_clear() {
        let cache = Cache::new(Duration::ZERO, 0);

        cache.set(1u32, "a", Duration::ZERO);
        cache.set(2u32, "b", Duration::ZERO);
        cache.clear();

        assert!(cache.is_empty());
        assert!(cache.keys().is_empty());
    }
}
