//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with insertion-order tracking
//! and TTL expiration.
//!
//! The store is not synchronized. [`crate::Cache`] wraps it in a single lock
//! so the map and the order index always change together. Every time-aware
//! method takes the current instant as an argument.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::{CacheEntry, InsertionOrder};

// == Cache Store ==
/// Cache storage with FIFO capacity eviction and TTL support.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// First-insertion order of the stored keys
    order: InsertionOrder<K>,
    /// Maximum number of entries allowed, 0 = unbounded
    max_size: usize,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore with the specified capacity.
    ///
    /// # Arguments
    /// * `max_size` - Maximum number of entries, 0 disables capacity eviction
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            max_size,
        }
    }

    // == Set ==
    /// Stores a key-value pair.
    ///
    /// Overwriting an existing key replaces its value and expiration but
    /// keeps its place in the insertion order. Inserting a new key into a
    /// full store first evicts the oldest insertion, whether or not it has
    /// expired.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Time to live, `Duration::ZERO` for no expiration
    /// * `now` - Current instant
    ///
    /// # Returns
    /// The key evicted to make room, if any.
    pub fn set(&mut self, key: K, value: V, ttl: Duration, now: Instant) -> Option<K> {
        if let Some(entry) = self.entries.get_mut(&key) {
            *entry = CacheEntry::new(value, ttl, now, entry.slot);
            return None;
        }

        let evicted = if self.max_size > 0 && self.entries.len() >= self.max_size {
            self.evict_oldest()
        } else {
            None
        };

        let slot = self.order.push_back(key.clone());
        self.entries
            .insert(key, CacheEntry::new(value, ttl, now, slot));

        evicted
    }

    // == Get ==
    /// Returns the value if the key is present and not expired at `now`.
    ///
    /// Expired entries are left in place.
    pub fn get<Q>(&self, key: &Q, now: Instant) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| &entry.value)
    }

    // == Contains ==
    /// Checks liveness of a key without returning its value.
    pub fn contains<Q>(&self, key: &Q, now: Instant) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key, now).is_some()
    }

    // == Delete ==
    /// Removes an entry by key, expired or not.
    ///
    /// Returns the removed value, or None if the key was absent.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entry = self.entries.remove(key)?;
        self.order.remove(entry.slot);
        Some(entry.value)
    }

    // == Live Keys ==
    /// Returns all keys live at `now`, purging expired entries on the way.
    pub fn live_keys(&mut self, now: Instant) -> Vec<K> {
        let Self { entries, order, .. } = self;
        let mut keys = Vec::with_capacity(entries.len());

        entries.retain(|key, entry| {
            if entry.is_expired_at(now) {
                order.remove(entry.slot);
                false
            } else {
                keys.push(key.clone());
                true
            }
        });

        keys
    }

    // == Purge Expired ==
    /// Removes all entries expired at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let Self { entries, order, .. } = self;
        let before = entries.len();

        entries.retain(|_, entry| {
            if entry.is_expired_at(now) {
                order.remove(entry.slot);
                false
            } else {
                true
            }
        });

        before - entries.len()
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the capacity bound, 0 = unbounded.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Iterates stored keys from oldest to newest insertion.
    pub fn insertion_order(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    fn evict_oldest(&mut self) -> Option<K> {
        let oldest = self.order.pop_front()?;
        self.entries.remove(&oldest);
        debug!(
            "Capacity eviction: removed oldest entry, {} remaining",
            self.entries.len()
        );
        Some(oldest)
    }
}
