//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

use crate::cache::Slot;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration instant, None = no expiration
    pub expires_at: Option<Instant>,
    /// Position of the key in the insertion order index
    pub slot: Slot,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Time to live, `Duration::ZERO` for no expiration
    /// * `now` - Insertion instant the TTL counts from
    /// * `slot` - Handle of the key's node in the insertion order index
    pub fn new(value: V, ttl: Duration, now: Instant, slot: Slot) -> Self {
        Self {
            value,
            expires_at: expiration(ttl, now),
            slot,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// An entry is expired once `now` reaches the expiration instant, so it
    /// is live strictly before its deadline.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }
}

// == Utility Functions ==
/// Computes the absolute expiration for a TTL.
///
/// A zero TTL, or one too large to represent as an `Instant`, never expires.
pub fn expiration(ttl: Duration, now: Instant) -> Option<Instant> {
    if ttl.is_zero() {
        None
    } else {
        now.checked_add(ttl)
    }
}
