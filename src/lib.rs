//! Mini TTL Cache - A lightweight in-process cache
//!
//! Provides a thread-safe key-value cache with per-entry TTL expiration and
//! insertion-order (FIFO) capacity eviction. A background sweeper reclaims
//! expired entries on a fixed interval.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use mini_ttl_cache::{Cache, NO_EXPIRATION};
//!
//! let cache = Cache::new(Duration::from_secs(1), 2);
//!
//! cache.set("a".to_string(), 1, NO_EXPIRATION);
//! cache.set("b".to_string(), 2, Duration::from_secs(60));
//! cache.set("c".to_string(), 3, NO_EXPIRATION);
//!
//! // "a" was inserted first, so it made room for "c"
//! assert_eq!(cache.get("a"), None);
//! assert_eq!(cache.get("c"), Some(3));
//! assert_eq!(cache.keys().len(), 2);
//!
//! cache.close();
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{Cache, NO_EXPIRATION};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
