//! Cache Module
//!
//! Provides in-process caching with TTL expiration and insertion-order
//! eviction.

mod entry;
mod handle;
mod order;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::Cache;
pub use order::{InsertionOrder, Iter, Slot};
pub use store::CacheStore;

// == Public Constants ==
/// TTL meaning "never expires"
pub const NO_EXPIRATION: std::time::Duration = std::time::Duration::ZERO;
