//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside a cache.
//!
//! # Tasks
//! - TTL Sweeper: Removes expired cache entries at a configured interval

mod sweeper;

pub use sweeper::Sweeper;
