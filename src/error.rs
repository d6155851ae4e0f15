//! Error types for the cache
//!
//! Cache operations themselves never fail; only starting the background
//! sweeper can.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The sweeper's timer runtime could not be built
    #[error("Failed to build sweeper runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The sweeper thread could not be spawned
    #[error("Failed to spawn sweeper thread: {0}")]
    Spawn(#[source] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
