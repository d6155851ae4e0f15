//! Configuration Module
//!
//! Handles the two cache construction parameters, optionally loaded from
//! environment variables.

use std::env;
use std::time::Duration;

/// Default sweep interval in milliseconds
const DEFAULT_SWEEP_INTERVAL_MS: u64 = 1000;

/// Default maximum number of entries
const DEFAULT_MAX_SIZE: usize = 1000;

/// Cache configuration parameters.
///
/// A zero `sweep_interval` disables background sweeping and a zero
/// `max_size` disables capacity eviction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Period between background sweeps of expired entries
    pub sweep_interval: Duration,
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
}

impl CacheConfig {
    /// Creates a new CacheConfig.
    pub fn new(sweep_interval: Duration, max_size: usize) -> Self {
        Self {
            sweep_interval,
            max_size,
        }
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_SWEEP_INTERVAL_MS` - Sweep period in milliseconds, 0 disables (default: 1000)
    /// - `CACHE_MAX_SIZE` - Maximum cache entries, 0 is unbounded (default: 1000)
    pub fn from_env() -> Self {
        let sweep_interval_ms = env::var("CACHE_SWEEP_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SWEEP_INTERVAL_MS);

        Self {
            sweep_interval: Duration::from_millis(sweep_interval_ms),
            max_size: env::var("CACHE_MAX_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_SIZE),
        }
    }

    /// Returns a copy with the given sweep interval.
    pub fn with_sweep_interval(mut self, sweep_interval: Duration) -> Self {
        self.sweep_interval = sweep_interval;
        self
    }

    /// Returns a copy with the given capacity bound.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Whether a background sweeper should run.
    pub fn sweeping_enabled(&self) -> bool {
        !self.sweep_interval.is_zero()
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            sweep_interval: Duration::from_millis(DEFAULT_SWEEP_INTERVAL_MS),
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.sweep_interval, Duration::from_secs(1));
        assert_eq!(config.max_size, 1000);
        assert!(config.sweeping_enabled());
    }

    #[test]
    fn test_config_builders() {
        let config = CacheConfig::default()
            .with_sweep_interval(Duration::ZERO)
            .with_max_size(0);

        assert_eq!(config, CacheConfig::new(Duration::ZERO, 0));
        assert!(!config.sweeping_enabled());
    }

    #[test]
    fn test_config_from_env() {
        // Both cases share the same variables, so they run in one test
        env::remove_var("CACHE_SWEEP_INTERVAL_MS");
        env::remove_var("CACHE_MAX_SIZE");

        let config = CacheConfig::from_env();
        assert_eq!(config, CacheConfig::default());

        env::set_var("CACHE_SWEEP_INTERVAL_MS", "250");
        env::set_var("CACHE_MAX_SIZE", "not-a-number");

        let config = CacheConfig::from_env();
        assert_eq!(config.sweep_interval, Duration::from_millis(250));
        assert_eq!(config.max_size, 1000);

        env::remove_var("CACHE_SWEEP_INTERVAL_MS");
        env::remove_var("CACHE_MAX_SIZE");
    }
}
