//! TTL Sweeper Task
//!
//! Background task that periodically removes expired cache entries.
//!
//! Each sweeper owns a dedicated thread running a single-threaded tokio
//! runtime, so a cache can be built from synchronous code or from inside
//! another runtime, and separate caches never share a timer.

use std::hash::Hash;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tokio::sync::oneshot;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::error::{CacheError, Result};

/// Handle to a running sweeper.
///
/// Stopping (explicitly or by dropping the handle) signals the task and
/// joins its thread. The signal is observed immediately, not at the next
/// tick.
#[derive(Debug)]
pub struct Sweeper {
    stop: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl Sweeper {
    /// Spawns a sweeper that purges expired entries from `store` every
    /// `interval`.
    ///
    /// The first pass runs one full interval after the spawn. Each pass
    /// captures the current instant once and holds the write lock only for
    /// the duration of the purge.
    ///
    /// # Arguments
    /// * `store` - Shared reference to the cache store
    /// * `interval` - Period between sweeps, must be non-zero
    ///
    /// # Example
    /// ```ignore
    /// let store = Arc::new(RwLock::new(CacheStore::new(1000)));
    /// let sweeper = Sweeper::spawn(store.clone(), Duration::from_secs(1))?;
    /// // Later, during shutdown:
    /// sweeper.stop();
    /// ```
    pub fn spawn<K, V>(store: Arc<RwLock<CacheStore<K, V>>>, interval: Duration) -> Result<Self>
    where
        K: Eq + Hash + Clone + Send + Sync + 'static,
        V: Send + Sync + 'static,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(CacheError::Runtime)?;

        let (stop_tx, stop_rx) = oneshot::channel();

        let thread = thread::Builder::new()
            .name("cache-sweeper".to_string())
            .spawn(move || runtime.block_on(run(store, interval, stop_rx)))
            .map_err(CacheError::Spawn)?;

        Ok(Self {
            stop: Some(stop_tx),
            thread: Some(thread),
        })
    }

    /// Stops the sweeper and waits for its thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            // The receiver is only gone if the task already exited
            let _ = stop.send(());
        }

        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Cache sweeper thread panicked");
            }
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run<K, V>(
    store: Arc<RwLock<CacheStore<K, V>>>,
    interval: Duration,
    mut stop: oneshot::Receiver<()>,
) where
    K: Eq + Hash + Clone,
{
    info!("Starting cache sweeper with interval of {:?}", interval);

    let mut ticker = time::interval_at(time::Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            // A pending stop always wins over a ready tick
            biased;

            _ = &mut stop => break,
            _ = ticker.tick() => {
                let now = Instant::now();
                let removed = store.write().purge_expired(now);

                if removed > 0 {
                    info!("TTL sweep: removed {} expired entries", removed);
                } else {
                    debug!("TTL sweep: no expired entries found");
                }
            }
        }
    }

    info!("Cache sweeper stopped");
}
