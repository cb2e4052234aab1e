//! Cache sweeper — periodic eviction loop for expired decisions.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing;

use roomgate_core::config::sweep::SweepConfig;

use crate::store::DecisionCache;

/// Background task that periodically evicts expired cache entries.
#[derive(Debug)]
pub struct CacheSweeper {
    /// The cache being swept.
    cache: DecisionCache,
    /// Sweep configuration.
    config: SweepConfig,
}

impl CacheSweeper {
    /// Creates a new sweeper over the given cache.
    pub fn new(cache: DecisionCache, config: SweepConfig) -> Self {
        Self { cache, config }
    }

    /// Runs the sweep loop until the cancel signal is received.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        if !self.config.enabled {
            tracing::info!("Cache sweeper disabled by configuration");
            return;
        }

        tracing::info!(
            interval_seconds = self.config.interval_seconds,
            "Cache sweeper started"
        );

        let mut interval = time::interval(Duration::from_secs(self.config.interval_seconds));
        // First tick fires immediately; skip it so the initial sweep
        // happens one full interval after startup.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        tracing::info!("Cache sweeper received shutdown signal");
                        break;
                    }
                }
                _ = interval.tick() => {
                    self.sweep_once();
                }
            }
        }
    }

    /// Runs a single sweep cycle.
    pub fn sweep_once(&self) {
        let evicted = self.cache.evict_expired();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = self.cache.len(), "Swept expired cache entries");
        } else {
            tracing::trace!(remaining = self.cache.len(), "Sweep cycle found nothing to evict");
        }
    }

    /// Spawns the sweep loop onto the current runtime and returns the
    /// shutdown sender paired with the task handle.
    pub fn spawn(self) -> (watch::Sender<bool>, tokio::task::JoinHandle<()>) {
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            self.run(rx).await;
        });
        (tx, handle)
    }
}
