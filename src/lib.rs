//! Roomgate — pre-join room authorization gate for a conferencing server.
//!
//! Wires the crates together: builds the decision cache, the remote
//! authorization client, the access gate and its pre-join hook, registers
//! the hook ahead of default admission handling, and runs the cache
//! sweeper in the background.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

pub use roomgate_cache::{CacheSweeper, DecisionCache};
pub use roomgate_core::config::AppConfig;
pub use roomgate_core::error::AppError;
pub use roomgate_core::events::{HookDecision, JoinRejection, PreJoinEvent};
pub use roomgate_core::hooks::{HookRegistry, PreJoinHandler};
pub use roomgate_core::result::AppResult;
pub use roomgate_core::traits::{Clock, ManualClock, SystemClock};
pub use roomgate_gate::{AccessCheckClient, AccessGate, AccessGateHook};

/// Fully wired gate: hook registry, access gate, and running sweeper.
#[derive(Debug)]
pub struct Gatekeeper {
    /// Registry the host dispatches pre-join events through.
    registry: Arc<HookRegistry>,
    /// The gate itself, exposed for direct `check_room_access` calls.
    gate: Arc<AccessGate>,
    /// Shutdown signal for the sweeper task.
    sweeper_shutdown: watch::Sender<bool>,
    /// Handle of the sweeper task.
    sweeper_handle: tokio::task::JoinHandle<()>,
}

impl Gatekeeper {
    /// Builds and starts the gate from configuration.
    ///
    /// Uses the wall clock; tests assembling the pieces by hand can
    /// inject a manual clock instead.
    pub async fn start(config: &AppConfig) -> AppResult<Self> {
        let clock = Arc::new(SystemClock);
        let cache = DecisionCache::new(clock);
        let checker = Arc::new(AccessCheckClient::new(&config.access_check)?);
        let gate = Arc::new(AccessGate::new(
            cache.clone(),
            checker,
            &config.access_check,
        ));

        let registry = Arc::new(HookRegistry::new());
        let hook = AccessGateHook::new(
            Arc::clone(&gate),
            config.access_check.reserved_room_prefix.clone(),
        );
        registry.register(Arc::new(hook)).await;

        let (sweeper_shutdown, sweeper_handle) =
            CacheSweeper::new(cache, config.sweep.clone()).spawn();

        tracing::info!(
            url = %config.access_check.url,
            timeout_seconds = config.access_check.timeout_seconds,
            cache_ttl_seconds = config.access_check.cache_ttl_seconds,
            "Room access gate started"
        );

        Ok(Self {
            registry,
            gate,
            sweeper_shutdown,
            sweeper_handle,
        })
    }

    /// Dispatches a pre-join event from the host through the registry.
    pub async fn handle_pre_join(&self, event: &PreJoinEvent) -> HookDecision {
        self.registry.dispatch(event).await
    }

    /// Returns the hook registry, for hosts that dispatch directly.
    pub fn registry(&self) -> Arc<HookRegistry> {
        Arc::clone(&self.registry)
    }

    /// Returns the access gate.
    pub fn gate(&self) -> Arc<AccessGate> {
        Arc::clone(&self.gate)
    }

    /// Stops the sweeper and waits for it to finish.
    pub async fn shutdown(self) {
        // Receiver may already be gone if the sweeper was disabled.
        let _ = self.sweeper_shutdown.send(true);
        if let Err(e) = self.sweeper_handle.await {
            tracing::error!("Sweeper task panicked: {e}");
        }
        tracing::info!("Room access gate stopped");
    }
}

/// Initialize tracing/logging from configuration.
pub fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
