//! Cache sweep configuration.

use serde::{Deserialize, Serialize};

/// Periodic cache eviction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Whether the background sweep task runs at all. Lookups stay
    /// correct without it; expired entries simply linger in memory.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Interval in seconds between sweep cycles.
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            interval_seconds: default_interval(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_interval() -> u64 {
    300
}
