//! Remote authorization lookup configuration.

use serde::{Deserialize, Serialize};

/// Settings for the room access check against the external
/// authorization service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessCheckConfig {
    /// Base URL of the authorization endpoint. The room name is appended
    /// as a `room_name` query parameter.
    #[serde(default = "default_url")]
    pub url: String,
    /// Upper bound in seconds on how long a single join attempt may wait
    /// for the remote answer.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// How long a cached decision stays valid, in seconds.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,
    /// Rooms whose name starts with this prefix bypass the check
    /// entirely (reserved system rooms such as the lobby namespace).
    #[serde(default = "default_reserved_prefix")]
    pub reserved_room_prefix: String,
}

impl Default for AccessCheckConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_seconds: default_timeout(),
            cache_ttl_seconds: default_cache_ttl(),
            reserved_room_prefix: default_reserved_prefix(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:8000/api/check-room/".to_string()
}

fn default_timeout() -> u64 {
    5
}

fn default_cache_ttl() -> u64 {
    60
}

fn default_reserved_prefix() -> String {
    "lobby.".to_string()
}
