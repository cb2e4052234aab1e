//! The access gate: cache-then-remote lookup with a fail-open policy.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, warn};

use roomgate_core::config::access::AccessCheckConfig;
use roomgate_core::result::AppResult;
use roomgate_cache::DecisionCache;

use crate::client::{AccessChecker, AccessResult};

/// Outcome of collapsing a remote lookup through the fail-open policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Resolution {
    /// The decision handed to the caller.
    allowed: bool,
    /// Whether the decision came from a trustworthy answer and may be
    /// cached. Fail-open results are never cached, so a transient outage
    /// is re-queried on the next attempt instead of lingering as a
    /// false allow.
    cacheable: bool,
}

/// Decides whether a join attempt for a given room should proceed.
#[derive(Debug, Clone)]
pub struct AccessGate {
    /// Cached decisions keyed by room name.
    cache: DecisionCache,
    /// Remote lookup against the authorization service.
    checker: Arc<dyn AccessChecker>,
    /// How long a cached decision stays valid.
    ttl: Duration,
}

impl AccessGate {
    /// Creates a gate over the given cache and checker.
    pub fn new(cache: DecisionCache, checker: Arc<dyn AccessChecker>, config: &AccessCheckConfig) -> Self {
        Self {
            cache,
            checker,
            ttl: Duration::seconds(config.cache_ttl_seconds as i64),
        }
    }

    /// Returns whether a join attempt for `room_name` should proceed.
    ///
    /// A live cache entry answers immediately. Otherwise the authorization
    /// service is queried within the configured timeout, and the answer is
    /// cached only when it was a parseable 200 carrying an `allowed`
    /// boolean. Every failure mode of the remote dependency degrades to
    /// `true`: an authorization-service outage must never lock all users
    /// out of all rooms.
    pub async fn check_room_access(&self, room_name: &str) -> bool {
        if let Some(allowed) = self.cache.get(room_name) {
            debug!(room = room_name, allowed, "Access decision served from cache");
            return allowed;
        }

        let resolution = resolve_fail_open(room_name, self.checker.query(room_name).await);
        if resolution.cacheable {
            self.cache.insert(room_name, resolution.allowed, self.ttl);
        }
        resolution.allowed
    }

    /// Returns a handle to the underlying cache (for wiring the sweeper).
    pub fn cache(&self) -> &DecisionCache {
        &self.cache
    }
}

/// Collapses every failure kind of the remote lookup to "allowed".
///
/// This is the single place the fail-open policy lives: connection
/// errors, timeouts, non-200 statuses, unparseable bodies, and answers
/// missing the `allowed` field all become an uncached `true`.
fn resolve_fail_open(room_name: &str, result: AppResult<AccessResult>) -> Resolution {
    match result {
        Ok(AccessResult { allowed: Some(allowed) }) => Resolution {
            allowed,
            cacheable: true,
        },
        Ok(AccessResult { allowed: None }) => {
            warn!(
                room = room_name,
                "Access check answer carried no 'allowed' field, failing open"
            );
            Resolution {
                allowed: true,
                cacheable: false,
            }
        }
        Err(e) => {
            warn!(room = room_name, error = %e, "Access check failed, failing open");
            Resolution {
                allowed: true,
                cacheable: false,
            }
        }
    }
}
