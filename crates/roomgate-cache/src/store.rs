//! Decision store — room name to cached allow/deny with per-entry expiry.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::debug;

use roomgate_core::traits::Clock;

/// A single cached access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    /// Whether the room may be joined.
    pub allowed: bool,
    /// Instant after which this entry is no longer trusted.
    pub expires_at: DateTime<Utc>,
}

/// In-memory map of room name to [`CacheEntry`].
///
/// `DashMap` keeps at most one entry per key and serializes concurrent
/// reads/writes through its sharded locks; a fresh lookup for the same
/// room simply overwrites the previous entry (last write wins).
#[derive(Debug, Clone)]
pub struct DecisionCache {
    /// The underlying map.
    entries: Arc<DashMap<String, CacheEntry>>,
    /// Time source for expiry checks.
    clock: Arc<dyn Clock>,
}

impl DecisionCache {
    /// Creates an empty cache using the given clock.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            clock,
        }
    }

    /// Returns the cached decision for `room_name` if a live entry exists.
    ///
    /// An entry is live only while `now < expires_at`; expired entries
    /// read as misses even before the sweeper removes them.
    pub fn get(&self, room_name: &str) -> Option<bool> {
        let entry = self.entries.get(room_name)?;
        if self.clock.now() < entry.expires_at {
            Some(entry.allowed)
        } else {
            None
        }
    }

    /// Stores a decision for `room_name`, valid for `ttl` from now.
    ///
    /// Overwrites any previous entry for the same room.
    pub fn insert(&self, room_name: &str, allowed: bool, ttl: Duration) {
        let expires_at = self.clock.now() + ttl;
        self.entries
            .insert(room_name.to_string(), CacheEntry { allowed, expires_at });
        debug!(room = room_name, allowed, %expires_at, "Cached access decision");
    }

    /// Removes every entry whose expiry has passed and returns how many
    /// were evicted. Purely memory reclamation; lookup correctness never
    /// depends on this running.
    pub fn evict_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| now < entry.expires_at);
        before - self.entries.len()
    }

    /// Returns the number of entries, live or expired.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
