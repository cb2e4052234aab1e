//! # roomgate-cache
//!
//! In-memory cache of room access decisions, keyed by room name, plus the
//! periodic sweeper that reclaims expired entries.
//!
//! The cache lives for the process lifetime and is never persisted. It has
//! no capacity bound beyond TTL expiry; unbounded growth under a flood of
//! distinct room names is a known operational limitation.

pub mod store;
pub mod sweep;

pub use store::DecisionCache;
pub use sweep::CacheSweeper;
