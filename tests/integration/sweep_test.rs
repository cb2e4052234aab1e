//! Integration tests for the cache sweeper.

use std::sync::Arc;

use roomgate::{CacheSweeper, DecisionCache, ManualClock};
use roomgate_core::config::sweep::SweepConfig;

#[tokio::test]
async fn test_sweep_cycle_removes_expired_and_keeps_live_entries() {
    let clock = Arc::new(ManualClock::start_now());
    let cache = DecisionCache::new(clock.clone());
    let sweeper = CacheSweeper::new(cache.clone(), SweepConfig::default());

    cache.insert("expired", true, chrono::Duration::seconds(5));
    cache.insert("live", false, chrono::Duration::seconds(600));
    clock.advance(chrono::Duration::seconds(6));

    sweeper.sweep_once();

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("live"), Some(false));
    assert_eq!(cache.get("expired"), None);
}

#[tokio::test]
async fn test_background_sweeper_evicts_on_its_interval() {
    let clock = Arc::new(ManualClock::start_now());
    let cache = DecisionCache::new(clock.clone());
    let config = SweepConfig {
        enabled: true,
        interval_seconds: 1,
    };

    cache.insert("expired", true, chrono::Duration::seconds(1));
    clock.advance(chrono::Duration::seconds(2));

    let (shutdown, handle) = CacheSweeper::new(cache.clone(), config).spawn();

    // One interval plus slack for the first sweep cycle to run.
    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;
    assert!(cache.is_empty());

    shutdown.send(true).expect("sweeper should still be listening");
    handle.await.expect("sweeper task should join cleanly");
}

#[tokio::test]
async fn test_lookups_stay_correct_without_the_sweeper() {
    let clock = Arc::new(ManualClock::start_now());
    let cache = DecisionCache::new(clock.clone());

    cache.insert("standup", false, chrono::Duration::seconds(60));
    clock.advance(chrono::Duration::seconds(61));

    // No sweep has run, yet the expired entry already reads as a miss.
    assert_eq!(cache.get("standup"), None);
    assert_eq!(cache.len(), 1);
}
