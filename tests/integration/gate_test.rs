//! Integration tests for the access gate against a live mock service.

use std::sync::Arc;

use axum::http::StatusCode;

use roomgate::{AccessCheckClient, AccessGate, DecisionCache, ManualClock};

use crate::helpers::{self, MockAuthService};

fn make_gate(url: &str) -> (AccessGate, Arc<ManualClock>) {
    let config = helpers::test_config(url);
    let clock = Arc::new(ManualClock::start_now());
    let cache = DecisionCache::new(clock.clone());
    let checker =
        Arc::new(AccessCheckClient::new(&config.access_check).expect("client should build"));
    (
        AccessGate::new(cache, checker, &config.access_check),
        clock,
    )
}

#[tokio::test]
async fn test_allowed_room_is_cached_within_ttl() {
    let service = MockAuthService::allowing(true).await;
    let (gate, _clock) = make_gate(&service.url);

    assert!(gate.check_room_access("standup").await);
    assert!(gate.check_room_access("standup").await);

    // Second call served from cache, no second lookup.
    assert_eq!(service.hits(), 1);
}

#[tokio::test]
async fn test_expired_entry_triggers_new_lookup() {
    let service = MockAuthService::allowing(true).await;
    let (gate, clock) = make_gate(&service.url);

    assert!(gate.check_room_access("standup").await);
    clock.advance(chrono::Duration::seconds(61));
    assert!(gate.check_room_access("standup").await);

    assert_eq!(service.hits(), 2);
}

#[tokio::test]
async fn test_denied_room_returns_false() {
    let service = MockAuthService::allowing(false).await;
    let (gate, _clock) = make_gate(&service.url);

    assert!(!gate.check_room_access("standup").await);
}

#[tokio::test]
async fn test_server_error_fails_open_without_caching() {
    let service = MockAuthService::responding(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
    let (gate, _clock) = make_gate(&service.url);

    assert!(gate.check_room_access("standup").await);
    assert!(gate.cache().is_empty());

    // Not cached: the next attempt queries again.
    assert!(gate.check_room_access("standup").await);
    assert_eq!(service.hits(), 2);
}

#[tokio::test]
async fn test_unparseable_body_fails_open_without_caching() {
    let service = MockAuthService::responding(StatusCode::OK, "<html>not json</html>").await;
    let (gate, _clock) = make_gate(&service.url);

    assert!(gate.check_room_access("standup").await);
    assert!(gate.cache().is_empty());
}

#[tokio::test]
async fn test_missing_allowed_field_fails_open_without_caching() {
    let service = MockAuthService::responding(StatusCode::OK, r#"{"detail": "ok"}"#).await;
    let (gate, _clock) = make_gate(&service.url);

    assert!(gate.check_room_access("standup").await);
    assert!(gate.cache().is_empty());
}

#[tokio::test]
async fn test_timeout_fails_open_without_caching() {
    let service = MockAuthService::hanging().await;
    let (gate, _clock) = make_gate(&service.url);

    assert!(gate.check_room_access("standup").await);
    assert!(gate.cache().is_empty());
}

#[tokio::test]
async fn test_room_name_is_sent_as_query_parameter() {
    let service = MockAuthService::allowing(true).await;
    let (gate, _clock) = make_gate(&service.url);

    assert!(gate.check_room_access("weekly standup #3").await);

    // reqwest url-encodes the parameter; the server sees it decoded.
    assert_eq!(service.last_room().as_deref(), Some("weekly standup #3"));
}

#[tokio::test]
async fn test_concurrent_misses_resolve_consistently() {
    let service = MockAuthService::allowing(true).await;
    let (gate, _clock) = make_gate(&service.url);

    let (a, b) = tokio::join!(
        gate.check_room_access("standup"),
        gate.check_room_access("standup"),
    );

    // No in-flight deduplication: both misses may query, last write wins.
    assert!(a);
    assert!(b);
    assert_eq!(gate.cache().get("standup"), Some(true));
    assert!(service.hits() >= 1);
}
