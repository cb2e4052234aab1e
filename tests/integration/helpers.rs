//! Shared test helpers: a mock authorization service and config builders.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;

use roomgate::AppConfig;

/// Canned behavior of the mock authorization service.
#[derive(Debug, Clone)]
enum MockBehavior {
    /// Answer with this status and body.
    Respond { status: StatusCode, body: String },
    /// Never answer, forcing the client timeout to fire.
    Hang,
}

#[derive(Debug)]
struct MockState {
    behavior: MockBehavior,
    hits: AtomicUsize,
    last_room: Mutex<Option<String>>,
}

/// In-process stand-in for the external authorization service.
///
/// A real `axum` server on an ephemeral port, so the production
/// `reqwest` client is exercised end to end.
pub struct MockAuthService {
    /// URL to point the gate's `access_check.url` at.
    pub url: String,
    state: Arc<MockState>,
}

impl MockAuthService {
    async fn spawn(behavior: MockBehavior) -> Self {
        let state = Arc::new(MockState {
            behavior,
            hits: AtomicUsize::new(0),
            last_room: Mutex::new(None),
        });

        let app = Router::new()
            .route("/api/check-room/", get(check_room))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ephemeral port should be available");
        let addr = listener.local_addr().expect("listener should have an address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("mock auth service should serve");
        });

        Self {
            url: format!("http://{addr}/api/check-room/"),
            state,
        }
    }

    /// Service answering `200 {"allowed": <allowed>}`.
    pub async fn allowing(allowed: bool) -> Self {
        Self::spawn(MockBehavior::Respond {
            status: StatusCode::OK,
            body: serde_json::json!({ "allowed": allowed }).to_string(),
        })
        .await
    }

    /// Service answering an arbitrary status and body.
    pub async fn responding(status: StatusCode, body: &str) -> Self {
        Self::spawn(MockBehavior::Respond {
            status,
            body: body.to_string(),
        })
        .await
    }

    /// Service that accepts the request and never answers.
    pub async fn hanging() -> Self {
        Self::spawn(MockBehavior::Hang).await
    }

    /// Number of lookups the service has received.
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    /// The `room_name` query parameter of the most recent lookup.
    pub fn last_room(&self) -> Option<String> {
        self.state.last_room.lock().unwrap().clone()
    }
}

async fn check_room(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.last_room.lock().unwrap() = params.get("room_name").cloned();

    match &state.behavior {
        MockBehavior::Respond { status, body } => (*status, body.clone()),
        MockBehavior::Hang => {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
            (StatusCode::OK, String::new())
        }
    }
}

/// Configuration pointed at the mock service, with a short client
/// timeout so hang tests finish quickly.
pub fn test_config(url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.access_check.url = url.to_string();
    config.access_check.timeout_seconds = 1;
    config.sweep.interval_seconds = 3600;
    config
}
