//! HTTP client for the external room authorization service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use roomgate_core::config::access::AccessCheckConfig;
use roomgate_core::error::AppError;
use roomgate_core::result::AppResult;

/// Answer from the authorization service.
///
/// The service is expected to reply `200` with `{ "allowed": <bool> }`;
/// an absent or null `allowed` field deserializes to `None` and is left
/// to the fail-open policy to interpret.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AccessResult {
    /// Whether the room may still be joined, if the service said.
    #[serde(default)]
    pub allowed: Option<bool>,
}

/// Trait for the remote access lookup, so the gate can be exercised
/// without a live authorization service.
#[async_trait]
pub trait AccessChecker: Send + Sync + std::fmt::Debug {
    /// Asks the authorization service whether `room_name` may be joined.
    ///
    /// Returns `Err` for every transport-level or protocol-level failure:
    /// connection errors, timeouts, non-200 statuses, and unparseable
    /// bodies. The caller decides what a failure means.
    async fn query(&self, room_name: &str) -> AppResult<AccessResult>;
}

/// Production [`AccessChecker`] backed by `reqwest`.
///
/// The request timeout is set on the client, so every lookup is bounded;
/// a response arriving after the deadline is dropped with the future and
/// can never influence a decision already made.
#[derive(Debug, Clone)]
pub struct AccessCheckClient {
    /// Underlying HTTP client with the configured timeout.
    http: reqwest::Client,
    /// Base URL of the authorization endpoint.
    url: String,
}

impl AccessCheckClient {
    /// Builds a client from configuration.
    pub fn new(config: &AccessCheckConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    roomgate_core::error::ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            http,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl AccessChecker for AccessCheckClient {
    async fn query(&self, room_name: &str) -> AppResult<AccessResult> {
        let response = self
            .http
            .get(&self.url)
            .query(&[("room_name", room_name)])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    roomgate_core::error::ErrorKind::ExternalService,
                    format!("Access check request failed: {e}"),
                    e,
                )
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(AppError::external_service(format!(
                "Access check returned status {status}"
            )));
        }

        response.json::<AccessResult>().await.map_err(|e| {
            AppError::with_source(
                roomgate_core::error::ErrorKind::ExternalService,
                format!("Access check body was not valid JSON: {e}"),
                e,
            )
        })
    }
}
