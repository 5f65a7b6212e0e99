// ABOUTME: API client with timeout enforcement, error classification, and read-path retry
// ABOUTME: Raw verbs, the FetchPhase retry state machine, and typed endpoint wrappers
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::transport::{
    HttpMethod, HttpTransport, ReqwestTransport, TransportError, TransportRequest,
    TransportResponse,
};
use crate::config::ApiConfig;
use crate::errors::ClientError;
use crate::models::{DisplayProfile, MealLogEntry, NewMealLogEntry, SaveReceipt, UserProfile};

/// Timeout for the lightweight health probe
const HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

/// A successful response body.
///
/// JSON when the Content-Type says so, raw text otherwise; callers must be
/// prepared for either based on the endpoint contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Parsed JSON body
    Json(serde_json::Value),
    /// Raw text body
    Text(String),
}

impl Payload {
    /// Decode this payload into a typed value.
    ///
    /// Text payloads are parsed as JSON text, covering backends that omit the
    /// Content-Type header on JSON bodies.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] when the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(self, endpoint: &str) -> Result<T, ClientError> {
        let result = match self {
            Self::Json(value) => serde_json::from_value(value),
            Self::Text(text) => serde_json::from_str(&text),
        };
        result.map_err(|source| ClientError::Decode {
            endpoint: endpoint.to_owned(),
            source,
        })
    }
}

/// States of a single fetch-with-retry call.
///
/// `Idle -> Attempting -> {success, terminal failure}`, with transient
/// failures cycling through `BackingOff` while budget remains. Cancellation
/// is drop-based: dropping the future aborts the in-flight request and the
/// pending backoff timer, and no further transitions occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// No attempt has started yet
    Idle,
    /// Attempt `attempt` (1-based) is in flight
    Attempting {
        /// 1-based attempt number
        attempt: u32,
    },
    /// Waiting out the linear backoff before the next attempt
    BackingOff {
        /// 1-based number of the attempt about to run
        next_attempt: u32,
    },
}

/// Envelope of `GET /api/users` (`{ users, total }`)
#[derive(Debug, Clone, Deserialize)]
pub struct UserList {
    /// All known user profiles, newest first
    pub users: Vec<UserProfile>,
    /// Total row count reported by the backend
    pub total: u64,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: UserProfile,
}

/// HTTP client for the food-logging backend.
///
/// Every operation takes explicit identifiers; nothing is read from ambient
/// global state. Independent requests may be issued concurrently; a single
/// fetch-with-retry sequence is strictly sequential.
pub struct ApiClient {
    config: ApiConfig,
    transport: Arc<dyn HttpTransport>,
}

impl ApiClient {
    /// Create a client over the shared pooled reqwest transport
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self::with_transport(config, Arc::new(ReqwestTransport))
    }

    /// Create a client over a custom transport (test seam)
    #[must_use]
    pub fn with_transport(config: ApiConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// The configuration this client was built with
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET an endpoint with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ClientError`] for timeouts, network failures,
    /// and non-2xx responses.
    pub async fn get(&self, endpoint: &str) -> Result<Payload, ClientError> {
        self.request(HttpMethod::Get, endpoint, None, self.config.timeout)
            .await
    }

    /// POST a JSON body to an endpoint.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ClientError`] for timeouts, network failures,
    /// and non-2xx responses.
    pub async fn post(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> Result<Payload, ClientError> {
        self.request(HttpMethod::Post, endpoint, Some(body), self.config.timeout)
            .await
    }

    /// PUT a JSON body to an endpoint.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ClientError`] for timeouts, network failures,
    /// and non-2xx responses.
    pub async fn put(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> Result<Payload, ClientError> {
        self.request(HttpMethod::Put, endpoint, Some(body), self.config.timeout)
            .await
    }

    /// DELETE an endpoint.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ClientError`] for timeouts, network failures,
    /// and non-2xx responses.
    pub async fn delete(&self, endpoint: &str) -> Result<Payload, ClientError> {
        self.request(HttpMethod::Delete, endpoint, None, self.config.timeout)
            .await
    }

    /// GET with the bounded linear-backoff retry policy.
    ///
    /// Only transient failures (network, timeout, 500/502/503/504) consume
    /// the retry budget; terminal failures, including 404, return
    /// immediately. Attempts are strictly sequential: attempt `n+1` never
    /// starts before attempt `n` has failed and its backoff has elapsed.
    ///
    /// # Errors
    ///
    /// Returns the terminal [`ClientError`] unchanged, or
    /// [`ClientError::UpstreamUnavailable`] once the budget is exhausted.
    pub async fn get_with_retry(&self, endpoint: &str) -> Result<Payload, ClientError> {
        let max_attempts = self.config.retry.max_retries + 1;
        let mut phase = FetchPhase::Idle;

        loop {
            phase = match phase {
                FetchPhase::Idle => FetchPhase::Attempting { attempt: 1 },
                FetchPhase::Attempting { attempt } => match self.get(endpoint).await {
                    Ok(payload) => return Ok(payload),
                    Err(error) if !error.is_transient() => return Err(error),
                    Err(error) => {
                        if attempt >= max_attempts {
                            warn!(
                                endpoint,
                                attempts = attempt,
                                error = %error,
                                "retry budget exhausted"
                            );
                            return Err(ClientError::UpstreamUnavailable {
                                endpoint: endpoint.to_owned(),
                                attempts: attempt,
                                message: error.to_string(),
                            });
                        }
                        warn!(
                            endpoint,
                            attempt,
                            error = %error,
                            "transient failure, backing off"
                        );
                        FetchPhase::BackingOff {
                            next_attempt: attempt + 1,
                        }
                    }
                },
                FetchPhase::BackingOff { next_attempt } => {
                    let delay = self.config.retry.delay_before(next_attempt);
                    debug!(endpoint, next_attempt, delay_ms = delay.as_millis() as u64, "waiting before retry");
                    tokio::time::sleep(delay).await;
                    FetchPhase::Attempting {
                        attempt: next_attempt,
                    }
                }
            };
        }
    }

    /// Fetch one user's anthropometric profile (`GET /api/users/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the user does not exist, or any
    /// other classified failure.
    pub async fn get_user(&self, user_id: i64) -> Result<UserProfile, ClientError> {
        let endpoint = format!("/api/users/{user_id}");
        self.get(&endpoint)
            .await?
            .decode::<UserEnvelope>(&endpoint)
            .map(|envelope| envelope.user)
    }

    /// Fetch all user profiles (`GET /api/users`).
    ///
    /// # Errors
    ///
    /// Returns a classified [`ClientError`] on failure.
    pub async fn list_users(&self) -> Result<UserList, ClientError> {
        let endpoint = "/api/users";
        self.get(endpoint).await?.decode(endpoint)
    }

    /// Fetch a user's display profile (`GET /api/profil/{user_id}`).
    ///
    /// The backend keeps at most one profile per user; a 404 means "not
    /// created yet" and maps to `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ClientError`] for anything other than success
    /// or 404.
    pub async fn get_display_profile(
        &self,
        user_id: i64,
    ) -> Result<Option<DisplayProfile>, ClientError> {
        let endpoint = format!("/api/profil/{user_id}");
        match self.get(&endpoint).await {
            Ok(payload) => payload.decode(&endpoint).map(Some),
            Err(ClientError::NotFound { .. }) => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Fetch a user's full meal log (`GET /api/riwayat/{user_id}`), newest
    /// first, with the retry policy applied.
    ///
    /// A 404 means the user has no history yet and maps to an empty list with
    /// zero retries, so the aggregator never sees "not found" as a failure.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UpstreamUnavailable`] after exhausting retries,
    /// or any terminal classified failure.
    pub async fn fetch_meal_log(&self, user_id: i64) -> Result<Vec<MealLogEntry>, ClientError> {
        let endpoint = format!("/api/riwayat/{user_id}");
        match self.get_with_retry(&endpoint).await {
            Ok(payload) => payload.decode(&endpoint),
            Err(ClientError::NotFound { .. }) => {
                debug!(user_id, "no meal-log history for user");
                Ok(Vec::new())
            }
            Err(error) => Err(error),
        }
    }

    /// Persist a meal-log entry (`POST /api/riwayat`).
    ///
    /// Validates locally first, then applies the write-time stamping rule (a
    /// missing timestamp becomes the current civil WIB date-time) before
    /// POSTing.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for bad input without any network
    /// I/O, or a classified failure from the request itself.
    pub async fn save_meal_log(&self, entry: NewMealLogEntry) -> Result<SaveReceipt, ClientError> {
        entry.validate()?;
        let entry = entry.stamped_now();
        let endpoint = "/api/riwayat";
        let body = serde_json::to_value(&entry).map_err(|e| {
            ClientError::validation(format!("could not encode request body: {e}"))
        })?;
        self.post(endpoint, body).await?.decode(endpoint)
    }

    /// Probe backend liveness (`GET /health`) with a short timeout.
    ///
    /// Never fails; any error is logged and reported as `false`.
    pub async fn health_check(&self) -> bool {
        match self
            .request(
                HttpMethod::Get,
                "/health",
                None,
                Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS),
            )
            .await
        {
            Ok(_) => true,
            Err(error) => {
                warn!(error = %error, "health check failed");
                false
            }
        }
    }

    /// Execute one request and classify the outcome
    async fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<serde_json::Value>,
        timeout: Duration,
    ) -> Result<Payload, ClientError> {
        let url = format!("{}{}", self.config.base_url, endpoint);
        debug!(%method, endpoint, "api request");

        let response = self
            .transport
            .execute(TransportRequest {
                method,
                url,
                body,
                timeout,
            })
            .await
            .map_err(|error| classify_transport_error(error, method, endpoint))?;

        if !(200..300).contains(&response.status) {
            let error = classify_status(&response, method, endpoint);
            warn!(%method, endpoint, status = response.status, error = %error, "api request failed");
            return Err(error);
        }

        info!(%method, endpoint, status = response.status, "api request succeeded");
        if response.is_json() {
            serde_json::from_str(&response.body)
                .map(Payload::Json)
                .map_err(|source| ClientError::Decode {
                    endpoint: endpoint.to_owned(),
                    source,
                })
        } else {
            Ok(Payload::Text(response.body))
        }
    }
}

fn classify_transport_error(
    error: TransportError,
    method: HttpMethod,
    endpoint: &str,
) -> ClientError {
    match error {
        TransportError::Timeout => ClientError::Timeout {
            method,
            endpoint: endpoint.to_owned(),
        },
        TransportError::Connect(message) | TransportError::Other(message) => {
            ClientError::Network {
                method,
                endpoint: endpoint.to_owned(),
                message,
            }
        }
    }
}

/// Build the most informative message a non-2xx response allows: the JSON
/// `message` or `error` field, then the raw body text, then the bare status.
fn classify_status(
    response: &TransportResponse,
    method: HttpMethod,
    endpoint: &str,
) -> ClientError {
    let message = error_message(response);
    if response.status == 404 {
        ClientError::NotFound {
            method,
            endpoint: endpoint.to_owned(),
            message,
        }
    } else {
        ClientError::Api {
            method,
            endpoint: endpoint.to_owned(),
            status: response.status,
            message,
        }
    }
}

fn error_message(response: &TransportResponse) -> String {
    if response.is_json() {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&response.body) {
            let field = value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .or_else(|| value.get("error").and_then(serde_json::Value::as_str));
            if let Some(text) = field {
                return text.to_owned();
            }
        }
    }
    if response.body.trim().is_empty() {
        format!("HTTP {}", response.status)
    } else {
        response.body.clone()
    }
}
