// ABOUTME: Transport seam between the API client and the wire
// ABOUTME: HttpTransport trait plus the pooled reqwest implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use thiserror::Error;

/// Default connection timeout in seconds for the shared client
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Global shared HTTP client with connection pooling
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Get the shared pooled HTTP client.
///
/// Per-request deadlines are set on each request, so the client itself only
/// carries the connect timeout.
fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        ClientBuilder::new()
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// HTTP method of a transport request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// A single outgoing request, fully resolved (absolute URL, deadline)
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL
    pub url: String,
    /// Optional JSON body (POST/PUT)
    pub body: Option<serde_json::Value>,
    /// Total deadline for this request
    pub timeout: Duration,
}

/// A raw response as seen by the classification layer
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Content-Type header value, if present
    pub content_type: Option<String>,
    /// Response body as text
    pub body: String,
}

impl TransportResponse {
    /// Whether the Content-Type indicates a JSON body
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }
}

/// Wire-level failures, before any HTTP status exists
#[derive(Debug, Error)]
pub enum TransportError {
    /// The deadline elapsed; the in-flight request was cancelled
    #[error("request timed out")]
    Timeout,
    /// Connection could not be established
    #[error("connection failed: {0}")]
    Connect(String),
    /// Any other transport failure
    #[error("transport failure: {0}")]
    Other(String),
}

/// The seam between request classification and the wire.
///
/// Dropping the returned future cancels the underlying request; transports
/// must not hold the network handle or any timer past that point.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute one request and return the raw response
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Production transport over the shared pooled reqwest client
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestTransport;

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = shared_client()
            .request(request.method.into(), &request.url)
            .timeout(request.timeout)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(classify_reqwest_error)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(TransportResponse {
            status,
            content_type,
            body,
        })
    }
}

fn classify_reqwest_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else {
        TransportError::Other(error.to_string())
    }
}
