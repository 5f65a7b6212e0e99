// ABOUTME: Error taxonomy for the data client and the nutrition aggregator
// ABOUTME: Classifies failures as transient (retryable) or terminal per the retry policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types.
//!
//! Client failures carry the originating endpoint, method, and HTTP status so
//! callers and log consumers never lose the request context. Transient
//! classes (network, timeout, 500/502/503/504) are absorbed by the read-path
//! retry budget; everything else propagates unchanged.

use thiserror::Error;

use crate::client::HttpMethod;

/// Errors surfaced by the HTTP data client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Malformed or missing required input, detected before any network I/O.
    /// Never retried.
    #[error("invalid request: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// The backend reported 404. Read paths that model "no history yet" map
    /// this to an empty result instead of propagating it.
    #[error("{method} {endpoint} returned 404: {message}")]
    NotFound {
        /// HTTP method of the failed request
        method: HttpMethod,
        /// Endpoint path that was requested
        endpoint: String,
        /// Message extracted from the error payload
        message: String,
    },

    /// Non-2xx response other than 404, with the best message the error
    /// payload yielded (JSON `message`/`error` field, raw text, or the bare
    /// status).
    #[error("{method} {endpoint} failed with status {status}: {message}")]
    Api {
        /// HTTP method of the failed request
        method: HttpMethod,
        /// Endpoint path that was requested
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// Human-readable message
        message: String,
    },

    /// The request exceeded its deadline and was cancelled. Counted as
    /// transient for retry purposes.
    #[error("{method} {endpoint} timed out")]
    Timeout {
        /// HTTP method of the failed request
        method: HttpMethod,
        /// Endpoint path that was requested
        endpoint: String,
    },

    /// Connection-level failure before a response arrived. Transient.
    #[error("{method} {endpoint} network failure: {message}")]
    Network {
        /// HTTP method of the failed request
        method: HttpMethod,
        /// Endpoint path that was requested
        endpoint: String,
        /// Underlying transport message
        message: String,
    },

    /// The retry budget was exhausted by consecutive transient failures
    #[error("GET {endpoint} upstream unavailable after {attempts} attempts: {message}")]
    UpstreamUnavailable {
        /// Endpoint path that was requested
        endpoint: String,
        /// Total attempts made, including the first
        attempts: u32,
        /// Message of the last transient failure
        message: String,
    },

    /// A 2xx response body did not decode into the expected shape
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        /// Endpoint path that was requested
        endpoint: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Shorthand for a validation failure
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether this failure is expected to resolve on retry.
    ///
    /// Transient: network failure, timeout, and HTTP 500/502/503/504.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network { .. } | Self::Timeout { .. } => true,
            Self::Api { status, .. } => matches!(status, 500 | 502 | 503 | 504),
            _ => false,
        }
    }

    /// The HTTP status carried by this error, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors from the nutrition aggregator
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NutritionError {
    /// A present profile fails the BMR/TDEE preconditions. Surfaced, never
    /// retried; the only soft defaults are the documented 2000 kcal target
    /// for an *absent* profile and the 0.0 BMI for missing measurements.
    #[error("invalid profile: {0}")]
    InvalidProfile(String),
}
