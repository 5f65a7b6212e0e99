// ABOUTME: Resilient HTTP data client module: transport seam and API layer
// ABOUTME: Re-exports the client, transport trait, and request/response types
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP access layer.
//!
//! [`ApiClient`] standardizes timeout enforcement, structured error
//! classification, and bounded linear-backoff retry for idempotent reads.
//! The [`HttpTransport`] trait is the seam between classification logic and
//! the wire; production uses a shared pooled reqwest client, tests script
//! responses directly.

mod api;
mod transport;

pub use api::{ApiClient, FetchPhase, Payload, UserList};
pub use transport::{
    HttpMethod, HttpTransport, ReqwestTransport, TransportError, TransportRequest,
    TransportResponse,
};
