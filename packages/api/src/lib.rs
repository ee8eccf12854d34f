#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Narrow client for the Webling bookkeeping API.
//!
//! The deletion tool only needs four remote operations, collected in the
//! [`WeblingApi`] trait so the orchestration logic can run against a test
//! double. [`client::HttpWeblingApi`] is the `reqwest`-backed
//! implementation used in production.
//!
//! # Environment Variables
//!
//! | Variable | Required | Description |
//! |---|---|---|
//! | `API_URL` | Yes | Base URL prefix for every endpoint path |
//! | `API_KEY` | Yes | Credential sent in the `apikey` header |

pub mod client;
pub mod config;
pub mod filter;
pub mod url;

use async_trait::async_trait;
pub use reqwest::StatusCode;
use webling_debtors_api_models::{DebtorId, Period, PeriodGroup, PeriodId};

pub use filter::Filter;

/// Errors that can occur while talking to the remote API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("Request to {url} timed out")]
    Timeout {
        /// Requested URL.
        url: String,
    },

    /// The service answered with 503 Service Unavailable.
    #[error("503 Service Unavailable for url: {url}")]
    ServiceUnavailable {
        /// Requested URL.
        url: String,
    },

    /// The service answered with any other non-success status.
    #[error("HTTP {status} for url: {url}")]
    Status {
        /// Response status.
        status: StatusCode,
        /// Requested URL.
        url: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing required environment variable.
    #[error("Missing environment variable: {name}")]
    MissingEnv {
        /// Name of the missing environment variable.
        name: String,
    },

    /// The API key cannot be used as a header value.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of what went wrong.
        message: String,
    },

    /// A lookup returned no usable object.
    #[error("Empty response: {message}")]
    EmptyResponse {
        /// Description of what was expected.
        message: String,
    },
}

impl ApiError {
    /// Returns `true` for the 503 case, which callers treat as "back off
    /// and rerun later" rather than an ordinary failure.
    #[must_use]
    pub const fn is_service_unavailable(&self) -> bool {
        matches!(self, Self::ServiceUnavailable { .. })
    }
}

/// The remote operations the deletion tool depends on.
///
/// Implementations must not retry on their own; retry policy belongs to
/// the caller.
#[async_trait]
pub trait WeblingApi: Send + Sync {
    /// Fetches the ids of all debtors matching `filter`, in service order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body is malformed.
    async fn fetch_debtor_ids(&self, filter: &Filter) -> Result<Vec<DebtorId>, ApiError>;

    /// Fetches a single period.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body is malformed.
    async fn fetch_period(&self, period_id: PeriodId) -> Result<Period, ApiError>;

    /// Fetches the period groups matching `filter` in full format.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body is malformed.
    async fn fetch_period_groups(&self, filter: &Filter) -> Result<Vec<PeriodGroup>, ApiError>;

    /// Deletes all `ids` with a single request and returns the response
    /// status. A non-success status is returned as `Ok`, not as an error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Timeout`] if the request timed out, or another
    /// [`ApiError`] if no response was received at all.
    async fn delete_debtors(&self, ids: &[DebtorId]) -> Result<StatusCode, ApiError>;
}
