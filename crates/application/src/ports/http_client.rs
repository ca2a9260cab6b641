//! HTTP client port

use async_trait::async_trait;
use thiserror::Error;

use attest_domain::{RequestSpec, ResponseResult};

/// Errors surfaced by an HTTP client adapter.
///
/// Every variant is fatal to the test case that triggered the request:
/// a transport failure is reported as an error, never as a failed
/// assertion. There is no retry; the suite observes the remote
/// service's actual behavior, transient failures included.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpClientError {
    /// The request did not complete within the allotted time.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// The remote host actively refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The host name could not be resolved.
    #[error("DNS resolution failed for {host}: {message}")]
    Dns {
        /// Host that failed to resolve.
        host: String,
        /// Resolver error text.
        message: String,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request URL is invalid.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body is invalid.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for executing HTTP requests.
///
/// Implementations must be safe for concurrent use: the harness runs
/// independent test cases in parallel against one shared client.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends the request described by `spec` and returns the response.
    ///
    /// One call, one outbound request: no retries. The call blocks the
    /// task until the response arrives or the spec's timeout elapses.
    ///
    /// # Errors
    /// Returns an `HttpClientError` if the request cannot be built or
    /// the transport fails. HTTP error statuses (4xx/5xx) are not
    /// errors; they come back as ordinary `ResponseResult`s.
    async fn execute(&self, spec: &RequestSpec) -> Result<ResponseResult, HttpClientError>;
}
