//! Request specification types
//!
//! A `RequestSpec` describes one outbound HTTP call declaratively:
//! method, target URL, query parameters, headers, and body. A spec is
//! built once per test case and never mutated afterwards.

mod body;
mod method;
mod query;

pub use body::{RequestBody, RequestBodyKind};
pub use method::HttpMethod;
pub use query::{QueryParam, QueryParams};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// A single HTTP header name/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Header name.
    pub name: String,
    /// Header value.
    pub value: String,
}

impl Header {
    /// Creates a new header.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Declarative description of one HTTP request.
///
/// Each test case owns exactly one spec; the harness turns it into a
/// single outbound call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method to use.
    pub method: HttpMethod,
    /// Target URL, without query parameters.
    pub url: String,
    /// Query parameters appended to the URL.
    #[serde(default)]
    pub query: QueryParams,
    /// Request headers.
    #[serde(default)]
    pub headers: Vec<Header>,
    /// Request body.
    #[serde(default)]
    pub body: RequestBody,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl RequestSpec {
    /// Creates a new spec for the given method and URL.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: QueryParams::new(),
            headers: Vec::new(),
            body: RequestBody::none(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Creates a GET spec.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Creates a POST spec.
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    /// Creates a PUT spec.
    #[must_use]
    pub fn put(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, url)
    }

    /// Creates a PATCH spec.
    #[must_use]
    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, url)
    }

    /// Creates a DELETE spec.
    #[must_use]
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.add(QueryParam::new(key, value));
        self
    }

    /// Appends a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(name, value));
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Returns the full URL with query parameters appended.
    ///
    /// Parameters already present in `url` are kept; declared query
    /// parameters are percent-encoded and appended after them.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidUrl` if the base URL cannot be
    /// parsed.
    pub fn full_url(&self) -> DomainResult<String> {
        let mut url = Url::parse(&self.url)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.url)))?;
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for param in self.query.iter() {
                pairs.append_pair(&param.key, &param.value);
            }
        }
        Ok(url.into())
    }

    /// Returns the effective content type of the request, if any.
    ///
    /// An explicit `Content-Type` header wins over the body's type.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case("content-type"))
            .map(|h| h.value.as_str())
            .or_else(|| self.body.content_type())
    }
}
