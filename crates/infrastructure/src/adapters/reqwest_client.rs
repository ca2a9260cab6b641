//! HTTP client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest
//! library. It performs every outbound call the harness makes.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method, Url};

use attest_application::ports::{HttpClient, HttpClientError};
use attest_domain::{HttpMethod, RequestBody, RequestBodyKind, RequestSpec, ResponseResult};

/// HTTP client adapter backed by `reqwest::Client`.
///
/// The inner client holds a thread-safe connection pool, so one
/// instance can serve concurrent test cases. No retries, no automatic
/// cookie state; the per-request timeout comes from each
/// `RequestSpec` (10 seconds unless overridden).
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with the harness defaults.
    ///
    /// - follow at most 10 redirects
    /// - TLS verification enabled
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("attest/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a new adapter around a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Attaches the request body, validating JSON syntax first.
    fn attach_body(
        builder: reqwest::RequestBuilder,
        body: &RequestBody,
    ) -> Result<reqwest::RequestBuilder, HttpClientError> {
        match &body.kind {
            RequestBodyKind::None => Ok(builder),

            RequestBodyKind::Raw { .. } => {
                if body
                    .content_type()
                    .is_some_and(|ct| ct.contains("application/json"))
                    && !body.content.is_empty()
                {
                    let _: serde_json::Value = serde_json::from_str(&body.content)
                        .map_err(|e| HttpClientError::InvalidBody(format!("invalid JSON: {e}")))?;
                }
                Ok(builder.body(body.content.clone()))
            }
        }
    }

    /// Maps reqwest errors into the port's error taxonomy.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        if error.is_connect() {
            let message = error.to_string();
            let host = error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string();
            if message.to_lowercase().contains("dns") || message.to_lowercase().contains("resolve")
            {
                return HttpClientError::Dns { host, message };
            }
            if message.to_lowercase().contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host,
                    port: error.url().and_then(Url::port_or_known_default).unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        HttpClientError::Other(error.to_string())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, spec: &RequestSpec) -> Result<ResponseResult, HttpClientError> {
        let url = spec
            .full_url()
            .map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;
        let parsed_url =
            Url::parse(&url).map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {url}")))?;

        let start = Instant::now();

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(spec.method), parsed_url)
            .timeout(Duration::from_millis(spec.timeout_ms));

        for header in &spec.headers {
            builder = builder.header(&header.name, &header.value);
        }

        // Content-Type from the body, unless a header already set one.
        if let Some(content_type) = spec.body.content_type() {
            let has_content_type = spec
                .headers
                .iter()
                .any(|h| h.name.eq_ignore_ascii_case("content-type"));
            if !has_content_type {
                builder = builder.header("Content-Type", content_type);
            }
        }

        builder = Self::attach_body(builder, &spec.body)?;

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, spec.timeout_ms))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpClientError::Other(format!("failed to read body: {e}")))?
            .to_vec();

        let duration = start.elapsed();
        tracing::debug!(status, bytes = body.len(), "response received");

        Ok(ResponseResult::new(status, headers, body, duration))
    }
}
