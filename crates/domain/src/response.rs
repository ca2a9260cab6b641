//! Response result types
//!
//! Contains types for representing executed HTTP responses including
//! status code, headers, body, parsed document, and timing.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns true if this is a 2xx success status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Returns true if this is a 4xx client error status.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// Returns true if this is a 5xx server error status.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.0 >= 500 && self.0 < 600
    }

    /// Returns true if this is any error status (4xx or 5xx).
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.0 >= 400 && self.0 < 600
    }

    /// Returns the canonical reason phrase for common status codes.
    #[must_use]
    pub const fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            408 => "Request Timeout",
            409 => "Conflict",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// Result of one executed HTTP request.
///
/// Created once per request and read-only afterwards. The body is
/// parsed as JSON exactly once at construction, so repeated field
/// extraction always sees the same document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseResult {
    /// HTTP status code.
    pub status: u16,
    /// Status text (e.g., "OK", "Not Found").
    pub status_text: String,
    /// Response headers as a map.
    pub headers: HashMap<String, String>,
    /// Response body as text.
    pub body: String,
    /// Response time.
    pub duration: Duration,
    document: Option<Value>,
}

impl ResponseResult {
    /// Creates a new `ResponseResult` from raw response data.
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        let status_code = status.into();
        let body = match String::from_utf8(body) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        let document = if body.trim().is_empty() {
            None
        } else {
            serde_json::from_str(&body).ok()
        };

        Self {
            status: status_code.as_u16(),
            status_text: status_code.reason_phrase().to_string(),
            headers,
            body,
            duration,
            document,
        }
    }

    /// Returns the status as a `StatusCode` struct.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::new(self.status)
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status_code().is_success()
    }

    /// Returns the parsed JSON document, if the body held one.
    ///
    /// `None` means the body was empty or not valid JSON.
    #[must_use]
    pub const fn document(&self) -> Option<&Value> {
        self.document.as_ref()
    }

    /// Returns true if the response carried no body at all.
    #[must_use]
    pub fn is_empty_body(&self) -> bool {
        self.body.is_empty()
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Content-Type header value, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&String> {
        self.get_header("content-type")
    }

    /// Returns a human-readable duration string (e.g., "124 ms").
    #[must_use]
    pub fn duration_display(&self) -> String {
        let millis = self.duration.as_millis();
        if millis < 1000 {
            format!("{millis} ms")
        } else {
            format!("{:.2} s", self.duration.as_secs_f64())
        }
    }
}
