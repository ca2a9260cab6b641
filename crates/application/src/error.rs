//! Application error types

use thiserror::Error;

use attest_domain::PathParseError;

use crate::ports::HttpClientError;

/// Errors that abort a test case before its report can be produced.
///
/// Assertion failures are not errors; they are carried inside the
/// case report. These variants cover the two fatal categories: the
/// request never completed, or a fixture is malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HarnessError {
    /// The request could not be executed over the network.
    #[error("network error: {0}")]
    Network(#[from] HttpClientError),

    /// A fixture carries a syntactically invalid path expression.
    #[error("invalid path expression: {0}")]
    Path(#[from] PathParseError),
}
