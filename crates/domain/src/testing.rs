//! Assertions and per-case reports
//!
//! This module provides types for declaring expected outcomes of a
//! request and for carrying the evaluated results.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::request::RequestSpec;

/// An expected outcome to evaluate against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// The response status code must equal the expected code.
    Status {
        /// Expected HTTP status code.
        expected: u16,
    },
    /// The value at a path in the response document must equal a literal.
    ///
    /// Comparison is type-aware: the expected literal's type governs,
    /// so the string `"4"` never matches the number `4`.
    Field {
        /// Path expression into the response document.
        path: String,
        /// Expected literal value.
        expected: serde_json::Value,
    },
}

impl Assertion {
    /// Creates a status-code assertion.
    #[must_use]
    pub const fn status(expected: u16) -> Self {
        Self::Status { expected }
    }

    /// Creates a field-equality assertion.
    #[must_use]
    pub fn field(path: impl Into<String>, expected: impl Into<serde_json::Value>) -> Self {
        Self::Field {
            path: path.into(),
            expected: expected.into(),
        }
    }

    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Status { expected } => format!("status == {expected}"),
            Self::Field { path, expected } => format!("{path} == {expected}"),
        }
    }
}

/// Result of evaluating a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionResult {
    /// The assertion that was evaluated.
    pub assertion: Assertion,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Actual value found (for display).
    pub actual: Option<String>,
    /// Error message if failed.
    pub error: Option<String>,
}

impl AssertionResult {
    /// Create a passed result.
    #[must_use]
    pub const fn pass(assertion: Assertion) -> Self {
        Self {
            assertion,
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(assertion: Assertion, error: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        assertion: Assertion,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            assertion,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }
}

/// One test case: a single request paired with its expected assertions.
///
/// Each case owns exactly one `RequestSpec` and produces exactly one
/// response; its assertions are evaluated against that response only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestCase {
    /// Unique identifier.
    #[serde(default = "generate_id")]
    pub id: Uuid,
    /// Case name.
    pub name: String,
    /// The request to execute.
    pub request: RequestSpec,
    /// Assertions to evaluate against the response.
    #[serde(default)]
    pub assertions: Vec<Assertion>,
}

fn generate_id() -> Uuid {
    Uuid::now_v7()
}

impl TestCase {
    /// Create a new case with no assertions.
    #[must_use]
    pub fn new(name: impl Into<String>, request: RequestSpec) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            request,
            assertions: Vec::new(),
        }
    }

    /// Add an assertion to the case.
    pub fn add(&mut self, assertion: Assertion) {
        self.assertions.push(assertion);
    }

    /// Add an assertion (builder pattern).
    #[must_use]
    pub fn with_assertion(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Check if the case carries no assertions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }

    /// Get the number of assertions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assertions.len()
    }
}

/// Evaluated results for one completed case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseReport {
    /// Case that was run.
    pub case_name: String,
    /// Individual assertion results.
    pub results: Vec<AssertionResult>,
    /// Total number of assertions.
    pub total: usize,
    /// Number of passed assertions.
    pub passed: usize,
    /// Number of failed assertions.
    pub failed: usize,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl CaseReport {
    /// Create a new report from evaluated results.
    #[must_use]
    pub fn new(
        case_name: impl Into<String>,
        results: Vec<AssertionResult>,
        duration_ms: u64,
    ) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;

        Self {
            case_name: case_name.into(),
            results,
            total,
            passed,
            failed,
            duration_ms,
        }
    }

    /// Check if every assertion passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Get pass rate as percentage.
    #[must_use]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            {
                (self.passed as f64 / self.total as f64) * 100.0
            }
        }
    }

    /// Iterate over the failed results only.
    pub fn failures(&self) -> impl Iterator<Item = &AssertionResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_assertion_description() {
        let assertion = Assertion::status(200);
        assert_eq!(assertion.description(), "status == 200");

        let assertion = Assertion::field("token", "QpwL5tke4Pnpja7X4");
        assert_eq!(assertion.description(), "token == \"QpwL5tke4Pnpja7X4\"");

        let assertion = Assertion::field("total", 12);
        assert_eq!(assertion.description(), "total == 12");
    }

    #[test]
    fn test_field_constructor_keeps_types() {
        let string_assertion = Assertion::field("value", "4");
        let number_assertion = Assertion::field("value", 4);
        assert_ne!(string_assertion, number_assertion);

        if let Assertion::Field { expected, .. } = string_assertion {
            assert_eq!(expected, json!("4"));
        }
    }

    #[test]
    fn test_case_builder() {
        let case = TestCase::new("login", RequestSpec::post("https://api.example.com/login"))
            .with_assertion(Assertion::status(200))
            .with_assertion(Assertion::field("token", "abc"));

        assert_eq!(case.name, "login");
        assert_eq!(case.len(), 2);
        assert!(!case.is_empty());
    }

    #[test]
    fn test_case_report_counts() {
        let results = vec![
            AssertionResult::pass(Assertion::status(200)),
            AssertionResult::fail(Assertion::field("token", "abc"), "missing"),
        ];

        let report = CaseReport::new("login", results, 100);
        assert_eq!(report.total, 2);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert!(!report.all_passed());
        assert_eq!(report.pass_rate(), 50.0);
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn test_empty_report_passes() {
        let report = CaseReport::new("delete_user", Vec::new(), 5);
        assert!(report.all_passed());
        assert_eq!(report.pass_rate(), 100.0);
    }
}
