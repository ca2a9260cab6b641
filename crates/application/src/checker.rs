//! Assertion evaluation
//!
//! Executes assertions against HTTP responses and produces
//! per-assertion results.

use serde_json::Value;

use attest_domain::{Assertion, AssertionResult, PathExpr, PathParseError, ResponseResult};

/// Evaluates assertions against responses.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssertionChecker;

impl AssertionChecker {
    /// Create a new checker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluate every assertion against the response.
    ///
    /// Evaluation never short-circuits: a failed comparison does not
    /// prevent the remaining assertions from running.
    ///
    /// # Errors
    /// Returns `PathParseError` if an assertion carries a malformed
    /// path expression.
    pub fn check_all(
        &self,
        assertions: &[Assertion],
        response: &ResponseResult,
    ) -> Result<Vec<AssertionResult>, PathParseError> {
        assertions
            .iter()
            .map(|assertion| self.check(assertion, response))
            .collect()
    }

    /// Evaluate a single assertion against a response.
    ///
    /// # Errors
    /// Returns `PathParseError` for a malformed path expression; every
    /// other mismatch comes back as a failed `AssertionResult`.
    pub fn check(
        &self,
        assertion: &Assertion,
        response: &ResponseResult,
    ) -> Result<AssertionResult, PathParseError> {
        match assertion {
            Assertion::Status { expected } => Ok(Self::check_status(assertion, response, *expected)),
            Assertion::Field { path, expected } => {
                Self::check_field(assertion, response, path, expected)
            }
        }
    }

    fn check_status(
        assertion: &Assertion,
        response: &ResponseResult,
        expected: u16,
    ) -> AssertionResult {
        let actual = response.status;
        if actual == expected {
            AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                actual.to_string(),
                format!("expected status {expected}, got {actual}"),
            )
        }
    }

    fn check_field(
        assertion: &Assertion,
        response: &ResponseResult,
        path: &str,
        expected: &Value,
    ) -> Result<AssertionResult, PathParseError> {
        let expr = PathExpr::parse(path)?;

        let Some(document) = response.document() else {
            return Ok(AssertionResult::fail(
                assertion.clone(),
                format!("response body holds no JSON document to resolve '{path}' against"),
            ));
        };

        match expr.resolve(document) {
            Ok(actual) => {
                if values_equal(actual, expected) {
                    Ok(AssertionResult::pass_with_value(
                        assertion.clone(),
                        actual.to_string(),
                    ))
                } else {
                    Ok(AssertionResult::fail_with_value(
                        assertion.clone(),
                        actual.to_string(),
                        format!("value at '{path}' mismatch: expected {expected}, got {actual}"),
                    ))
                }
            }
            Err(not_found) => Ok(AssertionResult::fail(
                assertion.clone(),
                not_found.to_string(),
            )),
        }
    }
}

/// Type-aware equality for JSON values.
///
/// Numbers compare numerically across integer and float
/// representations. Everything else compares structurally; in
/// particular a string never equals a number, whatever the digits say.
fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => a
                .as_f64()
                .zip(b.as_f64())
                .is_some_and(|(x, y)| (x - y).abs() < f64::EPSILON),
        },
        _ => actual == expected,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use attest_domain::StatusCode;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    fn json_response(status: u16, body: &Value) -> ResponseResult {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        ResponseResult::new(
            StatusCode::new(status),
            headers,
            body.to_string().into_bytes(),
            Duration::from_millis(20),
        )
    }

    fn empty_response(status: u16) -> ResponseResult {
        ResponseResult::new(
            StatusCode::new(status),
            HashMap::new(),
            Vec::new(),
            Duration::from_millis(20),
        )
    }

    #[test]
    fn test_status_match() {
        let checker = AssertionChecker::new();
        let response = empty_response(204);

        let result = checker.check(&Assertion::status(204), &response).unwrap();
        assert!(result.passed);
        assert_eq!(result.actual.as_deref(), Some("204"));
    }

    #[test]
    fn test_status_mismatch_reports_both_codes() {
        let checker = AssertionChecker::new();
        let response = empty_response(404);

        let result = checker.check(&Assertion::status(200), &response).unwrap();
        assert!(!result.passed);
        assert_eq!(result.actual.as_deref(), Some("404"));
        assert_eq!(
            result.error.as_deref(),
            Some("expected status 200, got 404")
        );
    }

    #[test]
    fn test_field_equality() {
        let checker = AssertionChecker::new();
        let response = json_response(200, &json!({"token": "QpwL5tke4Pnpja7X4"}));

        let result = checker
            .check(&Assertion::field("token", "QpwL5tke4Pnpja7X4"), &response)
            .unwrap();
        assert!(result.passed);
    }

    #[test]
    fn test_field_comparison_is_case_sensitive() {
        let checker = AssertionChecker::new();
        let response = json_response(200, &json!({"name": "Morpheus"}));

        let result = checker
            .check(&Assertion::field("name", "morpheus"), &response)
            .unwrap();
        assert!(!result.passed);
    }

    #[test]
    fn test_no_coercion_between_string_and_number() {
        let checker = AssertionChecker::new();

        let response = json_response(200, &json!({"value": 4}));
        let result = checker
            .check(&Assertion::field("value", "4"), &response)
            .unwrap();
        assert!(!result.passed, "number 4 must not match string \"4\"");

        let response = json_response(200, &json!({"value": "4"}));
        let result = checker
            .check(&Assertion::field("value", 4), &response)
            .unwrap();
        assert!(!result.passed, "string \"4\" must not match number 4");
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let checker = AssertionChecker::new();
        let response = json_response(200, &json!({"value": 2.0}));

        let result = checker
            .check(&Assertion::field("value", 2), &response)
            .unwrap();
        assert!(result.passed, "2 and 2.0 are the same number");
    }

    #[test]
    fn test_nested_path_resolution() {
        let checker = AssertionChecker::new();
        let response = json_response(
            200,
            &json!({
                "data": {"id": 2, "email": "janet.weaver@reqres.in"},
                "support": {"text": "banner"}
            }),
        );

        assert!(checker
            .check(&Assertion::field("data.id", 2), &response)
            .unwrap()
            .passed);
        assert!(checker
            .check(
                &Assertion::field("data.email", "janet.weaver@reqres.in"),
                &response
            )
            .unwrap()
            .passed);
        assert!(checker
            .check(&Assertion::field("support.text", "banner"), &response)
            .unwrap()
            .passed);
    }

    #[test]
    fn test_missing_path_is_a_failed_assertion() {
        let checker = AssertionChecker::new();
        let response = json_response(200, &json!({"data": []}));

        let result = checker
            .check(&Assertion::field("data[0].email", "x"), &response)
            .unwrap();
        assert!(!result.passed);
        assert!(result.error.as_deref().unwrap().contains("did not resolve"));
    }

    #[test]
    fn test_null_value_is_comparable() {
        let checker = AssertionChecker::new();
        let response = json_response(200, &json!({"avatar": null}));

        let result = checker
            .check(&Assertion::field("avatar", Value::Null), &response)
            .unwrap();
        assert!(result.passed, "resolving to null is not a missing path");
    }

    #[test]
    fn test_empty_body_fails_field_assertions() {
        let checker = AssertionChecker::new();
        let response = empty_response(204);

        let result = checker
            .check(&Assertion::field("token", "x"), &response)
            .unwrap();
        assert!(!result.passed);
        assert!(result.error.as_deref().unwrap().contains("no JSON document"));
    }

    #[test]
    fn test_malformed_path_is_fatal() {
        let checker = AssertionChecker::new();
        let response = json_response(200, &json!({}));

        let error = checker
            .check(&Assertion::field("data..email", "x"), &response)
            .unwrap_err();
        assert!(matches!(error, PathParseError::EmptySegment { .. }));
    }

    #[test]
    fn test_check_all_does_not_short_circuit() {
        let checker = AssertionChecker::new();
        let response = json_response(201, &json!({"name": "morpheus", "job": "leader"}));

        let assertions = vec![
            Assertion::status(200), // fails
            Assertion::field("name", "morpheus"),
            Assertion::field("job", "leader"),
        ];

        let results = checker.check_all(&assertions, &response).unwrap();
        assert_eq!(results.len(), 3);
        assert!(!results[0].passed);
        assert!(results[1].passed);
        assert!(results[2].passed);
    }
}
