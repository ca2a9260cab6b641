//! Fixture definitions for the user-management API suite.
//!
//! Each fixture pairs one request with the literal expectations frozen
//! at authoring time. If the live service's responses drift, the suite
//! fails even though the harness is correct; that trade-off is inherent
//! to black-box testing of an external service.

use attest_domain::{Assertion, RequestBody, RequestSpec, TestCase};
use serde_json::json;

/// Support banner returned alongside single-resource lookups.
const SUPPORT_TEXT: &str =
    "To keep ReqRes free, contributions towards server costs are appreciated!";

/// Builds the full suite against `base_url`.
///
/// `base_url` is the API root without a trailing slash, e.g.
/// `https://reqres.in/api`. Every case is self-contained; the
/// collection can run sequentially or in parallel.
#[must_use]
pub fn user_api_suite(base_url: &str) -> Vec<TestCase> {
    vec![
        successful_login(base_url),
        login_missing_password(base_url),
        successful_register(base_url),
        register_missing_password(base_url),
        list_users_second_page(base_url),
        single_user(base_url),
        single_user_not_found(base_url),
        create_user(base_url),
        update_user(base_url),
        patch_user(base_url),
        delete_user(base_url),
        list_resources(base_url),
        single_resource_not_found(base_url),
        delayed_user_list(base_url),
    ]
}

fn successful_login(base: &str) -> TestCase {
    let body = json!({ "email": "eve.holt@reqres.in", "password": "cityslicka" });
    TestCase::new(
        "successful_login",
        RequestSpec::post(format!("{base}/login")).with_body(RequestBody::json(body.to_string())),
    )
    .with_assertion(Assertion::status(200))
    .with_assertion(Assertion::field("token", "QpwL5tke4Pnpja7X4"))
}

fn login_missing_password(base: &str) -> TestCase {
    let body = json!({ "email": "eve.holt@reqres.in" });
    TestCase::new(
        "login_missing_password",
        RequestSpec::post(format!("{base}/login")).with_body(RequestBody::json(body.to_string())),
    )
    .with_assertion(Assertion::status(400))
    .with_assertion(Assertion::field("error", "Missing password"))
}

fn successful_register(base: &str) -> TestCase {
    let body = json!({ "email": "eve.holt@reqres.in", "password": "pistol" });
    TestCase::new(
        "successful_register",
        RequestSpec::post(format!("{base}/register"))
            .with_body(RequestBody::json(body.to_string())),
    )
    .with_assertion(Assertion::status(200))
    .with_assertion(Assertion::field("id", 4))
    .with_assertion(Assertion::field("token", "QpwL5tke4Pnpja7X4"))
}

fn register_missing_password(base: &str) -> TestCase {
    let body = json!({ "email": "sydney@fife" });
    TestCase::new(
        "register_missing_password",
        RequestSpec::post(format!("{base}/register"))
            .with_body(RequestBody::json(body.to_string())),
    )
    .with_assertion(Assertion::status(400))
    .with_assertion(Assertion::field("error", "Missing password"))
}

fn list_users_second_page(base: &str) -> TestCase {
    TestCase::new(
        "list_users_second_page",
        RequestSpec::get(format!("{base}/users")).with_query("page", "2"),
    )
    .with_assertion(Assertion::status(200))
    .with_assertion(Assertion::field("total", 12))
    .with_assertion(Assertion::field("data[0].email", "michael.lawson@reqres.in"))
}

fn single_user(base: &str) -> TestCase {
    TestCase::new("single_user", RequestSpec::get(format!("{base}/users/2")))
        .with_assertion(Assertion::status(200))
        .with_assertion(Assertion::field("data.id", 2))
        .with_assertion(Assertion::field("data.email", "janet.weaver@reqres.in"))
        .with_assertion(Assertion::field("support.text", SUPPORT_TEXT))
}

fn single_user_not_found(base: &str) -> TestCase {
    // 404 carries no body worth asserting on.
    TestCase::new(
        "single_user_not_found",
        RequestSpec::get(format!("{base}/users/23")),
    )
    .with_assertion(Assertion::status(404))
}

fn create_user(base: &str) -> TestCase {
    let body = json!({ "name": "morpheus", "job": "leader" });
    TestCase::new(
        "create_user",
        RequestSpec::post(format!("{base}/users")).with_body(RequestBody::json(body.to_string())),
    )
    .with_assertion(Assertion::status(201))
    .with_assertion(Assertion::field("name", "morpheus"))
    .with_assertion(Assertion::field("job", "leader"))
}

fn update_user(base: &str) -> TestCase {
    let body = json!({ "name": "morpheus", "job": "zion resident" });
    TestCase::new(
        "update_user",
        RequestSpec::put(format!("{base}/users/2")).with_body(RequestBody::json(body.to_string())),
    )
    .with_assertion(Assertion::status(200))
    .with_assertion(Assertion::field("name", "morpheus"))
    .with_assertion(Assertion::field("job", "zion resident"))
}

fn patch_user(base: &str) -> TestCase {
    let body = json!({ "name": "morpheus", "job": "zion resident" });
    TestCase::new(
        "patch_user",
        RequestSpec::patch(format!("{base}/users/2"))
            .with_body(RequestBody::json(body.to_string())),
    )
    .with_assertion(Assertion::status(200))
    .with_assertion(Assertion::field("name", "morpheus"))
    .with_assertion(Assertion::field("job", "zion resident"))
}

fn delete_user(base: &str) -> TestCase {
    // 204 with an empty body; status is the only thing to check.
    TestCase::new(
        "delete_user",
        RequestSpec::delete(format!("{base}/users/2")),
    )
    .with_assertion(Assertion::status(204))
}

fn list_resources(base: &str) -> TestCase {
    TestCase::new("list_resources", RequestSpec::get(format!("{base}/unknown")))
        .with_assertion(Assertion::status(200))
        .with_assertion(Assertion::field("total", 12))
        .with_assertion(Assertion::field("data[0].id", 1))
        .with_assertion(Assertion::field("data[0].name", "cerulean"))
        .with_assertion(Assertion::field("data[0].year", 2000))
        .with_assertion(Assertion::field("data[0].color", "#98B2D1"))
        .with_assertion(Assertion::field("data[0].pantone_value", "15-4020"))
}

fn single_resource_not_found(base: &str) -> TestCase {
    TestCase::new(
        "single_resource_not_found",
        RequestSpec::get(format!("{base}/unknown/23")),
    )
    .with_assertion(Assertion::status(404))
}

fn delayed_user_list(base: &str) -> TestCase {
    // The server stalls ~3 s before answering; the default 10 s
    // timeout must still let the case succeed.
    TestCase::new(
        "delayed_user_list",
        RequestSpec::get(format!("{base}/users")).with_query("delay", "3"),
    )
    .with_assertion(Assertion::status(200))
    .with_assertion(Assertion::field("total", 12))
    .with_assertion(Assertion::field("data[0].email", "george.bluth@reqres.in"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use attest_domain::HttpMethod;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_suite_is_deduplicated() {
        let suite = user_api_suite("https://reqres.in/api");
        let mut names: Vec<_> = suite.iter().map(|c| c.name.clone()).collect();
        let before = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), before, "fixture names must be unique");
        assert_eq!(before, 14);
    }

    #[test]
    fn test_every_case_asserts_a_status() {
        let suite = user_api_suite("https://reqres.in/api");
        for case in &suite {
            assert!(
                case.assertions
                    .iter()
                    .any(|a| matches!(a, Assertion::Status { .. })),
                "case '{}' has no status assertion",
                case.name
            );
        }
    }

    #[test]
    fn test_not_found_cases_have_no_field_assertions() {
        let suite = user_api_suite("https://reqres.in/api");
        for name in ["single_user_not_found", "single_resource_not_found", "delete_user"] {
            let case = suite
                .iter()
                .find(|c| c.name == name)
                .unwrap_or_else(|| panic!("missing case {name}"));
            assert_eq!(case.len(), 1, "case '{name}' must only assert the status");
        }
    }

    #[test]
    fn test_mutating_cases_send_json_bodies() {
        let suite = user_api_suite("https://reqres.in/api");
        for case in &suite {
            if case.request.method.has_body() {
                assert_eq!(
                    case.request.body.content_type(),
                    Some("application/json"),
                    "case '{}' should send JSON",
                    case.name
                );
            }
        }
    }

    #[test]
    fn test_delete_uses_delete_method() {
        let suite = user_api_suite("https://reqres.in/api");
        let case = suite.iter().find(|c| c.name == "delete_user").unwrap();
        assert_eq!(case.request.method, HttpMethod::Delete);
    }
}
