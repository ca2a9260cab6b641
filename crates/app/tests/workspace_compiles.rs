//! Integration test to verify the workspace wires together correctly.

#[test]
fn domain_crate_compiles() {
    // Verify domain types are accessible
    let _method = attest_domain::HttpMethod::Get;
    let _spec = attest_domain::RequestSpec::get("https://api.example.com/users");
    let _assertion = attest_domain::Assertion::status(200);
}

#[test]
fn application_crate_compiles() {
    // Verify application types are accessible
    let _error = attest_application::HttpClientError::Timeout { timeout_ms: 10_000 };
    let _checker = attest_application::AssertionChecker::new();
}

#[test]
fn infrastructure_crate_compiles() {
    // Verify the adapter can be constructed
    let client = attest_infrastructure::ReqwestHttpClient::new();
    assert!(client.is_ok());
}
