//! Attest suite runner - Main Entry Point
//!
//! Runs the user-management API fixture suite against a live server
//! and reports per-assertion outcomes.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use attest::fixtures::user_api_suite;
use attest_application::Harness;
use attest_infrastructure::ReqwestHttpClient;

/// Default API root when `ATTEST_BASE_URL` is not set.
const DEFAULT_BASE_URL: &str = "https://reqres.in/api";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url =
        std::env::var("ATTEST_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    tracing::info!(%base_url, "running user API suite");

    let client = ReqwestHttpClient::new()?;
    let harness = Harness::new(Arc::new(client));
    let report = harness.run_suite(user_api_suite(&base_url)).await;

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(case_report) => {
                let verdict = if case_report.all_passed() { "PASS" } else { "FAIL" };
                println!(
                    "{verdict} {} ({}/{} assertions, {} ms)",
                    outcome.case_name, case_report.passed, case_report.total, case_report.duration_ms
                );
                for failure in case_report.failures() {
                    println!(
                        "     {}: {}",
                        failure.assertion.description(),
                        failure.error.as_deref().unwrap_or("failed")
                    );
                }
            }
            Err(error) => println!("ERROR {}: {error}", outcome.case_name),
        }
    }
    println!(
        "{}/{} cases passed (started {})",
        report.passed(),
        report.total(),
        report.started_at.format("%Y-%m-%dT%H:%M:%SZ")
    );

    if !report.all_passed() {
        std::process::exit(1);
    }
    Ok(())
}
