//! Request-assertion harness
//!
//! Orchestrates one HTTP call per test case and evaluates the case's
//! assertions against the single response it produced.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tokio::task::JoinSet;

use attest_domain::{CaseReport, TestCase};

use crate::checker::AssertionChecker;
use crate::error::HarnessError;
use crate::ports::HttpClient;

/// Outcome of one executed test case.
#[derive(Debug)]
pub struct CaseOutcome {
    /// Name of the case.
    pub case_name: String,
    /// The case's report, or the error that aborted it.
    pub result: Result<CaseReport, HarnessError>,
}

impl CaseOutcome {
    /// Returns true if the case completed with every assertion passing.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.result.as_ref().is_ok_and(|report| report.all_passed())
    }
}

/// Aggregated outcomes for a full suite run.
#[derive(Debug)]
pub struct SuiteReport {
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Per-case outcomes, in the order the cases were supplied.
    pub outcomes: Vec<CaseOutcome>,
}

impl SuiteReport {
    /// Number of cases in the run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of cases that completed with every assertion passing.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Number of cases that failed an assertion or errored.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// Returns true if every case passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

/// The request-assertion harness.
///
/// Holds its HTTP client explicitly; there is no ambient global
/// configuration, so concurrent case execution cannot race on shared
/// state.
pub struct Harness {
    client: Arc<dyn HttpClient>,
    checker: AssertionChecker,
}

impl Harness {
    /// Creates a harness over the given client.
    #[must_use]
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            client,
            checker: AssertionChecker::new(),
        }
    }

    /// Runs a single test case: one request, then every assertion.
    ///
    /// The request always completes before any comparison happens, and
    /// assertion failures never short-circuit each other.
    ///
    /// # Errors
    /// `HarnessError::Network` if the request could not be executed,
    /// `HarnessError::Path` if the fixture carries a malformed path
    /// expression. Failed assertions are not errors; they are carried
    /// in the returned report.
    pub async fn run_case(&self, case: &TestCase) -> Result<CaseReport, HarnessError> {
        let start = Instant::now();
        tracing::debug!(
            case = %case.name,
            method = %case.request.method,
            url = %case.request.url,
            "executing request"
        );

        let response = self.client.execute(&case.request).await?;
        let results = self.checker.check_all(&case.assertions, &response)?;

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let report = CaseReport::new(&case.name, results, duration_ms);
        tracing::info!(
            case = %case.name,
            status = response.status,
            passed = report.passed,
            failed = report.failed,
            "case finished"
        );
        Ok(report)
    }

    /// Runs every case concurrently and collects outcomes in input
    /// order.
    ///
    /// Cases share nothing but the client, whose connection pool is
    /// safe for concurrent use, so they run as independent tasks.
    pub async fn run_suite(&self, cases: Vec<TestCase>) -> SuiteReport {
        let started_at = Utc::now();
        let count = cases.len();
        let mut tasks = JoinSet::new();

        for (index, case) in cases.into_iter().enumerate() {
            let worker = Self {
                client: Arc::clone(&self.client),
                checker: self.checker,
            };
            tasks.spawn(async move {
                let result = worker.run_case(&case).await;
                (
                    index,
                    CaseOutcome {
                        case_name: case.name,
                        result,
                    },
                )
            });
        }

        let mut indexed = Vec::with_capacity(count);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(pair) => indexed.push(pair),
                Err(join_error) => tracing::error!(%join_error, "case task failed to join"),
            }
        }
        indexed.sort_by_key(|(index, _)| *index);

        SuiteReport {
            started_at,
            outcomes: indexed.into_iter().map(|(_, outcome)| outcome).collect(),
        }
    }
}
