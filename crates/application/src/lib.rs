//! Attest Application - Harness orchestration
//!
//! This crate defines the HTTP client port and the harness that drives
//! one request per test case and evaluates the case's assertions
//! against the single response it produced.

pub mod checker;
pub mod error;
pub mod harness;
pub mod ports;

pub use checker::AssertionChecker;
pub use error::HarnessError;
pub use harness::{CaseOutcome, Harness, SuiteReport};
pub use ports::{HttpClient, HttpClientError};
