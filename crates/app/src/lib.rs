//! Attest - black-box assertion suite for a mock user-management API
//!
//! This crate ties the harness together with the fixture definitions
//! that exercise the remote service.

pub mod fixtures;
