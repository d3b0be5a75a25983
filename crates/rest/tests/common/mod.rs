//! Common test utilities for the REST API integration tests.

#![allow(dead_code)]

pub mod fixtures;
pub mod harness;

pub use harness::RestTestHarness;
