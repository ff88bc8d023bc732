//! Integration test suite entry point.
//!
//! Each submodule exercises the service through its public surface only,
//! against real on-disk indexes in temporary directories.

#[path = "../common/mod.rs"]
mod common;

mod concurrency_tests;
