//! Property test suite entry point.

mod roundtrip_tests;
