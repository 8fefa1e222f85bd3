//! Test modules for the MPC autocomplete server.
//!
//! Cross-component suites live here; unit tests stay next to the code they
//! cover. Property-based tests use proptest, trait seams are mocked with
//! mockall, and fixtures live in [`test_utils`].

pub mod error_tests;
