//! Shared fixtures for the unit test suites

pub mod test_utils;
