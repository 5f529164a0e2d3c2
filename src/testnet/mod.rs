//! Shared fixtures for unit tests

pub mod test_utils;
