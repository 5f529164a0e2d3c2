//! Utility functions and helpers
//!
//! Hashing, timestamps, canonical serialization and display formatting used
//! throughout the ledger.

pub mod crypto;
pub mod format;
pub mod serialization;

pub use crypto::{current_timestamp, sha256_digest, sha256_hex};
pub use format::{format_timestamp, DEFAULT_TIMESTAMP_FORMAT};
pub use serialization::canonical_json;
