//! Configuration management
//!
//! Proof-of-work difficulty, where the ledger is stored and the optional mining
//! ceiling. Values come from defaults, an optional TOML file and the
//! environment, with CLI flags applied last by the front-end.

pub mod settings;

pub use settings::{Config, DEFAULT_DIFFICULTY, DEFAULT_STORAGE_PATH, GLOBAL_CONFIG};
