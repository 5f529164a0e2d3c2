//! Data storage and persistence
//!
//! The engine never touches disk. This module is the collaborator that writes
//! its plain-data state to a JSON file, reads it back, and loads candidate
//! chains supplied by other nodes.

pub mod candidates;
pub mod json_store;

pub use candidates::{load_candidate_chains, parse_candidate_chains};
pub use json_store::{open_engine, JsonStore};
