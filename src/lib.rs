//! # Ledger Chain
//!
//! A single-process ledger: an append-only list of blocks, each chained to its
//! predecessor by hash, sealed with proof-of-work and reconciled against
//! competing chains with the longest-valid-chain rule.
//!
//! ## How the code is organized
//! - `core/`: transactions, blocks, proof-of-work, the chain engine, chain
//!   validation and conflict resolution. No I/O happens here.
//! - `storage/`: JSON persistence of the engine state and loading of candidate chains
//! - `config/`: difficulty, storage path and mining ceiling from file/env
//! - `utils/`: hashing, timestamps, canonical JSON and formatting helpers
//! - `cli/`: command-line parsing for the `ledger-chain` binary
//!
//! ## Typical flow
//! ```no_run
//! use ledger_chain::{ChainEngine, Transaction};
//!
//! let mut engine = ChainEngine::new(2)?;
//! engine.submit_transaction(Transaction::new("alice", "bob", 5.0))?;
//! let block = engine.mine_block()?;
//! assert!(engine.is_valid());
//! assert!(block.get_hash().starts_with("00"));
//! # Ok::<(), ledger_chain::BlockchainError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod storage;
pub mod utils;

#[cfg(test)]
pub mod testnet;

// Re-export commonly used types for convenience
pub use cli::{Command, MetadataArg, Opt};
pub use config::{Config, GLOBAL_CONFIG};
pub use core::{
    is_valid, resolve, validate_chain, Block, Chain, ChainEngine, ChainState, ChainViolation,
    Metadata, ProofOfWork, Resolution, Transaction, ViolationKind, GENESIS_PREVIOUS_HASH,
};
pub use error::{BlockchainError, Result};
pub use storage::{load_candidate_chains, open_engine, JsonStore};
