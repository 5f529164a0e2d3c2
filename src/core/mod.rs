//! Core ledger functionality
//!
//! Blocks and transactions, proof-of-work mining, the chain engine that ties
//! them together, chain validation and longest-valid-chain resolution.

pub mod block;
pub mod engine;
pub mod proof_of_work;
pub mod resolver;
pub mod transaction;
pub mod validator;

pub use block::{Block, GENESIS_PREVIOUS_HASH};
pub use engine::{Chain, ChainEngine, ChainState};
pub use proof_of_work::ProofOfWork;
pub use resolver::{resolve, Resolution};
pub use transaction::{Metadata, Transaction, RESERVED_FIELDS};
pub use validator::{is_valid, validate_chain, ChainViolation, ViolationKind};
