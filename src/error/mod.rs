//! Error handling for the ledger
//!
//! Every failure the engine and its collaborators can hit is a variant here.
//! Chain validation defects travel as data (`ChainViolation`) and only become an
//! error when a caller refuses to proceed with an invalid chain.

use crate::core::ChainViolation;
use std::fmt;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, BlockchainError>;

#[derive(Debug, Clone, PartialEq)]
pub enum BlockchainError {
    /// Malformed sender/recipient/amount/metadata, rejected at submission
    InvalidTransaction(String),
    /// A chain failed validation where a valid one was required
    InvalidChain(ChainViolation),
    /// Mining gave up (only with a configured nonce ceiling)
    Mining(String),
    /// Configuration errors
    Config(String),
    /// Serialization/deserialization errors
    Serialization(String),
    /// File I/O errors
    Io(String),
}

impl fmt::Display for BlockchainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockchainError::InvalidTransaction(msg) => write!(f, "Invalid transaction: {msg}"),
            BlockchainError::InvalidChain(violation) => write!(f, "Invalid chain: {violation}"),
            BlockchainError::Mining(msg) => write!(f, "Mining error: {msg}"),
            BlockchainError::Config(msg) => write!(f, "Configuration error: {msg}"),
            BlockchainError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            BlockchainError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for BlockchainError {}

impl From<std::io::Error> for BlockchainError {
    fn from(err: std::io::Error) -> Self {
        BlockchainError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BlockchainError {
    fn from(err: serde_json::Error) -> Self {
        BlockchainError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for BlockchainError {
    fn from(err: toml::de::Error) -> Self {
        BlockchainError::Config(err.to_string())
    }
}

impl From<ChainViolation> for BlockchainError {
    fn from(violation: ChainViolation) -> Self {
        BlockchainError::InvalidChain(violation)
    }
}
