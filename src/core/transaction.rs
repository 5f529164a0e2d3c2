// A transaction is a plain value transfer: who pays, who receives, how much,
// plus whatever extra fields the submitter attached. There are no signatures,
// no inputs/outputs and no balances here; the ledger only checks its shape.

use crate::error::{BlockchainError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Field names owned by the transaction itself. Metadata may not reuse them
/// because the stored form flattens metadata next to these fields.
pub const RESERVED_FIELDS: [&str; 3] = ["sender", "recipient", "amount"];

/// Open, order-irrelevant extra data attached to a transaction.
pub type Metadata = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    sender: String,
    recipient: String,
    amount: f64,
    #[serde(flatten)]
    metadata: Metadata,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: f64) -> Transaction {
        Self::with_metadata(sender, recipient, amount, Metadata::new())
    }

    pub fn with_metadata(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: f64,
        metadata: Metadata,
    ) -> Transaction {
        Transaction {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
            metadata,
        }
    }

    pub fn get_sender(&self) -> &str {
        self.sender.as_str()
    }

    pub fn get_recipient(&self) -> &str {
        self.recipient.as_str()
    }

    pub fn get_amount(&self) -> f64 {
        self.amount
    }

    pub fn get_metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Structural check run before a transaction is accepted into the pending set.
    ///
    /// Sender and recipient may be the same party; self-payments are accepted.
    pub fn validate(&self) -> Result<()> {
        if self.sender.trim().is_empty() {
            return Err(BlockchainError::InvalidTransaction(
                "sender must be a non-empty string".to_string(),
            ));
        }
        if self.recipient.trim().is_empty() {
            return Err(BlockchainError::InvalidTransaction(
                "recipient must be a non-empty string".to_string(),
            ));
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(BlockchainError::InvalidTransaction(format!(
                "amount must be a positive number, got {}",
                self.amount
            )));
        }
        if let Some(key) = self
            .metadata
            .keys()
            .find(|key| RESERVED_FIELDS.contains(&key.as_str()))
        {
            return Err(BlockchainError::InvalidTransaction(format!(
                "metadata key '{key}' shadows a reserved field"
            )));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
