//! Test utilities for ledger testing

use crate::core::{Block, ChainEngine, Transaction};
use crate::error::{BlockchainError, Result};
use serde_json::Value;
use tempfile::TempDir;

/// Easy difficulty so tests mine in a handful of attempts
pub const TEST_DIFFICULTY: u32 = 1;

/// A distinct, valid transaction per `n`.
pub fn sample_transaction(n: usize) -> Transaction {
    Transaction::new(format!("sender-{n}"), format!("recipient-{n}"), (n + 1) as f64)
}

/// Create a temporary directory for testing
pub fn create_temp_dir() -> Result<TempDir> {
    tempfile::tempdir().map_err(|e| BlockchainError::Io(e.to_string()))
}

/// An engine at `TEST_DIFFICULTY` with `blocks` mined on top of genesis,
/// one sample transaction per block.
pub fn create_test_engine(blocks: usize) -> Result<ChainEngine> {
    let mut engine = ChainEngine::new(TEST_DIFFICULTY)?;
    for n in 0..blocks {
        engine.submit_transaction(sample_transaction(n))?;
        engine.mine_block()?;
    }
    Ok(engine)
}

/// Rewrite the block at `index` through its JSON form, the way someone editing
/// a stored chain would. The stored hash is left as it was.
pub fn tamper_block(chain: &mut [Block], index: usize, edit: impl FnOnce(&mut Value)) -> Result<()> {
    let block = chain
        .get_mut(index)
        .ok_or_else(|| BlockchainError::Io(format!("no block at index {index}")))?;
    let mut value = serde_json::to_value(&*block)?;
    edit(&mut value);
    *block = serde_json::from_value(value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_test_engine() {
        let engine = create_test_engine(3).unwrap();
        assert_eq!(engine.chain().len(), 4);
        assert!(engine.pending().is_empty());
        assert!(engine.is_valid());
    }

    #[test]
    fn test_sample_transactions_are_valid_and_distinct() {
        assert!(sample_transaction(0).is_valid());
        assert_ne!(sample_transaction(0), sample_transaction(1));
    }

    #[test]
    fn test_tamper_block_keeps_stored_hash() {
        let engine = create_test_engine(1).unwrap();
        let mut chain = engine.chain().to_vec();
        let hash = chain[1].get_hash().to_string();

        tamper_block(&mut chain, 1, |block| block["timestamp"] = json!(5)).unwrap();
        assert_eq!(chain[1].get_timestamp(), 5);
        assert_eq!(chain[1].get_hash(), hash);
    }

    #[test]
    fn test_tamper_block_out_of_range() {
        let mut chain = Vec::new();
        assert!(tamper_block(&mut chain, 0, |_| {}).is_err());
    }
}
