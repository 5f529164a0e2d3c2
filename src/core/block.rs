use crate::core::{ProofOfWork, Transaction};
use crate::error::Result;
use crate::utils::{canonical_json, sha256_hex};
use log::info;
use serde::{Deserialize, Serialize};

/// `previous_hash` of every genesis block: an all-zero SHA-256 hex digest.
pub const GENESIS_PREVIOUS_HASH: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    index: u64,
    timestamp: i64, // milliseconds since the Unix epoch
    transactions: Vec<Transaction>,
    previous_hash: String,
    nonce: u64,
    hash: String,
}

// Everything the hash covers. The stored hash is deliberately absent.
#[derive(Serialize)]
struct HashPreimage<'a> {
    index: u64,
    timestamp: i64,
    transactions: &'a [Transaction],
    previous_hash: &'a str,
    nonce: u64,
}

impl Block {
    /// An unmined block: nonce 0 and no hash yet. Pass it to [`Block::mine`].
    pub fn new_candidate(
        index: u64,
        timestamp: i64,
        previous_hash: String,
        transactions: Vec<Transaction>,
    ) -> Block {
        Block {
            index,
            timestamp,
            transactions,
            previous_hash,
            nonce: 0,
            hash: String::new(),
        }
    }

    /// Run proof-of-work over this candidate and return the sealed block.
    pub fn mine(self, difficulty: u32, max_nonce: Option<u64>) -> Result<Block> {
        let index = self.index;
        info!("Starting proof-of-work for block {index} with difficulty {difficulty}");
        let pow = ProofOfWork::new_proof_of_work(self, difficulty).with_max_nonce(max_nonce);
        let (nonce, hash) = pow.run()?;
        info!("Proof-of-work completed for block {index}: {hash} (nonce: {nonce})");

        let mut block = pow.into_block();
        block.nonce = nonce;
        block.hash = hash;
        Ok(block)
    }

    pub fn generate_genesis_block(
        timestamp: i64,
        difficulty: u32,
        max_nonce: Option<u64>,
    ) -> Result<Block> {
        Block::new_candidate(0, timestamp, GENESIS_PREVIOUS_HASH.to_string(), Vec::new())
            .mine(difficulty, max_nonce)
    }

    /// Canonical bytes of this block's content with `nonce` substituted.
    pub fn hash_preimage(&self, nonce: u64) -> Result<Vec<u8>> {
        canonical_json(&HashPreimage {
            index: self.index,
            timestamp: self.timestamp,
            transactions: &self.transactions,
            previous_hash: &self.previous_hash,
            nonce,
        })
    }

    /// Recompute the digest from the block's own content and nonce.
    pub fn compute_hash(&self) -> Result<String> {
        Ok(sha256_hex(&self.hash_preimage(self.nonce)?))
    }

    pub fn get_index(&self) -> u64 {
        self.index
    }

    pub fn get_timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn get_transactions(&self) -> &[Transaction] {
        self.transactions.as_slice()
    }

    pub fn get_previous_hash(&self) -> &str {
        self.previous_hash.as_str()
    }

    pub fn get_nonce(&self) -> u64 {
        self.nonce
    }

    pub fn get_hash(&self) -> &str {
        self.hash.as_str()
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }

    /// Sum of all transaction amounts, for summaries.
    pub fn total_amount(&self) -> f64 {
        self.transactions.iter().map(Transaction::get_amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_block(difficulty: u32) -> Block {
        let txs = vec![
            Transaction::new("alice", "bob", 10.0),
            Transaction::new("bob", "carol", 2.5),
        ];
        Block::new_candidate(1, 1_700_000_000_000, "prev".to_string(), txs)
            .mine(difficulty, None)
            .unwrap()
    }

    #[test]
    fn test_mined_hash_matches_recomputed_hash() {
        let block = sample_block(2);
        assert_eq!(block.get_hash(), block.compute_hash().unwrap());
        assert!(block.get_hash().starts_with("00"));
    }

    #[test]
    fn test_candidate_has_no_hash() {
        let candidate = Block::new_candidate(3, 0, "prev".to_string(), Vec::new());
        assert_eq!(candidate.get_hash(), "");
        assert_eq!(candidate.get_nonce(), 0);
    }

    #[test]
    fn test_hash_covers_every_field() {
        let block = sample_block(1);
        let base = block.compute_hash().unwrap();

        let mut changed = block.clone();
        changed.nonce += 1;
        assert_ne!(changed.compute_hash().unwrap(), base);

        let mut changed = block.clone();
        changed.timestamp += 1;
        assert_ne!(changed.compute_hash().unwrap(), base);

        let mut changed = block.clone();
        changed.previous_hash = "other".to_string();
        assert_ne!(changed.compute_hash().unwrap(), base);

        let mut changed = block.clone();
        changed.index += 1;
        assert_ne!(changed.compute_hash().unwrap(), base);

        let mut changed = block;
        changed.transactions.pop();
        assert_ne!(changed.compute_hash().unwrap(), base);
    }

    #[test]
    fn test_stored_hash_is_not_part_of_preimage() {
        let mut block = sample_block(1);
        let expected = block.compute_hash().unwrap();
        block.hash = "garbage".to_string();
        assert_eq!(block.compute_hash().unwrap(), expected);
    }

    #[test]
    fn test_genesis_block_shape() {
        let genesis = Block::generate_genesis_block(42, 2, None).unwrap();
        assert!(genesis.is_genesis());
        assert_eq!(genesis.get_index(), 0);
        assert_eq!(genesis.get_previous_hash(), GENESIS_PREVIOUS_HASH);
        assert!(genesis.get_transactions().is_empty());
        assert!(genesis.get_hash().starts_with("00"));
    }

    #[test]
    fn test_json_round_trip_keeps_hash_valid() {
        let block = sample_block(2);
        let json = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
        assert_eq!(back.compute_hash().unwrap(), block.get_hash());
    }

    #[test]
    fn test_total_amount() {
        assert_eq!(sample_block(1).total_amount(), 12.5);
    }
}
