// The chain engine owns one chain and its pending transactions. It is a plain
// value: callers hold it, nothing here is global, and there is no I/O. Whoever
// drives the engine persists `state()` after each mutating call.

use crate::config::Config;
use crate::core::proof_of_work::HASH_HEX_LEN;
use crate::core::{resolve, validate_chain, Block, ChainViolation, Resolution, Transaction};
use crate::error::{BlockchainError, Result};
use crate::utils::current_timestamp;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// An ordered sequence of blocks, genesis first.
pub type Chain = Vec<Block>;

/// Plain-data snapshot of an engine, the shape persistence reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainState {
    pub chain: Chain,
    #[serde(default)]
    pub pending_transactions: Vec<Transaction>,
}

#[derive(Debug, Clone)]
pub struct ChainEngine {
    chain: Chain, // never empty: chain[0] is genesis
    pending: Vec<Transaction>,
    difficulty: u32,
    max_nonce: Option<u64>,
}

impl ChainEngine {
    /// Start a fresh chain holding only a freshly mined genesis block.
    pub fn new(difficulty: u32) -> Result<ChainEngine> {
        Self::with_max_nonce(difficulty, None)
    }

    /// Like [`ChainEngine::new`], but every mining run gives up past `max_nonce`.
    pub fn with_max_nonce(difficulty: u32, max_nonce: Option<u64>) -> Result<ChainEngine> {
        check_difficulty(difficulty)?;
        info!("Creating genesis block (difficulty: {difficulty})");
        let genesis = Block::generate_genesis_block(current_timestamp()?, difficulty, max_nonce)?;
        Ok(ChainEngine {
            chain: vec![genesis],
            pending: Vec::new(),
            difficulty,
            max_nonce,
        })
    }

    pub fn from_config(config: &Config) -> Result<ChainEngine> {
        config.validate()?;
        Self::with_max_nonce(config.difficulty, config.max_nonce)
    }

    /// Rebuild an engine from persisted state.
    ///
    /// The chain has to pass full validation under `difficulty`. Pending
    /// transactions that no longer pass the structural check are dropped.
    pub fn restore(state: ChainState, difficulty: u32, max_nonce: Option<u64>) -> Result<ChainEngine> {
        check_difficulty(difficulty)?;
        validate_chain(&state.chain, difficulty)?;

        let total = state.pending_transactions.len();
        let pending: Vec<Transaction> = state
            .pending_transactions
            .into_iter()
            .filter(|tx| match tx.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!("Dropping stored pending transaction: {e}");
                    false
                }
            })
            .collect();

        info!(
            "Restored chain of {} blocks with {}/{} pending transactions",
            state.chain.len(),
            pending.len(),
            total
        );
        Ok(ChainEngine {
            chain: state.chain,
            pending,
            difficulty,
            max_nonce,
        })
    }

    /// Accept a transaction into the pending set. Invalid ones leave the engine untouched.
    pub fn submit_transaction(&mut self, transaction: Transaction) -> Result<()> {
        transaction.validate()?;
        self.pending.push(transaction);
        info!("Accepted transaction; {} pending", self.pending.len());
        Ok(())
    }

    /// Mine every pending transaction into a new block and append it.
    ///
    /// Mining with nothing pending produces an empty block. The chain and the
    /// pending set are only touched once a valid nonce has been found.
    pub fn mine_block(&mut self) -> Result<Block> {
        let index = self.chain.len() as u64;
        let candidate = Block::new_candidate(
            index,
            current_timestamp()?,
            self.latest_block().get_hash().to_string(),
            self.pending.clone(),
        );

        info!(
            "Mining block {index} with {} transactions (difficulty: {})",
            self.pending.len(),
            self.difficulty
        );
        let block = candidate.mine(self.difficulty, self.max_nonce)?;

        self.chain.push(block.clone());
        self.pending.clear();
        info!("Successfully mined block {index}: {}", block.get_hash());
        Ok(block)
    }

    /// The chain is never empty. `with_max_nonce` starts it with a mined
    /// genesis block, `restore` refuses an empty chain as `MissingGenesis`,
    /// and `resolve_conflicts` only adopts chains that passed validation.
    pub fn latest_block(&self) -> &Block {
        self.chain
            .last()
            .expect("chain always holds at least the genesis block")
    }

    pub fn chain(&self) -> &[Block] {
        self.chain.as_slice()
    }

    pub fn pending(&self) -> &[Transaction] {
        self.pending.as_slice()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn max_nonce(&self) -> Option<u64> {
        self.max_nonce
    }

    /// Index of the latest block.
    pub fn height(&self) -> u64 {
        self.latest_block().get_index()
    }

    pub fn validate(&self) -> std::result::Result<(), ChainViolation> {
        validate_chain(&self.chain, self.difficulty)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Run longest-valid-chain resolution against `candidates` and adopt the
    /// winner. Returns true if the local chain was replaced.
    ///
    /// Pending transactions survive a replacement.
    pub fn resolve_conflicts(&mut self, candidates: &[Chain]) -> bool {
        let replacement = match resolve(&self.chain, candidates, self.difficulty) {
            Resolution::Replaced(chain) => Some(chain.to_vec()),
            Resolution::Kept(_) => None,
        };

        match replacement {
            Some(chain) => {
                info!(
                    "Replacing local chain ({} blocks) with candidate ({} blocks)",
                    self.chain.len(),
                    chain.len()
                );
                self.chain = chain;
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> ChainState {
        ChainState {
            chain: self.chain.clone(),
            pending_transactions: self.pending.clone(),
        }
    }
}

fn check_difficulty(difficulty: u32) -> Result<()> {
    if difficulty > HASH_HEX_LEN {
        return Err(BlockchainError::Config(format!(
            "difficulty {difficulty} exceeds the {HASH_HEX_LEN} hex characters of a block hash"
        )));
    }
    Ok(())
}
