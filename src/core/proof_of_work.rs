use crate::core::Block;
use crate::error::{BlockchainError, Result};
use crate::utils::sha256_hex;
use log::debug;

/// Length of a hex-encoded SHA-256 digest; no difficulty above this can be met.
pub const HASH_HEX_LEN: u32 = 64;

/// Exhaustive nonce search over a single candidate block.
///
/// Nonces are tried in increasing order starting at 0, so a given candidate and
/// difficulty always settle on the same nonce.
pub struct ProofOfWork {
    block: Block,
    difficulty: u32,
    max_nonce: Option<u64>,
}

impl ProofOfWork {
    pub fn new_proof_of_work(block: Block, difficulty: u32) -> ProofOfWork {
        ProofOfWork {
            block,
            difficulty,
            max_nonce: None,
        }
    }

    /// Give up after trying `max_nonce` (inclusive). `None` searches forever.
    pub fn with_max_nonce(mut self, max_nonce: Option<u64>) -> ProofOfWork {
        self.max_nonce = max_nonce;
        self
    }

    /// True if `hash` starts with at least `difficulty` `'0'` characters.
    pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
        let difficulty = difficulty as usize;
        hash.len() >= difficulty && hash.bytes().take(difficulty).all(|b| b == b'0')
    }

    /// Validate a sealed block's proof-of-work: the stored hash must be the
    /// recomputed one and must meet `difficulty`.
    pub fn validate(block: &Block, difficulty: u32) -> bool {
        match block.compute_hash() {
            Ok(hash) => hash == block.get_hash() && Self::meets_difficulty(&hash, difficulty),
            Err(_) => false,
        }
    }

    fn prepare_data(&self, nonce: u64) -> Result<Vec<u8>> {
        self.block.hash_preimage(nonce)
    }

    pub fn run(&self) -> Result<(u64, String)> {
        if self.difficulty > HASH_HEX_LEN {
            return Err(BlockchainError::Mining(format!(
                "difficulty {} can never be met by a {HASH_HEX_LEN}-character hash",
                self.difficulty
            )));
        }

        let mut nonce: u64 = 0;
        loop {
            if let Some(limit) = self.max_nonce {
                if nonce > limit {
                    return Err(BlockchainError::Mining(format!(
                        "no nonce in 0..={limit} meets difficulty {}",
                        self.difficulty
                    )));
                }
            }

            let hash = sha256_hex(self.prepare_data(nonce)?.as_slice());
            if Self::meets_difficulty(&hash, self.difficulty) {
                debug!("Found nonce {nonce} after {} attempts", nonce + 1);
                return Ok((nonce, hash));
            }

            nonce = nonce
                .checked_add(1)
                .ok_or_else(|| BlockchainError::Mining("nonce space exhausted".to_string()))?;
        }
    }

    pub fn into_block(self) -> Block {
        self.block
    }
}
