//! Chain-wide validation
//!
//! Walks a chain front to back and reports the first block that breaks one of
//! the chain invariants. Validation never fails loudly: a defect comes back as a
//! `ChainViolation` value naming the block and what is wrong with it.

use crate::core::{Block, ProofOfWork, GENESIS_PREVIOUS_HASH};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    /// The chain has no blocks at all
    MissingGenesis,
    /// Block i does not carry index i
    IndexMismatch,
    /// previous_hash does not match the predecessor's hash (or the genesis sentinel)
    LinkBroken,
    /// Stored hash differs from the digest recomputed from the block's content
    HashMismatch,
    /// Hash does not have the required number of leading zeros
    DifficultyNotMet,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::MissingGenesis => write!(f, "chain has no genesis block"),
            ViolationKind::IndexMismatch => write!(f, "index does not match position"),
            ViolationKind::LinkBroken => write!(f, "previous hash does not link to predecessor"),
            ViolationKind::HashMismatch => write!(f, "stored hash does not match content"),
            ViolationKind::DifficultyNotMet => write!(f, "hash does not meet difficulty"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainViolation {
    index: usize,
    kind: ViolationKind,
}

impl ChainViolation {
    pub fn new(index: usize, kind: ViolationKind) -> ChainViolation {
        ChainViolation { index, kind }
    }

    /// Position of the offending block in the chain
    pub fn get_index(&self) -> usize {
        self.index
    }

    pub fn get_kind(&self) -> ViolationKind {
        self.kind
    }
}

impl fmt::Display for ChainViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block {}: {}", self.index, self.kind)
    }
}

/// Check every block in order and stop at the first violation.
///
/// Per block the checks run index, link, hash, difficulty. A tampered block is
/// therefore reported as `HashMismatch` at its own position, with two
/// exceptions that the earlier checks catch first: a rewritten `index` is
/// reported as `IndexMismatch` and a rewritten `previous_hash` as `LinkBroken`.
pub fn validate_chain(chain: &[Block], difficulty: u32) -> Result<(), ChainViolation> {
    if chain.is_empty() {
        return Err(ChainViolation::new(0, ViolationKind::MissingGenesis));
    }

    for (position, block) in chain.iter().enumerate() {
        validate_block_at(chain, position, block, difficulty)?;
    }
    Ok(())
}

pub fn is_valid(chain: &[Block], difficulty: u32) -> bool {
    validate_chain(chain, difficulty).is_ok()
}

fn validate_block_at(
    chain: &[Block],
    position: usize,
    block: &Block,
    difficulty: u32,
) -> Result<(), ChainViolation> {
    let violation = |kind| Err(ChainViolation::new(position, kind));

    if block.get_index() != position as u64 {
        return violation(ViolationKind::IndexMismatch);
    }

    let expected_previous = match position.checked_sub(1) {
        Some(previous) => chain[previous].get_hash(),
        None => GENESIS_PREVIOUS_HASH,
    };
    if block.get_previous_hash() != expected_previous {
        return violation(ViolationKind::LinkBroken);
    }

    match block.compute_hash() {
        Ok(hash) if hash == block.get_hash() => {}
        _ => return violation(ViolationKind::HashMismatch),
    }

    if !ProofOfWork::meets_difficulty(block.get_hash(), difficulty) {
        return violation(ViolationKind::DifficultyNotMet);
    }

    Ok(())
}
