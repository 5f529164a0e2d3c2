// Longest-valid-chain selection. This is a pure decision: nothing is mutated
// here, the engine applies the outcome afterwards.

use crate::core::{validate_chain, Block, Chain};
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    /// A strictly longer valid candidate should replace the local chain
    Replaced(&'a [Block]),
    /// No candidate beat the incumbent
    Kept(&'a [Block]),
}

impl<'a> Resolution<'a> {
    pub fn is_replaced(&self) -> bool {
        matches!(self, Resolution::Replaced(_))
    }

    /// The chain that won, whichever side it came from.
    pub fn chain(&self) -> &'a [Block] {
        match self {
            Resolution::Replaced(chain) | Resolution::Kept(chain) => chain,
        }
    }
}

/// Pick the longest valid chain among `local` and `candidates`.
///
/// The local chain starts as the best and is only displaced by a strictly
/// longer valid candidate, so ties favor the incumbent. Between candidates of
/// the same length, the one supplied first wins.
pub fn resolve<'a>(local: &'a [Block], candidates: &'a [Chain], difficulty: u32) -> Resolution<'a> {
    let mut best: Option<&'a [Block]> = None;
    let mut best_len = local.len();

    for (position, candidate) in candidates.iter().enumerate() {
        if candidate.len() <= best_len {
            debug!(
                "Candidate {position} (length {}) is not longer than {best_len}, skipping",
                candidate.len()
            );
            continue;
        }
        if let Err(violation) = validate_chain(candidate, difficulty) {
            debug!("Candidate {position} rejected: {violation}");
            continue;
        }
        best_len = candidate.len();
        best = Some(candidate.as_slice());
    }

    match best {
        Some(chain) => {
            info!(
                "Adopting candidate chain of length {} over local length {}",
                chain.len(),
                local.len()
            );
            Resolution::Replaced(chain)
        }
        None => {
            debug!("No valid candidate longer than {}; keeping local chain", local.len());
            Resolution::Kept(local)
        }
    }
}
