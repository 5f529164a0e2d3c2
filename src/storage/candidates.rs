// Candidate chains arrive as a JSON list of chains, each a list of blocks in
// the same shape the ledger stores. One malformed chain does not spoil the rest.

use crate::core::{Block, Chain};
use crate::error::{BlockchainError, Result};
use log::{info, warn};
use serde_json::Value;
use std::fs;
use std::path::Path;

pub fn load_candidate_chains(path: &Path) -> Result<Vec<Chain>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        BlockchainError::Io(format!("Failed to read candidate chains {}: {e}", path.display()))
    })?;
    parse_candidate_chains(&contents)
}

/// Parse a list of chains, skipping any entry whose blocks do not deserialize.
/// The document itself has to be a JSON list.
pub fn parse_candidate_chains(contents: &str) -> Result<Vec<Chain>> {
    let document: Value = serde_json::from_str(contents)?;
    let entries = match document {
        Value::Array(entries) => entries,
        _ => {
            return Err(BlockchainError::Serialization(
                "candidate file must contain a list of chains".to_string(),
            ))
        }
    };

    let total = entries.len();
    let chains: Vec<Chain> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| match serde_json::from_value::<Vec<Block>>(entry) {
            Ok(chain) => Some(chain),
            Err(e) => {
                warn!("Skipping malformed candidate chain {position}: {e}");
                None
            }
        })
        .collect();

    info!("Loaded {}/{total} candidate chains", chains.len());
    Ok(chains)
}
