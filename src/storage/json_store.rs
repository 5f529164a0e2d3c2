use crate::config::Config;
use crate::core::{Block, ChainEngine, ChainState};
use crate::error::{BlockchainError, Result};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

// Older ledgers stored a bare list of blocks with no pending set.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredLedger {
    Snapshot(ChainState),
    Legacy(Vec<Block>),
}

impl From<StoredLedger> for ChainState {
    fn from(stored: StoredLedger) -> Self {
        match stored {
            StoredLedger::Snapshot(state) => state,
            StoredLedger::Legacy(chain) => ChainState {
                chain,
                pending_transactions: Vec::new(),
            },
        }
    }
}

/// A ledger persisted as one pretty-printed JSON document:
/// `{ "chain": [...], "pending_transactions": [...] }`.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> JsonStore {
        JsonStore { path: path.into() }
    }

    pub fn get_path(&self) -> &Path {
        self.path.as_path()
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// `Ok(None)` when nothing has been stored yet.
    pub fn load(&self) -> Result<Option<ChainState>> {
        if !self.exists() {
            debug!("No ledger at {}", self.path.display());
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        let stored: StoredLedger = serde_json::from_str(&contents).map_err(|e| {
            BlockchainError::Serialization(format!(
                "Failed to parse ledger {}: {e}",
                self.path.display()
            ))
        })?;
        Ok(Some(stored.into()))
    }

    /// Write `state`, creating missing parent directories.
    pub fn save(&self, state: &ChainState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json)?;
        debug!(
            "Saved {} blocks and {} pending transactions to {}",
            state.chain.len(),
            state.pending_transactions.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Restore the engine stored in `store`, or start a new chain if there is none.
///
/// A stored chain that fails validation is an error rather than being replaced,
/// so a corrupted file is never silently overwritten.
pub fn open_engine(store: &JsonStore, config: &Config) -> Result<ChainEngine> {
    config.validate()?;
    match store.load()? {
        Some(state) => ChainEngine::restore(state, config.difficulty, config.max_nonce),
        None => {
            info!("Starting a new chain at {}", store.get_path().display());
            ChainEngine::from_config(config)
        }
    }
}
