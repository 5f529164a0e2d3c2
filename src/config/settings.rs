use crate::core::proof_of_work::HASH_HEX_LEN;
use crate::error::{BlockchainError, Result};
use log::warn;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Defaults overlaid with whatever the environment sets, read once per process.
pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

pub const DEFAULT_DIFFICULTY: u32 = 2;
pub const DEFAULT_STORAGE_PATH: &str = "blockchain.json";

const DIFFICULTY_KEY: &str = "BLOCKCHAIN_DIFFICULTY";
const STORAGE_KEY: &str = "BLOCKCHAIN_STORAGE";
const MAX_NONCE_KEY: &str = "BLOCKCHAIN_MAX_NONCE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Leading zero hex characters every block hash must carry
    pub difficulty: u32,
    /// JSON file holding the chain and pending transactions
    pub storage_path: PathBuf,
    /// Stop mining after this nonce; unset means search until found
    pub max_nonce: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            difficulty: DEFAULT_DIFFICULTY,
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            max_nonce: None,
        }
    }
}

impl Config {
    pub fn new() -> Config {
        Config::default()
    }

    pub fn from_env() -> Config {
        let mut config = Config::default();
        config.apply_overrides(|key| env::var(key).ok());
        config
    }

    pub fn from_toml_str(contents: &str) -> Result<Config> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| {
            BlockchainError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Defaults, then the TOML file if one is given, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    /// Overlay values found through `lookup`. Unparseable values are ignored
    /// with a warning so a stray variable cannot take the ledger down.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup(DIFFICULTY_KEY) {
            match raw.trim().parse::<u32>() {
                Ok(difficulty) => self.difficulty = difficulty,
                Err(e) => warn!("Ignoring {DIFFICULTY_KEY}={raw}: {e}"),
            }
        }
        if let Some(raw) = lookup(STORAGE_KEY) {
            if raw.trim().is_empty() {
                warn!("Ignoring empty {STORAGE_KEY}");
            } else {
                self.storage_path = PathBuf::from(raw);
            }
        }
        if let Some(raw) = lookup(MAX_NONCE_KEY) {
            match raw.trim().parse::<u64>() {
                Ok(max_nonce) => self.max_nonce = Some(max_nonce),
                Err(e) => warn!("Ignoring {MAX_NONCE_KEY}={raw}: {e}"),
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.difficulty > HASH_HEX_LEN {
            return Err(BlockchainError::Config(format!(
                "difficulty {} exceeds the {HASH_HEX_LEN} hex characters of a block hash",
                self.difficulty
            )));
        }
        if self.storage_path.as_os_str().is_empty() {
            return Err(BlockchainError::Config(
                "storage path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
