use crate::config::{Config, GLOBAL_CONFIG};
use crate::core::Metadata;
use crate::error::Result;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use std::str::FromStr;

/// Extra transaction fields given on the command line as a JSON object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataArg(pub Metadata);

impl FromStr for MetadataArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match serde_json::from_str::<Value>(s) {
            Ok(Value::Object(map)) => Ok(MetadataArg(map.into_iter().collect())),
            Ok(_) => Err("metadata must be a JSON object".to_string()),
            Err(e) => Err(format!("metadata must be valid JSON: {e}")),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "ledger-chain", about = "Interact with a proof-of-work ledger")]
pub struct Opt {
    #[arg(long, global = true, help = "Path to the ledger storage file")]
    pub storage: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        help = "Proof-of-work difficulty (leading zero hex characters)"
    )]
    pub difficulty: Option<u32>,
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

impl Opt {
    /// Effective configuration: file or environment baseline, then CLI flags.
    pub fn to_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(Some(path.as_path()))?,
            None => GLOBAL_CONFIG.clone(),
        };
        if let Some(storage) = &self.storage {
            config.storage_path = storage.clone();
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        name = "add-transaction",
        about = "Add a new transaction to the pending list"
    )]
    AddTransaction {
        #[arg(long, help = "Sender identifier")]
        sender: String,
        #[arg(long, help = "Recipient identifier")]
        recipient: String,
        #[arg(long, allow_negative_numbers = true, help = "Amount to transfer")]
        amount: f64,
        #[arg(long, help = "Optional JSON object with additional transaction data")]
        metadata: Option<MetadataArg>,
    },
    #[command(name = "mine", about = "Mine a new block containing all pending transactions")]
    Mine,
    #[command(name = "view", about = "Display the full chain")]
    View,
    #[command(name = "validate", about = "Validate the integrity of the stored chain")]
    Validate,
    #[command(name = "pending", about = "Show pending transactions awaiting mining")]
    Pending,
    #[command(
        name = "resolve",
        about = "Adopt the longest valid chain from a file of candidate chains"
    )]
    Resolve {
        #[arg(long, help = "JSON file containing a list of candidate chains")]
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_arg_parses_object() {
        let arg: MetadataArg = r#"{"memo": "rent", "tags": [1, 2]}"#.parse().unwrap();
        assert_eq!(arg.0.get("memo"), Some(&json!("rent")));
        assert_eq!(arg.0.get("tags"), Some(&json!([1, 2])));
    }

    #[test]
    fn test_metadata_arg_rejects_non_objects() {
        assert!("[1, 2]".parse::<MetadataArg>().is_err());
        assert!("{not json".parse::<MetadataArg>().is_err());
    }

    #[test]
    fn test_parse_add_transaction() {
        let opt = Opt::try_parse_from([
            "ledger-chain",
            "--difficulty",
            "1",
            "add-transaction",
            "--sender",
            "alice",
            "--recipient",
            "bob",
            "--amount",
            "5.5",
            "--metadata",
            r#"{"memo": "lunch"}"#,
        ])
        .unwrap();

        assert_eq!(opt.difficulty, Some(1));
        match opt.command {
            Command::AddTransaction {
                sender,
                recipient,
                amount,
                metadata,
            } => {
                assert_eq!((sender.as_str(), recipient.as_str(), amount), ("alice", "bob", 5.5));
                assert_eq!(metadata.unwrap().0.get("memo"), Some(&json!("lunch")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_negative_amount_reaches_the_engine() {
        let opt = Opt::try_parse_from([
            "ledger-chain",
            "add-transaction",
            "--sender",
            "a",
            "--recipient",
            "b",
            "--amount",
            "-3",
        ])
        .unwrap();
        assert!(matches!(opt.command, Command::AddTransaction { amount, .. } if amount == -3.0));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let opt = Opt::try_parse_from(["ledger-chain", "mine", "--storage", "other.json"]).unwrap();
        assert_eq!(opt.storage, Some(PathBuf::from("other.json")));
        assert!(matches!(opt.command, Command::Mine));
    }

    #[test]
    fn test_flags_override_config() {
        let opt = Opt::try_parse_from([
            "ledger-chain",
            "--storage",
            "flag.json",
            "--difficulty",
            "3",
            "view",
        ])
        .unwrap();
        let config = opt.to_config().unwrap();
        assert_eq!(config.storage_path, PathBuf::from("flag.json"));
        assert_eq!(config.difficulty, 3);
    }

    #[test]
    fn test_impossible_difficulty_flag_rejected() {
        let opt = Opt::try_parse_from(["ledger-chain", "--difficulty", "99", "view"]).unwrap();
        assert!(opt.to_config().is_err());
    }

    #[test]
    fn test_resolve_requires_file() {
        assert!(Opt::try_parse_from(["ledger-chain", "resolve"]).is_err());
        let opt = Opt::try_parse_from(["ledger-chain", "resolve", "--file", "peers.json"]).unwrap();
        assert!(matches!(opt.command, Command::Resolve { file } if file == PathBuf::from("peers.json")));
    }
}
