// Entry point for the ledger CLI. Each invocation loads the stored ledger,
// runs one command against the engine and persists the result.
use clap::Parser;
use ledger_chain::config::Config;
use ledger_chain::core::{validate_chain, ChainEngine, Transaction};
use ledger_chain::storage::{load_candidate_chains, open_engine, JsonStore};
use ledger_chain::utils::{format_timestamp, DEFAULT_TIMESTAMP_FORMAT};
use ledger_chain::{BlockchainError, Command, Opt};
use log::{error, LevelFilter};
use std::process;

fn main() {
    // Info by default; RUST_LOG still takes precedence
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let opt = Opt::parse();

    if let Err(e) = run_command(opt) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run_command(opt: Opt) -> Result<(), Box<dyn std::error::Error>> {
    let config = opt.to_config()?;
    let store = JsonStore::new(&config.storage_path);

    match opt.command {
        Command::AddTransaction {
            sender,
            recipient,
            amount,
            metadata,
        } => {
            let mut engine = load_engine(&store, &config)?;
            let metadata = metadata.map(|m| m.0).unwrap_or_default();
            let transaction = Transaction::with_metadata(sender, recipient, amount, metadata);
            engine.submit_transaction(transaction)?;
            store.save(&engine.state())?;
            println!("Transaction added successfully.");
        }
        Command::Mine => {
            let mut engine = load_engine(&store, &config)?;
            let block = engine.mine_block()?;
            store.save(&engine.state())?;
            println!(
                "Block mined! Index: {}, Hash: {}, Transactions: {}",
                block.get_index(),
                block.get_hash(),
                block.get_transactions().len()
            );
        }
        Command::View => {
            let engine = load_engine(&store, &config)?;
            for block in engine.chain() {
                println!("Block {}:", block.get_index());
                println!(
                    "  Timestamp: {}",
                    format_timestamp(block.get_timestamp(), DEFAULT_TIMESTAMP_FORMAT)
                );
                println!("  Previous Hash: {}", block.get_previous_hash());
                println!("  Hash: {}", block.get_hash());
                println!("  Nonce: {}", block.get_nonce());
                println!(
                    "  Transactions ({}, total {}):",
                    block.get_transactions().len(),
                    block.total_amount()
                );
                for tx in block.get_transactions() {
                    println!("    {}", serde_json::to_string(tx)?);
                }
                println!();
            }
        }
        Command::Validate => validate_stored(&store, &config)?,
        Command::Pending => {
            let engine = load_engine(&store, &config)?;
            if engine.pending().is_empty() {
                println!("No pending transactions.");
            } else {
                println!("Pending transactions ({}):", engine.pending().len());
                for tx in engine.pending() {
                    println!("  {}", serde_json::to_string(tx)?);
                }
            }
        }
        Command::Resolve { file } => {
            let mut engine = load_engine(&store, &config)?;
            let candidates = load_candidate_chains(&file)?;
            if engine.resolve_conflicts(&candidates) {
                store.save(&engine.state())?;
                println!("Chain was replaced with a longer valid chain.");
            } else {
                println!("Current chain is authoritative; no replacement occurred.");
            }
        }
    }
    Ok(())
}

// A fresh store gets its genesis block written straight away.
fn load_engine(store: &JsonStore, config: &Config) -> Result<ChainEngine, BlockchainError> {
    let fresh = !store.exists();
    let engine = open_engine(store, config)?;
    if fresh {
        store.save(&engine.state())?;
    }
    Ok(engine)
}

// Validation looks at what is on disk as-is. Opening an engine would already
// refuse an invalid chain before the report could be printed.
fn validate_stored(store: &JsonStore, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = match store.load()? {
        Some(state) => state,
        None => {
            println!("No ledger stored at {}.", store.get_path().display());
            return Ok(());
        }
    };
    match validate_chain(&state.chain, config.difficulty) {
        Ok(()) => {
            println!("Blockchain is valid.");
            Ok(())
        }
        Err(violation) => Err(format!("Blockchain is INVALID! {violation}").into()),
    }
}
