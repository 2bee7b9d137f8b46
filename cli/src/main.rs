//! Whitelist CLI - developer tasks for the whitelist contract
//!
//! Tasks:
//! - accounts: print the signer accounts configured in the environment
//! - merkle-proof: create the merkle proof for a whitelisted account
//! - merkle-whitelist: compute the whitelist root to publish on-chain
//! - config: print the effective project configuration

use std::path::{Path, PathBuf};

use alloy_signer_local::PrivateKeySigner;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use whitelist_merkle::{leaf_hash, merkle::to_hex, Address, Whitelist};

mod config;

use config::{Environment, ProjectConfig};

#[derive(Parser)]
#[command(name = "whitelist")]
#[command(about = "Developer tasks for the whitelist contract", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the whitelist JSON file
    #[arg(long, global = true, default_value = "data/whitelist.json")]
    whitelist: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prints the list of accounts
    Accounts,

    /// Create merkle proof
    MerkleProof {
        /// The account address
        #[arg(short, long)]
        account: Address,
    },

    /// Create whitelist root
    MerkleWhitelist,

    /// Print the effective project configuration as JSON
    Config,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Accounts => cmd_accounts(&Environment::from_env()),
        Commands::MerkleProof { account } => cmd_merkle_proof(&cli.whitelist, account),
        Commands::MerkleWhitelist => cmd_merkle_whitelist(&cli.whitelist),
        Commands::Config => cmd_config(&Environment::from_env()),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Print the address of every signer key configured in the environment.
fn cmd_accounts(env: &Environment) -> Result<()> {
    debug!(keys = env.private_keys.len(), "signer keys in environment");
    if env.private_keys.is_empty() {
        println!("no signer accounts configured (set PRIVATE_KEYS in .env)");
        return Ok(());
    }

    for key in &env.private_keys {
        // Do not echo the key material on failure.
        let signer: PrivateKeySigner = key
            .parse()
            .context("invalid private key in PRIVATE_KEYS")?;
        println!("{}", signer.address());
    }
    Ok(())
}

/// Hash the account, rebuild the whitelist tree and print the proof path.
fn cmd_merkle_proof(whitelist_path: &Path, account: Address) -> Result<()> {
    let whitelist = load_whitelist(whitelist_path)?;
    let tree = whitelist.tree()?;
    let leaf = leaf_hash(&account);

    println!("{}", to_hex(&leaf));
    println!("whitelist ({} entries):", whitelist.len());
    for address in whitelist.addresses() {
        println!("  {address}");
    }

    let proof = tree
        .proof(&leaf)
        .with_context(|| format!("account {account} is not whitelisted"))?;
    println!("proof:");
    for sibling in proof.hex_siblings() {
        println!("  {sibling}");
    }
    Ok(())
}

/// Rebuild the whitelist tree and print its root, raw and hex.
fn cmd_merkle_whitelist(whitelist_path: &Path) -> Result<()> {
    let whitelist = load_whitelist(whitelist_path)?;
    let tree = whitelist.tree()?;

    println!("{:?}", tree.root());
    println!("{}", tree.hex_root());
    Ok(())
}

/// Print the effective project configuration (compiler + network wiring).
fn cmd_config(env: &Environment) -> Result<()> {
    let config = ProjectConfig::effective(env);
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn load_whitelist(path: &Path) -> Result<Whitelist> {
    Whitelist::load(path)
        .with_context(|| format!("loading whitelist from {}", path.display()))
}
