//! Command-line interface.

use std::path::PathBuf;

use alloy::primitives::{Address, U256};
use clap::{Args, Parser, Subcommand};

use crate::config::ClientConfig;

#[derive(Debug, Parser)]
#[command(name = "otp-auth-client")]
#[command(
    about = "Register, generate and verify one-time passwords against a deployed OTP contract",
    long_about = None
)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON-RPC endpoint (overrides RPC_URL)
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// Deployed contract address (overrides CONTRACT_ADDRESS)
    #[arg(long, global = true)]
    pub contract: Option<String>,

    /// Expected chain ID; the node must report the same value
    #[arg(long, global = true)]
    pub chain_id: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Arguments for `registerUser`.
#[derive(Debug, Clone, Default, Args)]
pub struct RegistrationArgs {
    /// Username to register
    #[arg(long)]
    pub username: Option<String>,

    /// Seed passed to the contract (at most 2^64 - 1)
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Register, generate an OTP and authenticate with it (default)
    Run(RegistrationArgs),
    /// Register a user
    Register(RegistrationArgs),
    /// Generate an OTP for the wallet account
    GenerateOtp,
    /// Check an OTP for an account (defaults to the wallet account)
    Authenticate {
        /// OTP to verify, decimal or 0x-prefixed hex
        #[arg(long)]
        otp: U256,

        /// Account to check
        #[arg(long)]
        account: Option<Address>,
    },
    /// Show chain, block height and wallet balance
    Status,
}

impl Cli {
    /// The subcommand to execute; the full sequence when none was given.
    pub fn command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Run(RegistrationArgs::default()))
    }

    /// Layer command-line flags over a loaded configuration.
    pub fn apply_overrides(&self, config: &mut ClientConfig) {
        if let Some(url) = &self.rpc_url {
            config.blockchain.rpc_url = url.clone();
        }
        if let Some(address) = &self.contract {
            config.contract.address = address.clone();
        }
        if let Some(chain_id) = self.chain_id {
            config.blockchain.chain_id = Some(chain_id);
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
        if let Some(Commands::Run(args) | Commands::Register(args)) = &self.command {
            if let Some(username) = &args.username {
                config.registration.username = username.clone();
            }
            if let Some(seed) = args.seed {
                config.registration.seed = seed;
            }
        }
    }
}
