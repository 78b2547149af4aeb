//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration (file, environment, flags)
//! - Build the signing identity, the RPC session and the contract proxy
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently

use alloy::primitives::Address;
use thiserror::Error;

use crate::blockchain::{BlockchainClient, BlockchainError, Wallet};
use crate::cli::Cli;
use crate::config::loader::{load_dotenv, load_unvalidated};
use crate::config::{validate_config, ClientConfig, ConfigError, ValidationError};
use crate::contract::OtpContract;

/// Errors raised before the first contract call.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),
}

/// Everything a command needs, initialized in dependency order.
#[derive(Debug)]
pub struct Session {
    pub config: ClientConfig,
    pub wallet: Wallet,
    pub client: BlockchainClient,
    pub contract: OtpContract,
}

/// Resolve the effective configuration: defaults, then the TOML file, then
/// `.env` and the process environment, then command-line flags.
pub fn resolve_config(cli: &Cli) -> Result<ClientConfig, StartupError> {
    load_dotenv();
    let mut config = load_unvalidated(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Parse the validated contract address.
pub fn contract_address(config: &ClientConfig) -> Result<Address, StartupError> {
    let raw = config.contract.address.trim();
    raw.parse::<Address>().map_err(|_| {
        StartupError::Config(ConfigError::Validation(vec![ValidationError::ContractAddress(
            raw.to_string(),
        )]))
    })
}

/// Build the wallet from `PRIVATE_KEY`, connect to the node and bind the
/// contract.
pub async fn connect(config: ClientConfig) -> Result<Session, StartupError> {
    let wallet = Wallet::from_env()?;
    connect_with_wallet(config, wallet).await
}

/// Same as [`connect`] with an explicit signing identity.
pub async fn connect_with_wallet(
    config: ClientConfig,
    wallet: Wallet,
) -> Result<Session, StartupError> {
    let address = contract_address(&config)?;
    let client = BlockchainClient::connect(config.blockchain.clone(), &wallet).await?;
    let contract = OtpContract::new(client.clone(), address);

    tracing::info!(
        contract = %address,
        account = %wallet.address(),
        "Session ready"
    );

    Ok(Session {
        config,
        wallet,
        client,
        contract,
    })
}
