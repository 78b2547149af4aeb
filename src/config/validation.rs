//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, at least one confirmation)
//! - Check the RPC URL and contract address parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::ClientConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid RPC URL '{url}': {reason}")]
    RpcUrl { url: String, reason: String },

    #[error("contract address is not set")]
    MissingContractAddress,

    #[error("invalid contract address '{0}'")]
    ContractAddress(String),

    #[error("contract address must not be the zero address")]
    ZeroContractAddress,

    #[error("registration username must not be empty")]
    EmptyUsername,

    #[error("{0} must be greater than zero")]
    NonPositive(&'static str),

    #[error("unknown log level '{0}'")]
    LogLevel(String),
}

/// Check a fully merged configuration.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let chain = &config.blockchain;
    match url::Url::parse(&chain.rpc_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::RpcUrl {
            url: chain.rpc_url.clone(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::RpcUrl {
            url: chain.rpc_url.clone(),
            reason: e.to_string(),
        }),
    }

    if chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::NonPositive("blockchain.rpc_timeout_secs"));
    }
    if chain.confirmation_blocks == 0 {
        errors.push(ValidationError::NonPositive("blockchain.confirmation_blocks"));
    }
    if chain.confirmation_timeout_secs == 0 {
        errors.push(ValidationError::NonPositive("blockchain.confirmation_timeout_secs"));
    }
    if chain.poll_interval_ms == 0 {
        errors.push(ValidationError::NonPositive("blockchain.poll_interval_ms"));
    }

    let address = config.contract.address.trim();
    if address.is_empty() {
        errors.push(ValidationError::MissingContractAddress);
    } else {
        match address.parse::<Address>() {
            Ok(parsed) if parsed == Address::ZERO => {
                errors.push(ValidationError::ZeroContractAddress)
            }
            Ok(_) => {}
            Err(_) => errors.push(ValidationError::ContractAddress(address.to_string())),
        }
    }

    if config.registration.username.trim().is_empty() {
        errors.push(ValidationError::EmptyUsername);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
