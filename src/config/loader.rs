//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Overrides the RPC endpoint.
pub const RPC_URL_ENV_VAR: &str = "RPC_URL";
/// Overrides the contract address.
pub const CONTRACT_ADDRESS_ENV_VAR: &str = "CONTRACT_ADDRESS";
/// Overrides the expected chain ID.
pub const CHAIN_ID_ENV_VAR: &str = "CHAIN_ID";
/// Overrides the registration username.
pub const USERNAME_ENV_VAR: &str = "OTP_USERNAME";
/// Overrides the registration seed.
pub const SEED_ENV_VAR: &str = "OTP_SEED";
/// Overrides the log level.
pub const LOG_LEVEL_ENV_VAR: &str = "LOG_LEVEL";
/// Overrides the log format.
pub const LOG_FORMAT_ENV_VAR: &str = "LOG_FORMAT";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, reason: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, reason } => write!(f, "Invalid {}: {}", var, reason),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load the `.env` file from the working directory, if any.
///
/// Variables already present in the process environment win.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
    }
}

/// Parse a TOML document into a configuration without validating it.
pub fn parse_config(content: &str) -> Result<ClientConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::Parse)
}

/// Apply environment overrides on top of `config`.
///
/// `lookup` abstracts the environment so callers can inject values.
pub fn apply_env_overrides<F>(config: &mut ClientConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(RPC_URL_ENV_VAR) {
        config.blockchain.rpc_url = url;
    }
    if let Some(address) = lookup(CONTRACT_ADDRESS_ENV_VAR) {
        config.contract.address = address;
    }
    if let Some(raw) = lookup(CHAIN_ID_ENV_VAR) {
        let chain_id = raw.trim().parse::<u64>().map_err(|e| ConfigError::Env {
            var: CHAIN_ID_ENV_VAR,
            reason: e.to_string(),
        })?;
        config.blockchain.chain_id = Some(chain_id);
    }
    if let Some(username) = lookup(USERNAME_ENV_VAR) {
        config.registration.username = username;
    }
    if let Some(raw) = lookup(SEED_ENV_VAR) {
        config.registration.seed = raw.trim().parse::<u64>().map_err(|e| ConfigError::Env {
            var: SEED_ENV_VAR,
            reason: e.to_string(),
        })?;
    }
    if let Some(level) = lookup(LOG_LEVEL_ENV_VAR) {
        config.observability.log_level = level;
    }
    if let Some(raw) = lookup(LOG_FORMAT_ENV_VAR) {
        config.observability.log_format = raw
            .parse()
            .map_err(|reason| ConfigError::Env { var: LOG_FORMAT_ENV_VAR, reason })?;
    }
    Ok(())
}

/// Build a configuration from defaults, an optional TOML file and the
/// process environment. The result is not validated yet so that CLI flags
/// can still be layered on top.
pub fn load_unvalidated(path: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            parse_config(&content)?
        }
        None => ClientConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// Load and validate configuration from an optional TOML file plus the
/// environment.
pub fn load_config(path: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    let config = load_unvalidated(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
