//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key, RPC URL)
//!     → wallet.rs (key loading, signing identity)
//!     → client.rs (RPC connection with timeouts)
//!     → transaction.rs (confirmation monitoring)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use transaction::ConfirmationWatcher;
pub use types::{BlockchainConfig, BlockchainError, BlockchainResult, ChainId, TxOutcome};
pub use wallet::Wallet;
