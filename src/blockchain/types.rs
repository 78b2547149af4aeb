//! Chain-specific types and error definitions.

use alloy::primitives::TxHash;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::config::schema::BlockchainConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction was not confirmed within expected time.
    #[error("Transaction not confirmed with {0} blocks before the deadline")]
    ConfirmationTimeout(u32),

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// Contract call failed before reaching the chain (encoding, simulation,
    /// submission).
    #[error("Contract call {function} failed: {reason}")]
    Contract {
        function: &'static str,
        reason: String,
    },
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Transaction confirmation status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Transaction is pending in mempool.
    Pending,
    /// Transaction has been mined but not enough confirmations.
    Confirming { current: u32, required: u32 },
    /// Transaction is confirmed with required block depth.
    Confirmed { block_number: u64 },
    /// Transaction was mined with a failed status.
    Failed(String),
}

impl ConfirmationStatus {
    /// Classify a mined transaction given the chain head.
    ///
    /// A transaction included in the head block has one confirmation.
    pub fn from_receipt(
        succeeded: bool,
        tx_block: u64,
        head_block: u64,
        required: u32,
    ) -> Self {
        if !succeeded {
            return Self::Failed(format!("status 0 in block {}", tx_block));
        }
        let current = head_block.saturating_sub(tx_block).saturating_add(1);
        let current = u32::try_from(current).unwrap_or(u32::MAX);
        if current >= required {
            Self::Confirmed {
                block_number: tx_block,
            }
        } else {
            Self::Confirming { current, required }
        }
    }
}

/// A confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutcome {
    /// Transaction hash.
    pub tx_hash: TxHash,
    /// Block the transaction was included in.
    pub block_number: u64,
    /// Gas consumed by the transaction.
    pub gas_used: u64,
}
