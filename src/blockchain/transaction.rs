//! Confirmation monitoring for submitted transactions.
//!
//! # Responsibilities
//! - Poll receipts until the required confirmation depth is reached
//! - Surface reverted transactions as errors
//! - Bound the wait with the configured confirmation timeout

use alloy::primitives::TxHash;
use std::time::Duration;
use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ConfirmationStatus, TxOutcome};

/// Waits for submitted transactions to reach the configured depth.
#[derive(Debug, Clone)]
pub struct ConfirmationWatcher {
    client: BlockchainClient,
    required: u32,
    deadline: Duration,
    poll_interval: Duration,
}

impl ConfirmationWatcher {
    /// Create a watcher using the client's confirmation settings.
    pub fn new(client: BlockchainClient) -> Self {
        let config = client.config();
        let required = config.confirmation_blocks.max(1);
        let deadline = Duration::from_secs(config.confirmation_timeout_secs);
        let poll_interval = Duration::from_millis(config.poll_interval_ms);
        Self {
            client,
            required,
            deadline,
            poll_interval,
        }
    }

    /// Number of confirmations required.
    pub fn required_confirmations(&self) -> u32 {
        self.required
    }

    /// Wait for a transaction to be confirmed.
    ///
    /// # Arguments
    /// * `tx_hash` - Transaction hash to monitor
    pub async fn wait_for_confirmation(&self, tx_hash: TxHash) -> BlockchainResult<TxOutcome> {
        let result = timeout(self.deadline, async {
            let mut ticker = interval(self.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last_status = ConfirmationStatus::Pending;

            loop {
                ticker.tick().await;

                let receipt = match self.client.get_transaction_receipt(tx_hash).await? {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                let head = self.client.get_block_number().await?;
                let tx_block = receipt.block_number.unwrap_or(head);
                let status =
                    ConfirmationStatus::from_receipt(receipt.status(), tx_block, head, self.required);

                match &status {
                    &ConfirmationStatus::Confirmed { block_number } => {
                        tracing::info!(
                            tx_hash = %tx_hash,
                            block_number,
                            gas_used = receipt.gas_used,
                            "Transaction confirmed"
                        );
                        return Ok(TxOutcome {
                            tx_hash,
                            block_number,
                            gas_used: receipt.gas_used,
                        });
                    }
                    ConfirmationStatus::Failed(reason) => {
                        tracing::warn!(tx_hash = %tx_hash, %reason, "Transaction reverted");
                        return Err(BlockchainError::Reverted(format!("{}: {}", tx_hash, reason)));
                    }
                    &ConfirmationStatus::Confirming { current, required } => {
                        if last_status != status {
                            tracing::debug!(
                                tx_hash = %tx_hash,
                                confirmations = current,
                                required,
                                "Waiting for confirmations"
                            );
                        }
                    }
                    ConfirmationStatus::Pending => {}
                }
                last_status = status;
            }
        })
        .await;

        match result {
            Ok(outcome) => outcome,
            Err(_) => Err(BlockchainError::ConfirmationTimeout(self.required)),
        }
    }
}
