//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint with the signing wallet attached
//! - Verify the chain ID when one is configured
//! - Query chain state (chain ID, block number, balances, receipts)
//! - Bound every request with the configured timeout

use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionReceipt;
use std::time::Duration;

use crate::blockchain::types::{BlockchainConfig, BlockchainError, BlockchainResult, ChainId};
use crate::blockchain::wallet::Wallet;
use crate::resilience::with_timeout;

/// JSON-RPC session bound to one node and one signing account.
#[derive(Clone)]
pub struct BlockchainClient {
    /// Provider with nonce, gas, chain-id and signing fillers.
    provider: DynProvider,
    /// Account that signs outgoing transactions.
    account: Address,
    /// Configuration.
    config: BlockchainConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Open a client session.
    ///
    /// # Arguments
    /// * `config` - Blockchain configuration
    /// * `wallet` - Identity used to sign transactions
    ///
    /// # Returns
    /// A new client, or an error if the URL is invalid or the configured
    /// chain ID does not match the node
    pub async fn connect(config: BlockchainConfig, wallet: &Wallet) -> BlockchainResult<Self> {
        let rpc_url: url::Url = config.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;

        let provider = ProviderBuilder::new()
            .wallet(wallet.ethereum_wallet())
            .connect_http(rpc_url)
            .erased();

        let client = Self {
            provider,
            account: wallet.address(),
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
            config,
        };

        if let Some(expected) = client.config.chain_id {
            client.verify_chain_id(expected).await?;
        }

        tracing::info!(
            rpc_url = %client.config.rpc_url,
            chain_id = ?client.config.chain_id,
            account = %client.account,
            "Blockchain client initialized"
        );

        Ok(client)
    }

    /// Verify the connected chain ID matches `expected`.
    pub async fn verify_chain_id(&self, expected: u64) -> BlockchainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != expected {
            return Err(BlockchainError::ChainMismatch {
                expected,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        with_timeout("eth_chainId", self.timeout_duration, self.provider.get_chain_id())
            .await
            .map(ChainId)
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> BlockchainResult<u64> {
        with_timeout(
            "eth_blockNumber",
            self.timeout_duration,
            self.provider.get_block_number(),
        )
        .await
    }

    /// Get the balance of an address.
    pub async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        with_timeout(
            "eth_getBalance",
            self.timeout_duration,
            self.provider.get_balance(address),
        )
        .await
    }

    /// Get a transaction receipt by hash.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> BlockchainResult<Option<TransactionReceipt>> {
        with_timeout(
            "eth_getTransactionReceipt",
            self.timeout_duration,
            self.provider.get_transaction_receipt(tx_hash),
        )
        .await
    }

    /// Check if the node is reachable.
    ///
    /// Returns true if we can query the block number.
    pub async fn is_healthy(&self) -> bool {
        self.get_block_number().await.is_ok()
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Account that signs transactions sent through this client.
    pub fn account(&self) -> Address {
        self.account
    }

    /// Get the configuration.
    pub fn config(&self) -> &BlockchainConfig {
        &self.config
    }

    /// Per-request deadline.
    pub fn request_timeout(&self) -> Duration {
        self.timeout_duration
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("account", &self.account)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
