//! Contract proxy bound to a deployed address and a signing client.

use std::future::IntoFuture;
use std::time::Instant;

use alloy::network::Ethereum;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::transaction::ConfirmationWatcher;
use crate::blockchain::types::{BlockchainError, BlockchainResult, TxOutcome};
use crate::contract::bindings::IOtpAuthenticator::{self, IOtpAuthenticatorInstance};
use crate::contract::{GeneratedOtp, OtpAuthenticator, AUTHENTICATE, GENERATE_OTP, REGISTER_USER};
use crate::observability::metrics;
use crate::resilience::with_deadline;

fn contract_error(function: &'static str, e: alloy::contract::Error) -> BlockchainError {
    BlockchainError::Contract {
        function,
        reason: e.to_string(),
    }
}

/// Callable stubs for the deployed OTP contract.
#[derive(Clone)]
pub struct OtpContract {
    instance: IOtpAuthenticatorInstance<DynProvider>,
    client: BlockchainClient,
    watcher: ConfirmationWatcher,
}

impl OtpContract {
    /// Bind `address` to the client's provider.
    pub fn new(client: BlockchainClient, address: Address) -> Self {
        let instance = IOtpAuthenticator::new(address, client.provider().clone());
        let watcher = ConfirmationWatcher::new(client.clone());
        tracing::debug!(contract = %address, "Contract proxy bound");
        Self {
            instance,
            client,
            watcher,
        }
    }

    /// Address of the bound contract.
    pub fn address(&self) -> Address {
        *self.instance.address()
    }

    /// Submit a transaction and wait for it to confirm.
    async fn submit<F>(&self, function: &'static str, send: F) -> BlockchainResult<TxOutcome>
    where
        F: IntoFuture<Output = Result<PendingTransactionBuilder<Ethereum>, alloy::contract::Error>>,
    {
        let started = Instant::now();
        let result = async {
            let pending = with_deadline("eth_sendRawTransaction", self.client.request_timeout(), send)
                .await?
                .map_err(|e| contract_error(function, e))?;
            let tx_hash = *pending.tx_hash();
            tracing::info!(function, tx_hash = %tx_hash, "Transaction submitted");
            self.watcher.wait_for_confirmation(tx_hash).await
        }
        .await;

        metrics::record_contract_call(function, result.is_ok(), started.elapsed());
        result
    }
}

impl OtpAuthenticator for OtpContract {
    fn account(&self) -> Address {
        self.client.account()
    }

    async fn register_user(&self, username: &str, seed: U256) -> BlockchainResult<TxOutcome> {
        tracing::info!(username, %seed, "Registering user");
        let call = self
            .instance
            .registerUser(username.to_string(), seed)
            .from(self.account());
        self.submit(REGISTER_USER, call.send()).await
    }

    /// The value is read by simulating the call from the signing account
    /// against the latest state, then the transaction is sent so the
    /// contract records the OTP.
    async fn generate_otp(&self) -> BlockchainResult<GeneratedOtp> {
        let started = Instant::now();
        let call = self.instance.generateOTP().from(self.account());

        let simulated = with_deadline("eth_call", self.client.request_timeout(), call.call())
            .await
            .and_then(|r| r.map_err(|e| contract_error(GENERATE_OTP, e)));
        let value = match simulated {
            Ok(value) => value,
            Err(e) => {
                metrics::record_contract_call(GENERATE_OTP, false, started.elapsed());
                return Err(e);
            }
        };
        tracing::debug!(otp = %value, "Simulated generateOTP");

        let tx = self.submit(GENERATE_OTP, call.send()).await?;
        Ok(GeneratedOtp { value, tx })
    }

    async fn authenticate(&self, account: Address, otp: U256) -> BlockchainResult<bool> {
        let started = Instant::now();
        let call = self.instance.authenticate(account, otp).from(self.account());
        let result = with_deadline("eth_call", self.client.request_timeout(), call.call())
            .await
            .and_then(|r| r.map_err(|e| contract_error(AUTHENTICATE, e)));

        metrics::record_contract_call(AUTHENTICATE, result.is_ok(), started.elapsed());
        let authenticated = result?;
        tracing::info!(%account, authenticated, "Authentication checked");
        Ok(authenticated)
    }
}

impl std::fmt::Debug for OtpContract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpContract")
            .field("address", &self.address())
            .field("client", &self.client)
            .finish()
    }
}
