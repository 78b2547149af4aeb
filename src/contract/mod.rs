//! Contract proxy subsystem.
//!
//! # Data Flow
//! ```text
//! bindings.rs (sol! interface, three functions)
//!     → proxy.rs (OtpContract: bound address + signing client)
//!     → OtpAuthenticator trait (what the driver calls)
//! ```
//!
//! The OTP algorithm and user registry live in the deployed contract; this
//! module only encodes calls, submits them and waits for confirmation.

pub mod bindings;
pub mod proxy;

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::blockchain::types::{BlockchainResult, TxOutcome};

pub use proxy::OtpContract;

/// Contract function names, used in logs, metrics and errors.
pub const REGISTER_USER: &str = "registerUser";
pub const GENERATE_OTP: &str = "generateOTP";
pub const AUTHENTICATE: &str = "authenticate";

/// An OTP returned by `generateOTP` together with the transaction that
/// committed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedOtp {
    pub value: U256,
    pub tx: TxOutcome,
}

/// Operations exposed by the deployed OTP contract.
#[allow(async_fn_in_trait)]
pub trait OtpAuthenticator {
    /// Account that signs state-changing calls.
    fn account(&self) -> Address;

    /// Register `username` with `seed` and wait for confirmation.
    async fn register_user(&self, username: &str, seed: U256) -> BlockchainResult<TxOutcome>;

    /// Generate an OTP for the signing account and wait for confirmation.
    async fn generate_otp(&self) -> BlockchainResult<GeneratedOtp>;

    /// Ask the contract whether `otp` is valid for `account`. Read-only.
    async fn authenticate(&self, account: Address, otp: U256) -> BlockchainResult<bool>;
}
