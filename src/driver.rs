//! Sequential driver: register, generate an OTP, authenticate.
//!
//! Each step waits for the previous one to confirm. The first failure ends
//! the run; nothing is retried.

use alloy::primitives::{Address, U256};
use serde::Serialize;
use thiserror::Error;
use tracing::Instrument;

use crate::blockchain::types::{BlockchainError, TxOutcome};
use crate::config::RegistrationConfig;
use crate::contract::{OtpAuthenticator, AUTHENTICATE, GENERATE_OTP, REGISTER_USER};

/// One step of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Register,
    GenerateOtp,
    Authenticate,
}

impl Step {
    /// Contract function invoked by this step.
    pub fn function(self) -> &'static str {
        match self {
            Step::Register => REGISTER_USER,
            Step::GenerateOtp => GENERATE_OTP,
            Step::Authenticate => AUTHENTICATE,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.function())
    }
}

/// A step failed; the sequence stopped there.
#[derive(Debug, Error)]
#[error("{step} failed: {source}")]
pub struct DriverError {
    pub step: Step,
    #[source]
    pub source: BlockchainError,
}

/// Progress notification emitted after each successful step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepEvent {
    Registered(TxOutcome),
    OtpGenerated(U256),
    Authenticated(bool),
}

impl std::fmt::Display for StepEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepEvent::Registered(_) => write!(f, "User registered"),
            StepEvent::OtpGenerated(otp) => write!(f, "Generated OTP: {}", otp),
            StepEvent::Authenticated(ok) => write!(f, "Is authenticated: {}", ok),
        }
    }
}

/// Result of a complete run.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub account: Address,
    pub username: String,
    pub seed: u64,
    pub registration: TxOutcome,
    /// Decimal rendering of the OTP.
    pub otp: String,
    pub otp_tx: TxOutcome,
    pub authenticated: bool,
}

fn at(step: Step) -> impl FnOnce(BlockchainError) -> DriverError {
    move |source| DriverError { step, source }
}

/// Run the three contract calls in order.
///
/// `observer` sees each step as soon as it completes.
pub async fn run_sequence<A, F>(
    contract: &A,
    registration: &RegistrationConfig,
    mut observer: F,
) -> Result<SessionReport, DriverError>
where
    A: OtpAuthenticator,
    F: FnMut(&StepEvent),
{
    let account = contract.account();
    let span = tracing::info_span!("otp_session", %account, username = %registration.username);

    async {
        let registration_tx = contract
            .register_user(&registration.username, U256::from(registration.seed))
            .await
            .map_err(at(Step::Register))?;
        observer(&StepEvent::Registered(registration_tx.clone()));

        let otp = contract.generate_otp().await.map_err(at(Step::GenerateOtp))?;
        observer(&StepEvent::OtpGenerated(otp.value));

        let authenticated = contract
            .authenticate(account, otp.value)
            .await
            .map_err(at(Step::Authenticate))?;
        observer(&StepEvent::Authenticated(authenticated));

        tracing::info!(authenticated, "Sequence complete");

        Ok::<_, DriverError>(SessionReport {
            account,
            username: registration.username.clone(),
            seed: registration.seed,
            registration: registration_tx,
            otp: otp.value.to_string(),
            otp_tx: otp.tx,
            authenticated,
        })
    }
    .instrument(span)
    .await
}
