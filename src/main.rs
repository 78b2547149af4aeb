//! OTP contract client.
//!
//! # Architecture Overview
//!
//! ```text
//!   .env / environment / config.toml / flags
//!        │
//!        ▼
//!   ┌──────────┐   ┌──────────┐   ┌──────────────┐   ┌──────────────┐
//!   │  config  │──▶│  wallet  │──▶│ RPC client   │──▶│ OtpContract  │
//!   └──────────┘   └──────────┘   └──────────────┘   └──────┬───────┘
//!                                                           │
//!                                                           ▼
//!                                  driver: registerUser → generateOTP → authenticate
//! ```

use std::process::ExitCode;

use alloy::primitives::U256;
use clap::Parser;
use serde::Serialize;

use otp_auth_client::cli::{Cli, Commands};
use otp_auth_client::driver::{run_sequence, StepEvent};
use otp_auth_client::lifecycle::{shutdown_signal, startup, Session};
use otp_auth_client::observability::init_logging;
use otp_auth_client::OtpAuthenticator;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = tokio::select! {
        result = run(cli) => result,
        signal = shutdown_signal() => {
            tracing::warn!(signal, "Interrupted");
            Err(format!("interrupted by {}", signal).into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CommandResult {
    let config = startup::resolve_config(&cli)?;
    init_logging(&config.observability)?;

    tracing::info!("otp-auth-client v{} starting", env!("CARGO_PKG_VERSION"));

    let session = startup::connect(config).await?;
    let json = cli.json;

    match cli.command() {
        Commands::Run(_) => {
            let report = run_sequence(&session.contract, &session.config.registration, |event| {
                if !json {
                    println!("{}", event);
                }
            })
            .await?;
            if json {
                print_json(&report)?;
            }
        }
        Commands::Register(_) => {
            let registration = &session.config.registration;
            let outcome = session
                .contract
                .register_user(&registration.username, U256::from(registration.seed))
                .await?;
            if json {
                print_json(&outcome)?;
            } else {
                println!("{}", StepEvent::Registered(outcome));
            }
        }
        Commands::GenerateOtp => {
            let otp = session.contract.generate_otp().await?;
            if json {
                print_json(&serde_json::json!({
                    "otp": otp.value.to_string(),
                    "tx": otp.tx,
                }))?;
            } else {
                println!("{}", StepEvent::OtpGenerated(otp.value));
            }
        }
        Commands::Authenticate { otp, account } => {
            let account = account.unwrap_or_else(|| session.contract.account());
            let authenticated = session.contract.authenticate(account, otp).await?;
            if json {
                print_json(&serde_json::json!({
                    "account": account,
                    "otp": otp.to_string(),
                    "authenticated": authenticated,
                }))?;
            } else {
                println!("{}", StepEvent::Authenticated(authenticated));
            }
        }
        Commands::Status => status(&session, json).await?,
    }

    Ok(())
}

async fn status(session: &Session, json: bool) -> CommandResult {
    let chain_id = session.client.get_chain_id().await?;
    let block = session.client.get_block_number().await?;
    let account = session.wallet.address();
    let balance = session.client.get_balance(account).await?;

    if json {
        print_json(&serde_json::json!({
            "rpc_url": session.config.blockchain.rpc_url,
            "chain_id": chain_id.0,
            "block_number": block,
            "account": account,
            "balance_wei": balance.to_string(),
            "contract": session.contract.address(),
        }))
    } else {
        println!("RPC endpoint:   {}", session.config.blockchain.rpc_url);
        println!("Chain ID:       {}", chain_id.0);
        println!("Latest block:   {}", block);
        println!("Account:        {}", account);
        println!("Balance (wei):  {}", balance);
        println!("Contract:       {}", session.contract.address());
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
