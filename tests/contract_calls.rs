//! Contract proxy against a mock JSON-RPC node.

use alloy::primitives::{Address, U256};
use alloy::sol_types::SolCall;
use otp_auth_client::blockchain::BlockchainError;
use otp_auth_client::contract::bindings::IOtpAuthenticator;
use otp_auth_client::lifecycle::startup::{connect_with_wallet, StartupError};
use otp_auth_client::OtpAuthenticator;
use serde_json::{json, Value};

mod common;

fn abi_bool(value: bool) -> Value {
    json!(format!("0x{:064x}", value as u8))
}

/// Pull calldata out of an eth_call transaction object.
fn calldata(tx: &Value) -> String {
    tx.get("input")
        .or_else(|| tx.get("data"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_lowercase()
}

#[tokio::test]
async fn test_authenticate_issues_eth_call_with_encoded_arguments() {
    let node = common::start_mock_node(|method, _| match method {
        "eth_call" => Ok(abi_bool(true)),
        other => common::default_response(other),
    })
    .await;

    let mut config = common::test_config(&node.url);
    config.blockchain.chain_id = Some(31337);
    let session = connect_with_wallet(config, common::test_wallet()).await.unwrap();

    let account = session.wallet.address();
    let otp = U256::from(318_007u64);
    let authenticated = session.contract.authenticate(account, otp).await.unwrap();
    assert!(authenticated);

    let calls: Vec<Value> = node
        .requests()
        .into_iter()
        .filter(|r| r["method"] == "eth_call")
        .collect();
    assert_eq!(calls.len(), 1);

    let tx = &calls[0]["params"][0];
    assert_eq!(
        tx["to"].as_str().unwrap().to_lowercase(),
        common::CONTRACT_ADDRESS.to_lowercase()
    );
    assert_eq!(
        tx["from"].as_str().unwrap().to_lowercase(),
        format!("{:#x}", account)
    );

    let expected = IOtpAuthenticator::authenticateCall {
        publicKey: account,
        otp,
    }
    .abi_encode();
    assert_eq!(calldata(tx), alloy::hex::encode_prefixed(expected));
}

#[tokio::test]
async fn test_authenticate_false() {
    let node = common::start_mock_node(|method, _| match method {
        "eth_call" => Ok(abi_bool(false)),
        other => common::default_response(other),
    })
    .await;

    let session = connect_with_wallet(common::test_config(&node.url), common::test_wallet())
        .await
        .unwrap();

    let authenticated = session
        .contract
        .authenticate(Address::repeat_byte(0x42), U256::from(1u64))
        .await
        .unwrap();
    assert!(!authenticated);
}

#[tokio::test]
async fn test_revert_reason_surfaces() {
    let node = common::start_mock_node(|method, _| match method {
        "eth_call" => Err((3, "execution reverted: unknown user".to_string())),
        other => common::default_response(other),
    })
    .await;

    let session = connect_with_wallet(common::test_config(&node.url), common::test_wallet())
        .await
        .unwrap();

    let err = session
        .contract
        .authenticate(session.wallet.address(), U256::from(5u64))
        .await
        .unwrap_err();

    match err {
        BlockchainError::Contract { function, reason } => {
            assert_eq!(function, "authenticate");
            assert!(reason.contains("unknown user"), "reason: {}", reason);
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_chain_id_mismatch_is_fatal() {
    let node = common::start_mock_node(|method, _| match method {
        "eth_chainId" => Ok(json!("0x1")),
        other => common::default_response(other),
    })
    .await;

    let mut config = common::test_config(&node.url);
    config.blockchain.chain_id = Some(31337);

    let err = connect_with_wallet(config, common::test_wallet())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StartupError::Blockchain(BlockchainError::ChainMismatch {
            expected: 31337,
            actual: 1
        })
    ));
}

#[tokio::test]
async fn test_status_queries() {
    let node = common::start_mock_node(|method, _| match method {
        "eth_getBalance" => Ok(json!("0xde0b6b3a7640000")),
        other => common::default_response(other),
    })
    .await;

    let session = connect_with_wallet(common::test_config(&node.url), common::test_wallet())
        .await
        .unwrap();

    assert_eq!(session.client.get_chain_id().await.unwrap().0, 31337);
    assert_eq!(session.client.get_block_number().await.unwrap(), 16);
    assert_eq!(
        session
            .client
            .get_balance(session.wallet.address())
            .await
            .unwrap(),
        U256::from(1_000_000_000_000_000_000u64)
    );
    assert!(session.client.is_healthy().await);
}
