//! Shared utilities for integration tests: a scriptable JSON-RPC node.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use otp_auth_client::blockchain::Wallet;
use otp_auth_client::ClientConfig;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Anvil's first dev account.
pub const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub const CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

/// A JSON-RPC error: `(code, message)`.
pub type RpcFailure = (i64, String);

type Handler = dyn Fn(&str, &Value) -> Result<Value, RpcFailure> + Send + Sync;

struct NodeState {
    handler: Box<Handler>,
    delay: Duration,
    requests: Mutex<Vec<Value>>,
}

/// Handle to a running mock node.
pub struct MockNode {
    pub url: String,
    state: Arc<NodeState>,
}

impl MockNode {
    /// All requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<Value> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Names of the methods called so far.
    pub fn methods(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|r| r["method"].as_str().map(str::to_string))
            .collect()
    }
}

/// Answers for the requests a signing provider makes on its own.
#[allow(dead_code)]
pub fn default_response(method: &str) -> Result<Value, RpcFailure> {
    match method {
        "eth_chainId" => Ok(json!("0x7a69")),
        "eth_blockNumber" => Ok(json!("0x10")),
        "eth_getTransactionCount" => Ok(json!("0x0")),
        "eth_gasPrice" | "eth_maxPriorityFeePerGas" => Ok(json!("0x3b9aca00")),
        "eth_estimateGas" => Ok(json!("0x186a0")),
        "eth_feeHistory" => Ok(json!({
            "oldestBlock": "0xf",
            "baseFeePerGas": ["0x3b9aca00", "0x3b9aca00"],
            "gasUsedRatio": [0.5],
            "reward": [["0x3b9aca00"]]
        })),
        other => Err((-32601, format!("method {} not supported by mock", other))),
    }
}

/// Start a mock node on an ephemeral port.
pub async fn start_mock_node<F>(handler: F) -> MockNode
where
    F: Fn(&str, &Value) -> Result<Value, RpcFailure> + Send + Sync + 'static,
{
    start_slow_mock_node(Duration::ZERO, handler).await
}

/// Start a mock node that waits `delay` before answering each request.
pub async fn start_slow_mock_node<F>(delay: Duration, handler: F) -> MockNode
where
    F: Fn(&str, &Value) -> Result<Value, RpcFailure> + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let state = Arc::new(NodeState {
        handler: Box::new(handler),
        delay,
        requests: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/", post(rpc))
        .with_state(state.clone());

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockNode {
        url: format!("http://{}", addr),
        state,
    }
}

fn answer(state: &NodeState, request: &Value) -> Value {
    state.requests.lock().unwrap().push(request.clone());
    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default();
    let params = &request["params"];

    match (state.handler)(method, params) {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Err((code, message)) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": code, "message": message }
        }),
    }
}

async fn rpc(State(state): State<Arc<NodeState>>, Json(body): Json<Value>) -> Json<Value> {
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    let response = match &body {
        Value::Array(batch) => Value::Array(batch.iter().map(|r| answer(&state, r)).collect()),
        single => answer(&state, single),
    };
    Json(response)
}

/// A URL nothing is listening on.
#[allow(dead_code)]
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// Configuration pointing at `rpc_url` with short deadlines.
pub fn test_config(rpc_url: &str) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.blockchain.rpc_url = rpc_url.to_string();
    config.blockchain.rpc_timeout_secs = 2;
    config.blockchain.confirmation_timeout_secs = 5;
    config.blockchain.poll_interval_ms = 50;
    config.contract.address = CONTRACT_ADDRESS.to_string();
    config
}

pub fn test_wallet() -> Wallet {
    Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap()
}
