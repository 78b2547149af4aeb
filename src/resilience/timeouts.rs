//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap every remote call with a deadline
//! - Cancel operations cleanly on timeout
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors
//! - No retries: the first failure is returned to the caller

use std::future::IntoFuture;
use std::time::Duration;

use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::observability::metrics;

/// Run a fallible remote operation under `limit`.
///
/// Only the elapsed deadline is turned into [`BlockchainError::Timeout`]; the
/// operation's own error is handed back untouched so the caller can classify
/// it.
pub async fn with_deadline<T, E, F>(
    method: &'static str,
    limit: Duration,
    fut: F,
) -> BlockchainResult<Result<T, E>>
where
    F: IntoFuture<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    match timeout(limit, fut).await {
        Ok(Ok(value)) => {
            metrics::record_rpc_call(method, metrics::Outcome::Ok);
            Ok(Ok(value))
        }
        Ok(Err(e)) => {
            metrics::record_rpc_call(method, metrics::Outcome::Error);
            tracing::warn!(method, error = %e, "RPC error");
            Ok(Err(e))
        }
        Err(_) => {
            metrics::record_rpc_call(method, metrics::Outcome::Timeout);
            tracing::warn!(method, timeout_secs = limit.as_secs(), "RPC timeout");
            Err(BlockchainError::Timeout(limit.as_secs()))
        }
    }
}

/// Run an RPC request under `limit`, mapping both its error and an elapsed
/// deadline into [`BlockchainError`].
pub async fn with_timeout<T, E, F>(
    method: &'static str,
    limit: Duration,
    fut: F,
) -> BlockchainResult<T>
where
    F: IntoFuture<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    with_deadline(method, limit, fut)
        .await?
        .map_err(|e| BlockchainError::Rpc(format!("{}: {}", method, e)))
}
