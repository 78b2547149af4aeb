//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Remote call (RPC query, contract call, submission):
//!     → timeouts.rs (enforce request deadline)
//!     → On failure: error returned to the driver, which stops the sequence
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - State-changing contract calls are never retried

pub mod timeouts;

pub use timeouts::{with_deadline, with_timeout};
