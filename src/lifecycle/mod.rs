//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Wallet → RPC session → Contract proxy
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → abandon the running command, exit non-zero
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then identity, then the network
//! - Interruption never retries or resumes a sequence

pub mod signals;
pub mod startup;

pub use signals::shutdown_signal;
pub use startup::{Session, StartupError};
