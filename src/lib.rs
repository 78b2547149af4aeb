//! Client for a deployed OTP authenticator contract.
//!
//! Connects to a JSON-RPC node, signs with a key taken from the
//! environment, and drives `registerUser` → `generateOTP` → `authenticate`.

pub mod blockchain;
pub mod cli;
pub mod config;
pub mod contract;
pub mod driver;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::ClientConfig;
pub use contract::{OtpAuthenticator, OtpContract};
pub use driver::{run_sequence, DriverError, SessionReport};
