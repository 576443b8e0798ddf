//! Hyperliquid Big Blocks toggle.
//!
//! Signs an `evmUserModify` L1 action with the account key and submits it to
//! the exchange endpoint for the network implied by `RPC_URL`. A companion
//! binary reports recent HyperEVM block gas limits.

pub mod app;
pub mod blocks;
pub mod config;
pub mod exchange;
pub mod observability;

pub use app::{AppError, Toggle};
pub use config::Config;
pub use exchange::{ExchangeClient, L1Signer, Network, Outcome, Wallet};
