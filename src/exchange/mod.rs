//! Exchange integration subsystem.
//!
//! # Data Flow
//! ```text
//! Config (private key, RPC URL)
//!     → wallet.rs (key loading, address)
//!     → types.rs (network selection, action)
//!     → signing.rs (phantom agent EIP-712 signature)
//!     → client.rs (single POST to the exchange)
//!     → response.rs (success / rejection / malformed)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - The signing network and the endpoint network are the same value

pub mod client;
pub mod response;
pub mod signing;
pub mod types;
pub mod wallet;

pub use client::{Endpoints, ExchangeClient, RawResponse};
pub use response::Outcome;
pub use signing::L1Signer;
pub use types::{Action, ExchangeError, ExchangePayload, ExchangeSignature, Network};
pub use wallet::Wallet;
