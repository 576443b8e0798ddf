//! Exchange action types and error definitions.

use std::fmt;

use alloy::signers::Signature;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Exchange endpoint on mainnet.
pub const MAINNET_EXCHANGE_URL: &str = "https://api.hyperliquid.xyz/exchange";

/// Exchange endpoint on testnet.
pub const TESTNET_EXCHANGE_URL: &str = "https://api.hyperliquid-testnet.xyz/exchange";

/// Action type tag for account-level HyperEVM settings.
pub const EVM_USER_MODIFY: &str = "evmUserModify";

/// Target network for a signed action.
///
/// The same value selects both the signing source flag and the endpoint,
/// so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// Pick the network from the configured RPC URL.
    ///
    /// Testnet if the URL contains `testnet` in any letter case, mainnet
    /// otherwise (including the empty string). This is a substring check,
    /// not a chain-ID lookup: a mainnet URL with `testnet` anywhere in it is
    /// misclassified.
    pub fn from_rpc_url(rpc_url: &str) -> Self {
        if rpc_url.to_lowercase().contains("testnet") {
            Network::Testnet
        } else {
            Network::Mainnet
        }
    }

    pub fn is_mainnet(self) -> bool {
        matches!(self, Network::Mainnet)
    }

    /// Fixed exchange endpoint for this network.
    pub fn exchange_url(self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_EXCHANGE_URL,
            Network::Testnet => TESTNET_EXCHANGE_URL,
        }
    }

    /// Phantom agent `source` field used in L1 action signing.
    pub fn source(self) -> &'static str {
        match self {
            Network::Mainnet => "a",
            Network::Testnet => "b",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("MAINNET"),
            Network::Testnet => f.write_str("TESTNET"),
        }
    }
}

/// `evmUserModify` action toggling big blocks for the signing account.
///
/// Field order matters: the msgpack encoding hashed during signing must list
/// `type` before `usingBigBlocks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: &'static str,
    pub using_big_blocks: bool,
}

impl Action {
    pub fn evm_user_modify(using_big_blocks: bool) -> Self {
        Self {
            action_type: EVM_USER_MODIFY,
            using_big_blocks,
        }
    }
}

/// Signature in the shape the exchange expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeSignature {
    pub r: String,
    pub s: String,
    pub v: u64,
}

impl From<Signature> for ExchangeSignature {
    fn from(sig: Signature) -> Self {
        Self {
            r: format!("0x{:x}", sig.r()),
            s: format!("0x{:x}", sig.s()),
            v: 27 + u64::from(sig.v()),
        }
    }
}

/// Complete body of an exchange request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangePayload {
    pub action: Action,
    pub nonce: u64,
    pub signature: ExchangeSignature,
}

/// Errors that can occur while signing or submitting an action.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Action hashing or signature generation failed.
    #[error("Signing error: {0}")]
    Signing(String),

    /// The HTTP request did not complete.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Payload could not be rendered as JSON.
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for exchange operations.
pub type ExchangeResult<T> = Result<T, ExchangeError>;
