//! Account wallet backing L1 action signatures.
//!
//! # Security
//! - Private keys arrive through `Config`, never from argv
//! - Keys are never logged or serialized

use alloy::primitives::{Address, B256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::{Signature, SignerSync};

use crate::exchange::types::{ExchangeError, ExchangeResult};

/// Signing wallet for one exchange account.
#[derive(Debug, Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    pub fn from_private_key(private_key_hex: &str) -> ExchangeResult<Self> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| ExchangeError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::info!(address = %signer.address(), "Wallet initialized");

        Ok(Self { signer })
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign a 32-byte prehash without any message prefix.
    pub fn sign_hash(&self, hash: B256) -> ExchangeResult<Signature> {
        self.signer
            .sign_hash_sync(&hash)
            .map_err(|e| ExchangeError::Signing(format!("Signing failed: {}", e)))
    }
}
