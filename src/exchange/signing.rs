//! L1 action signing.
//!
//! An action is bound to a nonce, an optional vault and a network through a
//! "phantom agent": the keccak hash of the msgpack-encoded action is wrapped
//! in an EIP-712 `Agent` struct and the wallet signs that struct's hash.
//!
//! ```text
//! connectionId = keccak256(msgpack(action) || nonce_be64 || vault_flag)
//! digest       = eip712(Agent { source: "a" | "b", connectionId })
//! ```

use alloy::primitives::{keccak256, Address, B256};
use alloy::sol;
use alloy::sol_types::{eip712_domain, Eip712Domain, SolStruct};

use crate::exchange::types::{Action, ExchangeError, ExchangeResult, ExchangeSignature, Network};
use crate::exchange::wallet::Wallet;

/// Chain ID of the EIP-712 domain used for every L1 action.
pub const L1_DOMAIN_CHAIN_ID: u64 = 1337;

sol! {
    /// Phantom agent signed in place of the raw action.
    #[derive(Debug)]
    struct Agent {
        string source;
        bytes32 connectionId;
    }
}

/// Anything that can produce an exchange signature over an L1 action.
pub trait L1Signer {
    /// Address of the signing account.
    fn address(&self) -> Address;

    /// Sign `action` for `network` at `nonce`.
    ///
    /// The returned signature is only valid for this exact action, nonce,
    /// vault and network.
    fn sign_l1_action(
        &self,
        action: &Action,
        vault_address: Option<Address>,
        nonce: u64,
        network: Network,
    ) -> ExchangeResult<ExchangeSignature>;
}

/// EIP-712 domain shared by all L1 actions.
pub fn l1_domain() -> Eip712Domain {
    eip712_domain! {
        name: "Exchange",
        version: "1",
        chain_id: L1_DOMAIN_CHAIN_ID,
        verifying_contract: Address::ZERO,
    }
}

/// Hash of the action, nonce and vault that becomes the agent's connection ID.
pub fn action_hash(action: &Action, vault_address: Option<Address>, nonce: u64) -> ExchangeResult<B256> {
    let mut data = rmp_serde::to_vec_named(action)
        .map_err(|e| ExchangeError::Signing(format!("Failed to encode action: {}", e)))?;
    data.extend_from_slice(&nonce.to_be_bytes());

    match vault_address {
        None => data.push(0x00),
        Some(vault) => {
            data.push(0x01);
            data.extend_from_slice(vault.as_slice());
        }
    }

    Ok(keccak256(&data))
}

/// EIP-712 digest of the phantom agent for `connection_id` on `network`.
pub fn agent_signing_hash(connection_id: B256, network: Network) -> B256 {
    let agent = Agent {
        source: network.source().to_string(),
        connectionId: connection_id,
    };
    agent.eip712_signing_hash(&l1_domain())
}

/// Final EIP-712 digest the wallet signs for an L1 action.
pub fn l1_signing_hash(
    action: &Action,
    vault_address: Option<Address>,
    nonce: u64,
    network: Network,
) -> ExchangeResult<B256> {
    let connection_id = action_hash(action, vault_address, nonce)?;
    Ok(agent_signing_hash(connection_id, network))
}

impl L1Signer for Wallet {
    fn address(&self) -> Address {
        Wallet::address(self)
    }

    fn sign_l1_action(
        &self,
        action: &Action,
        vault_address: Option<Address>,
        nonce: u64,
        network: Network,
    ) -> ExchangeResult<ExchangeSignature> {
        let hash = l1_signing_hash(action, vault_address, nonce, network)?;
        let signature = self.sign_hash(hash)?;

        tracing::debug!(
            network = %network,
            nonce = nonce,
            digest = %hash,
            "L1 action signed"
        );

        Ok(signature.into())
    }
}
