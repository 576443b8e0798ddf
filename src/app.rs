//! Big blocks toggle pipeline.
//!
//! ```text
//! Config → Wallet → Action → nonce → Network → signature → POST → Outcome
//! ```
//!
//! Progress and the final report go to the supplied writer; structured
//! events go through `tracing`.

use std::io::Write;
use std::time::{SystemTime, SystemTimeError, UNIX_EPOCH};

use thiserror::Error;

use crate::config::{mask_secret, Config, ConfigError};
use crate::exchange::{Action, ExchangeClient, ExchangeError, ExchangePayload, L1Signer, Network, Outcome, Wallet};

/// Fatal errors: anything here aborts the run with a non-zero exit.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// The system clock reads earlier than the Unix epoch, so no valid nonce exists.
    #[error("System clock is before the Unix epoch: {0}")]
    Clock(#[from] SystemTimeError),
}

/// A signed toggle ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    pub network: Network,
    pub payload: ExchangePayload,
}

/// Parse the CLI flag: `true` or `false`, any letter case.
pub fn parse_bool_flag(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(format!("invalid value '{}' (expected 'true' or 'false')", value)),
    }
}

/// Milliseconds from the Unix epoch to `time`.
pub fn millis_since_epoch(time: SystemTime) -> Result<u64, AppError> {
    let elapsed = time.duration_since(UNIX_EPOCH)?;
    Ok(elapsed.as_millis() as u64)
}

/// Current time in milliseconds since the Unix epoch.
pub fn timestamp_ms() -> Result<u64, AppError> {
    millis_since_epoch(SystemTime::now())
}

/// Build and sign the toggle action.
///
/// `nonce` is signed over and placed in the payload unchanged.
pub fn prepare<S: L1Signer>(
    signer: &S,
    network: Network,
    using_big_blocks: bool,
    nonce: u64,
) -> Result<Toggle, ExchangeError> {
    let action = Action::evm_user_modify(using_big_blocks);
    let signature = signer.sign_l1_action(&action, None, nonce, network)?;

    Ok(Toggle {
        network,
        payload: ExchangePayload {
            action,
            nonce,
            signature,
        },
    })
}

/// Sign with the configured private key and submit.
pub async fn toggle_big_blocks<W: Write>(
    config: &Config,
    client: &ExchangeClient,
    using_big_blocks: bool,
    out: &mut W,
) -> Result<Outcome, AppError> {
    writeln!(out, "Using private key: {}", mask_secret(&config.private_key))?;
    let wallet = Wallet::from_private_key(&config.private_key)?;
    run(config, &wallet, client, using_big_blocks, out).await
}

/// Run the toggle with an explicit signer.
///
/// Remote rejections come back as [`Outcome`] values; only configuration,
/// signing and transport failures are errors.
pub async fn run<S: L1Signer, W: Write>(
    config: &Config,
    signer: &S,
    client: &ExchangeClient,
    using_big_blocks: bool,
    out: &mut W,
) -> Result<Outcome, AppError> {
    writeln!(out, "Wallet address: {}", signer.address())?;
    writeln!(out, "Setting value: usingBigBlocks={}", using_big_blocks)?;

    let network = Network::from_rpc_url(&config.rpc_url);
    writeln!(out, "Network: {}", network)?;

    let nonce = timestamp_ms()?;
    let toggle = prepare(signer, network, using_big_blocks, nonce)?;
    writeln!(out, "Timestamp: {}", nonce)?;
    writeln!(
        out,
        "Payload: {}",
        serde_json::to_string(&toggle.payload).map_err(ExchangeError::from)?
    )?;

    writeln!(out, "API URL: {}", client.endpoint(network))?;
    writeln!(out, "Sending request...")?;

    let response = client.submit(toggle.network, &toggle.payload).await?;
    writeln!(out, "Status code: {}", response.status)?;

    let outcome = Outcome::interpret(using_big_blocks, response.status, &response.body);
    if !matches!(outcome, Outcome::Malformed { .. }) {
        writeln!(out, "Response: {}", response.body)?;
    }

    writeln!(out)?;
    for line in outcome.report() {
        writeln!(out, "{}", line)?;
    }

    if outcome.is_success() {
        tracing::info!(using_big_blocks = using_big_blocks, network = %network, "Big blocks mode updated");
    } else {
        tracing::warn!(status = response.status, network = %network, "Exchange did not accept the action");
    }

    Ok(outcome)
}
