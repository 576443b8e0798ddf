//! Exchange API client.
//!
//! One POST per call. No retries and no timeout beyond reqwest's defaults;
//! a transport failure is returned to the caller as-is.

use reqwest::header::{HeaderValue, CONTENT_TYPE};

use crate::exchange::types::{ExchangePayload, ExchangeResult, Network, MAINNET_EXCHANGE_URL, TESTNET_EXCHANGE_URL};

/// Exchange endpoint per network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub mainnet: String,
    pub testnet: String,
}

impl Endpoints {
    pub fn for_network(&self, network: Network) -> &str {
        match network {
            Network::Mainnet => &self.mainnet,
            Network::Testnet => &self.testnet,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            mainnet: MAINNET_EXCHANGE_URL.to_string(),
            testnet: TESTNET_EXCHANGE_URL.to_string(),
        }
    }
}

/// Status and body of an exchange response, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP client for the exchange endpoint.
#[derive(Debug, Clone)]
pub struct ExchangeClient {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl ExchangeClient {
    /// Client targeting the public exchange endpoints.
    pub fn new() -> Self {
        Self::with_endpoints(Endpoints::default())
    }

    pub fn with_endpoints(endpoints: Endpoints) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoints,
        }
    }

    /// URL a payload for `network` is posted to.
    pub fn endpoint(&self, network: Network) -> &str {
        self.endpoints.for_network(network)
    }

    /// Post a signed payload and return the raw response.
    pub async fn submit(&self, network: Network, payload: &ExchangePayload) -> ExchangeResult<RawResponse> {
        let url = self.endpoint(network);

        tracing::info!(url = %url, network = %network, nonce = payload.nonce, "Submitting exchange action");

        let res = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(payload)
            .send()
            .await?;

        let status = res.status().as_u16();
        let body = res.text().await?;

        tracing::info!(status = status, bytes = body.len(), "Exchange response received");

        Ok(RawResponse { status, body })
    }
}

impl Default for ExchangeClient {
    fn default() -> Self {
        Self::new()
    }
}
