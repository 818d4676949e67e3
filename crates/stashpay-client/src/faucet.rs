//! Faucet funding: ask the test-network faucet to credit an account.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use stashpay_types::Network;

/// Errors surfaced by funding requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FaucetError {
    #[error("no account identity available")]
    IdentityMissing,
    #[error("faucet error: {0}")]
    Faucet(String),
    #[error("faucet unreachable: {0}")]
    Network(String),
}

/// Acknowledgement returned by the faucet. Funds land on-ledger
/// asynchronously, outside this client's visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingReceipt {
    /// Base-unit amounts the faucet reports it is transferring.
    pub transferred_amounts: Vec<u64>,
}

/// Faucet boundary. Implementations must fail with
/// [`FaucetError::IdentityMissing`] on an empty account before performing
/// any network call, and must not retry internally; retry policy is a
/// caller concern.
#[async_trait(?Send)]
pub trait FaucetService {
    async fn request_funding(&self, account: &str) -> Result<FundingReceipt, FaucetError>;
}

#[derive(Debug, Serialize)]
struct FaucetRequestBody<'a> {
    recipient: &'a str,
}

#[derive(Debug, Deserialize)]
struct FaucetResponseBody {
    error: Option<String>,
    #[serde(default)]
    transferred: Vec<TransferredGas>,
}

#[derive(Debug, Deserialize)]
struct TransferredGas {
    amount_base: u64,
}

/// HTTP faucet client keyed by network name.
pub struct HttpFaucet {
    host: String,
    http: reqwest::Client,
}

impl HttpFaucet {
    pub fn new(network: Network) -> Self {
        Self::with_host(network.faucet_host())
    }

    pub fn with_host(host: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            host: host.into(),
            http,
        }
    }

    fn gas_endpoint(&self) -> String {
        format!("{}/gas", self.host)
    }
}

#[async_trait(?Send)]
impl FaucetService for HttpFaucet {
    async fn request_funding(&self, account: &str) -> Result<FundingReceipt, FaucetError> {
        if account.is_empty() {
            return Err(FaucetError::IdentityMissing);
        }

        debug!(account, endpoint = %self.gas_endpoint(), "requesting faucet funding");
        let response = self
            .http
            .post(self.gas_endpoint())
            .json(&FaucetRequestBody { recipient: account })
            .send()
            .await
            .map_err(|err| FaucetError::Network(err.to_string()))?;

        let body: FaucetResponseBody = response
            .json()
            .await
            .map_err(|err| FaucetError::Network(err.to_string()))?;

        if let Some(error) = body.error {
            return Err(FaucetError::Faucet(error));
        }

        Ok(FundingReceipt {
            transferred_amounts: body
                .transferred
                .into_iter()
                .map(|gas| gas.amount_base)
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{FaucetError, FaucetService, HttpFaucet};

    #[tokio::test]
    async fn empty_account_fails_before_any_network_call() {
        // Host is unroutable; an attempted call would fail with Network,
        // not IdentityMissing.
        let faucet = HttpFaucet::with_host("http://127.0.0.1:1");
        let err = faucet.request_funding("").await.unwrap_err();
        assert_eq!(err, FaucetError::IdentityMissing);
    }
}
