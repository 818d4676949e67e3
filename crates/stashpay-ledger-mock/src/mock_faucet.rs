//! Scripted faucet and key-provider doubles.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use stashpay_client::{
    Credential, FaucetError, FaucetService, FundingReceipt, KeyError, KeyProvider,
};
use stashpay_types::Network;

const DEFAULT_FUNDING_BASE: u64 = 10_000_000_000;

/// In-memory faucet with an optional scripted error and a call counter.
#[derive(Clone)]
pub struct MockFaucet {
    error: Option<String>,
    calls: Arc<Mutex<u32>>,
}

impl MockFaucet {
    pub fn new() -> Self {
        Self {
            error: None,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Make every funding request report this faucet-side error.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn call_count(&self) -> u32 {
        *self.calls.lock().expect("call counter poisoned")
    }
}

impl Default for MockFaucet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl FaucetService for MockFaucet {
    async fn request_funding(&self, account: &str) -> Result<FundingReceipt, FaucetError> {
        if account.is_empty() {
            return Err(FaucetError::IdentityMissing);
        }
        *self.calls.lock().expect("call counter poisoned") += 1;

        if let Some(error) = &self.error {
            return Err(FaucetError::Faucet(error.clone()));
        }
        Ok(FundingReceipt {
            transferred_amounts: vec![DEFAULT_FUNDING_BASE],
        })
    }
}

/// Key provider double: hands out credentials derived from a fixed seed,
/// or fails with a scripted session error.
#[derive(Clone)]
pub struct MockKeyProvider {
    seed: [u8; 32],
    error: Option<KeyError>,
    calls: Arc<Mutex<u32>>,
}

impl MockKeyProvider {
    pub fn new(seed: [u8; 32]) -> Self {
        Self {
            seed,
            error: None,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn failing(error: KeyError) -> Self {
        Self {
            seed: [0u8; 32],
            error: Some(error),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> u32 {
        *self.calls.lock().expect("call counter poisoned")
    }

    /// Address of the account every issued credential controls.
    pub fn account_address(&self) -> stashpay_types::Address {
        Credential::from_seed(self.seed).address().clone()
    }
}

#[async_trait(?Send)]
impl KeyProvider for MockKeyProvider {
    async fn credential(&self, _network: Network) -> Result<Credential, KeyError> {
        *self.calls.lock().expect("call counter poisoned") += 1;
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        Ok(Credential::from_seed(self.seed))
    }
}

#[cfg(test)]
mod tests {
    use super::{MockFaucet, MockKeyProvider};
    use stashpay_client::{FaucetError, FaucetService, KeyError, KeyProvider};
    use stashpay_types::Network;

    #[tokio::test]
    async fn faucet_error_carries_exact_message() {
        let faucet = MockFaucet::new().with_error("rate limited");
        let err = faucet.request_funding("0xabc").await.unwrap_err();
        assert_eq!(err, FaucetError::Faucet("rate limited".to_string()));
        assert_eq!(faucet.call_count(), 1);
    }

    #[tokio::test]
    async fn empty_account_never_counts_as_a_call() {
        let faucet = MockFaucet::new();
        let err = faucet.request_funding("").await.unwrap_err();
        assert_eq!(err, FaucetError::IdentityMissing);
        assert_eq!(faucet.call_count(), 0);
    }

    #[tokio::test]
    async fn key_provider_issues_stable_credentials() {
        let keys = MockKeyProvider::new([7u8; 32]);
        let credential = keys.credential(Network::Testnet).await.unwrap();
        assert_eq!(credential.address(), &keys.account_address());
        assert_eq!(keys.call_count(), 1);
    }

    #[tokio::test]
    async fn failing_provider_reports_session_error() {
        let keys = MockKeyProvider::failing(KeyError::SessionExpired);
        let err = keys.credential(Network::Testnet).await.unwrap_err();
        assert_eq!(err, KeyError::SessionExpired);
    }
}
