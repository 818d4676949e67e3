use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Opaque account address. The address format is owned by the external
/// ledger; the only invariant enforced here is non-emptiness.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Result<Self, ValidationError> {
        let addr = addr.into();
        if addr.is_empty() {
            return Err(ValidationError::EmptyAddress);
        }
        Ok(Self(addr))
    }

    /// Canonical 0x-prefixed hex address for raw public key bytes.
    pub fn from_key_bytes(bytes: &[u8; 32]) -> Self {
        Self(format!("0x{}", hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Transaction digest as reported by the ledger.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest(String);

impl Digest {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.0)
    }
}

/// Target network. Owns the derivation of the faucet host and the
/// block-explorer URL for a given digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Testnet,
    Devnet,
    Localnet,
}

impl Network {
    pub fn name(&self) -> &'static str {
        match self {
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
            Network::Localnet => "localnet",
        }
    }

    pub fn faucet_host(&self) -> String {
        match self {
            Network::Localnet => "http://127.0.0.1:9123".to_string(),
            _ => format!("https://faucet.{}.stash.network", self.name()),
        }
    }

    pub fn explorer_tx_url(&self, digest: &Digest) -> String {
        format!("https://scan.stash.network/{}/tx/{}", self.name(), digest)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::{Address, Digest, Network};
    use crate::error::ValidationError;

    #[test]
    fn rejects_empty_address() {
        assert_eq!(Address::new(""), Err(ValidationError::EmptyAddress));
        assert!(Address::new("0xabc").is_ok());
    }

    #[test]
    fn explorer_url_embeds_network_and_digest() {
        let url = Network::Testnet.explorer_tx_url(&Digest::new("TX1"));
        assert_eq!(url, "https://scan.stash.network/testnet/tx/TX1");
    }

    #[test]
    fn faucet_host_per_network() {
        assert_eq!(
            Network::Testnet.faucet_host(),
            "https://faucet.testnet.stash.network"
        );
        assert_eq!(Network::Localnet.faucet_host(), "http://127.0.0.1:9123");
    }
}
