//! Session key boundary: credentials issued per Flow invocation.

use async_trait::async_trait;
use ed25519_dalek::{Signer as DalekSigner, SigningKey};
use thiserror::Error;

use stashpay_types::{Address, Network};

/// Errors surfaced by the identity/session provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("no session identity available")]
    IdentityMissing,
    #[error("session expired")]
    SessionExpired,
    #[error("key provider error: {0}")]
    Provider(String),
}

/// Short-lived signing credential scoped to a session and network.
///
/// Deliberately not `Clone`: each Flow invocation requests its own
/// credential and owns it exclusively; credentials are never cached across
/// Flows or persisted.
pub struct Credential {
    key: SigningKey,
    address: Address,
}

impl Credential {
    pub fn from_seed(seed: [u8; 32]) -> Self {
        let key = SigningKey::from_bytes(&seed);
        let address = derive_address(&key);
        Self { key, address }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.key.verifying_key().to_bytes()
    }

    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.key.sign(message).to_bytes()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose key material.
        f.debug_struct("Credential")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Address of the account controlled by an ed25519 key.
pub fn derive_address(key: &SigningKey) -> Address {
    Address::from_key_bytes(&key.verifying_key().to_bytes())
}

/// Identity/session boundary: given a target network, return a signing
/// credential. May fail if the session is expired or absent.
#[async_trait(?Send)]
pub trait KeyProvider {
    async fn credential(&self, network: Network) -> Result<Credential, KeyError>;
}

#[cfg(test)]
mod tests {
    use super::Credential;

    #[test]
    fn address_derivation_is_stable() {
        let a = Credential::from_seed([7u8; 32]);
        let b = Credential::from_seed([7u8; 32]);
        assert_eq!(a.address(), b.address());
        assert!(a.address().as_str().starts_with("0x"));
    }

    #[test]
    fn signature_verifies_against_public_key() {
        use ed25519_dalek::{Signature, Verifier, VerifyingKey};

        let credential = Credential::from_seed([9u8; 32]);
        let message = b"payload";
        let signature = Signature::from_bytes(&credential.sign(message));
        let key = VerifyingKey::from_bytes(&credential.public_key_bytes()).unwrap();
        assert!(key.verify(message, &signature).is_ok());
    }

    #[test]
    fn debug_output_hides_key_material() {
        let credential = Credential::from_seed([1u8; 32]);
        let rendered = format!("{credential:?}");
        assert!(rendered.contains("address"));
        assert!(!rendered.contains("SigningKey"));
    }
}
