//! Claimable links: stage a send transaction a third party can later claim
//! through a shareable URL.

use ed25519_dalek::SigningKey;
use rand::RngCore;
use tracing::debug;

use stashpay_types::{Address, Network, ObjectRef, TypeTag};

use crate::keys::derive_address;
use crate::tx_builder::TransactionBuilder;

/// Builder for one claimable link.
///
/// Each instantiation draws a fresh 32-byte secret; the claim address is
/// the account controlled by that secret, and the link embeds the secret as
/// its claim token. Given the same inputs the staged transaction and link
/// are deterministic.
pub struct ClaimableLinkBuilder {
    sender: Address,
    network: Network,
    secret: [u8; 32],
    claim_address: Address,
    object_ref: Option<ObjectRef>,
    type_tag: Option<TypeTag>,
}

impl ClaimableLinkBuilder {
    pub fn new(sender: Address, network: Network) -> Self {
        let mut secret = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut secret);
        Self::from_secret(sender, network, secret)
    }

    /// Deterministic constructor for callers that manage the secret
    /// themselves (and for tests).
    pub fn from_secret(sender: Address, network: Network, secret: [u8; 32]) -> Self {
        let claim_address = derive_address(&SigningKey::from_bytes(&secret));
        Self {
            sender,
            network,
            secret,
            claim_address,
            object_ref: None,
            type_tag: None,
        }
    }

    /// Attach the object the link's claimer will receive.
    ///
    /// Extension point: no current flow supplies a concrete reference, so
    /// the staged operation may carry none; where the reference originates
    /// is owned by the caller.
    pub fn add_claimable_object_ref(&mut self, object_ref: ObjectRef, type_tag: TypeTag) {
        self.object_ref = Some(object_ref);
        self.type_tag = Some(type_tag);
    }

    /// Append the link-creation operation to `builder`.
    pub fn create_send_transaction(&self, builder: &mut TransactionBuilder) {
        builder.create_claimable_link(
            self.claim_address.clone(),
            self.object_ref.clone(),
            self.type_tag.clone(),
        );
        debug!(link = %self.link(), "staged claimable-link send");
    }

    pub fn sender(&self) -> &Address {
        &self.sender
    }

    /// Address the staged send targets; a claimer proves control of it
    /// with the link token.
    pub fn claim_address(&self) -> &Address {
        &self.claim_address
    }

    /// Shareable claim URL. Embeds the secret token; valid for a third
    /// party once the staged transaction has executed successfully.
    pub fn link(&self) -> String {
        format!(
            "https://claim.stash.network/{}#{}",
            self.network.name(),
            hex::encode(self.secret)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::ClaimableLinkBuilder;
    use crate::tx_builder::TransactionBuilder;
    use stashpay_types::{Address, Network, ObjectRef, Operation};

    fn sender() -> Address {
        Address::new("0xsender").unwrap()
    }

    #[test]
    fn fresh_secret_per_instantiation() {
        let a = ClaimableLinkBuilder::new(sender(), Network::Testnet);
        let b = ClaimableLinkBuilder::new(sender(), Network::Testnet);
        assert_ne!(a.link(), b.link());
        assert_ne!(a.claim_address(), b.claim_address());
    }

    #[test]
    fn link_is_deterministic_for_the_same_secret() {
        let a = ClaimableLinkBuilder::from_secret(sender(), Network::Testnet, [3u8; 32]);
        let b = ClaimableLinkBuilder::from_secret(sender(), Network::Testnet, [3u8; 32]);
        assert_eq!(a.link(), b.link());
        assert_eq!(a.claim_address(), b.claim_address());
        assert!(a.link().starts_with("https://claim.stash.network/testnet#"));
    }

    #[test]
    fn stages_link_operation_with_optional_object_ref() {
        let mut link = ClaimableLinkBuilder::from_secret(sender(), Network::Testnet, [5u8; 32]);
        link.add_claimable_object_ref(
            ObjectRef {
                id: "0xobject".to_string(),
                version: 7,
            },
            "0x2::vote::Badge".to_string(),
        );

        let mut builder = TransactionBuilder::new(sender());
        link.create_send_transaction(&mut builder);
        let tx = builder.build().unwrap();

        match &tx.operations[0] {
            Operation::CreateClaimableLink {
                claim_address,
                object_ref,
                type_tag,
            } => {
                assert_eq!(claim_address, link.claim_address());
                assert_eq!(object_ref.as_ref().unwrap().id, "0xobject");
                assert_eq!(type_tag.as_deref(), Some("0x2::vote::Badge"));
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[test]
    fn staged_operation_omits_object_ref_when_unattached() {
        let link = ClaimableLinkBuilder::from_secret(sender(), Network::Testnet, [6u8; 32]);
        let mut builder = TransactionBuilder::new(sender());
        link.create_send_transaction(&mut builder);
        let tx = builder.build().unwrap();
        match &tx.operations[0] {
            Operation::CreateClaimableLink {
                object_ref,
                type_tag,
                ..
            } => {
                assert!(object_ref.is_none());
                assert!(type_tag.is_none());
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }
}
