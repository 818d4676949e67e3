//! Signing and submission: exactly one signing attempt per call, no
//! internal retries. A retried submission could double-spend the
//! already-split value against stale gas-object state.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use stashpay_types::{SubmissionResult, UnsignedTransaction};

use crate::keys::Credential;

/// Errors from the ledger client boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The submission never reached the ledger.
    #[error("ledger unreachable: {0}")]
    Network(String),
    /// The ledger refused the submission outright (malformed bytes, bad
    /// signature). Distinct from an on-chain execution failure, which is
    /// reported inside a [`SubmissionResult`].
    #[error("submission rejected: {0}")]
    Rejected(String),
}

/// Signing/submission errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("signing error: {0}")]
    Signing(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Result-detail flags for a combined sign-and-execute call.
///
/// The default requests full detail so call sites are uniform unless they
/// explicitly opt out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteOptions {
    pub show_effects: bool,
    pub show_balance_changes: bool,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            show_effects: true,
            show_balance_changes: true,
        }
    }
}

impl ExecuteOptions {
    /// Digest-only result, no execution-status detail.
    pub fn none() -> Self {
        Self {
            show_effects: false,
            show_balance_changes: false,
        }
    }
}

/// A signed transaction ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub tx_bytes: Vec<u8>,
    pub signature: [u8; 64],
    pub public_key: [u8; 32],
}

/// Ledger client boundary.
#[async_trait(?Send)]
pub trait LedgerClient {
    /// Execute pre-signed bytes. The result carries no execution-status
    /// detail.
    async fn execute_transaction(
        &self,
        signed: &SignedTransaction,
    ) -> Result<SubmissionResult, LedgerError>;

    /// Execute pre-signed bytes, requesting the detail selected by
    /// `options`.
    async fn execute_transaction_with_options(
        &self,
        signed: &SignedTransaction,
        options: ExecuteOptions,
    ) -> Result<SubmissionResult, LedgerError>;
}

/// Sign `tx` with `credential`. One attempt; serialization or key failures
/// surface as [`SubmitError::Signing`].
pub fn sign(
    tx: &UnsignedTransaction,
    credential: &Credential,
) -> Result<SignedTransaction, SubmitError> {
    let tx_bytes = tx
        .to_bytes()
        .map_err(|err| SubmitError::Signing(err.to_string()))?;
    let signature = credential.sign(&tx_bytes);
    Ok(SignedTransaction {
        tx_bytes,
        signature,
        public_key: credential.public_key_bytes(),
    })
}

/// Two externally-visible steps: sign, then execute. The raw result
/// carries no execution-status detail; reconciliation treats the absence
/// of a status as success.
pub async fn sign_then_execute<L: LedgerClient>(
    ledger: &L,
    tx: &UnsignedTransaction,
    credential: &Credential,
) -> Result<SubmissionResult, SubmitError> {
    let signed = sign(tx, credential)?;
    debug!(sender = %tx.sender, "executing signed transaction");
    Ok(ledger.execute_transaction(&signed).await?)
}

/// Combined sign-and-execute requesting extended result detail.
pub async fn sign_and_execute<L: LedgerClient>(
    ledger: &L,
    tx: &UnsignedTransaction,
    credential: &Credential,
    options: ExecuteOptions,
) -> Result<SubmissionResult, SubmitError> {
    let signed = sign(tx, credential)?;
    debug!(sender = %tx.sender, ?options, "sign-and-execute");
    Ok(ledger
        .execute_transaction_with_options(&signed, options)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::{sign, ExecuteOptions};
    use crate::keys::Credential;
    use crate::tx_builder::TransactionBuilder;
    use stashpay_types::Address;

    #[test]
    fn signature_covers_canonical_tx_bytes() {
        use ed25519_dalek::{Signature, Verifier, VerifyingKey};

        let credential = Credential::from_seed([4u8; 32]);
        let mut builder = TransactionBuilder::new(credential.address().clone());
        let coin = builder.split_from_gas(10);
        builder.transfer_objects(vec![coin], Address::new("0xabc").unwrap());
        let tx = builder.build().unwrap();

        let signed = sign(&tx, &credential).unwrap();
        assert_eq!(signed.tx_bytes, tx.to_bytes().unwrap());

        let key = VerifyingKey::from_bytes(&signed.public_key).unwrap();
        let signature = Signature::from_bytes(&signed.signature);
        assert!(key.verify(&signed.tx_bytes, &signature).is_ok());
    }

    #[test]
    fn default_options_request_full_detail() {
        let options = ExecuteOptions::default();
        assert!(options.show_effects);
        assert!(options.show_balance_changes);
        let none = ExecuteOptions::none();
        assert!(!none.show_effects);
        assert!(!none.show_balance_changes);
    }
}
