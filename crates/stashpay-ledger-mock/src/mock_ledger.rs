//! MockLedger: in-memory ledger client with signature verification, call
//! recording, and scripted outcomes.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use sha2::{Digest as Sha2Digest, Sha256};

use stashpay_client::{ExecuteOptions, LedgerClient, LedgerError, SignedTransaction};
use stashpay_types::{
    BalanceChange, Digest, ExecutionStatus, Operation, SubmissionResult, UnsignedTransaction,
    ValueRef,
};

/// Scripted behavior for submitted transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerBehavior {
    /// Accept and execute successfully.
    Accept,
    /// Accept the submission, then fail on-chain with this status error.
    ExecutionFailure(String),
    /// Refuse the submission outright.
    Reject(String),
    /// The ledger is unreachable.
    NetworkError(String),
}

/// One recorded submission.
#[derive(Debug, Clone)]
pub struct ExecutedCall {
    pub tx: UnsignedTransaction,
    /// `None` for the plain execute path, `Some` for the options path.
    pub options: Option<ExecuteOptions>,
}

/// In-memory [`LedgerClient`]. Cloning shares the call log.
#[derive(Clone)]
pub struct MockLedger {
    behavior: LedgerBehavior,
    digest_override: Option<String>,
    calls: Arc<Mutex<Vec<ExecutedCall>>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            behavior: LedgerBehavior::Accept,
            digest_override: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Report this digest instead of the content hash.
    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.digest_override = Some(digest.into());
        self
    }

    pub fn with_execution_failure(mut self, error: impl Into<String>) -> Self {
        self.behavior = LedgerBehavior::ExecutionFailure(error.into());
        self
    }

    pub fn with_rejection(mut self, message: impl Into<String>) -> Self {
        self.behavior = LedgerBehavior::Reject(message.into());
        self
    }

    pub fn with_network_error(mut self, message: impl Into<String>) -> Self {
        self.behavior = LedgerBehavior::NetworkError(message.into());
        self
    }

    /// Number of submissions that reached this ledger.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("call log poisoned").len()
    }

    pub fn executed_calls(&self) -> Vec<ExecutedCall> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    fn accept(
        &self,
        signed: &SignedTransaction,
        options: Option<ExecuteOptions>,
    ) -> Result<(UnsignedTransaction, Digest), LedgerError> {
        if let LedgerBehavior::NetworkError(message) = &self.behavior {
            return Err(LedgerError::Network(message.clone()));
        }

        let tx = UnsignedTransaction::from_bytes(&signed.tx_bytes)
            .map_err(|err| LedgerError::Rejected(format!("undecodable transaction: {err}")))?;

        let key = VerifyingKey::from_bytes(&signed.public_key)
            .map_err(|_| LedgerError::Rejected("invalid public key".to_string()))?;
        let signature = Signature::from_bytes(&signed.signature);
        key.verify(&signed.tx_bytes, &signature)
            .map_err(|_| LedgerError::Rejected("invalid signature".to_string()))?;

        let signer_address = format!("0x{}", hex::encode(signed.public_key));
        if tx.sender.as_str() != signer_address {
            return Err(LedgerError::Rejected(
                "signature does not match transaction sender".to_string(),
            ));
        }

        if let LedgerBehavior::Reject(message) = &self.behavior {
            return Err(LedgerError::Rejected(message.clone()));
        }

        let digest = match &self.digest_override {
            Some(digest) => Digest::new(digest.clone()),
            None => Digest::new(hex::encode(Sha256::digest(&signed.tx_bytes))),
        };

        self.calls
            .lock()
            .expect("call log poisoned")
            .push(ExecutedCall {
                tx: tx.clone(),
                options,
            });

        Ok((tx, digest))
    }

    fn balance_changes(tx: &UnsignedTransaction) -> Vec<BalanceChange> {
        let mut changes = Vec::new();
        for operation in &tx.operations {
            if let Operation::TransferObjects { objects, recipient } = operation {
                for object in objects {
                    if let ValueRef::Result(slot) = object {
                        if let Some(Operation::SplitValue { amount_base, .. }) =
                            tx.operations.get(*slot)
                        {
                            changes.push(BalanceChange {
                                owner: tx.sender.clone(),
                                amount_base: -(*amount_base as i128),
                            });
                            changes.push(BalanceChange {
                                owner: recipient.clone(),
                                amount_base: *amount_base as i128,
                            });
                        }
                    }
                }
            }
        }
        changes
    }
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl LedgerClient for MockLedger {
    async fn execute_transaction(
        &self,
        signed: &SignedTransaction,
    ) -> Result<SubmissionResult, LedgerError> {
        let (_, digest) = self.accept(signed, None)?;
        // No options requested: the result carries no status detail, even
        // when the scripted behavior is an execution failure.
        Ok(SubmissionResult::new(digest))
    }

    async fn execute_transaction_with_options(
        &self,
        signed: &SignedTransaction,
        options: ExecuteOptions,
    ) -> Result<SubmissionResult, LedgerError> {
        let (tx, digest) = self.accept(signed, Some(options))?;
        let mut result = SubmissionResult::new(digest);

        if options.show_effects {
            result = result.with_status(match &self.behavior {
                LedgerBehavior::ExecutionFailure(error) => ExecutionStatus::Failure {
                    error: error.clone(),
                },
                _ => ExecutionStatus::Success,
            });
        }
        if options.show_balance_changes && matches!(self.behavior, LedgerBehavior::Accept) {
            result = result.with_balance_changes(Self::balance_changes(&tx));
        }
        Ok(result)
    }
}
