//! Unsigned transaction and raw submission result shapes.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ids::{Address, Digest};
use crate::operation::{ObjectRef, Operation};

/// An assembled, not-yet-signed transaction: the sender, the ordered
/// operation sequence, and the gas object reference. Immutable once signing
/// begins; built once per Flow invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedTransaction {
    pub sender: Address,
    pub operations: Vec<Operation>,
    pub gas: Option<ObjectRef>,
}

impl UnsignedTransaction {
    /// Canonical byte encoding used as the signing payload.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ValidationError> {
        bincode::serialize(self).map_err(|err| ValidationError::Message(err.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ValidationError> {
        bincode::deserialize(bytes).map_err(|err| ValidationError::Message(err.to_string()))
    }
}

/// Ledger-reported execution status for a submitted transaction.
/// Orthogonal to network-level submission failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    Success,
    Failure { error: String },
}

/// One per-owner balance delta reported with execution effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceChange {
    pub owner: Address,
    pub amount_base: i128,
}

/// Raw result of one submission, as yielded by the ledger client.
///
/// `status` is only present when the call path requested execution-status
/// detail; its absence is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub digest: Digest,
    pub status: Option<ExecutionStatus>,
    pub balance_changes: Vec<BalanceChange>,
}

impl SubmissionResult {
    pub fn new(digest: Digest) -> Self {
        Self {
            digest,
            status: None,
            balance_changes: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: ExecutionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_balance_changes(mut self, changes: Vec<BalanceChange>) -> Self {
        self.balance_changes = changes;
        self
    }
}
