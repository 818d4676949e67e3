use serde::{Deserialize, Serialize};

use crate::ids::Address;

/// Fully-qualified type of a claimable object, e.g.
/// `0x2::module::Type`. Owned by the external ledger's type system.
pub type TypeTag = String;

/// Reference to an on-ledger object, pinned to a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub id: String,
    pub version: u64,
}

/// Reference to a value consumed by an operation.
///
/// `Result(i)` points at the output of the `i`-th preceding operation in the
/// same transaction; ordering is semantically significant because a value
/// must be split before it can be referenced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueRef {
    /// The transaction's gas object.
    Gas,
    /// Output slot of an earlier operation.
    Result(usize),
    /// An explicit on-ledger object.
    Object(ObjectRef),
}

/// One typed operation inside an unsigned transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Split `amount_base` base units off `source`, producing a new value
    /// in this operation's result slot.
    SplitValue { source: ValueRef, amount_base: u64 },
    /// Transfer previously produced values to `recipient`.
    TransferObjects {
        objects: Vec<ValueRef>,
        recipient: Address,
    },
    /// Stage a send that a third party can later claim through a link.
    ///
    /// `object_ref`/`type_tag` form the extension point for attaching a
    /// concrete claimable object; both may be absent while the attachment
    /// step is unwired upstream.
    CreateClaimableLink {
        claim_address: Address,
        object_ref: Option<ObjectRef>,
        type_tag: Option<TypeTag>,
    },
}

impl Operation {
    /// Whether this operation produces a value in its result slot that
    /// later operations may reference.
    pub fn produces_result(&self) -> bool {
        matches!(self, Operation::SplitValue { .. })
    }
}
