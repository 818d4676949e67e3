//! TransactionBuilder: assemble an unsigned transaction from typed
//! operations. Pure assembly, no I/O; rebuilding from the same operation
//! sequence yields the same transaction.

use thiserror::Error;

use stashpay_types::{
    Address, ObjectRef, Operation, TypeTag, UnsignedTransaction, ValidationError, ValueRef,
};

/// Transaction assembly errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Ordered-operation builder for [`UnsignedTransaction`].
///
/// Operation order is semantically significant: a value must be split
/// before the result slot that holds it can be referenced. `build`
/// enforces that every `ValueRef::Result(i)` points at an earlier,
/// result-producing operation.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    sender: Address,
    gas: Option<ObjectRef>,
    operations: Vec<Operation>,
}

impl TransactionBuilder {
    pub fn new(sender: Address) -> Self {
        Self {
            sender,
            gas: None,
            operations: Vec::new(),
        }
    }

    pub fn with_gas(mut self, gas: ObjectRef) -> Self {
        self.gas = Some(gas);
        self
    }

    /// Split `amount_base` base units off the gas object. Returns the
    /// reference later operations use to consume the split value.
    pub fn split_from_gas(&mut self, amount_base: u64) -> ValueRef {
        let slot = self.operations.len();
        self.operations.push(Operation::SplitValue {
            source: ValueRef::Gas,
            amount_base,
        });
        ValueRef::Result(slot)
    }

    pub fn transfer_objects(&mut self, objects: Vec<ValueRef>, recipient: Address) {
        self.operations
            .push(Operation::TransferObjects { objects, recipient });
    }

    pub fn create_claimable_link(
        &mut self,
        claim_address: Address,
        object_ref: Option<ObjectRef>,
        type_tag: Option<TypeTag>,
    ) {
        self.operations.push(Operation::CreateClaimableLink {
            claim_address,
            object_ref,
            type_tag,
        });
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn build(self) -> Result<UnsignedTransaction, BuildError> {
        if self.operations.is_empty() {
            return Err(BuildError::InvalidOperation(
                "transaction has no operations".to_string(),
            ));
        }

        for (index, operation) in self.operations.iter().enumerate() {
            if let Operation::TransferObjects { objects, .. } = operation {
                if objects.is_empty() {
                    return Err(BuildError::InvalidOperation(format!(
                        "transfer at position {index} consumes no values"
                    )));
                }
                for object in objects {
                    check_result_ref(&self.operations, index, object)?;
                }
            }
        }

        Ok(UnsignedTransaction {
            sender: self.sender,
            operations: self.operations,
            gas: self.gas,
        })
    }
}

fn check_result_ref(
    operations: &[Operation],
    consumer: usize,
    value: &ValueRef,
) -> Result<(), BuildError> {
    if let ValueRef::Result(slot) = value {
        if *slot >= consumer {
            return Err(BuildError::InvalidOperation(format!(
                "operation {consumer} references result {slot} before it is produced"
            )));
        }
        if !operations[*slot].produces_result() {
            return Err(BuildError::InvalidOperation(format!(
                "operation {consumer} references result {slot}, which produces no value"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{BuildError, TransactionBuilder};
    use stashpay_types::{parse_amount, Address, Operation, ValueRef};

    fn sender() -> Address {
        Address::new("0xsender").unwrap()
    }

    #[test]
    fn split_then_transfer_builds_in_order() {
        let amount = parse_amount("1.5").unwrap();
        let mut builder = TransactionBuilder::new(sender());
        let coin = builder.split_from_gas(amount);
        builder.transfer_objects(vec![coin], Address::new("0xabc").unwrap());
        let tx = builder.build().unwrap();

        assert_eq!(tx.operations.len(), 2);
        assert_eq!(
            tx.operations[0],
            Operation::SplitValue {
                source: ValueRef::Gas,
                amount_base: 1_500_000_000,
            }
        );
        match &tx.operations[1] {
            Operation::TransferObjects { objects, recipient } => {
                assert_eq!(objects, &vec![ValueRef::Result(0)]);
                assert_eq!(recipient.as_str(), "0xabc");
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[test]
    fn construction_is_deterministic() {
        let build = || {
            let mut builder = TransactionBuilder::new(sender());
            let coin = builder.split_from_gas(42);
            builder.transfer_objects(vec![coin], Address::new("0xabc").unwrap());
            builder.build().unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn rejects_transfer_of_unproduced_result() {
        let mut builder = TransactionBuilder::new(sender());
        builder.transfer_objects(vec![ValueRef::Result(0)], Address::new("0xabc").unwrap());
        assert!(matches!(
            builder.build(),
            Err(BuildError::InvalidOperation(_))
        ));
    }

    #[test]
    fn rejects_empty_transaction() {
        let builder = TransactionBuilder::new(sender());
        assert!(matches!(
            builder.build(),
            Err(BuildError::InvalidOperation(_))
        ));
    }
}
