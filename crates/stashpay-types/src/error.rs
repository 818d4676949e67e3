//! Validation errors raised before any network activity.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The user-entered amount did not parse to a finite, non-negative
    /// value. The display string is surfaced verbatim to the caller.
    #[error("Invalid amount")]
    InvalidAmount,
    /// The scaled amount does not fit in the ledger's u64 base unit.
    #[error("amount out of range: {0}")]
    AmountOutOfRange(String),
    /// An account address was empty where one is required.
    #[error("empty address")]
    EmptyAddress,
    #[error("{0}")]
    Message(String),
}
