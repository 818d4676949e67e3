//! Shared types for the stashpay client pipeline.
//!
//! This crate exposes:
//! - account/network identifiers (`Address`, `Digest`, `Network`),
//! - decimal-amount parsing with base-unit scaling (`parse_amount`),
//! - typed transaction operations (`Operation`, `ValueRef`, `ObjectRef`),
//! - the unsigned transaction and raw submission result shapes.

pub mod amount;
pub mod error;
pub mod ids;
pub mod operation;
pub mod transaction;

pub use amount::{parse_amount, BASE_UNIT_SCALE};
pub use error::ValidationError;
pub use ids::{Address, Digest, Network};
pub use operation::{ObjectRef, Operation, TypeTag, ValueRef};
pub use transaction::{
    BalanceChange, ExecutionStatus, SubmissionResult, UnsignedTransaction,
};
