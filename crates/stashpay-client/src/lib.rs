//! Stashpay client core: the transaction-orchestration pipeline.
//!
//! This crate exposes:
//! - faucet funding (`FaucetService`, `HttpFaucet`),
//! - the session key boundary (`KeyProvider`, `Credential`),
//! - transaction construction (`TransactionBuilder`, `ClaimableLinkBuilder`),
//! - signing and submission (`LedgerClient`, `sign_then_execute`,
//!   `sign_and_execute`),
//! - outcome reconciliation (`reconcile`, `FlowOutcome`),
//! - the per-invocation flows (`TransferFlow`, `ClaimLinkFlow`).

pub mod faucet;
pub mod flow;
pub mod keys;
pub mod link;
pub mod reconcile;
pub mod submit;
pub mod tx_builder;

pub use faucet::{FaucetError, FaucetService, FundingReceipt, HttpFaucet};
#[cfg(not(target_arch = "wasm32"))]
pub use flow::run_with_timeout;
pub use flow::{
    ClaimLinkFlow, FlowError, FlowNotifier, FlowState, NullNotifier, TracingNotifier,
    TransferFlow, TransferRequest,
};
pub use keys::{Credential, KeyError, KeyProvider};
pub use link::ClaimableLinkBuilder;
pub use reconcile::{reconcile, FlowOutcome};
pub use submit::{
    sign, sign_and_execute, sign_then_execute, ExecuteOptions, LedgerClient, LedgerError,
    SignedTransaction, SubmitError,
};
pub use tx_builder::{BuildError, TransactionBuilder};
