//! Flow orchestration: one state machine per user-triggered action.
//!
//! Each flow is a single chain of suspend points executed strictly in
//! order; nothing inside one flow runs concurrently. Flows own their
//! transaction, credential, and result; nothing is shared between
//! concurrent flow instances.

use thiserror::Error;
use tracing::{debug, info};

use stashpay_types::{parse_amount, Address, Digest, Network, ValidationError};

use crate::faucet::{FaucetError, FaucetService};
use crate::keys::{KeyError, KeyProvider};
use crate::link::ClaimableLinkBuilder;
use crate::reconcile::{reconcile, FlowOutcome};
use crate::submit::{
    sign_and_execute, sign_then_execute, ExecuteOptions, LedgerClient, SubmitError,
};
use crate::tx_builder::{BuildError, TransactionBuilder};

/// User input for a value transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub recipient_address: String,
    pub amount: String,
}

/// Per-invocation flow lifecycle. `Succeeded` and `Failed` are terminal;
/// a new user action makes a new flow instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Everything that can go wrong inside a flow. Converted into the terminal
/// `Error` outcome at the flow boundary; nothing is swallowed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Faucet(#[from] FaucetError),
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Lifecycle events a flow emits to its caller. Exactly one terminal event
/// (`on_success` or `on_error`) fires per invocation that entered Pending.
/// The transport is caller-defined.
pub trait FlowNotifier {
    fn on_pending(&self, message: &str) {
        let _ = message;
    }
    fn on_success(&self, digest: &Digest, explorer_url: &str) {
        let _ = (digest, explorer_url);
    }
    fn on_error(&self, message: &str) {
        let _ = message;
    }
}

/// Notifier that drops every event.
pub struct NullNotifier;

impl FlowNotifier for NullNotifier {}

/// Notifier that logs lifecycle events through `tracing`.
pub struct TracingNotifier;

impl FlowNotifier for TracingNotifier {
    fn on_pending(&self, message: &str) {
        info!(detail = message, "flow pending");
    }

    fn on_success(&self, digest: &Digest, explorer_url: &str) {
        info!(%digest, explorer_url, "flow succeeded");
    }

    fn on_error(&self, message: &str) {
        info!(detail = message, "flow failed");
    }
}

/// Validate input, then transfer value: split from gas, transfer to the
/// recipient, combined sign-and-execute with full result detail.
pub struct TransferFlow<'a, K, L, N> {
    keys: &'a K,
    ledger: &'a L,
    notifier: &'a N,
    network: Network,
    state: FlowState,
}

impl<'a, K, L, N> TransferFlow<'a, K, L, N>
where
    K: KeyProvider,
    L: LedgerClient,
    N: FlowNotifier,
{
    pub fn new(keys: &'a K, ledger: &'a L, notifier: &'a N, network: Network) -> Self {
        Self {
            keys,
            ledger,
            notifier,
            network,
            state: FlowState::Idle,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Run the transfer to its terminal outcome.
    ///
    /// The Idle to Pending transition happens synchronously, before the
    /// first await, so callers can disable duplicate submission. Re-running
    /// a non-Idle flow is rejected without side effects: re-entry would
    /// split the same value twice against stale gas state.
    pub async fn run(&mut self, request: &TransferRequest) -> FlowOutcome {
        if self.state != FlowState::Idle {
            return FlowOutcome::Error("flow already started; trigger a new action".to_string());
        }
        self.state = FlowState::Pending;
        self.notifier.on_pending("Transferring...");

        let outcome = match self.execute(request).await {
            Ok(result) => reconcile(result),
            Err(err) => FlowOutcome::Error(err.to_string()),
        };
        self.finish(outcome)
    }

    async fn execute(
        &self,
        request: &TransferRequest,
    ) -> Result<stashpay_types::SubmissionResult, FlowError> {
        // Fail fast: malformed amounts must be rejected before any network
        // call.
        let amount_base = parse_amount(&request.amount)?;
        let recipient = Address::new(request.recipient_address.clone())?;

        let credential = self.keys.credential(self.network).await?;
        debug!(sender = %credential.address(), %recipient, amount_base, "building transfer");

        let mut builder = TransactionBuilder::new(credential.address().clone());
        let coin = builder.split_from_gas(amount_base);
        builder.transfer_objects(vec![coin], recipient);
        let tx = builder.build()?;

        Ok(sign_and_execute(self.ledger, &tx, &credential, ExecuteOptions::default()).await?)
    }

    fn finish(&mut self, outcome: FlowOutcome) -> FlowOutcome {
        match &outcome {
            FlowOutcome::Success(result) => {
                self.state = FlowState::Succeeded;
                let url = self.network.explorer_tx_url(&result.digest);
                self.notifier.on_success(&result.digest, &url);
            }
            FlowOutcome::Error(message) => {
                self.state = FlowState::Failed;
                self.notifier.on_error(message);
            }
            // Reconciliation of a completed submission never yields Pending.
            FlowOutcome::Pending => {}
        }
        outcome
    }
}

/// Request faucet funding, then stage and submit a claimable-link send.
/// Uses the two-step sign-then-execute path; the result carries no
/// execution-status detail.
pub struct ClaimLinkFlow<'a, F, K, L, N> {
    faucet: &'a F,
    keys: &'a K,
    ledger: &'a L,
    notifier: &'a N,
    network: Network,
    account: String,
    state: FlowState,
    link: Option<String>,
}

impl<'a, F, K, L, N> ClaimLinkFlow<'a, F, K, L, N>
where
    F: FaucetService,
    K: KeyProvider,
    L: LedgerClient,
    N: FlowNotifier,
{
    pub fn new(
        faucet: &'a F,
        keys: &'a K,
        ledger: &'a L,
        notifier: &'a N,
        network: Network,
        account: impl Into<String>,
    ) -> Self {
        Self {
            faucet,
            keys,
            ledger,
            notifier,
            network,
            account: account.into(),
            state: FlowState::Idle,
            link: None,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// The shareable claim URL. Only meaningful to share once the flow has
    /// succeeded; the embedded token is fresh per invocation.
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub async fn run(&mut self) -> FlowOutcome {
        if self.state != FlowState::Idle {
            return FlowOutcome::Error("flow already started; trigger a new action".to_string());
        }
        self.state = FlowState::Pending;
        self.notifier.on_pending("Creating claim link...");

        let outcome = match self.execute().await {
            Ok(result) => reconcile(result),
            Err(err) => FlowOutcome::Error(err.to_string()),
        };
        self.finish(outcome)
    }

    async fn execute(&mut self) -> Result<stashpay_types::SubmissionResult, FlowError> {
        // Funding precondition: the faucet fails with IdentityMissing on an
        // empty account before any I/O, and nothing is built downstream on
        // failure. The receipt is an acknowledgement only; funds land
        // asynchronously.
        let receipt = self.faucet.request_funding(&self.account).await?;
        debug!(amounts = ?receipt.transferred_amounts, "faucet acknowledged funding");

        let sender = Address::new(self.account.clone())?;
        let link = ClaimableLinkBuilder::new(sender.clone(), self.network);
        let mut builder = TransactionBuilder::new(sender);
        link.create_send_transaction(&mut builder);
        let tx = builder.build()?;
        self.link = Some(link.link());

        let credential = self.keys.credential(self.network).await?;
        Ok(sign_then_execute(self.ledger, &tx, &credential).await?)
    }

    fn finish(&mut self, outcome: FlowOutcome) -> FlowOutcome {
        match &outcome {
            FlowOutcome::Success(result) => {
                self.state = FlowState::Succeeded;
                let url = self.network.explorer_tx_url(&result.digest);
                self.notifier.on_success(&result.digest, &url);
            }
            FlowOutcome::Error(message) => {
                self.state = FlowState::Failed;
                self.notifier.on_error(message);
            }
            FlowOutcome::Pending => {}
        }
        outcome
    }
}

/// Race a flow against a deadline.
///
/// There is no cancellation primitive: once the submission has been sent
/// the transaction runs to completion on-ledger regardless of this
/// timeout. A timeout outcome therefore does not say whether the transfer
/// ultimately landed; the caller should direct the user to check the
/// explorer later.
#[cfg(not(target_arch = "wasm32"))]
pub async fn run_with_timeout<Fut>(deadline: std::time::Duration, flow: Fut) -> FlowOutcome
where
    Fut: std::future::Future<Output = FlowOutcome>,
{
    match tokio::time::timeout(deadline, flow).await {
        Ok(outcome) => outcome,
        Err(_) => FlowOutcome::Error(format!(
            "timed out after {}ms; the transaction may still have been executed, check the explorer for the digest later",
            deadline.as_millis()
        )),
    }
}
