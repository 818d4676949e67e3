//! Outcome reconciliation: fold a raw submission result into the terminal
//! state exposed to the caller.

use stashpay_types::{ExecutionStatus, SubmissionResult};

/// The only thing a Flow exposes to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    Pending,
    Success(SubmissionResult),
    Error(String),
}

impl FlowOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FlowOutcome::Success(_))
    }
}

/// Inspect the raw result's execution status.
///
/// A failure status is an on-chain execution failure, distinct from a
/// submission failure, and is surfaced with the reported reason. When the
/// call path did not request status detail there is no status to inspect;
/// reaching this point without an exception is then treated as success.
pub fn reconcile(result: SubmissionResult) -> FlowOutcome {
    match &result.status {
        Some(ExecutionStatus::Failure { error }) => {
            FlowOutcome::Error(format!("Transfer failed with status: {error}"))
        }
        Some(ExecutionStatus::Success) | None => FlowOutcome::Success(result),
    }
}

#[cfg(test)]
mod tests {
    use super::{reconcile, FlowOutcome};
    use stashpay_types::{Digest, ExecutionStatus, SubmissionResult};

    #[test]
    fn failure_status_surfaces_with_literal_prefix() {
        let result = SubmissionResult::new(Digest::new("TX9"))
            .with_status(ExecutionStatus::Failure {
                error: "InsufficientGas".to_string(),
            });
        assert_eq!(
            reconcile(result),
            FlowOutcome::Error("Transfer failed with status: InsufficientGas".to_string())
        );
    }

    #[test]
    fn success_status_carries_digest_unchanged() {
        let result =
            SubmissionResult::new(Digest::new("TX1")).with_status(ExecutionStatus::Success);
        match reconcile(result) {
            FlowOutcome::Success(result) => assert_eq!(result.digest.as_str(), "TX1"),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn absent_status_degrades_to_success() {
        let result = SubmissionResult::new(Digest::new("TX2"));
        assert!(reconcile(result).is_success());
    }
}
