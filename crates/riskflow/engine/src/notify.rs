//! Terminal-outcome notification
//!
//! Fired exactly once when a case closes. Delivery is fire-and-forget:
//! the engine logs a failed send and moves on — a notification failure
//! must never roll back a workflow transition.

use async_trait::async_trait;
use riskflow_types::CaseId;
use thiserror::Error;

/// How a case closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalOutcome {
    Approved,
    Rejected,
}

impl TerminalOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminalOutcome::Approved => "approved",
            TerminalOutcome::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for TerminalOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors from a notification backend.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Delivery seam for terminal-outcome messages.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, case_id: &CaseId, outcome: TerminalOutcome) -> Result<(), NotifyError>;
}

/// Default sink: records the outcome in the log stream.
pub struct TracingNotifier;

#[async_trait]
impl NotificationSink for TracingNotifier {
    async fn notify(&self, case_id: &CaseId, outcome: TerminalOutcome) -> Result<(), NotifyError> {
        tracing::info!(case_id = %case_id, outcome = %outcome, "case outcome notification");
        Ok(())
    }
}
