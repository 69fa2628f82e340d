//! Workflow error taxonomy
//!
//! Every failure here is local and recoverable: scoped to a single case or
//! request, with no case data corrupted. `Conflict` is safe to retry once
//! the caller re-reads current state.

use crate::{AuditLevel, AuditorId, CaseId};
use thiserror::Error;

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Errors surfaced by the workflow core.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Malformed input, rejected before any state mutation.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("case {0} not found")]
    CaseNotFound(CaseId),

    #[error("auditor {0} not found")]
    AuditorNotFound(AuditorId),

    /// The submission raced or targeted a case that cannot accept it:
    /// already terminal, assigned to someone else, or a concurrent
    /// mutation won.
    #[error("conflict on case {case_id}: {reason}")]
    Conflict { case_id: CaseId, reason: String },

    /// Staffing gap: no qualified active auditor for the stage. Non-fatal;
    /// the case stays pending and assignment can be retried later.
    #[error("no active {0} auditor available")]
    Unassigned(AuditLevel),

    /// Fault in the backing record store.
    #[error("storage backend: {0}")]
    Storage(String),
}

impl WorkflowError {
    pub fn conflict(case_id: CaseId, reason: impl Into<String>) -> Self {
        WorkflowError::Conflict {
            case_id,
            reason: reason.into(),
        }
    }

    /// True for outcomes the caller can retry after re-reading state.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WorkflowError::Conflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_is_retryable() {
        let err = WorkflowError::conflict(CaseId::new("case-1"), "stale version");
        assert!(err.is_retryable());
        assert!(!WorkflowError::Unassigned(AuditLevel::Expert).is_retryable());
    }

    #[test]
    fn test_messages_name_the_subject() {
        let err = WorkflowError::CaseNotFound(CaseId::new("case-42"));
        assert_eq!(err.to_string(), "case case-42 not found");

        let err = WorkflowError::Unassigned(AuditLevel::Committee);
        assert_eq!(err.to_string(), "no active committee auditor available");
    }
}
