//! Auditor assignment: staffing a stage
//!
//! Assignment sits behind a narrow trait so tests can substitute fixed
//! pools or force "nobody available". `None` is a valid outcome, not an
//! error: the case stays unassigned and assignment is retried later.
//! Reads here are best-effort — a brief staleness window where a
//! just-deactivated auditor is still picked is acceptable.

use async_trait::async_trait;
use riskflow_storage::AuditorDirectory;
use riskflow_types::{AuditLevel, AuditorId, WorkflowError, WorkflowResult};
use std::sync::Arc;

/// Selects an auditor for a stage.
#[async_trait]
pub trait AuditorAssignment: Send + Sync {
    /// Pick an auditor qualified for `level`, or `None` when the pool has
    /// no qualified active auditor.
    async fn assign(&self, level: AuditLevel) -> WorkflowResult<Option<AuditorId>>;
}

/// Directory-backed assignment: the first active auditor whose
/// qualification equals the stage exactly. No seniority fallback — a
/// senior case is never handed to an expert automatically.
pub struct DirectoryAssignment {
    directory: Arc<dyn AuditorDirectory>,
}

impl DirectoryAssignment {
    pub fn new(directory: Arc<dyn AuditorDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl AuditorAssignment for DirectoryAssignment {
    async fn assign(&self, level: AuditLevel) -> WorkflowResult<Option<AuditorId>> {
        let candidates = self
            .directory
            .active_with_qualification(level)
            .await
            .map_err(|err| WorkflowError::Storage(err.to_string()))?;
        Ok(candidates.into_iter().next().map(|auditor| auditor.id))
    }
}
