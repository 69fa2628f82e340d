use crate::StorageResult;
use async_trait::async_trait;
use riskflow_types::{AuditDecision, AuditLevel, Auditor, AuditorId, Case, CaseId, CaseStatus};

/// Storage interface for case records.
#[async_trait]
pub trait CaseStore: Send + Sync {
    /// Insert a newly created case. Fails on duplicate id.
    async fn insert_case(&self, case: Case) -> StorageResult<()>;

    /// Get one case by id.
    async fn get_case(&self, id: &CaseId) -> StorageResult<Option<Case>>;

    /// Atomically replace a case record, guarded by its version.
    ///
    /// The stored record's version must equal `expected_version`;
    /// otherwise the update is a `Conflict` and nothing changes. On
    /// success the committed record (version bumped) is returned.
    async fn update_case(&self, case: Case, expected_version: u64) -> StorageResult<Case>;

    /// Filter query: cases assigned to an auditor in any of the given
    /// statuses, in creation order.
    async fn cases_assigned_to(
        &self,
        auditor: &AuditorId,
        statuses: &[CaseStatus],
    ) -> StorageResult<Vec<Case>>;
}

/// Storage interface for the append-only decision trail.
#[async_trait]
pub trait DecisionTrail: Send + Sync {
    /// Append one immutable record.
    async fn append_decision(&self, decision: AuditDecision) -> StorageResult<()>;

    /// All records for a case, in append order.
    async fn decisions_for_case(&self, case_id: &CaseId) -> StorageResult<Vec<AuditDecision>>;

    /// All records written by an auditor, in append order.
    async fn decisions_by_auditor(&self, auditor: &AuditorId) -> StorageResult<Vec<AuditDecision>>;
}

/// Read access to the externally owned auditor directory.
#[async_trait]
pub trait AuditorDirectory: Send + Sync {
    /// Look up one auditor.
    async fn get_auditor(&self, id: &AuditorId) -> StorageResult<Option<Auditor>>;

    /// Active auditors whose qualification equals `level` exactly, in
    /// stable registration order.
    async fn active_with_qualification(&self, level: AuditLevel) -> StorageResult<Vec<Auditor>>;
}

/// Unified storage bundle consumed by the workflow engine.
pub trait RiskflowStore: CaseStore + DecisionTrail + AuditorDirectory + Send + Sync {}

impl<T> RiskflowStore for T where T: CaseStore + DecisionTrail + AuditorDirectory + Send + Sync {}
