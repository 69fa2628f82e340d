//! In-memory reference implementation of the Riskflow storage traits.
//!
//! Deterministic and test-friendly: cases live in a map guarded by one
//! lock, so the version compare-and-set in [`CaseStore::update_case`] is
//! atomic; the decision trail is a plain append-only vector; auditors keep
//! registration order so assignment scans are stable.

use crate::traits::{AuditorDirectory, CaseStore, DecisionTrail};
use crate::{StorageError, StorageResult};
use async_trait::async_trait;
use riskflow_types::{AuditDecision, AuditLevel, Auditor, AuditorId, Case, CaseId, CaseStatus};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory Riskflow storage adapter.
#[derive(Default)]
pub struct InMemoryStore {
    cases: RwLock<HashMap<CaseId, Case>>,
    case_order: RwLock<Vec<CaseId>>,
    decisions: RwLock<Vec<AuditDecision>>,
    auditors: RwLock<Vec<Auditor>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or replace a directory entry. Directory writes are owned by
    /// the identity collaborator, so this lives on the adapter rather
    /// than on [`AuditorDirectory`].
    pub fn upsert_auditor(&self, auditor: Auditor) {
        let mut guard = self.auditors.write().expect("auditors lock poisoned");
        match guard.iter_mut().find(|a| a.id == auditor.id) {
            Some(existing) => *existing = auditor,
            None => guard.push(auditor),
        }
    }

    /// Toggle an auditor's active flag. Returns false for unknown ids.
    pub fn set_auditor_active(&self, id: &AuditorId, active: bool) -> bool {
        let mut guard = self.auditors.write().expect("auditors lock poisoned");
        match guard.iter_mut().find(|a| &a.id == id) {
            Some(auditor) => {
                auditor.active = active;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl CaseStore for InMemoryStore {
    async fn insert_case(&self, case: Case) -> StorageResult<()> {
        let mut guard = self
            .cases
            .write()
            .map_err(|_| StorageError::Backend("cases lock poisoned".to_string()))?;

        if guard.contains_key(&case.id) {
            return Err(StorageError::Conflict(format!(
                "case {} already exists",
                case.id
            )));
        }

        let mut order = self
            .case_order
            .write()
            .map_err(|_| StorageError::Backend("case order lock poisoned".to_string()))?;
        order.push(case.id.clone());
        guard.insert(case.id.clone(), case);
        Ok(())
    }

    async fn get_case(&self, id: &CaseId) -> StorageResult<Option<Case>> {
        let guard = self
            .cases
            .read()
            .map_err(|_| StorageError::Backend("cases lock poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    async fn update_case(&self, mut case: Case, expected_version: u64) -> StorageResult<Case> {
        let mut guard = self
            .cases
            .write()
            .map_err(|_| StorageError::Backend("cases lock poisoned".to_string()))?;
        let stored = guard
            .get_mut(&case.id)
            .ok_or_else(|| StorageError::NotFound(format!("case {} not found", case.id)))?;

        if stored.version != expected_version {
            return Err(StorageError::Conflict(format!(
                "case {} is at version {}, expected {}",
                case.id, stored.version, expected_version
            )));
        }

        case.version = expected_version + 1;
        *stored = case.clone();
        Ok(case)
    }

    async fn cases_assigned_to(
        &self,
        auditor: &AuditorId,
        statuses: &[CaseStatus],
    ) -> StorageResult<Vec<Case>> {
        let guard = self
            .cases
            .read()
            .map_err(|_| StorageError::Backend("cases lock poisoned".to_string()))?;
        let order = self
            .case_order
            .read()
            .map_err(|_| StorageError::Backend("case order lock poisoned".to_string()))?;

        Ok(order
            .iter()
            .filter_map(|id| guard.get(id))
            .filter(|case| {
                case.assigned_auditor.as_ref() == Some(auditor)
                    && statuses.contains(&case.status)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DecisionTrail for InMemoryStore {
    async fn append_decision(&self, decision: AuditDecision) -> StorageResult<()> {
        let mut guard = self
            .decisions
            .write()
            .map_err(|_| StorageError::Backend("decisions lock poisoned".to_string()))?;
        guard.push(decision);
        Ok(())
    }

    async fn decisions_for_case(&self, case_id: &CaseId) -> StorageResult<Vec<AuditDecision>> {
        let guard = self
            .decisions
            .read()
            .map_err(|_| StorageError::Backend("decisions lock poisoned".to_string()))?;
        Ok(guard
            .iter()
            .filter(|d| &d.case_id == case_id)
            .cloned()
            .collect())
    }

    async fn decisions_by_auditor(&self, auditor: &AuditorId) -> StorageResult<Vec<AuditDecision>> {
        let guard = self
            .decisions
            .read()
            .map_err(|_| StorageError::Backend("decisions lock poisoned".to_string()))?;
        Ok(guard
            .iter()
            .filter(|d| &d.auditor_id == auditor)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AuditorDirectory for InMemoryStore {
    async fn get_auditor(&self, id: &AuditorId) -> StorageResult<Option<Auditor>> {
        let guard = self
            .auditors
            .read()
            .map_err(|_| StorageError::Backend("auditors lock poisoned".to_string()))?;
        Ok(guard.iter().find(|a| &a.id == id).cloned())
    }

    async fn active_with_qualification(&self, level: AuditLevel) -> StorageResult<Vec<Auditor>> {
        let guard = self
            .auditors
            .read()
            .map_err(|_| StorageError::Backend("auditors lock poisoned".to_string()))?;
        Ok(guard
            .iter()
            .filter(|a| a.active && a.qualification == level)
            .cloned()
            .collect())
    }
}
