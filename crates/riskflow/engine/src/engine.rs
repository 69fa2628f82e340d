//! The workflow engine: case lifecycle and decision processing
//!
//! The engine owns every case mutation. A decision commits through a
//! version-guarded compare-and-set on the case record, so two decisions
//! racing on one case cannot both advance it — the loser sees a
//! `Conflict` and retries after re-reading. The trail record is appended
//! only after the case update commits, which keeps trail order identical
//! to the serialized order of accepted decisions.

use crate::assignment::AuditorAssignment;
use crate::notify::{NotificationSink, TerminalOutcome};
use crate::router::StageRouter;
use riskflow_storage::{AuditorDirectory, CaseStore, DecisionTrail, StorageError};
use riskflow_types::{
    AuditDecision, AuditorId, Case, CaseId, CaseStatus, DecisionOutcome, RiskTier, WorkflowError,
    WorkflowResult,
};
use std::sync::Arc;

/// Per-auditor workload counters for the review dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuditorWorkload {
    /// Open cases currently waiting on this auditor.
    pub pending: usize,
    /// Approvals this auditor has signed, across all cases.
    pub approved: usize,
    /// Decisions this auditor returned for rework.
    pub need_review: usize,
}

/// Coordinates routing, assignment, persistence, and notification.
pub struct WorkflowEngine {
    cases: Arc<dyn CaseStore>,
    trail: Arc<dyn DecisionTrail>,
    directory: Arc<dyn AuditorDirectory>,
    assignment: Arc<dyn AuditorAssignment>,
    notifier: Arc<dyn NotificationSink>,
    router: StageRouter,
}

impl WorkflowEngine {
    pub fn new(
        cases: Arc<dyn CaseStore>,
        trail: Arc<dyn DecisionTrail>,
        directory: Arc<dyn AuditorDirectory>,
        assignment: Arc<dyn AuditorAssignment>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            cases,
            trail,
            directory,
            assignment,
            notifier,
            router: StageRouter::default(),
        }
    }

    pub fn with_router(mut self, router: StageRouter) -> Self {
        self.router = router;
        self
    }

    // ── Case Lifecycle ───────────────────────────────────────────────

    /// Create a case at the first stage of its plan.
    ///
    /// Succeeds for every tier/amount; an empty auditor pool leaves the
    /// case unassigned, to be staffed via [`WorkflowEngine::retry_assignment`].
    pub async fn create_case(&self, tier: RiskTier, amount: u64) -> WorkflowResult<Case> {
        let stages = self.router.plan(tier, amount);
        let first_stage = stages[0];
        let assignee = self.assignment.assign(first_stage).await?;
        if assignee.is_none() {
            tracing::warn!(stage = %first_stage, "no qualified auditor available, case starts unassigned");
        }

        let case = Case::new(tier, amount, stages, assignee);
        self.cases
            .insert_case(case.clone())
            .await
            .map_err(backend)?;

        tracing::info!(
            case_id = %case.id,
            tier = %tier,
            stages = case.planned_stages.len(),
            "case created"
        );
        Ok(case)
    }

    /// Process one auditor decision.
    ///
    /// The submission itself is rejected (no mutation, no trail record)
    /// when the case is unknown, the auditor is unknown, the case is
    /// already closed, or the auditor is not the one assigned.
    pub async fn submit_decision(
        &self,
        case_id: &CaseId,
        auditor_id: &AuditorId,
        outcome: DecisionOutcome,
        opinion: Option<String>,
    ) -> WorkflowResult<Case> {
        let case = self
            .cases
            .get_case(case_id)
            .await
            .map_err(backend)?
            .ok_or_else(|| WorkflowError::CaseNotFound(case_id.clone()))?;

        if self
            .directory
            .get_auditor(auditor_id)
            .await
            .map_err(backend)?
            .is_none()
        {
            return Err(WorkflowError::AuditorNotFound(auditor_id.clone()));
        }

        if case.is_terminal() {
            return Err(WorkflowError::conflict(
                case_id.clone(),
                format!("case is already {}", case.status),
            ));
        }

        if case.assigned_auditor.as_ref() != Some(auditor_id) {
            return Err(WorkflowError::conflict(
                case_id.clone(),
                format!("auditor {auditor_id} is not assigned to this case"),
            ));
        }

        let stage = case.current_stage();
        let expected_version = case.version;
        let mut updated = case;
        let mut terminal = None;

        match outcome {
            DecisionOutcome::Rejected => {
                updated.reject();
                terminal = Some(TerminalOutcome::Rejected);
            }
            DecisionOutcome::Approved => match updated.next_stage() {
                Some(next) => {
                    let assignee = self.assignment.assign(next).await?;
                    if assignee.is_none() {
                        tracing::warn!(
                            case_id = %case_id,
                            stage = %next,
                            "no qualified auditor for next stage, case advances unassigned"
                        );
                    }
                    updated.advance(assignee);
                }
                None => {
                    updated.complete();
                    terminal = Some(TerminalOutcome::Approved);
                }
            },
            // Return to sender: stage and status stay put, but the commit
            // still serializes against concurrent decisions.
            DecisionOutcome::NeedReview => updated.touch(),
        }

        let committed = match self.cases.update_case(updated, expected_version).await {
            Ok(case) => case,
            Err(StorageError::Conflict(reason)) => {
                return Err(WorkflowError::Conflict {
                    case_id: case_id.clone(),
                    reason,
                })
            }
            Err(StorageError::NotFound(_)) => {
                return Err(WorkflowError::CaseNotFound(case_id.clone()))
            }
            Err(err) => return Err(backend(err)),
        };

        let mut decision =
            AuditDecision::new(case_id.clone(), auditor_id.clone(), stage, outcome);
        if let Some(opinion) = opinion {
            decision = decision.with_opinion(opinion);
        }
        self.trail.append_decision(decision).await.map_err(backend)?;

        tracing::info!(
            case_id = %case_id,
            stage = %stage,
            outcome = %outcome,
            status = %committed.status,
            "decision accepted"
        );

        if let Some(result) = terminal {
            if let Err(err) = self.notifier.notify(case_id, result).await {
                tracing::warn!(case_id = %case_id, error = %err, "terminal notification failed");
            }
        }

        Ok(committed)
    }

    /// Retry staffing for an unassigned, still-open case.
    ///
    /// Surfaces [`WorkflowError::Unassigned`] while the pool stays empty;
    /// a case that already has an auditor is returned unchanged.
    pub async fn retry_assignment(&self, case_id: &CaseId) -> WorkflowResult<Case> {
        let case = self
            .cases
            .get_case(case_id)
            .await
            .map_err(backend)?
            .ok_or_else(|| WorkflowError::CaseNotFound(case_id.clone()))?;

        if case.is_terminal() {
            return Err(WorkflowError::conflict(
                case_id.clone(),
                format!("case is already {}", case.status),
            ));
        }
        if case.assigned_auditor.is_some() {
            return Ok(case);
        }

        let stage = case.current_stage();
        let Some(assignee) = self.assignment.assign(stage).await? else {
            return Err(WorkflowError::Unassigned(stage));
        };

        let expected_version = case.version;
        let mut updated = case;
        updated.reassign(assignee.clone());

        let committed = match self.cases.update_case(updated, expected_version).await {
            Ok(case) => case,
            Err(StorageError::Conflict(reason)) => {
                return Err(WorkflowError::Conflict {
                    case_id: case_id.clone(),
                    reason,
                })
            }
            Err(StorageError::NotFound(_)) => {
                return Err(WorkflowError::CaseNotFound(case_id.clone()))
            }
            Err(err) => return Err(backend(err)),
        };

        tracing::info!(case_id = %case_id, auditor = %assignee, stage = %stage, "staffing gap filled");
        Ok(committed)
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Open cases waiting on an auditor. Read-only.
    pub async fn pending_for(&self, auditor_id: &AuditorId) -> WorkflowResult<Vec<Case>> {
        self.cases
            .cases_assigned_to(auditor_id, &[CaseStatus::Pending, CaseStatus::InProgress])
            .await
            .map_err(backend)
    }

    /// Full provenance for a case, in decision order.
    pub async fn trail_for(&self, case_id: &CaseId) -> WorkflowResult<Vec<AuditDecision>> {
        self.trail.decisions_for_case(case_id).await.map_err(backend)
    }

    /// Dashboard counters for an auditor.
    pub async fn workload_for(&self, auditor_id: &AuditorId) -> WorkflowResult<AuditorWorkload> {
        let pending = self.pending_for(auditor_id).await?.len();
        let decisions = self
            .trail
            .decisions_by_auditor(auditor_id)
            .await
            .map_err(backend)?;

        let mut workload = AuditorWorkload {
            pending,
            ..AuditorWorkload::default()
        };
        for decision in decisions {
            match decision.outcome {
                DecisionOutcome::Approved => workload.approved += 1,
                DecisionOutcome::NeedReview => workload.need_review += 1,
                DecisionOutcome::Rejected => {}
            }
        }
        Ok(workload)
    }
}

fn backend(err: StorageError) -> WorkflowError {
    WorkflowError::Storage(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::DirectoryAssignment;
    use crate::notify::NotifyError;
    use async_trait::async_trait;
    use riskflow_storage::InMemoryStore;
    use riskflow_types::{AuditLevel, Auditor};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingNotifier {
        sent: AtomicUsize,
        fail: bool,
    }

    impl CountingNotifier {
        fn new(fail: bool) -> Self {
            Self {
                sent: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl NotificationSink for CountingNotifier {
        async fn notify(
            &self,
            _case_id: &CaseId,
            _outcome: TerminalOutcome,
        ) -> Result<(), NotifyError> {
            self.sent.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(NotifyError::Delivery("sms gateway unreachable".into()))
            } else {
                Ok(())
            }
        }
    }

    fn seed_full_pool(store: &InMemoryStore) {
        for (id, name, level) in [
            ("jun-1", "Noor", AuditLevel::Junior),
            ("sen-1", "Mara", AuditLevel::Senior),
            ("exp-1", "Li", AuditLevel::Expert),
            ("com-1", "Sefu", AuditLevel::Committee),
        ] {
            store.upsert_auditor(Auditor::new(AuditorId::new(id), name, level));
        }
    }

    fn make_engine(store: Arc<InMemoryStore>, notifier: Arc<dyn NotificationSink>) -> WorkflowEngine {
        WorkflowEngine::new(
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(DirectoryAssignment::new(store)),
            notifier,
        )
    }

    fn make_staffed_engine() -> (Arc<InMemoryStore>, Arc<CountingNotifier>, WorkflowEngine) {
        let store = Arc::new(InMemoryStore::new());
        seed_full_pool(&store);
        let notifier = Arc::new(CountingNotifier::new(false));
        let engine = make_engine(store.clone(), notifier.clone());
        (store, notifier, engine)
    }

    #[tokio::test]
    async fn test_created_case_starts_pending_and_staffed() {
        let (_, _, engine) = make_staffed_engine();
        let case = engine
            .create_case(RiskTier::Moderate, 500_000)
            .await
            .unwrap();

        assert_eq!(case.status, CaseStatus::Pending);
        assert_eq!(case.current_stage(), AuditLevel::Junior);
        assert_eq!(case.planned_stages, vec![AuditLevel::Junior, AuditLevel::Senior]);
        assert_eq!(case.assigned_auditor, Some(AuditorId::new("jun-1")));
    }

    #[tokio::test]
    async fn test_approval_advances_and_restaffs() {
        let (_, _, engine) = make_staffed_engine();
        let case = engine
            .create_case(RiskTier::Moderate, 500_000)
            .await
            .unwrap();

        let case = engine
            .submit_decision(
                &case.id,
                &AuditorId::new("jun-1"),
                DecisionOutcome::Approved,
                None,
            )
            .await
            .unwrap();

        assert_eq!(case.status, CaseStatus::InProgress);
        assert_eq!(case.current_stage(), AuditLevel::Senior);
        assert_eq!(case.assigned_auditor, Some(AuditorId::new("sen-1")));
    }

    #[tokio::test]
    async fn test_final_approval_completes_and_notifies_once() {
        let (_, notifier, engine) = make_staffed_engine();
        let case = engine
            .create_case(RiskTier::Conservative, 50_000)
            .await
            .unwrap();

        let case = engine
            .submit_decision(
                &case.id,
                &AuditorId::new("jun-1"),
                DecisionOutcome::Approved,
                Some("clean application".into()),
            )
            .await
            .unwrap();

        assert_eq!(case.status, CaseStatus::Completed);
        assert!(case.closed_at.is_some());
        assert_eq!(notifier.sent.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rejection_halts_progression_and_notifies() {
        let (_, notifier, engine) = make_staffed_engine();
        let case = engine
            .create_case(RiskTier::Moderate, 500_000)
            .await
            .unwrap();

        let case = engine
            .submit_decision(
                &case.id,
                &AuditorId::new("jun-1"),
                DecisionOutcome::Rejected,
                Some("income documents inconsistent".into()),
            )
            .await
            .unwrap();

        assert_eq!(case.status, CaseStatus::Rejected);
        assert_eq!(case.current_stage(), AuditLevel::Junior);
        assert_eq!(notifier.sent.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_need_review_keeps_the_case_in_place() {
        let (_, notifier, engine) = make_staffed_engine();
        let case = engine
            .create_case(RiskTier::Moderate, 500_000)
            .await
            .unwrap();

        let case = engine
            .submit_decision(
                &case.id,
                &AuditorId::new("jun-1"),
                DecisionOutcome::NeedReview,
                Some("missing proof of address".into()),
            )
            .await
            .unwrap();

        assert_eq!(case.status, CaseStatus::Pending);
        assert_eq!(case.current_stage(), AuditLevel::Junior);
        assert_eq!(case.assigned_auditor, Some(AuditorId::new("jun-1")));
        assert_eq!(notifier.sent.load(Ordering::SeqCst), 0);

        // The same auditor can decide again afterwards.
        let case = engine
            .submit_decision(
                &case.id,
                &AuditorId::new("jun-1"),
                DecisionOutcome::Approved,
                None,
            )
            .await
            .unwrap();
        assert_eq!(case.current_stage(), AuditLevel::Senior);

        let trail = engine.trail_for(&case.id).await.unwrap();
        assert_eq!(trail.len(), 2);
        assert_eq!(trail[0].outcome, DecisionOutcome::NeedReview);
        assert_eq!(trail[1].outcome, DecisionOutcome::Approved);
    }

    #[tokio::test]
    async fn test_decision_on_closed_case_conflicts_without_mutation() {
        let (_, _, engine) = make_staffed_engine();
        let case = engine
            .create_case(RiskTier::Conservative, 50_000)
            .await
            .unwrap();
        engine
            .submit_decision(
                &case.id,
                &AuditorId::new("jun-1"),
                DecisionOutcome::Approved,
                None,
            )
            .await
            .unwrap();

        let result = engine
            .submit_decision(
                &case.id,
                &AuditorId::new("jun-1"),
                DecisionOutcome::Rejected,
                None,
            )
            .await;
        assert!(matches!(result, Err(WorkflowError::Conflict { .. })));

        let trail = engine.trail_for(&case.id).await.unwrap();
        assert_eq!(trail.len(), 1);
    }

    #[tokio::test]
    async fn test_unassigned_auditor_cannot_decide() {
        let (_, _, engine) = make_staffed_engine();
        let case = engine
            .create_case(RiskTier::Moderate, 500_000)
            .await
            .unwrap();

        let result = engine
            .submit_decision(
                &case.id,
                &AuditorId::new("sen-1"),
                DecisionOutcome::Approved,
                None,
            )
            .await;
        assert!(matches!(result, Err(WorkflowError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_unknown_case_and_auditor_are_not_found() {
        let (_, _, engine) = make_staffed_engine();

        let result = engine
            .submit_decision(
                &CaseId::new("ghost"),
                &AuditorId::new("jun-1"),
                DecisionOutcome::Approved,
                None,
            )
            .await;
        assert!(matches!(result, Err(WorkflowError::CaseNotFound(_))));

        let case = engine
            .create_case(RiskTier::Conservative, 50_000)
            .await
            .unwrap();
        let result = engine
            .submit_decision(
                &case.id,
                &AuditorId::new("ghost"),
                DecisionOutcome::Approved,
                None,
            )
            .await;
        assert!(matches!(result, Err(WorkflowError::AuditorNotFound(_))));
    }

    #[tokio::test]
    async fn test_staffing_gap_and_retry() {
        let store = Arc::new(InMemoryStore::new());
        let engine = make_engine(store.clone(), Arc::new(CountingNotifier::new(false)));

        // Empty pool: the case is still created, just unassigned.
        let case = engine
            .create_case(RiskTier::Conservative, 50_000)
            .await
            .unwrap();
        assert_eq!(case.status, CaseStatus::Pending);
        assert_eq!(case.assigned_auditor, None);

        let result = engine.retry_assignment(&case.id).await;
        assert!(matches!(
            result,
            Err(WorkflowError::Unassigned(AuditLevel::Junior))
        ));

        store.upsert_auditor(Auditor::new(
            AuditorId::new("jun-9"),
            "Late Hire",
            AuditLevel::Junior,
        ));
        let case = engine.retry_assignment(&case.id).await.unwrap();
        assert_eq!(case.assigned_auditor, Some(AuditorId::new("jun-9")));
        assert_eq!(case.status, CaseStatus::Pending);

        // Already staffed: retry is a no-op.
        let again = engine.retry_assignment(&case.id).await.unwrap();
        assert_eq!(again.version, case.version);
    }

    #[tokio::test]
    async fn test_failed_notification_does_not_fail_the_transition() {
        let store = Arc::new(InMemoryStore::new());
        seed_full_pool(&store);
        let notifier = Arc::new(CountingNotifier::new(true));
        let engine = make_engine(store, notifier.clone());

        let case = engine
            .create_case(RiskTier::Conservative, 50_000)
            .await
            .unwrap();
        let case = engine
            .submit_decision(
                &case.id,
                &AuditorId::new("jun-1"),
                DecisionOutcome::Approved,
                None,
            )
            .await
            .unwrap();

        assert_eq!(case.status, CaseStatus::Completed);
        assert_eq!(notifier.sent.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pending_for_lists_only_open_assigned_cases() {
        let (_, _, engine) = make_staffed_engine();
        let junior = AuditorId::new("jun-1");

        let open = engine
            .create_case(RiskTier::Moderate, 500_000)
            .await
            .unwrap();
        let closed = engine
            .create_case(RiskTier::Conservative, 10_000)
            .await
            .unwrap();
        engine
            .submit_decision(&closed.id, &junior, DecisionOutcome::Approved, None)
            .await
            .unwrap();

        let pending = engine.pending_for(&junior).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, open.id);

        // Nothing has reached the committee stage.
        let committee_pending = engine.pending_for(&AuditorId::new("com-1")).await.unwrap();
        assert!(committee_pending.is_empty());
    }

    #[tokio::test]
    async fn test_workload_counters_match_the_trail() {
        let (_, _, engine) = make_staffed_engine();
        let junior = AuditorId::new("jun-1");

        let first = engine
            .create_case(RiskTier::Moderate, 500_000)
            .await
            .unwrap();
        // A second case keeps one entry on the junior's pending queue.
        engine
            .create_case(RiskTier::Moderate, 500_000)
            .await
            .unwrap();

        engine
            .submit_decision(&first.id, &junior, DecisionOutcome::NeedReview, None)
            .await
            .unwrap();
        engine
            .submit_decision(&first.id, &junior, DecisionOutcome::Approved, None)
            .await
            .unwrap();

        let workload = engine.workload_for(&junior).await.unwrap();
        assert_eq!(
            workload,
            AuditorWorkload {
                pending: 1,
                approved: 1,
                need_review: 1,
            }
        );
    }
}
