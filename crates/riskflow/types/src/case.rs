//! Cases: the unit of work moving through the approval workflow
//!
//! A case carries its stage plan frozen at creation; transitions only move
//! the stage index forward through that plan. The plan is never recomputed
//! mid-flight, even if the investment amount later turns out to have
//! changed upstream.

use crate::{AuditLevel, AuditorId, RiskTier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Case Identifier ──────────────────────────────────────────────────

/// Unique identifier for a case.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseId(pub String);

impl CaseId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn short(&self) -> &str {
        &self.0[..8.min(self.0.len())]
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Case Status ──────────────────────────────────────────────────────

/// Lifecycle status of a case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Stage started, no decision accepted yet.
    #[default]
    Pending,
    /// Mid-plan: at least one stage has been approved.
    InProgress,
    /// All planned stages approved. Terminal.
    Completed,
    /// Rejected at some stage. Terminal.
    Rejected,
}

impl CaseStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CaseStatus::Completed | CaseStatus::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Pending => "pending",
            CaseStatus::InProgress => "in_progress",
            CaseStatus::Completed => "completed",
            CaseStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ── Case ─────────────────────────────────────────────────────────────

/// One customer's submission as it moves through the approval workflow.
///
/// `planned_stages` is non-empty and frozen at creation; `stage_index`
/// always points into it, so the current stage is an element of the plan
/// by construction. Terminal cases are kept as historical record, never
/// deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Case {
    pub id: CaseId,
    pub risk_tier: RiskTier,
    /// Major currency units.
    pub investment_amount: u64,
    /// Ordered approval stages, computed once at creation.
    pub planned_stages: Vec<AuditLevel>,
    /// Pointer into `planned_stages`.
    pub stage_index: usize,
    pub status: CaseStatus,
    /// Auditor currently expected to decide; `None` is a staffing gap,
    /// not an error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_auditor: Option<AuditorId>,
    /// Optimistic-concurrency token, bumped by the store on every commit.
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
}

impl Case {
    /// Create a new case at the first planned stage.
    ///
    /// `planned_stages` must be non-empty; the router guarantees this.
    pub fn new(
        risk_tier: RiskTier,
        investment_amount: u64,
        planned_stages: Vec<AuditLevel>,
        assigned_auditor: Option<AuditorId>,
    ) -> Self {
        debug_assert!(!planned_stages.is_empty());
        let now = Utc::now();
        Self {
            id: CaseId::generate(),
            risk_tier,
            investment_amount,
            planned_stages,
            stage_index: 0,
            status: CaseStatus::Pending,
            assigned_auditor,
            version: 0,
            created_at: now,
            updated_at: now,
            closed_at: None,
        }
    }

    /// The stage the case is currently waiting at.
    pub fn current_stage(&self) -> AuditLevel {
        self.planned_stages[self.stage_index]
    }

    /// The stage after the current one, if any remains in the plan.
    pub fn next_stage(&self) -> Option<AuditLevel> {
        self.planned_stages.get(self.stage_index + 1).copied()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Move to the next planned stage after an approval.
    ///
    /// Only valid while `next_stage()` is `Some`; the engine guards this.
    pub fn advance(&mut self, assigned_auditor: Option<AuditorId>) {
        debug_assert!(self.stage_index + 1 < self.planned_stages.len());
        self.stage_index += 1;
        self.status = CaseStatus::InProgress;
        self.assigned_auditor = assigned_auditor;
        self.updated_at = Utc::now();
    }

    /// Close the case as fully approved.
    pub fn complete(&mut self) {
        self.status = CaseStatus::Completed;
        self.closed_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Close the case as rejected, halting stage progression.
    pub fn reject(&mut self) {
        self.status = CaseStatus::Rejected;
        self.closed_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Fill a staffing gap at the current stage.
    pub fn reassign(&mut self, assigned_auditor: AuditorId) {
        self.assigned_auditor = Some(assigned_auditor);
        self.updated_at = Utc::now();
    }

    /// Record activity without changing stage or status.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
