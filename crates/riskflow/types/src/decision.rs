//! Audit decisions: the append-only provenance trail
//!
//! One record per accepted decision. Records are immutable once written;
//! the ordered sequence for a case is the complete account of how it
//! reached its current status.

use crate::{AuditLevel, AuditorId, CaseId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a trail record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecisionId(pub String);

impl DecisionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for DecisionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What an auditor decided at a stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionOutcome {
    Approved,
    Rejected,
    /// Return to sender: the case stays at its stage for re-submission.
    NeedReview,
}

impl DecisionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionOutcome::Approved => "approved",
            DecisionOutcome::Rejected => "rejected",
            DecisionOutcome::NeedReview => "need_review",
        }
    }
}

impl std::fmt::Display for DecisionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One immutable trail record. References the case by identity only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditDecision {
    pub id: DecisionId,
    pub case_id: CaseId,
    pub auditor_id: AuditorId,
    /// The stage the case was at when the decision was accepted.
    pub stage: AuditLevel,
    pub outcome: DecisionOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opinion: Option<String>,
    pub decided_at: DateTime<Utc>,
}

impl AuditDecision {
    pub fn new(
        case_id: CaseId,
        auditor_id: AuditorId,
        stage: AuditLevel,
        outcome: DecisionOutcome,
    ) -> Self {
        Self {
            id: DecisionId::generate(),
            case_id,
            auditor_id,
            stage,
            outcome,
            opinion: None,
            decided_at: Utc::now(),
        }
    }

    pub fn with_opinion(mut self, opinion: impl Into<String>) -> Self {
        self.opinion = Some(opinion.into());
        self
    }
}
