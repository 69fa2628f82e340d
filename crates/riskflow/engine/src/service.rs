//! Boundary services: intake and decision submission
//!
//! Transport-free entry points for the two synchronous request/response
//! boundaries. Intake scores the questionnaire, generates advice, and
//! opens the case in one call; decision submission wraps the engine and
//! emits the updated stage/status.

use crate::engine::WorkflowEngine;
use riskflow_scoring::{advise, assess, PortfolioAdvice};
use riskflow_types::{
    AssessmentAnswers, AuditLevel, AuditorId, CaseId, CaseStatus, DecisionOutcome, RiskTier,
    WorkflowError, WorkflowResult,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ── Intake ───────────────────────────────────────────────────────────

/// Raw intake payload: questionnaire plus the requested amount.
#[derive(Clone, Debug, Deserialize)]
pub struct IntakeSubmission {
    pub answers: AssessmentAnswers,
    /// Major currency units.
    pub investment_amount: u64,
}

/// What the caller gets back from intake.
#[derive(Clone, Debug, Serialize)]
pub struct IntakeOutcome {
    pub case_id: CaseId,
    pub score: u8,
    pub tier: RiskTier,
    pub advice: PortfolioAdvice,
}

/// Scores a submission and opens its case.
pub struct IntakeService {
    engine: Arc<WorkflowEngine>,
}

impl IntakeService {
    pub fn new(engine: Arc<WorkflowEngine>) -> Self {
        Self { engine }
    }

    pub async fn submit(&self, submission: IntakeSubmission) -> WorkflowResult<IntakeOutcome> {
        if submission.investment_amount == 0 {
            return Err(WorkflowError::Validation(
                "investment amount must be positive".to_string(),
            ));
        }

        let profile = assess(&submission.answers);
        let advice = advise(profile.tier, submission.investment_amount);
        let case = self
            .engine
            .create_case(profile.tier, submission.investment_amount)
            .await?;

        Ok(IntakeOutcome {
            case_id: case.id,
            score: profile.score,
            tier: profile.tier,
            advice,
        })
    }
}

// ── Decisions ────────────────────────────────────────────────────────

/// One decision from an authenticated auditor session.
#[derive(Clone, Debug, Deserialize)]
pub struct DecisionRequest {
    pub case_id: CaseId,
    pub auditor_id: AuditorId,
    pub outcome: DecisionOutcome,
    #[serde(default)]
    pub opinion: Option<String>,
}

/// The updated position of the case after an accepted decision.
#[derive(Clone, Debug, Serialize)]
pub struct DecisionReceipt {
    pub case_id: CaseId,
    pub stage: AuditLevel,
    pub status: CaseStatus,
}

/// Applies auditor decisions and reports where the case landed.
pub struct DecisionService {
    engine: Arc<WorkflowEngine>,
}

impl DecisionService {
    pub fn new(engine: Arc<WorkflowEngine>) -> Self {
        Self { engine }
    }

    pub async fn submit(&self, request: DecisionRequest) -> WorkflowResult<DecisionReceipt> {
        let case = self
            .engine
            .submit_decision(
                &request.case_id,
                &request.auditor_id,
                request.outcome,
                request.opinion,
            )
            .await?;

        Ok(DecisionReceipt {
            stage: case.current_stage(),
            status: case.status,
            case_id: case.id,
        })
    }
}
