//! Stage routing: how many approvals a case needs
//!
//! The plan is a function of risk tier and investment amount, computed
//! exactly once at case creation and frozen into the case. Later stage
//! changes only move a pointer through it.

use riskflow_types::{AuditLevel, RiskTier};

/// Routing rules for stage plans.
#[derive(Clone, Copy, Debug)]
pub struct StageRouter {
    /// Moderate-tier cases above this amount (major units) get an extra
    /// expert stage.
    pub expert_review_threshold: u64,
}

impl Default for StageRouter {
    fn default() -> Self {
        Self {
            expert_review_threshold: 1_000_000,
        }
    }
}

impl StageRouter {
    /// Compute the ordered, non-empty stage plan for a case.
    pub fn plan(&self, tier: RiskTier, amount: u64) -> Vec<AuditLevel> {
        match tier {
            RiskTier::Conservative => vec![AuditLevel::Junior],
            RiskTier::Moderate => {
                let mut stages = vec![AuditLevel::Junior, AuditLevel::Senior];
                if amount > self.expert_review_threshold {
                    stages.push(AuditLevel::Expert);
                }
                stages
            }
            RiskTier::Aggressive => vec![
                AuditLevel::Junior,
                AuditLevel::Senior,
                AuditLevel::Expert,
                AuditLevel::Committee,
            ],
        }
    }
}
