//! Risk profiles: questionnaire answers and the tier derived from them
//!
//! A profile is computed once at intake and never mutated; a re-assessment
//! produces a new profile. The numeric score is bounded to [0, 100] by the
//! scoring engine, and the tier is a closed classification over it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Risk Tier ────────────────────────────────────────────────────────

/// Coarse risk classification derived from the numeric score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskTier {
    /// Map a bounded score onto a tier.
    ///
    /// Boundaries: `score < 40` conservative, `40 <= score < 70` moderate,
    /// `score >= 70` aggressive.
    pub fn from_score(score: u8) -> Self {
        if score < 40 {
            RiskTier::Conservative
        } else if score < 70 {
            RiskTier::Moderate
        } else {
            RiskTier::Aggressive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Conservative => "conservative",
            RiskTier::Moderate => "moderate",
            RiskTier::Aggressive => "aggressive",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ── Questionnaire ────────────────────────────────────────────────────

/// Raw questionnaire answers, one categorical value per dimension.
///
/// Values are free-form on purpose: the scoring engine treats anything it
/// does not recognize as contributing zero weight, so a new or mistyped
/// answer degrades the score gracefully instead of failing intake.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AssessmentAnswers {
    pub age: String,
    pub income: String,
    pub experience: String,
    pub loss_tolerance: String,
    pub goal: String,
    pub horizon: String,
}

// ── Risk Profile ─────────────────────────────────────────────────────

/// The scored outcome of one assessment. Immutable once computed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RiskProfile {
    /// Bounded score in [0, 100].
    pub score: u8,
    pub tier: RiskTier,
    pub assessed_at: DateTime<Utc>,
}

impl RiskProfile {
    pub fn new(score: u8, tier: RiskTier) -> Self {
        Self {
            score,
            tier,
            assessed_at: Utc::now(),
        }
    }
}
