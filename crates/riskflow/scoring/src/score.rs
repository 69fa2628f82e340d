//! Questionnaire scoring
//!
//! Start from a fixed base, add one signed weight per dimension, clamp to
//! [0, 100]. Unrecognized categorical values contribute zero — scoring
//! fails open, never aborts. The weights are a fixed contract; changing
//! them moves tier boundaries and therefore stage plans.

use riskflow_types::{AssessmentAnswers, RiskProfile, RiskTier};

/// Every assessment starts here before dimension weights apply.
pub const BASE_SCORE: i32 = 50;

const AGE_WEIGHTS: &[(&str, i32)] = &[
    ("18-30", 15),
    ("31-45", 10),
    ("46-60", 5),
    ("over-60", -10),
];

const INCOME_WEIGHTS: &[(&str, i32)] = &[
    ("over-500k", 15),
    ("300k-500k", 10),
    ("100k-300k", 5),
    ("under-100k", 0),
];

const EXPERIENCE_WEIGHTS: &[(&str, i32)] = &[
    ("over-5y", 15),
    ("3-5y", 10),
    ("1-3y", 5),
    ("none", 0),
];

const LOSS_TOLERANCE_WEIGHTS: &[(&str, i32)] = &[
    ("over-30pct", 20),
    ("15-30pct", 10),
    ("5-15pct", 5),
    ("under-5pct", -10),
];

const GOAL_WEIGHTS: &[(&str, i32)] = &[
    ("max-returns", 15),
    ("active-growth", 10),
    ("steady-growth", 5),
    ("capital-preservation", -5),
];

const HORIZON_WEIGHTS: &[(&str, i32)] = &[
    ("over-5y", 10),
    ("3-5y", 5),
    ("1-3y", 0),
    ("under-1y", -10),
];

fn weight_for(table: &[(&str, i32)], answer: &str) -> i32 {
    table
        .iter()
        .find(|(key, _)| *key == answer)
        .map(|(_, weight)| *weight)
        .unwrap_or(0)
}

/// Compute the bounded risk score for a set of answers.
pub fn risk_score(answers: &AssessmentAnswers) -> u8 {
    let mut total = BASE_SCORE;
    total += weight_for(AGE_WEIGHTS, &answers.age);
    total += weight_for(INCOME_WEIGHTS, &answers.income);
    total += weight_for(EXPERIENCE_WEIGHTS, &answers.experience);
    total += weight_for(LOSS_TOLERANCE_WEIGHTS, &answers.loss_tolerance);
    total += weight_for(GOAL_WEIGHTS, &answers.goal);
    total += weight_for(HORIZON_WEIGHTS, &answers.horizon);
    total.clamp(0, 100) as u8
}

/// Score the answers and derive the tier in one step.
pub fn assess(answers: &AssessmentAnswers) -> RiskProfile {
    let score = risk_score(answers);
    RiskProfile::new(score, RiskTier::from_score(score))
}
