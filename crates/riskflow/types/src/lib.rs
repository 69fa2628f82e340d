//! Domain types for Riskflow.
//!
//! Everything the workflow core persists or exchanges lives here: the
//! ordered [`AuditLevel`] ladder, risk profiles derived from questionnaire
//! answers, the [`Case`] moving through its frozen stage plan, immutable
//! [`AuditDecision`] trail records, and the [`WorkflowError`] taxonomy.
//!
//! This crate is a leaf: no storage, no policy, no I/O.

#![deny(unsafe_code)]

pub mod auditor;
pub mod case;
pub mod decision;
pub mod error;
pub mod level;
pub mod profile;

pub use auditor::{Auditor, AuditorId};
pub use case::{Case, CaseId, CaseStatus};
pub use decision::{AuditDecision, DecisionId, DecisionOutcome};
pub use error::{WorkflowError, WorkflowResult};
pub use level::AuditLevel;
pub use profile::{AssessmentAnswers, RiskProfile, RiskTier};
