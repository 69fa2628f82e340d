//! Risk scoring and portfolio advisory for Riskflow.
//!
//! Two pure leaves, no I/O and no error paths:
//!
//! - [`score`] turns questionnaire answers into a bounded score and a
//!   [`riskflow_types::RiskTier`]. The tier is the workflow's routing key,
//!   so the weight tables here are load-bearing: stage-count decisions
//!   downstream depend on the exact tier boundaries.
//! - [`advisor`] maps a tier to a fixed portfolio template.

#![deny(unsafe_code)]

pub mod advisor;
pub mod score;

pub use advisor::{advise, Allocation, PortfolioAdvice};
pub use score::{assess, risk_score};
