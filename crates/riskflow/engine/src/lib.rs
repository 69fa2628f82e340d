//! Workflow engine for Riskflow.
//!
//! A case enters with a risk tier and an investment amount. The
//! [`StageRouter`] turns those into a frozen plan of approval stages, the
//! [`AuditorAssignment`] seam staffs each stage, and the
//! [`WorkflowEngine`] advances the case decision by decision until it is
//! completed, rejected, or parked on a staffing gap.
//!
//! # Architecture
//!
//! - [`router`] — tier + amount → ordered stage plan, computed once
//! - [`assignment`] — narrow staffing seam over the auditor directory
//! - [`engine`] — the state machine: decision validation, version-guarded
//!   commits, trail appends, terminal notification
//! - [`notify`] — fire-and-forget outcome delivery seam
//! - [`service`] — transport-free intake and decision boundaries
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use riskflow_engine::{DirectoryAssignment, TracingNotifier, WorkflowEngine};
//! use riskflow_storage::InMemoryStore;
//! use riskflow_types::{AuditLevel, Auditor, AuditorId, RiskTier};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = Arc::new(InMemoryStore::new());
//! store.upsert_auditor(Auditor::new(AuditorId::new("jun-1"), "Noor", AuditLevel::Junior));
//!
//! let engine = WorkflowEngine::new(
//!     store.clone(),
//!     store.clone(),
//!     store.clone(),
//!     Arc::new(DirectoryAssignment::new(store)),
//!     Arc::new(TracingNotifier),
//! );
//!
//! let case = engine.create_case(RiskTier::Conservative, 50_000).await.unwrap();
//! assert_eq!(case.current_stage(), AuditLevel::Junior);
//! # }
//! ```

#![deny(unsafe_code)]

pub mod assignment;
pub mod engine;
pub mod notify;
pub mod router;
pub mod service;

pub use assignment::{AuditorAssignment, DirectoryAssignment};
pub use engine::{AuditorWorkload, WorkflowEngine};
pub use notify::{NotificationSink, NotifyError, TerminalOutcome, TracingNotifier};
pub use router::StageRouter;
pub use service::{
    DecisionReceipt, DecisionRequest, DecisionService, IntakeOutcome, IntakeService,
    IntakeSubmission,
};
