//! Storage seam for Riskflow.
//!
//! The workflow core assumes a durable record store with ordinary CRUD,
//! filter queries, and atomic single-record updates. This crate describes
//! that assumption as traits ([`CaseStore`], [`DecisionTrail`],
//! [`AuditorDirectory`]) and ships a deterministic in-memory adapter for
//! tests and reference use. Production deployments bind the traits to a
//! transactional backend.

#![deny(unsafe_code)]

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StorageError, StorageResult};
pub use memory::InMemoryStore;
pub use traits::{AuditorDirectory, CaseStore, DecisionTrail, RiskflowStore};
