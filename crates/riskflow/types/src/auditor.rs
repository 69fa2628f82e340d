//! Auditors: the read model of the external staffing directory
//!
//! The identity collaborator owns auditor records; the workflow core only
//! reads `{ id, qualification, active }` to make assignment choices.

use crate::AuditLevel;
use serde::{Deserialize, Serialize};

/// Unique identifier for an auditor, issued by the identity collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuditorId(pub String);

impl AuditorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for AuditorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One auditor as seen by the workflow core.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Auditor {
    pub id: AuditorId,
    pub name: String,
    /// The single stage this auditor is qualified to sign off. Assignment
    /// matches it exactly; there is no seniority fallback.
    pub qualification: AuditLevel,
    pub active: bool,
}

impl Auditor {
    /// Create an active auditor.
    pub fn new(id: AuditorId, name: impl Into<String>, qualification: AuditLevel) -> Self {
        Self {
            id,
            name: name.into(),
            qualification,
            active: true,
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}
