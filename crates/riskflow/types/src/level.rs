//! Audit levels: the seniority ladder a case climbs
//!
//! An `AuditLevel` is used in two roles: as a case's current stage pointer
//! and as an auditor's qualification. Levels are totally ordered,
//! `Junior < Senior < Expert < Committee`.

use serde::{Deserialize, Serialize};

/// Ordered approval tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditLevel {
    Junior,
    Senior,
    Expert,
    Committee,
}

impl AuditLevel {
    /// All levels, in ascending seniority.
    pub const ALL: [AuditLevel; 4] = [
        AuditLevel::Junior,
        AuditLevel::Senior,
        AuditLevel::Expert,
        AuditLevel::Committee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AuditLevel::Junior => "junior",
            AuditLevel::Senior => "senior",
            AuditLevel::Expert => "expert",
            AuditLevel::Committee => "committee",
        }
    }
}

impl std::fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered_by_seniority() {
        assert!(AuditLevel::Junior < AuditLevel::Senior);
        assert!(AuditLevel::Senior < AuditLevel::Expert);
        assert!(AuditLevel::Expert < AuditLevel::Committee);

        let mut shuffled = vec![AuditLevel::Committee, AuditLevel::Junior, AuditLevel::Expert];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![AuditLevel::Junior, AuditLevel::Expert, AuditLevel::Committee]
        );
    }

    #[test]
    fn test_all_covers_every_level() {
        assert_eq!(AuditLevel::ALL.len(), 4);
        assert_eq!(AuditLevel::ALL[0], AuditLevel::Junior);
        assert_eq!(AuditLevel::ALL[3], AuditLevel::Committee);
    }

    #[test]
    fn test_wire_names_are_snake_case() {
        let json = serde_json::to_string(&AuditLevel::Committee).unwrap();
        assert_eq!(json, "\"committee\"");
        assert_eq!(format!("{}", AuditLevel::Senior), "senior");
    }
}
