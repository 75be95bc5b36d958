//! Structured migration assessments

use super::UpdateKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk of applying an upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskLevel {
    /// Risk implied by the update kind alone, used when no assessment text exists
    pub fn from_update_kind(kind: UpdateKind) -> Self {
        match kind {
            UpdateKind::Major => RiskLevel::High,
            UpdateKind::Minor => RiskLevel::Medium,
            UpdateKind::Patch => RiskLevel::Low,
        }
    }

    /// Returns the plain label
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Structured interpretation of one upgrade assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationRecord {
    pub package_name: String,
    pub summary: String,
    pub breaking_changes: Vec<String>,
    pub migration_steps: Vec<String>,
    pub risk_level: RiskLevel,
}
