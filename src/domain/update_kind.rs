//! Semantic version impact of an available update

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semver tier of an available update. "No update" is represented by the
/// absence of a value, never by a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateKind {
    /// Major version change (breaking)
    Major,
    /// Minor version change (features)
    Minor,
    /// Patch version change (fixes)
    Patch,
}

impl UpdateKind {
    /// Returns the plain label
    pub fn label(&self) -> &'static str {
        match self {
            UpdateKind::Major => "major",
            UpdateKind::Minor => "minor",
            UpdateKind::Patch => "patch",
        }
    }

    /// Returns all kinds, most impactful first
    pub fn all() -> &'static [UpdateKind] {
        &[UpdateKind::Major, UpdateKind::Minor, UpdateKind::Patch]
    }
}

impl fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for UpdateKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" => Ok(UpdateKind::Major),
            "minor" => Ok(UpdateKind::Minor),
            "patch" => Ok(UpdateKind::Patch),
            _ => Err(ConfigError::InvalidLevel {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_and_display() {
        assert_eq!(UpdateKind::Major.label(), "major");
        assert_eq!(format!("{}", UpdateKind::Minor), "minor");
        assert_eq!(UpdateKind::Patch.to_string(), "patch");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("major".parse::<UpdateKind>().unwrap(), UpdateKind::Major);
        assert_eq!("Minor".parse::<UpdateKind>().unwrap(), UpdateKind::Minor);
        assert_eq!(" patch ".parse::<UpdateKind>().unwrap(), UpdateKind::Patch);
        assert!("none".parse::<UpdateKind>().is_err());
    }

    #[test]
    fn test_ordering_most_impactful_first() {
        let mut kinds = vec![UpdateKind::Patch, UpdateKind::Major, UpdateKind::Minor];
        kinds.sort();
        assert_eq!(kinds, UpdateKind::all());
    }

    #[test]
    fn test_serde_update_kind() {
        let json = serde_json::to_string(&UpdateKind::Major).unwrap();
        assert_eq!(json, "\"major\"");
    }
}
