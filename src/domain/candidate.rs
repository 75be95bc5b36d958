//! Update candidates and their classified buckets

use super::UpdateKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A dependency with a resolvable, strictly newer published version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCandidate {
    /// Package name
    pub name: String,
    /// Declared version with any range operator removed
    pub current_version: String,
    /// Latest published version
    pub latest_version: String,
    /// Semver impact of the update
    pub update_type: UpdateKind,
    /// Manifest that declares the dependency
    pub package_json_path: PathBuf,
    /// Whether the dependency is declared under devDependencies
    pub is_dev: bool,
}

impl fmt::Display for UpdateCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} → {} ({})",
            self.name, self.current_version, self.latest_version, self.update_type
        )
    }
}

/// Candidates partitioned by update kind, each bucket in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBuckets {
    /// Major updates
    pub major: Vec<UpdateCandidate>,
    /// Minor updates
    pub minor: Vec<UpdateCandidate>,
    /// Patch updates
    pub patch: Vec<UpdateCandidate>,
}

impl UpdateBuckets {
    /// Creates empty buckets
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a candidate to the bucket matching its update kind
    pub fn push(&mut self, candidate: UpdateCandidate) {
        self.bucket_mut(candidate.update_type).push(candidate);
    }

    /// Returns the bucket for a kind
    pub fn bucket(&self, kind: UpdateKind) -> &[UpdateCandidate] {
        match kind {
            UpdateKind::Major => &self.major,
            UpdateKind::Minor => &self.minor,
            UpdateKind::Patch => &self.patch,
        }
    }

    fn bucket_mut(&mut self, kind: UpdateKind) -> &mut Vec<UpdateCandidate> {
        match kind {
            UpdateKind::Major => &mut self.major,
            UpdateKind::Minor => &mut self.minor,
            UpdateKind::Patch => &mut self.patch,
        }
    }

    /// Iterates over all candidates: major, then minor, then patch
    pub fn iter(&self) -> impl Iterator<Item = &UpdateCandidate> {
        self.major
            .iter()
            .chain(self.minor.iter())
            .chain(self.patch.iter())
    }

    /// Returns the total number of candidates
    pub fn total(&self) -> usize {
        self.major.len() + self.minor.len() + self.patch.len()
    }

    /// Returns true if there are no candidates
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, kind: UpdateKind) -> UpdateCandidate {
        UpdateCandidate {
            name: name.to_string(),
            current_version: "1.0.0".to_string(),
            latest_version: "2.0.0".to_string(),
            update_type: kind,
            package_json_path: PathBuf::from("/p/package.json"),
            is_dev: false,
        }
    }

    #[test]
    fn test_push_partitions_by_kind() {
        let mut buckets = UpdateBuckets::new();
        buckets.push(candidate("a", UpdateKind::Patch));
        buckets.push(candidate("b", UpdateKind::Major));
        buckets.push(candidate("c", UpdateKind::Patch));

        assert_eq!(buckets.major.len(), 1);
        assert!(buckets.minor.is_empty());
        assert_eq!(buckets.patch.len(), 2);
        assert_eq!(buckets.total(), 3);
        assert_eq!(buckets.bucket(UpdateKind::Patch)[1].name, "c");
    }

    #[test]
    fn test_iter_order() {
        let mut buckets = UpdateBuckets::new();
        buckets.push(candidate("p", UpdateKind::Patch));
        buckets.push(candidate("m", UpdateKind::Minor));
        buckets.push(candidate("M", UpdateKind::Major));

        let names: Vec<_> = buckets.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["M", "m", "p"]);
    }

    #[test]
    fn test_empty() {
        assert!(UpdateBuckets::new().is_empty());
    }

    #[test]
    fn test_candidate_display() {
        let c = candidate("lodash", UpdateKind::Major);
        assert_eq!(c.to_string(), "lodash: 1.0.0 → 2.0.0 (major)");
    }

    #[test]
    fn test_candidate_serde_field_names() {
        let c = candidate("lodash", UpdateKind::Major);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["currentVersion"], "1.0.0");
        assert_eq!(json["updateType"], "major");
        assert_eq!(json["isDev"], false);
    }
}
