//! Update selection
//!
//! This module provides the UpdateFilter struct that picks which
//! classified candidates are accepted for analysis and rewriting.

use crate::domain::{UpdateBuckets, UpdateCandidate, UpdateKind};

/// Filter configuration for selecting candidates
#[derive(Debug, Clone)]
pub struct UpdateFilter {
    /// Packages to exclude from updates
    pub exclude: Vec<String>,
    /// If non-empty, only update these packages
    pub only: Vec<String>,
    /// Update kinds to accept (empty means all)
    pub levels: Vec<UpdateKind>,
    /// Whether devDependencies are accepted
    pub include_dev: bool,
}

impl Default for UpdateFilter {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            only: Vec::new(),
            levels: Vec::new(),
            include_dev: true,
        }
    }
}

impl UpdateFilter {
    /// Create a new UpdateFilter with default settings (accept all)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set packages to exclude
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Set packages to include (only list)
    pub fn with_only(mut self, only: Vec<String>) -> Self {
        self.only = only;
        self
    }

    /// Set accepted update kinds
    pub fn with_levels(mut self, levels: Vec<UpdateKind>) -> Self {
        self.levels = levels;
        self
    }

    /// Set whether devDependencies are accepted
    pub fn with_include_dev(mut self, include: bool) -> Self {
        self.include_dev = include;
        self
    }

    /// Check if a package should be processed based on name filters
    pub fn should_process_package(&self, name: &str) -> bool {
        // If --only is specified, only process those packages
        if !self.only.is_empty() {
            return self.only.iter().any(|p| p == name);
        }
        !self.exclude.iter().any(|p| p == name)
    }

    /// Check if an update kind is accepted
    pub fn should_process_level(&self, kind: UpdateKind) -> bool {
        self.levels.is_empty() || self.levels.contains(&kind)
    }

    /// Check if a candidate is accepted
    pub fn accepts(&self, candidate: &UpdateCandidate) -> bool {
        (self.include_dev || !candidate.is_dev)
            && self.should_process_level(candidate.update_type)
            && self.should_process_package(&candidate.name)
    }

    /// Select accepted candidates: major, then minor, then patch
    pub fn select(&self, buckets: &UpdateBuckets) -> Vec<UpdateCandidate> {
        buckets.iter().filter(|c| self.accepts(c)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn candidate(name: &str, kind: UpdateKind, is_dev: bool) -> UpdateCandidate {
        UpdateCandidate {
            name: name.to_string(),
            current_version: "1.0.0".to_string(),
            latest_version: "2.0.0".to_string(),
            update_type: kind,
            package_json_path: PathBuf::from("/p/package.json"),
            is_dev,
        }
    }

    fn sample_buckets() -> UpdateBuckets {
        let mut buckets = UpdateBuckets::new();
        buckets.push(candidate("react", UpdateKind::Major, false));
        buckets.push(candidate("jest", UpdateKind::Minor, true));
        buckets.push(candidate("lodash", UpdateKind::Patch, false));
        buckets
    }

    #[test]
    fn test_new_filter_accepts_all() {
        let filter = UpdateFilter::new();
        assert!(filter.include_dev);
        assert_eq!(filter.select(&sample_buckets()).len(), 3);
    }

    #[test]
    fn test_should_process_package_with_exclude() {
        let filter = UpdateFilter::new().with_exclude(vec!["foo".to_string()]);
        assert!(!filter.should_process_package("foo"));
        assert!(filter.should_process_package("bar"));
    }

    #[test]
    fn test_should_process_package_only_takes_precedence() {
        let filter = UpdateFilter::new()
            .with_only(vec!["foo".to_string()])
            .with_exclude(vec!["foo".to_string()]);
        assert!(filter.should_process_package("foo"));
        assert!(!filter.should_process_package("bar"));
    }

    #[test]
    fn test_select_by_level() {
        let filter = UpdateFilter::new().with_levels(vec![UpdateKind::Minor, UpdateKind::Patch]);
        let names: Vec<_> = filter
            .select(&sample_buckets())
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["jest", "lodash"]);
    }

    #[test]
    fn test_select_production_only() {
        let filter = UpdateFilter::new().with_include_dev(false);
        let names: Vec<_> = filter
            .select(&sample_buckets())
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["react", "lodash"]);
    }

    #[test]
    fn test_select_only_list() {
        let filter = UpdateFilter::new().with_only(vec!["lodash".to_string()]);
        let selected = filter.select(&sample_buckets());
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "lodash");
    }

    #[test]
    fn test_select_can_be_empty() {
        let filter = UpdateFilter::new().with_only(vec!["missing".to_string()]);
        assert!(filter.select(&sample_buckets()).is_empty());
    }
}
