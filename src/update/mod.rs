//! Update detection for dependencies
//!
//! This module provides:
//! - Semver classification of (current, latest) version pairs
//! - The aggregator that resolves and classifies every declared dependency
//! - Selection filters for accepted updates

mod classify;
mod filter;

pub use classify::{classify, coerce};
pub use filter::UpdateFilter;

use crate::domain::{Dependency, UpdateBuckets, UpdateCandidate};
use crate::manifest::ManifestFile;
use crate::progress::Progress;
use crate::registry::LatestVersionResolver;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::debug;

/// Default number of in-flight resolver requests (sequential)
pub const DEFAULT_CONCURRENCY: usize = 1;

/// Resolves and classifies every dependency of a set of manifests
pub struct Aggregator {
    resolver: Arc<dyn LatestVersionResolver>,
    concurrency: usize,
}

impl Aggregator {
    /// Create an aggregator that queries packages one at a time
    pub fn new(resolver: Arc<dyn LatestVersionResolver>) -> Self {
        Self {
            resolver,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Allow up to `concurrency` resolver requests in flight
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Returns the configured concurrency limit
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Classify every dependency of every manifest into update buckets
    ///
    /// Order within a bucket follows manifest order, then dependencies, then
    /// devDependencies. A package whose latest version cannot be resolved is
    /// skipped without affecting the others.
    pub async fn aggregate(&self, manifests: &[ManifestFile], progress: &Progress) -> UpdateBuckets {
        let dependencies: Vec<&Dependency> =
            manifests.iter().flat_map(|m| m.all_dependencies()).collect();

        let checked: Vec<Option<UpdateCandidate>> = stream::iter(dependencies)
            .map(|dep| async move {
                progress.set_message(&format!("Checking {}", dep.name));
                let candidate = self.check(dep).await;
                progress.inc();
                candidate
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut buckets = UpdateBuckets::new();
        for candidate in checked.into_iter().flatten() {
            buckets.push(candidate);
        }
        buckets
    }

    /// Resolve and classify a single dependency
    pub async fn check(&self, dependency: &Dependency) -> Option<UpdateCandidate> {
        let latest = match self.resolver.latest_version(&dependency.name).await {
            Ok(Some(version)) => version,
            Ok(None) => {
                debug!("No published version for {}", dependency.name);
                return None;
            }
            Err(e) => {
                debug!("Skipping {}: {}", dependency.name, e);
                return None;
            }
        };

        let update_type = classify(dependency.version(), &latest)?;

        Some(UpdateCandidate {
            name: dependency.name.clone(),
            current_version: dependency.version().to_string(),
            latest_version: latest,
            update_type,
            package_json_path: dependency.manifest_path.clone(),
            is_dev: dependency.is_dev,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UpdateKind;
    use crate::error::RegistryError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeResolver {
        versions: HashMap<&'static str, &'static str>,
        calls: AtomicUsize,
    }

    impl FakeResolver {
        fn new(versions: &[(&'static str, &'static str)]) -> Arc<Self> {
            Arc::new(Self {
                versions: versions.iter().copied().collect(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl LatestVersionResolver for FakeResolver {
        async fn latest_version(&self, package: &str) -> Result<Option<String>, RegistryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match package {
                "broken" => Err(RegistryError::network_error(package, "fake", "connection reset")),
                _ => Ok(self.versions.get(package).map(|v| v.to_string())),
            }
        }
    }

    fn manifest(path: &str, content: &str) -> ManifestFile {
        ManifestFile::parse(path, content).unwrap()
    }

    #[tokio::test]
    async fn test_aggregate_partitions_by_kind() {
        let resolver = FakeResolver::new(&[
            ("react", "19.0.0"),
            ("axios", "1.7.0"),
            ("lodash", "4.17.21"),
            ("zod", "3.0.0"),
        ]);
        let manifests = vec![manifest(
            "/app/package.json",
            r#"{
                "dependencies": {"react": "^18.2.0", "axios": "^1.6.0", "zod": "3.0.0"},
                "devDependencies": {"lodash": "~4.17.0"}
            }"#,
        )];

        let buckets = Aggregator::new(resolver)
            .aggregate(&manifests, &Progress::disabled())
            .await;

        assert_eq!(buckets.major.len(), 1);
        assert_eq!(buckets.major[0].name, "react");
        assert_eq!(buckets.minor[0].name, "axios");
        assert_eq!(buckets.patch[0].name, "lodash");
        assert!(buckets.patch[0].is_dev);
        assert_eq!(buckets.patch[0].current_version, "4.17.0");
        assert_eq!(buckets.total(), 3);
    }

    #[tokio::test]
    async fn test_aggregate_isolates_resolver_failures() {
        let resolver = FakeResolver::new(&[("after", "2.0.0"), ("before", "2.0.0")]);
        let manifests = vec![manifest(
            "/app/package.json",
            r#"{"dependencies": {"before": "1.0.0", "broken": "1.0.0", "unknown": "1.0.0", "after": "1.0.0"}}"#,
        )];

        let buckets = Aggregator::new(resolver.clone())
            .aggregate(&manifests, &Progress::disabled())
            .await;

        let names: Vec<_> = buckets.major.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["before", "after"]);
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_aggregate_keeps_traversal_order() {
        let resolver = FakeResolver::new(&[("a", "2.0.0"), ("b", "2.0.0"), ("c", "2.0.0")]);
        let manifests = vec![
            manifest(
                "/one/package.json",
                r#"{"devDependencies": {"c": "1.0.0"}, "dependencies": {"b": "1.0.0"}}"#,
            ),
            manifest("/two/package.json", r#"{"dependencies": {"a": "1.0.0"}}"#),
        ];

        let buckets = Aggregator::new(resolver)
            .with_concurrency(3)
            .aggregate(&manifests, &Progress::disabled())
            .await;

        let names: Vec<_> = buckets.major.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn test_aggregate_same_package_in_two_manifests() {
        let resolver = FakeResolver::new(&[("lodash", "4.17.21")]);
        let manifests = vec![
            manifest("/a/package.json", r#"{"dependencies": {"lodash": "^4.17.0"}}"#),
            manifest("/b/package.json", r#"{"dependencies": {"lodash": "^3.0.0"}}"#),
        ];

        let buckets = Aggregator::new(resolver)
            .aggregate(&manifests, &Progress::disabled())
            .await;

        assert_eq!(buckets.patch.len(), 1);
        assert_eq!(buckets.major.len(), 1);
        assert_eq!(buckets.patch[0].update_type, UpdateKind::Patch);
        assert_eq!(
            buckets.patch[0].package_json_path,
            std::path::PathBuf::from("/a/package.json")
        );
        assert_eq!(
            buckets.major[0].package_json_path,
            std::path::PathBuf::from("/b/package.json")
        );
    }

    #[tokio::test]
    async fn test_aggregate_drops_uncoercible_and_current() {
        let resolver = FakeResolver::new(&[("tagged", "2.0.0"), ("current", "1.0.0")]);
        let manifests = vec![manifest(
            "/app/package.json",
            r#"{"dependencies": {"tagged": "latest", "current": "^1.0.0"}}"#,
        )];

        let buckets = Aggregator::new(resolver)
            .aggregate(&manifests, &Progress::disabled())
            .await;
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_with_concurrency_minimum() {
        let resolver = FakeResolver::new(&[]);
        assert_eq!(Aggregator::new(resolver.clone()).concurrency(), 1);
        assert_eq!(Aggregator::new(resolver).with_concurrency(0).concurrency(), 1);
    }
}
