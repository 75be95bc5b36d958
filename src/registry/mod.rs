//! Package registry access
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - The resolver and package-info traits the pipeline depends on
//! - The npm registry adapter implementing both

mod client;
mod npm;

pub use client::HttpClient;
pub use npm::{NpmRegistry, NPM_REGISTRY_URL};

use crate::error::RegistryError;
use async_trait::async_trait;

/// Resolves the latest published version of a package
#[async_trait]
pub trait LatestVersionResolver: Send + Sync {
    /// Returns `Ok(None)` when the registry does not know the package
    async fn latest_version(&self, package: &str) -> Result<Option<String>, RegistryError>;
}

/// Looks up descriptive links for a package
#[async_trait]
pub trait PackageInfoSource: Send + Sync {
    /// Fetch repository and homepage links
    async fn package_info(&self, package: &str) -> Result<PackageInfo, RegistryError>;
}

/// Repository and homepage links published for a package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageInfo {
    pub repository: Option<String>,
    pub homepage: Option<String>,
}

impl PackageInfo {
    /// Create package info, normalizing a git-style repository URL
    pub fn new(repository: Option<String>, homepage: Option<String>) -> Self {
        Self {
            repository: repository.map(|r| normalize_repository_url(&r)),
            homepage,
        }
    }

    /// Returns true if neither link is known
    pub fn is_empty(&self) -> bool {
        self.repository.is_none() && self.homepage.is_none()
    }

    /// Candidate locations for release notes, in lookup order
    pub fn changelog_sources(&self) -> Vec<String> {
        let mut sources = Vec::new();
        if let Some(repo) = &self.repository {
            sources.push(format!("{}/releases", repo));
            sources.push(format!("{}/blob/main/CHANGELOG.md", repo));
            sources.push(format!("{}/blob/master/CHANGELOG.md", repo));
        }
        if let Some(homepage) = &self.homepage {
            let homepage = homepage.trim_end_matches('/');
            sources.push(format!("{}/releases", homepage));
            sources.push(format!("{}/changelog", homepage));
        }
        sources
    }
}

/// Turn `git+https://host/repo.git` into `https://host/repo`
fn normalize_repository_url(url: &str) -> String {
    let url = url.trim();
    let url = url.strip_prefix("git+").unwrap_or(url);
    let url = match url.strip_prefix("git://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    };
    url.trim_end_matches('/')
        .trim_end_matches(".git")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_repository_url() {
        assert_eq!(
            normalize_repository_url("git+https://github.com/lodash/lodash.git"),
            "https://github.com/lodash/lodash"
        );
        assert_eq!(
            normalize_repository_url("git://github.com/a/b.git"),
            "https://github.com/a/b"
        );
        assert_eq!(
            normalize_repository_url("https://github.com/a/b"),
            "https://github.com/a/b"
        );
    }

    #[test]
    fn test_changelog_sources_order() {
        let info = PackageInfo::new(
            Some("git+https://github.com/a/b.git".to_string()),
            Some("https://b.dev/".to_string()),
        );
        assert_eq!(
            info.changelog_sources(),
            vec![
                "https://github.com/a/b/releases",
                "https://github.com/a/b/blob/main/CHANGELOG.md",
                "https://github.com/a/b/blob/master/CHANGELOG.md",
                "https://b.dev/releases",
                "https://b.dev/changelog",
            ]
        );
    }

    #[test]
    fn test_empty_package_info() {
        let info = PackageInfo::default();
        assert!(info.is_empty());
        assert!(info.changelog_sources().is_empty());
    }
}
