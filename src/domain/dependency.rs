//! Dependency information structures

use super::VersionSpec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A single declared dependency of a package.json file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Package name
    pub name: String,
    /// Declared version specification
    pub version_spec: VersionSpec,
    /// Manifest that declares this dependency
    pub manifest_path: PathBuf,
    /// Whether this is declared under devDependencies
    pub is_dev: bool,
}

impl Dependency {
    /// Creates a new dependency
    pub fn new(
        name: impl Into<String>,
        version_spec: VersionSpec,
        manifest_path: impl Into<PathBuf>,
        is_dev: bool,
    ) -> Self {
        Self {
            name: name.into(),
            version_spec,
            manifest_path: manifest_path.into(),
            is_dev,
        }
    }

    /// Creates a new production dependency
    pub fn production(
        name: impl Into<String>,
        declared: &str,
        manifest_path: impl Into<PathBuf>,
    ) -> Self {
        Self::new(name, VersionSpec::parse(declared), manifest_path, false)
    }

    /// Creates a new development dependency
    pub fn development(
        name: impl Into<String>,
        declared: &str,
        manifest_path: impl Into<PathBuf>,
    ) -> Self {
        Self::new(name, VersionSpec::parse(declared), manifest_path, true)
    }

    /// Returns the declared version without its range operator
    pub fn version(&self) -> &str {
        &self.version_spec.version
    }

    /// Returns the manifest path
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dev_marker = if self.is_dev { " (dev)" } else { "" };
        write!(f, "{}@{}{}", self.name, self.version_spec, dev_marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_production() {
        let dep = Dependency::production("react", "^18.2.0", "/app/package.json");
        assert_eq!(dep.name, "react");
        assert_eq!(dep.version(), "18.2.0");
        assert!(!dep.is_dev);
        assert_eq!(dep.manifest_path(), Path::new("/app/package.json"));
    }

    #[test]
    fn test_dependency_development() {
        let dep = Dependency::development("jest", "~29.0.0", "/app/package.json");
        assert!(dep.is_dev);
        assert_eq!(dep.version(), "29.0.0");
    }

    #[test]
    fn test_dependency_display() {
        let dep = Dependency::production("lodash", "^1.2.3", "/p/package.json");
        assert_eq!(format!("{}", dep), "lodash@^1.2.3");

        let dep = Dependency::development("jest", "^1.2.3", "/p/package.json");
        assert_eq!(format!("{}", dep), "jest@^1.2.3 (dev)");
    }

    #[test]
    fn test_serde_dependency() {
        let dep = Dependency::production("lodash", "^4.17.0", "/p/package.json");
        let json = serde_json::to_string(&dep).unwrap();
        let parsed: Dependency = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, dep);
    }
}
