//! package.json documents
//!
//! Handles:
//! - dependencies
//! - devDependencies
//!
//! The parsed document is kept as a `serde_json::Value` so an update can
//! re-serialize the whole file with its original key order.

use crate::domain::{Dependency, VersionSpec};
use crate::error::ManifestError;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Manifest filename scanned for by default
pub const MANIFEST_FILENAME: &str = "package.json";

/// Key of the runtime dependency map
pub const DEPENDENCIES_KEY: &str = "dependencies";

/// Key of the development dependency map
pub const DEV_DEPENDENCIES_KEY: &str = "devDependencies";

/// Returns the document key holding dependencies of the given group
pub fn section_key(is_dev: bool) -> &'static str {
    if is_dev {
        DEV_DEPENDENCIES_KEY
    } else {
        DEPENDENCIES_KEY
    }
}

/// A parsed package.json file
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestFile {
    /// Absolute path to the manifest file
    pub path: PathBuf,
    /// The full parsed document
    pub document: Value,
    /// Entries of `dependencies`, in document order
    pub dependencies: Vec<Dependency>,
    /// Entries of `devDependencies`, in document order
    pub dev_dependencies: Vec<Dependency>,
}

impl ManifestFile {
    /// Parse a manifest from its content
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, ManifestError> {
        let path = path.into();
        let document: Value = serde_json::from_str(content)
            .map_err(|e| ManifestError::json_parse_error(&path, e.to_string()))?;

        let dependencies = collect_section(&document, &path, false);
        let dev_dependencies = collect_section(&document, &path, true);

        Ok(Self {
            path,
            document,
            dependencies,
            dev_dependencies,
        })
    }

    /// Read and parse a manifest from disk
    pub fn read(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ManifestError::read_error(path, e))?;
        Self::parse(path, &content)
    }

    /// Iterates over dependencies, then dev-dependencies
    pub fn all_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().chain(self.dev_dependencies.iter())
    }

    /// Returns the total number of declared dependencies
    pub fn dependency_count(&self) -> usize {
        self.dependencies.len() + self.dev_dependencies.len()
    }
}

fn collect_section(document: &Value, path: &Path, is_dev: bool) -> Vec<Dependency> {
    let key = section_key(is_dev);
    let Some(section) = document.get(key).and_then(Value::as_object) else {
        return Vec::new();
    };

    section
        .iter()
        .filter_map(|(name, value)| match value.as_str() {
            Some(declared) => Some(Dependency::new(
                name.clone(),
                VersionSpec::parse(declared),
                path,
                is_dev,
            )),
            None => {
                debug!(
                    "Ignoring non-string {} entry '{}' in {}",
                    key,
                    name,
                    path.display()
                );
                None
            }
        })
        .collect()
}

/// Set a dependency entry to `new_version`, keeping its range operator.
///
/// Returns the previous and new declared values, or `None` when the entry is
/// absent or not a string.
pub fn set_dependency_version(
    document: &mut Value,
    package: &str,
    is_dev: bool,
    new_version: &str,
) -> Option<(String, String)> {
    let section: &mut Map<String, Value> = document
        .get_mut(section_key(is_dev))
        .and_then(Value::as_object_mut)?;
    let entry = section.get_mut(package)?;
    let old = entry.as_str()?.to_string();

    let updated = VersionSpec::parse(old.as_str()).format_updated(new_version);
    *entry = Value::String(updated.clone());
    Some((old, updated))
}

/// Serialize a document with 2-space indentation and one trailing newline
pub fn to_manifest_string(document: &Value) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(document)?;
    out.push('\n');
    Ok(out)
}
