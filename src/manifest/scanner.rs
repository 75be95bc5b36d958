//! Recursive manifest discovery
//!
//! Features:
//! - Finds every package.json below a root, for monorepos with nested packages
//! - Skips dependency caches (node_modules) and hidden directories
//! - Unreadable directories and broken manifests are reported, never fatal

use super::package_json::{ManifestFile, MANIFEST_FILENAME};
use crate::error::ManifestError;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory name excluded by default
pub const DEPENDENCY_CACHE_DIR: &str = "node_modules";

/// Configuration for a scan pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Filename treated as a manifest
    pub manifest_filename: String,
    /// Directory names never descended into
    pub excluded_dirs: Vec<String>,
    /// Skip directories whose name starts with `.`
    pub skip_hidden: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            manifest_filename: MANIFEST_FILENAME.to_string(),
            excluded_dirs: vec![DEPENDENCY_CACHE_DIR.to_string()],
            skip_hidden: true,
        }
    }
}

impl ScanOptions {
    /// Create options with the default exclusions
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory name to the exclusion list
    pub fn with_excluded_dir(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.excluded_dirs.contains(&name) {
            self.excluded_dirs.push(name);
        }
        self
    }

    /// Set whether hidden directories are skipped
    pub fn with_skip_hidden(mut self, skip: bool) -> Self {
        self.skip_hidden = skip;
        self
    }

    /// Check whether a directory with this name should be skipped
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        if self.skip_hidden && name.starts_with('.') {
            return true;
        }
        self.excluded_dirs.iter().any(|d| d == name)
    }

    /// Check whether a file with this name is a manifest
    pub fn is_manifest(&self, name: &str) -> bool {
        name == self.manifest_filename
    }
}

/// A file or directory skipped during the scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanDiagnostic {
    /// Path that could not be processed
    pub path: PathBuf,
    /// Why it was skipped
    pub message: String,
}

impl From<ManifestError> for ScanDiagnostic {
    fn from(error: ManifestError) -> Self {
        Self {
            path: error.path().to_path_buf(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for ScanDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Result of a scan pass
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Successfully parsed manifests, in traversal order
    pub manifests: Vec<ManifestFile>,
    /// Skipped files and directories
    pub diagnostics: Vec<ScanDiagnostic>,
}

impl ScanReport {
    /// Returns true if no manifest was found
    pub fn is_empty(&self) -> bool {
        self.manifests.is_empty()
    }

    /// Returns the number of declared dependencies across all manifests
    pub fn dependency_count(&self) -> usize {
        self.manifests.iter().map(|m| m.dependency_count()).sum()
    }

    fn skip(&mut self, error: ManifestError) {
        warn!("{}", error);
        self.diagnostics.push(error.into());
    }
}

/// Find and parse every manifest below `root`
///
/// Directories are walked with an explicit worklist. Entries of a directory
/// are visited in name order; its files come before its subdirectories.
/// Symbolic links are not followed.
pub fn scan_manifests(root: &Path, options: &ScanOptions) -> ScanReport {
    let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
    let mut report = ScanReport::default();
    let mut pending = vec![root];

    while let Some(dir) = pending.pop() {
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                report.skip(ManifestError::directory_error(&dir, e));
                continue;
            }
        };

        let mut listed = Vec::new();
        for entry in entries {
            match entry.and_then(|e| Ok((e.file_name(), e.path(), e.file_type()?))) {
                Ok(item) => listed.push(item),
                Err(e) => report.skip(ManifestError::directory_error(&dir, e)),
            }
        }
        listed.sort_by(|a, b| a.0.cmp(&b.0));

        let mut subdirs = Vec::new();
        for (name, path, file_type) in listed {
            let name = name.to_string_lossy();
            if file_type.is_dir() {
                if options.is_excluded_dir(&name) {
                    debug!("Skipping directory {}", path.display());
                } else {
                    subdirs.push(path);
                }
            } else if file_type.is_file() && options.is_manifest(&name) {
                match ManifestFile::read(&path) {
                    Ok(manifest) => {
                        debug!(
                            "Found {} with {} dependencies",
                            path.display(),
                            manifest.dependency_count()
                        );
                        report.manifests.push(manifest);
                    }
                    Err(e) => report.skip(e),
                }
            }
        }

        // Reversed so the first subdirectory is popped next.
        pending.extend(subdirs.into_iter().rev());
    }

    report
}
