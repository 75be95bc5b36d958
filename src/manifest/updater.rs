//! Manifest file writing and update operations
//!
//! This module provides:
//! - ManifestUpdater for applying accepted updates to package.json files
//! - Dry-run mode support (no actual file modifications)
//! - Range operator preservation when updating versions
//! - Per-file failure isolation and atomic rewrites

use super::package_json::{section_key, set_dependency_version, to_manifest_string, ManifestFile};
use crate::domain::UpdateCandidate;
use crate::error::ManifestError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Applies accepted updates to manifest files
pub struct ManifestUpdater {
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
}

/// One dependency entry rewritten in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedUpdate {
    /// Package name
    pub name: String,
    /// Declared value before the update
    pub from: String,
    /// Declared value after the update
    pub to: String,
    /// Whether the entry is in devDependencies
    pub is_dev: bool,
}

/// Result of applying updates to one manifest file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteResult {
    /// Path to the manifest file
    pub path: PathBuf,
    /// Entries rewritten
    pub applied: Vec<AppliedUpdate>,
    /// Packages that could not be applied to this file
    pub skipped: Vec<String>,
    /// Whether the file was actually written
    pub file_modified: bool,
    /// File-level failures
    pub errors: Vec<String>,
}

impl WriteResult {
    fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            applied: Vec::new(),
            skipped: Vec::new(),
            file_modified: false,
            errors: Vec::new(),
        }
    }

    /// Returns true if any updates were successfully applied
    pub fn has_updates(&self) -> bool {
        !self.applied.is_empty()
    }

    /// Returns true if any errors occurred
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Result of applying a batch of updates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// One entry per manifest touched, in first-appearance order
    pub files: Vec<WriteResult>,
}

impl ApplyReport {
    /// Returns the number of entries rewritten across all files
    pub fn total_applied(&self) -> usize {
        self.files.iter().map(|f| f.applied.len()).sum()
    }

    /// Returns the number of files written
    pub fn files_modified(&self) -> usize {
        self.files.iter().filter(|f| f.file_modified).count()
    }

    /// Returns true if any file failed
    pub fn has_errors(&self) -> bool {
        self.files.iter().any(|f| f.has_errors())
    }
}

impl ManifestUpdater {
    /// Create a new ManifestUpdater
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Create a ManifestUpdater in dry-run mode
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    /// Check if this updater is in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Apply accepted updates, grouped by owning manifest
    ///
    /// A failure on one file is recorded on its `WriteResult` and the
    /// remaining files are still processed.
    pub fn apply(&self, updates: &[UpdateCandidate]) -> ApplyReport {
        let mut report = ApplyReport::default();

        for (path, group) in group_by_manifest(updates) {
            let result = match self.apply_file(path, &group) {
                Ok(result) => result,
                Err(e) => {
                    warn!("{}", e);
                    let mut result = WriteResult::new(path);
                    result.skipped = group.iter().map(|u| u.name.clone()).collect();
                    result.errors.push(e.to_string());
                    result
                }
            };
            report.files.push(result);
        }

        report
    }

    /// Apply updates to a single manifest
    ///
    /// The file is re-read so edits made since the scan are not clobbered.
    pub fn apply_file(
        &self,
        path: &Path,
        updates: &[&UpdateCandidate],
    ) -> Result<WriteResult, ManifestError> {
        let mut manifest = ManifestFile::read(path)?;
        let mut result = WriteResult::new(path);

        for update in updates {
            match set_dependency_version(
                &mut manifest.document,
                &update.name,
                update.is_dev,
                &update.latest_version,
            ) {
                Some((from, to)) => {
                    info!("Updated {} in {}: {} → {}", update.name, path.display(), from, to);
                    result.applied.push(AppliedUpdate {
                        name: update.name.clone(),
                        from,
                        to,
                        is_dev: update.is_dev,
                    });
                }
                None => {
                    let missing =
                        ManifestError::entry_not_found(path, &update.name, section_key(update.is_dev));
                    warn!("Skipping update: {}", missing);
                    result.skipped.push(update.name.clone());
                }
            }
        }

        if result.has_updates() && !self.dry_run {
            let content = to_manifest_string(&manifest.document)
                .map_err(|e| ManifestError::json_parse_error(path, e.to_string()))?;
            write_manifest(path, &content)?;
            result.file_modified = true;
        }

        Ok(result)
    }
}

impl Default for ManifestUpdater {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Group updates by manifest path, keeping first-appearance order
fn group_by_manifest(updates: &[UpdateCandidate]) -> Vec<(&Path, Vec<&UpdateCandidate>)> {
    let mut groups: Vec<(&Path, Vec<&UpdateCandidate>)> = Vec::new();
    for update in updates {
        let path = update.package_json_path.as_path();
        match groups.iter_mut().find(|(p, _)| *p == path) {
            Some((_, group)) => group.push(update),
            None => groups.push((path, vec![update])),
        }
    }
    groups
}

/// Replace a manifest's content atomically
///
/// The content goes to a sibling temporary file which is then renamed over
/// the target, so an interrupted run never leaves a truncated manifest.
pub fn write_manifest(path: &Path, content: &str) -> Result<(), ManifestError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{}.ai-migrator.tmp", file_name));

    fs::write(&tmp, content).map_err(|e| ManifestError::write_error(path, e))?;
    if let Ok(meta) = fs::metadata(path) {
        if let Err(e) = fs::set_permissions(&tmp, meta.permissions()) {
            debug!("Could not copy permissions to {}: {}", tmp.display(), e);
        }
    }
    fs::rename(&tmp, path).map_err(|e| {
        if let Err(cleanup) = fs::remove_file(&tmp) {
            debug!("Could not remove {}: {}", tmp.display(), cleanup);
        }
        ManifestError::write_error(path, e)
    })
}
