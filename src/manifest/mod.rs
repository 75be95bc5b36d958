//! Manifest file discovery, parsing and rewriting
//!
//! This module provides functionality to:
//! - Find package.json files below a root directory (monorepo aware)
//! - Parse dependencies and devDependencies into normalized entries
//! - Apply accepted updates while preserving range operators

mod package_json;
mod scanner;
mod updater;

pub use package_json::{
    section_key, set_dependency_version, to_manifest_string, ManifestFile, DEPENDENCIES_KEY,
    DEV_DEPENDENCIES_KEY, MANIFEST_FILENAME,
};
pub use scanner::{scan_manifests, ScanDiagnostic, ScanOptions, ScanReport, DEPENDENCY_CACHE_DIR};
pub use updater::{write_manifest, AppliedUpdate, ApplyReport, ManifestUpdater, WriteResult};
