//! JSON output formatter for machine processing

use crate::domain::{MigrationRecord, UpdateCandidate};
use crate::manifest::{ScanDiagnostic, WriteResult};
use crate::orchestrator::OrchestratorResult;
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    dry_run: bool,
    root: String,
    summary: JsonSummary,
    updates: JsonBuckets<'a>,
    selected: &'a [UpdateCandidate],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    analyses: &'a [MigrationRecord],
    writes: &'a [WriteResult],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    skipped: &'a [ScanDiagnostic],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

/// Summary statistics
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    manifests: usize,
    dependencies: usize,
    major: usize,
    minor: usize,
    patch: usize,
    selected: usize,
    applied: usize,
    files_modified: usize,
}

/// Classified updates by kind
#[derive(Serialize)]
struct JsonBuckets<'a> {
    major: &'a [UpdateCandidate],
    minor: &'a [UpdateCandidate],
    patch: &'a [UpdateCandidate],
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            dry_run: result.dry_run,
            root: result.root.display().to_string(),
            summary: JsonSummary {
                manifests: result.manifests_scanned,
                dependencies: result.dependencies_checked,
                major: result.buckets.major.len(),
                minor: result.buckets.minor.len(),
                patch: result.buckets.patch.len(),
                selected: result.selected.len(),
                applied: result.apply.total_applied(),
                files_modified: result.apply.files_modified(),
            },
            updates: JsonBuckets {
                major: &result.buckets.major,
                minor: &result.buckets.minor,
                patch: &result.buckets.patch,
            },
            selected: &result.selected,
            analyses: &result.analyses,
            writes: &result.apply.files,
            skipped: &result.diagnostics,
            errors: result.errors.iter().map(|e| e.to_string()).collect(),
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RiskLevel, UpdateBuckets, UpdateKind};
    use crate::manifest::{AppliedUpdate, ApplyReport};
    use crate::orchestrator::OrchestratorError;
    use std::path::PathBuf;

    fn candidate(name: &str, kind: UpdateKind) -> UpdateCandidate {
        UpdateCandidate {
            name: name.to_string(),
            current_version: "1.0.0".to_string(),
            latest_version: "2.0.0".to_string(),
            update_type: kind,
            package_json_path: PathBuf::from("/repo/package.json"),
            is_dev: false,
        }
    }

    fn sample_result() -> OrchestratorResult {
        let mut buckets = UpdateBuckets::new();
        buckets.push(candidate("react", UpdateKind::Major));
        buckets.push(candidate("axios", UpdateKind::Minor));
        let selected = vec![candidate("react", UpdateKind::Major)];

        OrchestratorResult {
            root: PathBuf::from("/repo"),
            dry_run: true,
            manifests_scanned: 1,
            dependencies_checked: 4,
            buckets,
            selected,
            analyses: vec![MigrationRecord {
                package_name: "react".to_string(),
                summary: "New JSX transform required".to_string(),
                breaking_changes: vec![],
                migration_steps: vec![],
                risk_level: RiskLevel::High,
            }],
            apply: ApplyReport {
                files: vec![WriteResult {
                    path: PathBuf::from("/repo/package.json"),
                    applied: vec![AppliedUpdate {
                        name: "react".to_string(),
                        from: "^1.0.0".to_string(),
                        to: "^2.0.0".to_string(),
                        is_dev: false,
                    }],
                    skipped: vec![],
                    file_modified: false,
                    errors: vec![],
                }],
            },
            diagnostics: vec![ScanDiagnostic {
                path: PathBuf::from("/repo/broken/package.json"),
                message: "bad json".to_string(),
            }],
            errors: vec![OrchestratorError::WriteError {
                path: "/repo/package.json".to_string(),
                message: "permission denied".to_string(),
            }],
        }
    }

    fn render(result: &OrchestratorResult) -> serde_json::Value {
        let mut output = Vec::new();
        JsonFormatter::new().format(result, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_json_shape() {
        let json = render(&sample_result());
        assert_eq!(json["dryRun"], true);
        assert_eq!(json["summary"]["major"], 1);
        assert_eq!(json["summary"]["minor"], 1);
        assert_eq!(json["summary"]["patch"], 0);
        assert_eq!(json["summary"]["applied"], 1);
        assert_eq!(json["summary"]["filesModified"], 0);
        assert_eq!(json["updates"]["major"][0]["name"], "react");
        assert_eq!(json["updates"]["major"][0]["updateType"], "major");
        assert_eq!(json["selected"][0]["packageJsonPath"], "/repo/package.json");
        assert_eq!(json["analyses"][0]["riskLevel"], "high");
        assert_eq!(json["writes"][0]["applied"][0]["to"], "^2.0.0");
        assert_eq!(json["writes"][0]["fileModified"], false);
        assert_eq!(json["skipped"][0]["path"], "/repo/broken/package.json");
        assert_eq!(json["skipped"][0]["message"], "bad json");
        assert_eq!(json["errors"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_json_omits_empty_sections() {
        let mut result = sample_result();
        result.analyses.clear();
        result.diagnostics.clear();
        result.errors.clear();
        let json = render(&result);
        assert!(json.get("analyses").is_none());
        assert!(json.get("skipped").is_none());
        assert!(json.get("errors").is_none());
        assert!(json.get("writes").is_some());
    }
}
