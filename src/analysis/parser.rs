//! Free-text completion parser
//!
//! Turns an unstructured model completion into a [`MigrationRecord`] with a
//! line-oriented section state machine. Parsing never fails: unknown shapes
//! degrade to the fallback summary and medium risk.

use crate::domain::{MigrationRecord, RiskLevel};
use regex::Regex;
use std::sync::LazyLock;

/// Summary lines must be longer than this to be kept
const MIN_SUMMARY_LEN: usize = 10;

/// `-`, `*` or `<digits>.` followed by optional whitespace
static LIST_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*]|\d+\.)\s*").unwrap());

/// Section the parser is currently collecting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Summary,
    Breaking,
    Migration,
    Risk,
}

/// Heading detection on a lowercased line, first match wins
fn detect_heading(lower: &str) -> Option<Section> {
    if lower.contains("breaking") {
        Some(Section::Breaking)
    } else if lower.contains("summary") || lower.contains("changes") {
        Some(Section::Summary)
    } else if lower.contains("migration") || lower.contains("steps") {
        Some(Section::Migration)
    } else if lower.contains("risk") {
        Some(Section::Risk)
    } else {
        None
    }
}

/// Risk level named on a risk heading line
fn risk_from_heading(lower: &str) -> RiskLevel {
    if lower.contains("high") {
        RiskLevel::High
    } else if lower.contains("low") {
        RiskLevel::Low
    } else {
        RiskLevel::Medium
    }
}

/// Returns the item text if `line` is a list item
fn strip_list_marker(line: &str) -> Option<&str> {
    LIST_MARKER_RE.find(line).map(|m| &line[m.end()..])
}

/// Summary used when the completion yields none
pub fn default_summary(package: &str) -> String {
    format!("Upgrade {} with standard version bump considerations", package)
}

/// Parse a model completion into a migration record
pub fn parse_migration_text(package: &str, text: &str) -> MigrationRecord {
    let mut section = Section::None;
    let mut summary: Option<String> = None;
    let mut breaking_changes = Vec::new();
    let mut migration_steps = Vec::new();
    let mut risk_level = RiskLevel::Medium;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let lower = line.to_lowercase();

        if let Some(heading) = detect_heading(&lower) {
            if heading == Section::Risk {
                risk_level = risk_from_heading(&lower);
            }
            section = heading;
            continue;
        }

        match (strip_list_marker(line), section) {
            (Some(item), Section::Breaking) => breaking_changes.push(item.to_string()),
            (Some(item), Section::Migration) => migration_steps.push(item.to_string()),
            (None, Section::Summary) if line.chars().count() > MIN_SUMMARY_LEN => {
                summary = Some(line.to_string());
            }
            _ => {}
        }
    }

    MigrationRecord {
        package_name: package.to_string(),
        summary: summary.unwrap_or_else(|| default_summary(package)),
        breaking_changes,
        migration_steps,
        risk_level,
    }
}
