//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Available updates grouped into major / minor / patch sections
//! - Migration assessments with risk coloring
//! - Per-file rewrite results and collected errors
//! - A closing summary (the only output in quiet mode)

use crate::domain::{MigrationRecord, RiskLevel, UpdateCandidate, UpdateKind};
use crate::manifest::WriteResult;
use crate::orchestrator::OrchestratorResult;
use crate::output::{display_path, OutputFormatter, Verbosity};
use colored::{ColoredString, Colorize};
use std::io::Write;
use std::path::Path;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether this is a dry-run
    dry_run: bool,
    /// Whether to use colors
    color: bool,
}

/// Section heading for an update kind
fn section_title(kind: UpdateKind) -> &'static str {
    match kind {
        UpdateKind::Major => "🔴 Major Updates",
        UpdateKind::Minor => "🟡 Minor Updates",
        UpdateKind::Patch => "🟢 Patch Updates",
    }
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity, dry_run: bool) -> Self {
        Self::with_color(verbosity, dry_run, true)
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, dry_run: bool, color: bool) -> Self {
        Self {
            verbosity,
            dry_run,
            color,
        }
    }

    /// Apply `style` only when colors are enabled
    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self) -> String {
        if self.dry_run {
            format!("{} ", self.paint("(dry-run)", |s| s.cyan()))
        } else {
            String::new()
        }
    }

    fn risk_label(&self, risk: RiskLevel) -> String {
        let label = format!("{} risk", risk);
        match risk {
            RiskLevel::High => self.paint(&label, |s| s.red().bold()),
            RiskLevel::Medium => self.paint(&label, |s| s.yellow()),
            RiskLevel::Low => self.paint(&label, |s| s.green()),
        }
    }

    /// Write one bucket section; empty buckets are omitted
    fn format_bucket(
        &self,
        root: &Path,
        kind: UpdateKind,
        candidates: &[UpdateCandidate],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if candidates.is_empty() {
            return Ok(());
        }

        let title = format!("{} ({})", section_title(kind), candidates.len());
        writeln!(writer, "{}", self.paint(&title, |s| s.bold()))?;

        let width = candidates
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0)
            .max(20);

        for candidate in candidates {
            let arrow = if self.color { "→" } else { "->" };
            write!(
                writer,
                "  {:width$} {} {} {}",
                candidate.name,
                self.paint(&candidate.current_version, |s| s.dimmed()),
                self.paint(arrow, |s| s.dimmed()),
                self.paint(&candidate.latest_version, |s| s.bright_white().bold()),
                width = width
            )?;
            if candidate.is_dev {
                write!(writer, " {}", self.paint("(dev)", |s| s.dimmed()))?;
            }
            if self.verbosity == Verbosity::Verbose {
                let path = display_path(root, &candidate.package_json_path);
                write!(writer, " {}", self.paint(&path, |s| s.dimmed()))?;
            }
            writeln!(writer)?;
        }
        writeln!(writer)
    }

    fn format_analysis(&self, record: &MigrationRecord, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            writer,
            "  {} [{}]",
            self.paint(&record.package_name, |s| s.bold()),
            self.risk_label(record.risk_level)
        )?;
        writeln!(writer, "    {}", record.summary)?;

        if !record.breaking_changes.is_empty() {
            writeln!(writer, "    {}", self.paint("Breaking changes:", |s| s.red()))?;
            for change in &record.breaking_changes {
                writeln!(writer, "      - {}", change)?;
            }
        }
        if !record.migration_steps.is_empty() {
            writeln!(writer, "    {}", self.paint("Migration steps:", |s| s.cyan()))?;
            for (i, step) in record.migration_steps.iter().enumerate() {
                writeln!(writer, "      {}. {}", i + 1, step)?;
            }
        }
        writeln!(writer)
    }

    fn format_write_result(
        &self,
        root: &Path,
        file: &WriteResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let path = display_path(root, &file.path);
        let status = if file.has_errors() {
            self.paint("✗", |s| s.red())
        } else if file.file_modified || (self.dry_run && file.has_updates()) {
            self.paint("✓", |s| s.green())
        } else {
            self.paint("-", |s| s.dimmed())
        };

        writeln!(
            writer,
            "  {} {} ({} updated, {} skipped)",
            status,
            path,
            file.applied.len(),
            file.skipped.len()
        )?;

        if self.verbosity == Verbosity::Verbose {
            for applied in &file.applied {
                writeln!(
                    writer,
                    "      {} {} → {}",
                    applied.name,
                    self.paint(&applied.from, |s| s.dimmed()),
                    applied.to
                )?;
            }
            for name in &file.skipped {
                writeln!(writer, "      {}", self.paint(&format!("{} (not found)", name), |s| s.dimmed()))?;
            }
        }
        Ok(())
    }

    /// Format the closing summary
    pub fn format_summary(
        &self,
        result: &OrchestratorResult,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let prefix = self.dry_run_prefix();
        let applied = result.apply.total_applied();
        let verb = if self.dry_run { "would be updated" } else { "updated" };

        if self.verbosity == Verbosity::Quiet {
            if applied > 0 {
                writeln!(
                    writer,
                    "{}{} {}",
                    prefix,
                    self.paint(&applied.to_string(), |s| s.green()),
                    verb
                )?;
            } else {
                writeln!(writer, "{}{}", prefix, self.paint("No updates", |s| s.dimmed()))?;
            }
            return Ok(());
        }

        writeln!(writer, "{}{}:", prefix, self.paint("Summary", |s| s.bold()))?;
        writeln!(
            writer,
            "  {} manifest(s), {} dependencies checked",
            result.manifests_scanned, result.dependencies_checked
        )?;

        let buckets = &result.buckets;
        if buckets.is_empty() {
            writeln!(writer, "  {}", self.paint("Everything is up to date", |s| s.dimmed()))?;
        } else {
            writeln!(
                writer,
                "  {} update(s) available ({} major, {} minor, {} patch), {} selected",
                buckets.total(),
                self.paint(&buckets.major.len().to_string(), |s| s.red()),
                self.paint(&buckets.minor.len().to_string(), |s| s.yellow()),
                self.paint(&buckets.patch.len().to_string(), |s| s.green()),
                result.selected.len()
            )?;
            writeln!(
                writer,
                "  {} package(s) {} in {} file(s)",
                self.paint(&applied.to_string(), |s| s.green()),
                verb,
                result.apply.files.iter().filter(|f| f.has_updates()).count()
            )?;
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()> {
        // In quiet mode, only show summary
        if self.verbosity == Verbosity::Quiet {
            return self.format_summary(result, writer);
        }

        let root = result.root.as_path();

        if result.manifests_scanned == 0 {
            writeln!(
                writer,
                "{}",
                self.paint(
                    &format!("No package.json files found in {}", root.display()),
                    |s| s.dimmed()
                )
            )?;
            writeln!(writer)?;
        }

        for kind in UpdateKind::all() {
            self.format_bucket(root, *kind, result.buckets.bucket(*kind), writer)?;
        }

        if !result.analyses.is_empty() {
            writeln!(writer, "{}", self.paint("Migration analysis", |s| s.bold()))?;
            for record in &result.analyses {
                self.format_analysis(record, writer)?;
            }
        }

        if !result.apply.files.is_empty() {
            let title = if self.dry_run {
                "Files that would change"
            } else {
                "Updated files"
            };
            writeln!(writer, "{}{}", self.dry_run_prefix(), self.paint(title, |s| s.bold()))?;
            for file in &result.apply.files {
                self.format_write_result(root, file, writer)?;
            }
            writeln!(writer)?;
        }

        if !result.diagnostics.is_empty() {
            writeln!(writer, "{}:", self.paint("Skipped", |s| s.yellow().bold()))?;
            for diagnostic in &result.diagnostics {
                writeln!(writer, "  {} {}", self.paint("⚠", |s| s.yellow()), diagnostic)?;
            }
            writeln!(writer)?;
        }

        if !result.errors.is_empty() {
            writeln!(writer, "{}:", self.paint("Errors", |s| s.red().bold()))?;
            for error in &result.errors {
                writeln!(writer, "  {} {}", self.paint("✗", |s| s.red()), error)?;
            }
            writeln!(writer)?;
        }

        self.format_summary(result, writer)
    }
}
