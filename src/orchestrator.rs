//! Pipeline orchestrator
//!
//! This module provides:
//! - Workflow coordination: scan → aggregate → select → analyze → apply
//! - Collaborator wiring (npm registry, OpenAI generator) from CLI arguments
//! - Dry-run mode support
//! - Error collection with partial continuation

use crate::analysis::{MigrationAnalyzer, OpenAiGenerator};
use crate::cli::CliArgs;
use crate::domain::{MigrationRecord, UpdateBuckets, UpdateCandidate};
use crate::error::AppResult;
use crate::manifest::{scan_manifests, ApplyReport, ManifestUpdater, ScanDiagnostic};
use crate::progress::Progress;
use crate::registry::{HttpClient, LatestVersionResolver, NpmRegistry};
use crate::update::Aggregator;
use secrecy::SecretString;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Coordinates one run of the pipeline
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
    /// Latest-version lookups
    resolver: Arc<dyn LatestVersionResolver>,
    /// Present only when analysis was requested
    analyzer: Option<MigrationAnalyzer>,
}

/// Result of running the orchestrator
#[derive(Debug)]
pub struct OrchestratorResult {
    /// Scanned root
    pub root: PathBuf,
    /// Whether this was a dry-run
    pub dry_run: bool,
    /// Number of manifests parsed
    pub manifests_scanned: usize,
    /// Number of declared dependencies checked
    pub dependencies_checked: usize,
    /// Every classified update
    pub buckets: UpdateBuckets,
    /// Updates accepted by the selection filter
    pub selected: Vec<UpdateCandidate>,
    /// Migration records for the selected updates, when analysis ran
    pub analyses: Vec<MigrationRecord>,
    /// Per-file rewrite outcome
    pub apply: ApplyReport,
    /// Manifests and directories skipped during the scan
    pub diagnostics: Vec<ScanDiagnostic>,
    /// Manifests that could not be rewritten
    pub errors: Vec<OrchestratorError>,
}

impl OrchestratorResult {
    fn empty(root: PathBuf, dry_run: bool) -> Self {
        Self {
            root,
            dry_run,
            manifests_scanned: 0,
            dependencies_checked: 0,
            buckets: UpdateBuckets::new(),
            selected: Vec::new(),
            analyses: Vec::new(),
            apply: ApplyReport::default(),
            diagnostics: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Returns true if any manifest could not be rewritten
    ///
    /// Scan diagnostics do not count: a skipped manifest is reported but the
    /// run still succeeds.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Errors collected during orchestration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    /// A manifest could not be rewritten
    WriteError { path: String, message: String },
}

impl fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrchestratorError::WriteError { path, message } => {
                write!(f, "Failed to write {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for OrchestratorError {}

impl Orchestrator {
    /// Create an orchestrator talking to the configured npm registry and,
    /// with `--analyze`, the configured OpenAI endpoint
    pub fn new(args: CliArgs) -> AppResult<Self> {
        let client = HttpClient::new()?;
        let registry = Arc::new(NpmRegistry::with_base_url(client, args.registry.clone()));

        let analyzer = if args.analyze {
            let api_key = args.api_key.clone().map(SecretString::from);
            let mut generator = OpenAiGenerator::new(api_key)?.with_model(args.model.clone());
            if let Some(api_base) = &args.api_base {
                generator = generator.with_api_base(api_base.clone());
            }
            debug!("Analysis enabled with {:?}", generator);
            Some(MigrationAnalyzer::new(Arc::new(generator)).with_package_info(registry.clone()))
        } else {
            None
        };

        Ok(Self {
            args,
            resolver: registry,
            analyzer,
        })
    }

    /// Create an orchestrator with explicit collaborators
    pub fn with_collaborators(
        args: CliArgs,
        resolver: Arc<dyn LatestVersionResolver>,
        analyzer: Option<MigrationAnalyzer>,
    ) -> Self {
        Self {
            args,
            resolver,
            analyzer,
        }
    }

    /// Run the pipeline
    pub async fn run(&self) -> OrchestratorResult {
        self.run_with_progress(self.args.show_progress()).await
    }

    /// Run the pipeline with optional progress display
    pub async fn run_with_progress(&self, show_progress: bool) -> OrchestratorResult {
        let mut progress = Progress::new(show_progress);
        let mut result = OrchestratorResult::empty(self.args.path.clone(), self.args.dry_run);

        // Step 1: Discover manifests
        progress.spinner("Scanning for package.json files...");
        let scan = scan_manifests(&self.args.path, &self.args.to_scan_options());
        progress.finish_and_clear();

        result.manifests_scanned = scan.manifests.len();
        result.dependencies_checked = scan.dependency_count();
        info!(
            "Found {} manifest(s) with {} dependencies",
            result.manifests_scanned, result.dependencies_checked
        );

        result.diagnostics = scan.diagnostics;

        if scan.manifests.is_empty() {
            return result;
        }

        // Step 2: Resolve and classify
        progress.start(result.dependencies_checked as u64, "Checking dependencies");
        let aggregator =
            Aggregator::new(self.resolver.clone()).with_concurrency(self.args.concurrency);
        result.buckets = aggregator.aggregate(&scan.manifests, &progress).await;
        progress.finish_and_clear();

        // Step 3: Select
        result.selected = self.args.to_filter().select(&result.buckets);
        info!(
            "{} update(s) available, {} selected",
            result.buckets.total(),
            result.selected.len()
        );

        // Step 4: Analyze
        if let Some(analyzer) = &self.analyzer {
            if !result.selected.is_empty() {
                progress.start(result.selected.len() as u64, "Analyzing upgrades");
                for candidate in &result.selected {
                    progress.set_message(&format!("Analyzing {}", candidate.name));
                    result.analyses.push(analyzer.analyze(candidate).await);
                    progress.inc();
                }
                progress.finish_and_clear();
            }
        }

        // Step 5: Apply (computed but not written in dry-run)
        if !self.args.dry_run && !result.selected.is_empty() {
            progress.spinner("Writing updates...");
        }
        let updater = ManifestUpdater::new(self.args.dry_run);
        result.apply = updater.apply(&result.selected);
        progress.finish_and_clear();

        for file in &result.apply.files {
            for error in &file.errors {
                result.errors.push(OrchestratorError::WriteError {
                    path: file.path.display().to_string(),
                    message: error.clone(),
                });
            }
        }

        result
    }
}
