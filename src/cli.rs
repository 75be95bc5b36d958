//! CLI argument parsing module for ai-migrator

use crate::analysis::DEFAULT_MODEL;
use crate::domain::UpdateKind;
use crate::error::ConfigError;
use crate::manifest::ScanOptions;
use crate::registry::NPM_REGISTRY_URL;
use crate::update::{UpdateFilter, DEFAULT_CONCURRENCY};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Parse an update level, accepting any letter case
fn parse_level(s: &str) -> Result<UpdateKind, String> {
    s.trim().parse::<UpdateKind>().map_err(|e| e.to_string())
}

/// Parse a positive request window
fn parse_concurrency(s: &str) -> Result<usize, String> {
    let invalid = |message: &str| {
        ConfigError::InvalidValue {
            option: "--concurrency".to_string(),
            message: message.to_string(),
        }
        .to_string()
    };
    match s.trim().parse::<usize>() {
        Ok(0) => Err(invalid("must be at least 1")),
        Ok(n) => Ok(n),
        Err(e) => Err(invalid(&e.to_string())),
    }
}

/// npm dependency upgrade tool with AI migration guidance
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ai-migrator",
    version,
    about = "npm dependency upgrades with semver classification and AI migration guidance"
)]
pub struct CliArgs {
    /// Project root to scan for package.json files (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    // General options
    /// Dry run mode - show what would be updated without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    // Selection
    /// Exclude specific packages from update (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Update only specific packages (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub only: Vec<String>,

    /// Accept only these update levels: major, minor, patch (repeatable)
    #[arg(long, action = ArgAction::Append, value_parser = parse_level)]
    pub level: Vec<UpdateKind>,

    /// Skip devDependencies
    #[arg(long)]
    pub prod_only: bool,

    // Scanning
    /// Additional directory name to skip while scanning (repeatable)
    #[arg(long, action = ArgAction::Append)]
    pub ignore_dir: Vec<String>,

    /// Descend into directories starting with '.'
    #[arg(long)]
    pub include_hidden: bool,

    // Analysis
    /// Ask the language model for a migration assessment of each selected update
    #[arg(long)]
    pub analyze: bool,

    /// Chat model used for analysis
    #[arg(long, env = "AI_MIGRATOR_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// OpenAI-compatible API base URL
    #[arg(long, env = "OPENAI_API_BASE")]
    pub api_base: Option<String>,

    // Registry
    /// npm registry base URL
    #[arg(long, env = "NPM_CONFIG_REGISTRY", default_value = NPM_REGISTRY_URL)]
    pub registry: String,

    /// Maximum number of registry requests in flight
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY, value_parser = parse_concurrency)]
    pub concurrency: usize,
}

impl CliArgs {
    /// Build scan options from the scanning flags
    pub fn to_scan_options(&self) -> ScanOptions {
        self.ignore_dir
            .iter()
            .fold(ScanOptions::new(), |options, dir| {
                options.with_excluded_dir(dir.clone())
            })
            .with_skip_hidden(!self.include_hidden)
    }

    /// Build the selection filter from the selection flags
    pub fn to_filter(&self) -> UpdateFilter {
        UpdateFilter::new()
            .with_exclude(self.exclude.clone())
            .with_only(self.only.clone())
            .with_levels(self.level.clone())
            .with_include_dev(!self.prod_only)
    }

    /// Whether progress should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Default tracing filter directive for the verbosity flags
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}
