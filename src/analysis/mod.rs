//! Upgrade analysis with a language model
//!
//! This module provides:
//! - The TextGenerator trait the analyzer depends on
//! - Prompt construction from a candidate and its package links
//! - The completion parser producing a MigrationRecord
//! - MigrationAnalyzer, which never fails and falls back to a deterministic record

mod openai;
mod parser;
mod prompt;

pub use openai::{OpenAiGenerator, DEFAULT_API_BASE, DEFAULT_MODEL};
pub use parser::{default_summary, parse_migration_text};
pub use prompt::{build_prompt, package_context_unavailable, render_package_context};

use crate::domain::{MigrationRecord, RiskLevel, UpdateCandidate};
use crate::error::AnalysisError;
use crate::registry::PackageInfoSource;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Produces a completion for a prompt
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError>;
}

/// Builds prompts, calls the generator and parses completions
pub struct MigrationAnalyzer {
    generator: Arc<dyn TextGenerator>,
    package_info: Option<Arc<dyn PackageInfoSource>>,
}

impl MigrationAnalyzer {
    /// Create an analyzer without package-info lookups
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            package_info: None,
        }
    }

    /// Embed repository and changelog links from `source` in prompts
    pub fn with_package_info(mut self, source: Arc<dyn PackageInfoSource>) -> Self {
        self.package_info = Some(source);
        self
    }

    /// Analyze one candidate; generator failures yield the fallback record
    pub async fn analyze(&self, candidate: &UpdateCandidate) -> MigrationRecord {
        let context = self.package_context(&candidate.name).await;
        let prompt = build_prompt(candidate, &context);

        match self.generator.generate(&prompt).await {
            Ok(text) => parse_migration_text(&candidate.name, &text),
            Err(e) => {
                warn!("AI analysis failed for {}: {}", candidate.name, e);
                fallback_record(candidate)
            }
        }
    }

    async fn package_context(&self, package: &str) -> String {
        let Some(source) = &self.package_info else {
            return String::new();
        };

        match source.package_info(package).await {
            Ok(info) => render_package_context(&info),
            Err(e) if e.is_not_found() => String::new(),
            Err(e) => {
                debug!("Package info lookup failed for {}: {}", package, e);
                package_context_unavailable(package)
            }
        }
    }
}

/// Record used when no completion could be obtained
pub fn fallback_record(candidate: &UpdateCandidate) -> MigrationRecord {
    MigrationRecord {
        package_name: candidate.name.clone(),
        summary: format!(
            "Failed to analyze upgrade from {} to {}",
            candidate.current_version, candidate.latest_version
        ),
        breaking_changes: Vec::new(),
        migration_steps: vec![format!(
            "Update {} from {} to {}",
            candidate.name, candidate.current_version, candidate.latest_version
        )],
        risk_level: RiskLevel::from_update_kind(candidate.update_type),
    }
}
