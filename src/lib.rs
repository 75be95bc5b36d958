//! ai-migrator - npm dependency upgrade library
//!
//! This library provides the pipeline behind the CLI:
//! - Manifest discovery and rewriting (package.json, monorepo aware)
//! - Semver classification of available updates
//! - Migration assessments parsed from language model completions
//! - npm registry and OpenAI clients behind small traits

pub mod analysis;
pub mod cli;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
pub mod update;
