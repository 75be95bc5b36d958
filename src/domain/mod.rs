//! Core domain models for ai-migrator
//!
//! This module contains the fundamental types used throughout the application:
//! - Declared version specifications and their range operators
//! - Dependency information structures
//! - Update kinds, candidates and classified buckets
//! - Migration assessment records

mod candidate;
mod dependency;
mod migration;
mod update_kind;
mod version_spec;

pub use candidate::{UpdateBuckets, UpdateCandidate};
pub use dependency::Dependency;
pub use migration::{MigrationRecord, RiskLevel};
pub use update_kind::UpdateKind;
pub use version_spec::{RangePrefix, VersionSpec};
