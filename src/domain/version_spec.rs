//! Declared version specifications from package.json
//!
//! Handles version constraints like `^1.2.3`, `~1.2.3` and `1.2.3`.
//! Only the caret and tilde range operators are recognised; anything else
//! is kept verbatim as part of the version text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The leading range operator of a declared version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePrefix {
    /// Caret range (e.g., `^1.2.3`) - compatible with major version
    Caret,
    /// Tilde range (e.g., `~1.2.3`) - compatible with minor version
    Tilde,
    /// No operator
    #[default]
    None,
}

impl RangePrefix {
    /// Detects the range operator at the start of a version string
    pub fn detect(raw: &str) -> Self {
        match raw.chars().next() {
            Some('^') => RangePrefix::Caret,
            Some('~') => RangePrefix::Tilde,
            _ => RangePrefix::None,
        }
    }

    /// Returns the operator text
    pub fn as_str(&self) -> &'static str {
        match self {
            RangePrefix::Caret => "^",
            RangePrefix::Tilde => "~",
            RangePrefix::None => "",
        }
    }
}

/// A version specification with its original string representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSpec {
    /// The raw version string as it appears in the manifest
    pub raw: String,
    /// The version text with the range operator removed
    pub version: String,
    /// Range operator to preserve during updates
    pub prefix: RangePrefix,
}

impl VersionSpec {
    /// Parses a declared version string
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let prefix = RangePrefix::detect(&raw);
        let version = raw[prefix.as_str().len()..].to_string();
        Self {
            raw,
            version,
            prefix,
        }
    }

    /// Formats a new version while preserving the original range operator
    pub fn format_updated(&self, new_version: &str) -> String {
        format!("{}{}", self.prefix.as_str(), new_version)
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
