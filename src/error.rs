//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues with reading, parsing or writing package.json files
//! - RegistryError: Issues with package registry communication
//! - AnalysisError: Issues with the language model text generator
//! - ConfigError: Issues with CLI configuration

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Package registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Text generation related errors
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// Failed to list a directory during the scan
    #[error("failed to scan directory {path}: {source}")]
    DirectoryError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dependency entry is missing from the manifest
    #[error("'{package}' not found in {section} of {path}")]
    EntryNotFound {
        path: PathBuf,
        package: String,
        section: &'static str,
    },
}

/// Errors related to package registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in registry
    #[error("package '{package}' not found in {registry} registry")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry} registry")]
    RateLimitExceeded { registry: String },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },
}

/// Errors related to the text generator
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// No API key was configured
    #[error("{provider} API key not found: pass --api-key or set OPENAI_API_KEY")]
    MissingApiKey { provider: String },

    /// Request to the provider failed
    #[error("{provider} request failed: {message}")]
    RequestFailed { provider: String, message: String },

    /// Provider returned a non-success status
    #[error("{provider} API error ({status}): {body}")]
    ApiError {
        provider: String,
        status: u16,
        body: String,
    },

    /// Provider response had no usable completion
    #[error("{provider} returned an empty completion")]
    EmptyCompletion { provider: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid update level filter
    #[error("invalid update level '{value}': expected 'major', 'minor', or 'patch'")]
    InvalidLevel { value: String },

    /// Invalid numeric option
    #[error("invalid value for {option}: {message}")]
    InvalidValue { option: String, message: String },
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new DirectoryError
    pub fn directory_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::DirectoryError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new EntryNotFound error
    pub fn entry_not_found(
        path: impl Into<PathBuf>,
        package: impl Into<String>,
        section: &'static str,
    ) -> Self {
        ManifestError::EntryNotFound {
            path: path.into(),
            package: package.into(),
            section,
        }
    }

    /// Returns the path this error refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            ManifestError::ReadError { path, .. }
            | ManifestError::WriteError { path, .. }
            | ManifestError::JsonParseError { path, .. }
            | ManifestError::DirectoryError { path, .. }
            | ManifestError::EntryNotFound { path, .. } => path,
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Returns true if this error represents an ordinary "package not found"
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::PackageNotFound { .. })
    }

    /// Returns true if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RegistryError::NetworkError { .. }
                | RegistryError::RateLimitExceeded { .. }
                | RegistryError::Timeout { .. }
        )
    }
}

impl AnalysisError {
    /// Creates a new RequestFailed error
    pub fn request_failed(provider: impl Into<String>, message: impl Into<String>) -> Self {
        AnalysisError::RequestFailed {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_error_display() {
        let err = ManifestError::json_parse_error("/test/package.json", "expected value");
        assert_eq!(
            err.to_string(),
            "failed to parse JSON in /test/package.json: expected value"
        );

        let err = ManifestError::entry_not_found("/test/package.json", "lodash", "dependencies");
        assert_eq!(
            err.to_string(),
            "'lodash' not found in dependencies of /test/package.json"
        );
    }

    #[test]
    fn test_manifest_error_path() {
        let err = ManifestError::read_error(
            "/test/package.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.path(), std::path::Path::new("/test/package.json"));
    }

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::package_not_found("lodash", "npm");
        assert_eq!(err.to_string(), "package 'lodash' not found in npm registry");

        let err = RegistryError::network_error("lodash", "npm", "connection refused");
        assert_eq!(
            err.to_string(),
            "failed to fetch package 'lodash' from npm: connection refused"
        );
    }

    #[test]
    fn test_registry_error_classification() {
        assert!(RegistryError::package_not_found("a", "npm").is_not_found());
        assert!(!RegistryError::package_not_found("a", "npm").is_retryable());
        assert!(RegistryError::timeout("a", "npm").is_retryable());
        assert!(RegistryError::network_error("a", "npm", "x").is_retryable());
    }

    #[test]
    fn test_analysis_error_display() {
        let err = AnalysisError::MissingApiKey {
            provider: "OpenAI".to_string(),
        };
        assert!(err.to_string().contains("OPENAI_API_KEY"));

        let err = AnalysisError::ApiError {
            provider: "OpenAI".to_string(),
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "OpenAI API error (401): unauthorized");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidLevel {
            value: "huge".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid update level 'huge': expected 'major', 'minor', or 'patch'"
        );
    }

    #[test]
    fn test_app_error_from() {
        let err: AppError = RegistryError::package_not_found("lodash", "npm").into();
        assert!(matches!(err, AppError::Registry(_)));

        let err: AppError = ConfigError::InvalidLevel {
            value: "x".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Config(_)));
    }
}
