//! npm Registry adapter
//!
//! Endpoints:
//! - `{registry}/{package}/latest` for the latest published version
//! - `{registry}/{package}` for repository and homepage links

use crate::error::RegistryError;
use crate::registry::{HttpClient, LatestVersionResolver, PackageInfo, PackageInfoSource};
use async_trait::async_trait;
use serde::Deserialize;

/// npm registry base URL
pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

const REGISTRY_NAME: &str = "npm";

/// npm Registry adapter
pub struct NpmRegistry {
    client: HttpClient,
    base_url: String,
}

/// Response of the `/latest` dist-tag endpoint
#[derive(Debug, Deserialize)]
struct NpmLatestResponse {
    version: Option<String>,
}

/// The subset of the packument used for package info
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    #[serde(default)]
    repository: Option<NpmRepository>,
    #[serde(default)]
    homepage: Option<String>,
}

/// `repository` is either a bare URL or `{ "type": "git", "url": ... }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NpmRepository {
    Url(String),
    Object { url: Option<String> },
}

impl NpmRepository {
    fn into_url(self) -> Option<String> {
        match self {
            NpmRepository::Url(url) => Some(url),
            NpmRepository::Object { url } => url,
        }
    }
}

impl NpmRegistry {
    /// Create an adapter against the public npm registry
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, NPM_REGISTRY_URL)
    }

    /// Create an adapter against a custom registry
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Build the packument URL for a package; scoped names are not encoded
    fn package_url(&self, package: &str) -> String {
        format!("{}/{}", self.base_url, package)
    }

    /// Build the latest-version URL for a package
    fn latest_url(&self, package: &str) -> String {
        format!("{}/{}/latest", self.base_url, package)
    }
}

#[async_trait]
impl LatestVersionResolver for NpmRegistry {
    async fn latest_version(&self, package: &str) -> Result<Option<String>, RegistryError> {
        let url = self.latest_url(package);
        match self
            .client
            .get_json::<NpmLatestResponse>(&url, package, REGISTRY_NAME)
            .await
        {
            Ok(response) => Ok(response.version),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl PackageInfoSource for NpmRegistry {
    async fn package_info(&self, package: &str) -> Result<PackageInfo, RegistryError> {
        let url = self.package_url(package);
        let response: NpmPackageResponse =
            self.client.get_json(&url, package, REGISTRY_NAME).await?;

        Ok(PackageInfo::new(
            response.repository.and_then(NpmRepository::into_url),
            response.homepage,
        ))
    }
}
