//! Prompt construction for upgrade analysis

use crate::domain::UpdateCandidate;
use crate::registry::PackageInfo;

/// Render the "Package info" block embedded in the prompt
pub fn render_package_context(info: &PackageInfo) -> String {
    if info.is_empty() {
        return String::new();
    }

    format!(
        "Repository: {}\nHomepage: {}\nChangelog sources: {}",
        info.repository.as_deref().unwrap_or(""),
        info.homepage.as_deref().unwrap_or(""),
        info.changelog_sources().join(", ")
    )
}

/// Note used when package info could not be fetched
pub fn package_context_unavailable(package: &str) -> String {
    format!("Failed to fetch package info for {}", package)
}

/// Build the analysis prompt for one candidate
pub fn build_prompt(candidate: &UpdateCandidate, package_context: &str) -> String {
    format!(
        r#"Analyze the upgrade of npm package "{name}" from version {current} to {latest}.

Package info:
{context}

Please provide:
1. A concise summary of the key changes
2. List of breaking changes (if any)
3. Step-by-step migration instructions
4. Risk assessment (low/medium/high)

Focus on practical migration steps developers need to take. If this is a major version bump, pay special attention to breaking changes."#,
        name = candidate.name,
        current = candidate.current_version,
        latest = candidate.latest_version,
        context = package_context,
    )
}
