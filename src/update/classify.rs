//! Semver classification of available updates
//!
//! Versions are compared as coerced (major, minor, patch) triples. Range
//! semantics of the declared version are never evaluated.

use crate::domain::{UpdateKind, VersionSpec};
use regex::Regex;
use semver::Version;
use std::sync::LazyLock;

/// First version-shaped token: up to three dot-separated numeric parts
static VERSION_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\d])(\d{1,16})(?:\.(\d{1,16}))?(?:\.(\d{1,16}))?(?:$|[^\d])").unwrap()
});

/// Leniently coerce a version string into a (major, minor, patch) version.
///
/// Extracts the first version-shaped token; missing minor/patch parts are
/// zero and anything around the token (prefixes, prerelease tags, build
/// metadata) is ignored. Returns `None` when no token exists.
pub fn coerce(version: &str) -> Option<Version> {
    let caps = VERSION_TOKEN_RE.captures(version)?;
    let part = |i: usize| -> Option<u64> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };
    Some(Version::new(part(1)?, part(2)?, part(3)?))
}

/// Classify the update from `current` to `latest`.
///
/// A leading `^` or `~` is stripped from both sides before coercion. Checks
/// run in this order, first match wins:
/// 1. latest.major > current.major → Major
/// 2. majors equal, latest.minor > current.minor → Minor
/// 3. majors and minors equal, latest.patch > current.patch → Patch
/// 4. otherwise (equal, downgrade, or not coercible) → `None`
pub fn classify(current: &str, latest: &str) -> Option<UpdateKind> {
    let current = coerce(&VersionSpec::parse(current).version)?;
    let latest = coerce(&VersionSpec::parse(latest).version)?;

    if latest.major > current.major {
        Some(UpdateKind::Major)
    } else if latest.major == current.major && latest.minor > current.minor {
        Some(UpdateKind::Minor)
    } else if latest.major == current.major
        && latest.minor == current.minor
        && latest.patch > current.patch
    {
        Some(UpdateKind::Patch)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_full_version() {
        assert_eq!(coerce("1.2.3"), Some(Version::new(1, 2, 3)));
    }

    #[test]
    fn test_coerce_partial_versions() {
        assert_eq!(coerce("1"), Some(Version::new(1, 0, 0)));
        assert_eq!(coerce("1.2"), Some(Version::new(1, 2, 0)));
        assert_eq!(coerce("4.x"), Some(Version::new(4, 0, 0)));
    }

    #[test]
    fn test_coerce_ignores_surrounding_text() {
        assert_eq!(coerce("v2.0.1"), Some(Version::new(2, 0, 1)));
        assert_eq!(coerce(">=1.4.0"), Some(Version::new(1, 4, 0)));
        assert_eq!(coerce("3.0.0-beta.2"), Some(Version::new(3, 0, 0)));
        assert_eq!(coerce("1.2.3.4"), Some(Version::new(1, 2, 3)));
        assert_eq!(coerce("npm:other@2.1.0"), Some(Version::new(2, 1, 0)));
    }

    #[test]
    fn test_coerce_failure() {
        assert_eq!(coerce("latest"), None);
        assert_eq!(coerce("*"), None);
        assert_eq!(coerce(""), None);
        assert_eq!(coerce("github:user/repo"), None);
    }

    #[test]
    fn test_classify_examples() {
        assert_eq!(classify("1.2.3", "2.0.0"), Some(UpdateKind::Major));
        assert_eq!(classify("1.2.3", "1.3.0"), Some(UpdateKind::Minor));
        assert_eq!(classify("1.2.3", "1.2.9"), Some(UpdateKind::Patch));
        assert_eq!(classify("1.2.3", "1.2.3"), None);
    }

    #[test]
    fn test_classify_downgrades_are_none() {
        assert_eq!(classify("2.0.0", "1.5.0"), None);
        assert_eq!(classify("2.0.0", "1.9.9"), None);
        assert_eq!(classify("1.5.0", "1.4.9"), None);
        assert_eq!(classify("1.2.5", "1.2.4"), None);
    }

    #[test]
    fn test_classify_multiple_fields_differ() {
        assert_eq!(classify("1.9.9", "2.0.0"), Some(UpdateKind::Major));
        assert_eq!(classify("1.2.9", "1.3.0"), Some(UpdateKind::Minor));
    }

    #[test]
    fn test_classify_strips_range_operators() {
        assert_eq!(classify("^4.17.0", "4.17.21"), Some(UpdateKind::Patch));
        assert_eq!(classify("~3.0.0", "4.17.21"), Some(UpdateKind::Major));
    }

    #[test]
    fn test_classify_partial_current() {
        assert_eq!(classify("4", "4.1.0"), Some(UpdateKind::Minor));
        assert_eq!(classify("4.1", "4.1.0"), None);
    }

    #[test]
    fn test_classify_uncoercible_is_none() {
        assert_eq!(classify("latest", "2.0.0"), None);
        assert_eq!(classify("1.0.0", "unknown"), None);
    }

    #[test]
    fn test_classify_exhaustive_small_grid() {
        for cm in 0..3u64 {
            for cn in 0..3u64 {
                for cp in 0..3u64 {
                    for lm in 0..3u64 {
                        for ln in 0..3u64 {
                            for lp in 0..3u64 {
                                let current = format!("{}.{}.{}", cm, cn, cp);
                                let latest = format!("{}.{}.{}", lm, ln, lp);
                                let expected = if lm > cm {
                                    Some(UpdateKind::Major)
                                } else if lm == cm && ln > cn {
                                    Some(UpdateKind::Minor)
                                } else if lm == cm && ln == cn && lp > cp {
                                    Some(UpdateKind::Patch)
                                } else {
                                    None
                                };
                                assert_eq!(classify(&current, &latest), expected);
                            }
                        }
                    }
                }
            }
        }
    }
}
