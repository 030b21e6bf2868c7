//! Version comparison between the running binary and a release

use semver::Version;

/// Parse version string, handling various formats
pub fn parse_version(version_str: &str) -> Option<Version> {
    // Remove leading 'v' if present
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned).ok()
}

/// True when `installed` and `release` name the same version.
///
/// Semver equality when both parse, plain string equality (ignoring a
/// leading 'v') otherwise.
pub fn versions_match(installed: &str, release: &str) -> bool {
    match (parse_version(installed), parse_version(release)) {
        (Some(a), Some(b)) => a == b,
        _ => strip_v(installed) == strip_v(release),
    }
}

fn strip_v(version: &str) -> &str {
    let version = version.trim();
    version.strip_prefix('v').unwrap_or(version)
}
