use crate::error::{Result, VersionerError};
use semver::{BuildMetadata, Prerelease, Version};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionBump::Major => write!(f, "major"),
            VersionBump::Minor => write!(f, "minor"),
            VersionBump::Patch => write!(f, "patch"),
        }
    }
}

/// How the next version is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    /// Always increment the major component
    Major,
    /// Always increment the minor component
    Minor,
    /// Always increment the patch component
    Patch,
    /// Derive the increment from conventional commits since the latest tag
    #[default]
    Conventional,
    /// Pre-release built from `git describe` output
    Snapshot,
}

/// Parse a version from a tag string (e.g., "v1.2.3" -> 1.2.3)
///
/// A single leading 'v' or 'V' is accepted. Missing minor and patch
/// components count as zero, so `v1.2` is `1.2.0` and `v1` is `1.0.0`;
/// pre-release and build metadata follow the usual semver rules.
pub fn parse_tag_version(tag: &str) -> Result<Version> {
    let clean_tag = tag
        .strip_prefix('v')
        .or_else(|| tag.strip_prefix('V'))
        .unwrap_or(tag);

    let completed = complete_version(clean_tag);
    Version::parse(completed.as_deref().unwrap_or(clean_tag)).map_err(|source| {
        VersionerError::InvalidTag {
            tag: tag.to_string(),
            source,
        }
    })
}

/// Fill in omitted minor/patch numbers: `1.2-rc` -> `1.2.0-rc`
fn complete_version(version: &str) -> Option<String> {
    let re = regex::Regex::new(r"^(\d+)(?:\.(\d+))?(?:\.(\d+))?(.*)$").ok()?;
    let caps = re.captures(version)?;
    let part = |i: usize| caps.get(i).map_or("0", |m| m.as_str());

    Some(format!("{}.{}.{}{}", part(1), part(2), part(3), part(4)))
}

/// Bump version according to bump type
///
/// Build metadata is always dropped. A patch bump of a pre-release only
/// drops the pre-release: `1.2.3-rc.1` is followed by `1.2.3`.
pub fn bump_version(version: &Version, bump_type: VersionBump) -> Version {
    let mut next = version.clone();
    next.build = BuildMetadata::EMPTY;

    match bump_type {
        VersionBump::Major => {
            next.major += 1;
            next.minor = 0;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        VersionBump::Minor => {
            next.minor += 1;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        VersionBump::Patch => {
            if next.pre.is_empty() {
                next.patch += 1;
            } else {
                next.pre = Prerelease::EMPTY;
            }
        }
    }
    next
}

/// Replace the pre-release identifier of a version.
///
/// An empty name leaves the version untouched.
pub fn with_prerelease(version: &Version, name: &str) -> Result<Version> {
    if name.is_empty() {
        return Ok(version.clone());
    }

    let pre = Prerelease::new(name).map_err(|source| VersionerError::InvalidPrerelease {
        name: name.to_string(),
        source,
    })?;

    let mut next = version.clone();
    next.pre = pre;
    Ok(next)
}

/// Render a version as `{prefix}MAJOR.MINOR.PATCH[-prerelease]`
pub fn render_version(version: &Version, prefix: &str) -> String {
    let mut rendered = format!(
        "{}{}.{}.{}",
        prefix, version.major, version.minor, version.patch
    );
    if !version.pre.is_empty() {
        rendered.push('-');
        rendered.push_str(version.pre.as_str());
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = parse_tag_version("v1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_without_v() {
        assert_eq!(parse_tag_version("1.2.3").unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_uppercase_v() {
        assert_eq!(parse_tag_version("V1.2.3").unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_prerelease() {
        let v = parse_tag_version("v1.2.3-rc.1").unwrap();
        assert_eq!(v.pre.as_str(), "rc.1");
    }

    #[test]
    fn test_version_parse_partial() {
        assert_eq!(parse_tag_version("1.2").unwrap(), Version::new(1, 2, 0));
        assert_eq!(parse_tag_version("v1").unwrap(), Version::new(1, 0, 0));

        let v = parse_tag_version("v1.2-rc.1").unwrap();
        assert_eq!(v, Version::parse("1.2.0-rc.1").unwrap());
    }

    #[test]
    fn test_version_parse_invalid() {
        assert!(parse_tag_version("v1.2.3.4").is_err());
        assert!(parse_tag_version("release-1.2.3").is_err());

        let err = parse_tag_version("nope").unwrap_err();
        assert!(err.is_malformed_input());
        assert!(err.to_string().contains("'nope'"));
    }

    #[test]
    fn test_version_bump_major() {
        let bumped = bump_version(&Version::new(1, 2, 3), VersionBump::Major);
        assert_eq!(bumped, Version::new(2, 0, 0));
    }

    #[test]
    fn test_version_bump_minor() {
        let bumped = bump_version(&Version::new(1, 2, 3), VersionBump::Minor);
        assert_eq!(bumped, Version::new(1, 3, 0));
    }

    #[test]
    fn test_version_bump_patch() {
        let bumped = bump_version(&Version::new(1, 2, 3), VersionBump::Patch);
        assert_eq!(bumped, Version::new(1, 2, 4));
    }

    #[test]
    fn test_patch_bump_finalizes_prerelease() {
        let v = Version::parse("1.2.3-rc.1").unwrap();
        assert_eq!(bump_version(&v, VersionBump::Patch), Version::new(1, 2, 3));
    }

    #[test]
    fn test_minor_and_major_bumps_clear_prerelease() {
        let v = Version::parse("1.2.3-rc.1+build.5").unwrap();
        assert_eq!(bump_version(&v, VersionBump::Minor), Version::new(1, 3, 0));
        assert_eq!(bump_version(&v, VersionBump::Major), Version::new(2, 0, 0));
    }

    #[test]
    fn test_bump_drops_build_metadata() {
        let v = Version::parse("1.2.3+build.5").unwrap();
        assert_eq!(bump_version(&v, VersionBump::Patch), Version::new(1, 2, 4));
    }

    #[test]
    fn test_with_prerelease() {
        let v = with_prerelease(&Version::new(1, 3, 0), "alpha").unwrap();
        assert_eq!(render_version(&v, "v"), "v1.3.0-alpha");

        let unchanged = with_prerelease(&Version::new(1, 3, 0), "").unwrap();
        assert_eq!(unchanged, Version::new(1, 3, 0));
    }

    #[test]
    fn test_with_prerelease_rejects_invalid_identifier() {
        let err = with_prerelease(&Version::new(1, 0, 0), "bad name!").unwrap_err();
        assert!(matches!(err, VersionerError::InvalidPrerelease { .. }));
    }

    #[test]
    fn test_render_version() {
        assert_eq!(render_version(&Version::new(0, 0, 1), "v"), "v0.0.1");
        assert_eq!(render_version(&Version::new(1, 2, 3), ""), "1.2.3");

        let with_build = Version::parse("1.2.3-beta.2+sha.abc").unwrap();
        assert_eq!(render_version(&with_build, "v"), "v1.2.3-beta.2");
    }

    #[test]
    fn test_bump_display() {
        assert_eq!(VersionBump::Major.to_string(), "major");
        assert_eq!(VersionBump::Patch.to_string(), "patch");
    }
}
