//! Release-type dispatch.
//!
//! Explicit `major`/`minor`/`patch` releases bump the latest tag without
//! looking at commits, `conventional` runs the commit analysis and
//! `snapshot` decorates the `git describe` result.

use crate::analyzer::{Analysis, VersionAnalyzer};
use crate::domain::{bump_version, parse_tag_version, with_prerelease, ReleaseType, VersionBump};
use crate::error::Result;
use crate::git::{History, SnapshotSource};
use semver::Version;
use tracing::debug;

/// Pre-release suffix appended to snapshot versions
pub const SNAPSHOT: &str = "SNAPSHOT";

/// A computed version, with the commit analysis behind it when there was one
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    pub version: Version,
    pub analysis: Option<Analysis>,
}

/// Computes the next version of one repository
pub struct Versioner<'a, H: ?Sized> {
    history: &'a H,
    analyzer: VersionAnalyzer,
}

impl<'a, H> Versioner<'a, H>
where
    H: History + SnapshotSource + ?Sized,
{
    pub fn new(history: &'a H, analyzer: VersionAnalyzer) -> Self {
        Versioner { history, analyzer }
    }

    /// Compute the next version for the given release type.
    ///
    /// A non-empty `prerelease` replaces the pre-release of the result.
    pub fn next_version(
        &self,
        release_type: ReleaseType,
        prerelease: Option<&str>,
    ) -> Result<Release> {
        debug!(?release_type, ?prerelease, "computing next version");

        let release = match release_type {
            ReleaseType::Major => self.explicit(VersionBump::Major)?,
            ReleaseType::Minor => self.explicit(VersionBump::Minor)?,
            ReleaseType::Patch => self.explicit(VersionBump::Patch)?,
            ReleaseType::Conventional => {
                let analysis = self.analyzer.analyze(self.history)?;
                Release {
                    version: analysis.next_version.clone(),
                    analysis: Some(analysis),
                }
            }
            ReleaseType::Snapshot => Release {
                version: self.snapshot()?,
                analysis: None,
            },
        };

        match prerelease {
            Some(name) => Ok(Release {
                version: with_prerelease(&release.version, name)?,
                ..release
            }),
            None => Ok(release),
        }
    }

    fn explicit(&self, bump: VersionBump) -> Result<Release> {
        let current = match self.history.latest_tag()? {
            Some(tag) => parse_tag_version(&tag)?,
            None => self.analyzer.initial_version().clone(),
        };
        Ok(Release {
            version: bump_version(&current, bump),
            analysis: None,
        })
    }

    fn snapshot(&self) -> Result<Version> {
        let base = match self.history.latest_prerelease_tag()? {
            Some(tag) => tag,
            None => self.analyzer.initial_version().to_string(),
        };
        parse_tag_version(&format!("{}-{}", base, SNAPSHOT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::render_version;
    use crate::git::MockHistory;

    fn next(history: &MockHistory, release_type: ReleaseType, pre: Option<&str>) -> String {
        let versioner = Versioner::new(history, VersionAnalyzer::default());
        let release = versioner.next_version(release_type, pre).unwrap();
        render_version(&release.version, "v")
    }

    #[test]
    fn test_explicit_bumps_ignore_commits() {
        let history = MockHistory::new()
            .with_tag("v1.2.3")
            .with_message("feat!: breaking", "");

        assert_eq!(next(&history, ReleaseType::Major, None), "v2.0.0");
        assert_eq!(next(&history, ReleaseType::Minor, None), "v1.3.0");
        assert_eq!(next(&history, ReleaseType::Patch, None), "v1.2.4");
        assert!(history.requested_ranges().is_empty());
    }

    #[test]
    fn test_explicit_bump_without_tag_starts_from_initial() {
        let history = MockHistory::new();
        assert_eq!(next(&history, ReleaseType::Minor, None), "v0.1.0");
    }

    #[test]
    fn test_conventional_keeps_analysis() {
        let history = MockHistory::new()
            .with_tag("v0.1.0")
            .with_message("fix: bug", "");

        let versioner = Versioner::new(&history, VersionAnalyzer::default());
        let release = versioner
            .next_version(ReleaseType::Conventional, None)
            .unwrap();

        assert_eq!(release.version, Version::new(0, 1, 1));
        let analysis = release.analysis.unwrap();
        assert_eq!(analysis.commits.len(), 1);
        assert_eq!(analysis.bump, Some(VersionBump::Patch));
    }

    #[test]
    fn test_snapshot_from_describe() {
        let history = MockHistory::new()
            .with_tag("v1.0.2")
            .with_prerelease_tag("v1.0.2-4-123aefd");

        assert_eq!(
            next(&history, ReleaseType::Snapshot, None),
            "v1.0.2-4-123aefd-SNAPSHOT"
        );
    }

    #[test]
    fn test_snapshot_without_tags() {
        let history = MockHistory::new();
        assert_eq!(next(&history, ReleaseType::Snapshot, None), "v0.0.0-SNAPSHOT");
    }

    #[test]
    fn test_prerelease_name_replaces_prerelease() {
        let history = MockHistory::new()
            .with_tag("v1.0.0")
            .with_message("feat: thing", "");

        assert_eq!(
            next(&history, ReleaseType::Conventional, Some("rc")),
            "v1.1.0-rc"
        );
        assert_eq!(next(&history, ReleaseType::Snapshot, Some("alpha")), "v1.0.0-alpha");
    }

    #[test]
    fn test_invalid_prerelease_name() {
        let history = MockHistory::new().with_tag("v1.0.0");
        let versioner = Versioner::new(&history, VersionAnalyzer::default());
        assert!(versioner
            .next_version(ReleaseType::Patch, Some("not valid"))
            .is_err());
    }

    #[test]
    fn test_unparsable_tag_is_reported() {
        let history = MockHistory::new().with_tag("release-candidate");
        let versioner = Versioner::new(&history, VersionAnalyzer::default());
        let err = versioner
            .next_version(ReleaseType::Conventional, None)
            .unwrap_err();
        assert!(err.is_malformed_input());
    }
}
