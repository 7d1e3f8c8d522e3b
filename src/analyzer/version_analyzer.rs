use crate::boundary::BoundaryWarning;
use crate::config::VersioningConfig;
use crate::domain::{bump_version, parse_tag_version, ClassifiedCommit, CommitType, VersionBump};
use crate::error::Result;
use crate::git::log::tokenize;
use crate::git::History;
use semver::Version;
use tracing::{debug, info, warn};

/// Everything learned while computing the next version
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Latest tag, `None` on a repository without tags
    pub latest_tag: Option<String>,
    /// Commits since the latest tag, in log order
    pub commits: Vec<ClassifiedCommit>,
    /// Increment applied to the tag; `None` for the bootstrap version
    pub bump: Option<VersionBump>,
    pub next_version: Version,
    pub warnings: Vec<BoundaryWarning>,
}

/// Analyzes commits to determine version bump type
#[derive(Debug, Clone)]
pub struct VersionAnalyzer {
    fix_type: String,
    initial_version: Version,
}

impl Default for VersionAnalyzer {
    fn default() -> Self {
        VersionAnalyzer {
            fix_type: CommitType::FIX.to_string(),
            initial_version: Version::new(0, 0, 0),
        }
    }
}

impl VersionAnalyzer {
    /// Create a new version analyzer
    pub fn new(config: &VersioningConfig) -> Result<Self> {
        Ok(VersionAnalyzer {
            fix_type: config.fix_type.clone(),
            initial_version: parse_tag_version(&config.initial_version)?,
        })
    }

    /// Base version used when the repository has no tags
    pub fn initial_version(&self) -> &Version {
        &self.initial_version
    }

    /// Fetch the latest tag and the log since, then decide the next version
    pub fn analyze<H: History + ?Sized>(&self, history: &H) -> Result<Analysis> {
        let latest_tag = history.latest_tag()?;

        let Some(tag) = latest_tag else {
            let next_version = bump_version(&self.initial_version, VersionBump::Patch);
            let warning = BoundaryWarning::NoTags {
                initial_version: next_version.to_string(),
            };
            warn!("{}", warning);
            return Ok(Analysis {
                latest_tag: None,
                commits: Vec::new(),
                bump: None,
                next_version,
                warnings: vec![warning],
            });
        };

        let current = parse_tag_version(&tag)?;
        let raw = history.log_since(&tag)?;
        let commits: Vec<ClassifiedCommit> = tokenize(&raw)?
            .iter()
            .map(ClassifiedCommit::classify)
            .collect();

        let warnings = collect_warnings(&tag, &commits);
        for warning in &warnings {
            match warning {
                BoundaryWarning::UnconventionalCommit { .. } => debug!("{}", warning),
                _ => warn!("{}", warning),
            }
        }

        let bump = self.decide_bump(&commits);
        let next_version = bump_version(&current, bump);
        info!(%tag, %bump, next = %next_version, commits = commits.len(), "determined next version");

        Ok(Analysis {
            latest_tag: Some(tag),
            commits,
            bump: Some(bump),
            next_version,
            warnings,
        })
    }

    /// Choose the increment for a set of commits.
    ///
    /// Breaking changes win over fixes, fixes win over everything else, and
    /// minor is the fallback even for an empty or unconventional set.
    pub fn decide_bump(&self, commits: &[ClassifiedCommit]) -> VersionBump {
        let (breaking, non_breaking) = partition_commits(commits.iter(), |c| c.is_breaking);
        if !breaking.is_empty() {
            debug!(count = breaking.len(), "breaking commits found");
            return VersionBump::Major;
        }

        let (fixes, _) =
            partition_commits(non_breaking, |c| c.commit_type == self.fix_type.as_str());
        if !fixes.is_empty() {
            debug!(count = fixes.len(), "fix commits found");
            return VersionBump::Patch;
        }

        VersionBump::Minor
    }

    /// Next version for an optional latest tag version and its commits
    pub fn next_version(&self, current: Option<&Version>, commits: &[ClassifiedCommit]) -> Version {
        match current {
            Some(current) => bump_version(current, self.decide_bump(commits)),
            None => bump_version(&self.initial_version, VersionBump::Patch),
        }
    }
}

/// Split commits into those matching `predicate` and the rest, keeping order.
pub fn partition_commits<'a, I, F>(
    commits: I,
    predicate: F,
) -> (Vec<&'a ClassifiedCommit>, Vec<&'a ClassifiedCommit>)
where
    I: IntoIterator<Item = &'a ClassifiedCommit>,
    F: Fn(&ClassifiedCommit) -> bool,
{
    commits.into_iter().partition(|c| predicate(*c))
}

fn collect_warnings(tag: &str, commits: &[ClassifiedCommit]) -> Vec<BoundaryWarning> {
    if commits.is_empty() {
        return vec![BoundaryWarning::NoNewCommits {
            latest_tag: tag.to_string(),
        }];
    }

    commits
        .iter()
        .filter(|c| !c.is_conventional())
        .map(|c| BoundaryWarning::UnconventionalCommit {
            hash: c.raw.hash.clone(),
            subject: c.raw.subject.clone(),
        })
        .collect()
}

/// Determine the next version of the repository behind `history`
/// from the conventional commits since its latest tag.
pub fn determine_next_version<H: History + ?Sized>(history: &H) -> Result<Version> {
    VersionAnalyzer::default()
        .analyze(history)
        .map(|analysis| analysis.next_version)
}
