use std::fmt;

/// Non-fatal conditions met while deriving a version from history.
/// These are reported to the user but never change the decision.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The repository has no tags; the bootstrap version is used
    NoTags { initial_version: String },
    /// No commits since the latest tag; the minor fallback applies
    NoNewCommits { latest_tag: String },
    /// A commit subject does not follow the conventional grammar
    UnconventionalCommit { hash: String, subject: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoTags { initial_version } => {
                write!(f, "No tags found, starting at {}", initial_version)
            }
            BoundaryWarning::NoNewCommits { latest_tag } => {
                write!(f, "No new commits since tag '{}'", latest_tag)
            }
            BoundaryWarning::UnconventionalCommit { hash, subject } => {
                let short_hash = hash.get(..7).unwrap_or(hash);
                write!(f, "Commit {} is not conventional: '{}'", short_hash, subject)
            }
        }
    }
}
