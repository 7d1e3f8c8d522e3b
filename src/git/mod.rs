//! Git operations abstraction layer
//!
//! The version decision only needs two things from version control: the
//! latest tag, and the raw log of everything committed since. Both are
//! behind the [History] trait so the parsing and decision logic can run
//! against canned text.
//!
//! Implementations:
//!
//! - [cli::GitCli]: spawns the `git` executable
//! - [repository::Git2Repository]: uses libgit2 through the `git2` crate
//! - [mock::MockHistory]: canned tags and log text for tests
//!
//! Every implementation hands back log text in the layout described in
//! [log]; tokenizing it is the caller's job.
//!
//! ```rust
//! # use semversioner::git::{History, MockHistory};
//! # fn example() -> semversioner::Result<()> {
//! let history = MockHistory::new().with_tag("v1.0.0");
//! if let Some(tag) = history.latest_tag()? {
//!     let raw = history.log_since(&tag)?;
//!     let commits = semversioner::git::log::tokenize(&raw)?;
//!     assert!(commits.is_empty());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod log;
pub mod mock;
pub mod repository;

pub use cli::GitCli;
pub use mock::MockHistory;
pub use repository::Git2Repository;

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Read access to the history the version is derived from
pub trait History {
    /// Most recent tag reachable from HEAD.
    ///
    /// # Returns
    /// * `Ok(Some(tag))` - Name of the latest tag (e.g., "v1.2.3")
    /// * `Ok(None)` - The repository has no tags at all
    /// * `Err` - If the lookup itself failed
    fn latest_tag(&self) -> Result<Option<String>>;

    /// Raw log of the range `tag..HEAD`, newest commit first.
    ///
    /// The text follows the layout read by [log::tokenize].
    fn log_since(&self, tag: &str) -> Result<String>;
}

/// Source of `git describe` style tags for snapshot builds
pub trait SnapshotSource {
    /// Latest tag decorated with the distance to HEAD and the abbreviated
    /// hash, with git's `g` hash marker removed (`v1.0.2-4-123aefd`).
    ///
    /// Returns `Ok(None)` when the repository has no tags.
    fn latest_prerelease_tag(&self) -> Result<Option<String>>;
}

/// Selects which [History] implementation the binary uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Spawn the `git` executable
    #[default]
    Cli,
    /// Use libgit2
    Libgit2,
}

/// Remove git's `g` marker in front of the abbreviated hash of a describe
/// result (`v1.0.2-4-g123aefd` -> `v1.0.2-4-123aefd`).
pub(crate) fn strip_describe_marker(describe: &str) -> String {
    match regex::Regex::new(r"-g([0-9a-f]+)$") {
        Ok(re) => re.replace(describe, "-$1").into_owned(),
        Err(_) => describe.to_string(),
    }
}
