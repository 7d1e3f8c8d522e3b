use crate::domain::{Author, RawCommit};
use crate::error::{Result, VersionerError};
use crate::git::log::format_record;
use crate::git::{strip_describe_marker, History, SnapshotSource};
use chrono::{DateTime, FixedOffset, TimeZone};
use git2::{DescribeFormatOptions, DescribeOptions, Repository as Git2Repo, Signature, Sort};
use std::path::Path;
use tracing::{debug, instrument};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path)
            .map_err(|_| VersionerError::NotARepository(path.display().to_string()))?;

        Ok(Git2Repository { repo })
    }

    /// Initialize a new repository at `path`
    pub fn init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::init(path)?;
        Ok(Git2Repository { repo })
    }

    /// Stage a file given relative to the working directory
    pub fn add(&self, file: impl AsRef<Path>) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_path(file.as_ref())?;
        index.write()?;
        Ok(())
    }

    /// Create a commit from the current index and return it as recorded.
    ///
    /// Without `allow_empty`, a commit whose tree equals its parent's is
    /// rejected the way `git commit` rejects it.
    pub fn create_commit(&self, subject: &str, body: &str, allow_empty: bool) -> Result<RawCommit> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => None,
            Err(e) if e.code() == git2::ErrorCode::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        if !allow_empty {
            let unchanged = match &parent {
                Some(parent) => parent.tree_id() == tree_id,
                None => tree.is_empty(),
            };
            if unchanged {
                return Err(VersionerError::git_command("commit", "nothing to commit"));
            }
        }

        let message = git2::message_prettify(format!("{}\n\n{}", subject, body), None)?;
        let signature = self.signature()?;
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, &message, &tree, &parents)?;
        let commit = self.repo.find_commit(oid)?;
        debug!(%oid, "created commit");

        Ok(to_raw_commit(&commit))
    }

    /// Create a tag at HEAD. Annotated tags use the tag name as message.
    pub fn create_tag(&self, name: &str, annotated: bool) -> Result<()> {
        let head = self.repo.head()?.peel(git2::ObjectType::Commit)?;

        if annotated {
            let signature = self.signature()?;
            self.repo.tag(name, &head, &signature, name, false)?;
        } else {
            self.repo.tag_lightweight(name, &head, false)?;
        }
        Ok(())
    }

    /// Signature from git configuration, or a fixed fallback identity
    fn signature(&self) -> Result<Signature<'static>> {
        match self.repo.signature() {
            Ok(signature) => Ok(signature.to_owned()),
            Err(_) => Ok(Signature::now("semversioner", "semversioner@localhost")?),
        }
    }

    fn has_tag_history(&self) -> Result<bool> {
        Ok(!self.repo.tag_names(None)?.is_empty())
    }

    fn describe(&self, abbreviated_size: u32) -> Result<String> {
        let mut options = DescribeOptions::new();
        options.describe_tags();

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(abbreviated_size);

        let description = self.repo.describe(&options)?;
        Ok(description.format(Some(&format))?)
    }
}

/// Convert a git2 commit into the record the tokenizer would produce
fn to_raw_commit(commit: &git2::Commit<'_>) -> RawCommit {
    let author = commit.author();

    RawCommit {
        date: commit_date(commit.time()),
        hash: commit.id().to_string(),
        author: Author::new(
            author.name().unwrap_or_default(),
            author.email().unwrap_or_default(),
        ),
        subject: commit.summary().unwrap_or_default().to_string(),
        body: commit
            .body()
            .unwrap_or_default()
            .trim_end_matches('\n')
            .to_string(),
    }
}

fn commit_date(time: git2::Time) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(time.offset_minutes() * 60)
        .and_then(|offset| offset.timestamp_opt(time.seconds(), 0).single())
        .unwrap_or_default()
}

impl History for Git2Repository {
    #[instrument(skip(self))]
    fn latest_tag(&self) -> Result<Option<String>> {
        if !self.has_tag_history()? {
            return Ok(None);
        }
        self.describe(0).map(Some)
    }

    #[instrument(skip(self))]
    fn log_since(&self, tag: &str) -> Result<String> {
        let since = self.repo.revparse_single(tag)?.peel_to_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head()?;
        revwalk.hide(since.id())?;

        let mut log = String::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            log.push_str(&format_record(&to_raw_commit(&commit)));
        }
        Ok(log)
    }
}

impl SnapshotSource for Git2Repository {
    #[instrument(skip(self))]
    fn latest_prerelease_tag(&self) -> Result<Option<String>> {
        if !self.has_tag_history()? {
            return Ok(None);
        }
        let described = self.describe(7)?;
        Ok(Some(strip_describe_marker(&described)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_repository() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let result = Git2Repository::open(&missing);
        assert!(matches!(result, Err(VersionerError::NotARepository(_))));
    }

    #[test]
    fn test_commit_date_keeps_offset() {
        let date = commit_date(git2::Time::new(1_600_000_000, 120));
        assert_eq!(date.to_rfc3339(), "2020-09-13T14:26:40+02:00");
    }

    #[test]
    fn test_empty_repository_has_no_tag() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repository::init(dir.path()).unwrap();
        assert_eq!(repo.latest_tag().unwrap(), None);
        assert_eq!(repo.latest_prerelease_tag().unwrap(), None);
    }

    #[test]
    fn test_commit_without_changes_requires_allow_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repository::init(dir.path()).unwrap();

        assert!(repo.create_commit("chore: nothing", "", false).is_err());
        let commit = repo.create_commit("chore: nothing", "", true).unwrap();
        assert_eq!(commit.subject, "chore: nothing");
        assert_eq!(commit.body, "");
    }
}
