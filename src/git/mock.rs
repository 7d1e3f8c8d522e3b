use crate::domain::{Author, RawCommit};
use crate::error::{Result, VersionerError};
use crate::git::log::format_record;
use crate::git::{History, SnapshotSource};
use chrono::DateTime;
use std::cell::RefCell;

/// Mock history for testing without actual git operations
#[derive(Debug, Default)]
pub struct MockHistory {
    tag: Option<String>,
    prerelease_tag: Option<String>,
    log: String,
    commit_count: usize,
    tag_failure: Option<String>,
    log_failure: Option<String>,
    requested_ranges: RefCell<Vec<String>>,
}

impl MockHistory {
    /// Create a new mock history without tags or commits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the latest tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set the describe-style tag used for snapshots
    pub fn with_prerelease_tag(mut self, tag: impl Into<String>) -> Self {
        self.prerelease_tag = Some(tag.into());
        self
    }

    /// Append a commit to the log returned by [History::log_since]
    pub fn with_commit(mut self, commit: &RawCommit) -> Self {
        self.log.push_str(&format_record(commit));
        self.commit_count += 1;
        self
    }

    /// Append a commit built from a subject and body.
    ///
    /// Hash and date are derived from the number of commits added so far.
    pub fn with_message(self, subject: &str, body: &str) -> Self {
        let index = self.commit_count;
        let commit = RawCommit {
            date: DateTime::parse_from_rfc3339("2021-01-01T00:00:00Z")
                .unwrap_or_default()
                + chrono::Duration::minutes(index as i64),
            hash: format!("{:040x}", index + 1),
            author: Author::new("megatron", "megatron@email.com"),
            subject: subject.to_string(),
            body: body.to_string(),
        };
        self.with_commit(&commit)
    }

    /// Replace the log with arbitrary raw text
    pub fn with_raw_log(mut self, raw: impl Into<String>) -> Self {
        self.log = raw.into();
        self
    }

    /// Make [History::latest_tag] fail with the given stderr
    pub fn failing_tag_lookup(mut self, stderr: impl Into<String>) -> Self {
        self.tag_failure = Some(stderr.into());
        self
    }

    /// Make [History::log_since] fail with the given stderr
    pub fn failing_log(mut self, stderr: impl Into<String>) -> Self {
        self.log_failure = Some(stderr.into());
        self
    }

    /// Tags passed to [History::log_since], in call order
    pub fn requested_ranges(&self) -> Vec<String> {
        self.requested_ranges.borrow().clone()
    }
}

impl History for MockHistory {
    fn latest_tag(&self) -> Result<Option<String>> {
        if let Some(stderr) = &self.tag_failure {
            return Err(VersionerError::git_command("describe", stderr.clone()));
        }
        Ok(self.tag.clone())
    }

    fn log_since(&self, tag: &str) -> Result<String> {
        self.requested_ranges.borrow_mut().push(tag.to_string());
        if let Some(stderr) = &self.log_failure {
            return Err(VersionerError::git_command("log", stderr.clone()));
        }
        Ok(self.log.clone())
    }
}

impl SnapshotSource for MockHistory {
    fn latest_prerelease_tag(&self) -> Result<Option<String>> {
        if let Some(stderr) = &self.tag_failure {
            return Err(VersionerError::git_command("describe", stderr.clone()));
        }
        Ok(self.prerelease_tag.clone().or_else(|| self.tag.clone()))
    }
}
