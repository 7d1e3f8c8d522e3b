use crate::domain::RawCommit;
use crate::error::{Result, VersionerError};
use crate::git::log::{log_format, tokenize};
use crate::git::{strip_describe_marker, History, SnapshotSource};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::{debug, instrument};

/// History backed by the `git` executable.
///
/// Every command runs as `git -C <work_dir> <action> <args...>`.
#[derive(Debug, Clone)]
pub struct GitCli {
    work_dir: PathBuf,
    binary: String,
}

impl GitCli {
    /// Create a backend for the repository at `work_dir` using `git` from PATH
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        GitCli {
            work_dir: work_dir.into(),
            binary: "git".to_string(),
        }
    }

    /// Use a different git executable
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Check whether the working directory is inside a git repository
    pub fn is_valid_git_dir(&self) -> bool {
        match self.run("rev-parse", &["--git-dir"]) {
            Ok(_) => true,
            Err(e) => {
                debug!(work_dir = %self.work_dir.display(), "invalid git repository: {}", e);
                false
            }
        }
    }

    /// Stage a file
    pub fn add(&self, file: impl AsRef<Path>) -> Result<()> {
        let file = file.as_ref().to_string_lossy().into_owned();
        self.run("add", &[file.as_str()])?;
        Ok(())
    }

    /// Create a commit from a subject and body and return it as recorded.
    ///
    /// # Arguments
    /// * `subject` - First line of the message
    /// * `body` - Remaining paragraphs (may be empty)
    /// * `allow_empty` - Permit a commit without staged changes
    pub fn create_commit(&self, subject: &str, body: &str, allow_empty: bool) -> Result<RawCommit> {
        let mut args = vec!["--quiet", "--cleanup", "strip", "-m", subject, "-m", body];
        if allow_empty {
            args.push("--allow-empty");
        }
        self.run("commit", &args)?;

        let format = format!("--format={}", log_format());
        let output = self.run("log", &[format.as_str(), "-n1"])?;
        tokenize(&output)?
            .into_iter()
            .next()
            .ok_or_else(|| VersionerError::git_command("log", "new commit not found in history"))
    }

    /// Create a tag at HEAD. Annotated tags use the tag name as message.
    pub fn create_tag(&self, tag: &str, annotated: bool) -> Result<()> {
        let mut args = vec![tag];
        if annotated {
            args.extend(["-a", "-m", tag]);
        }
        self.run("tag", &args)?;
        Ok(())
    }

    fn has_tag_history(&self) -> Result<bool> {
        let output = self.run("tag", &["--list"])?;
        Ok(!output.trim_matches('\n').is_empty())
    }

    /// Run a git sub-command and return its stdout
    fn run(&self, action: &str, args: &[&str]) -> Result<String> {
        debug!(action, ?args, "running git");
        let output = self.exec(action, args).output().map_err(|source| {
            VersionerError::GitSpawn {
                command: action.to_string(),
                source,
            }
        })?;
        check_output(action, output)
    }

    fn exec(&self, action: &str, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("-C").arg(&self.work_dir).arg(action).args(args);
        cmd
    }
}

fn check_output(action: &str, output: Output) -> Result<String> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VersionerError::git_command(action, stderr.trim_end()));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

impl History for GitCli {
    #[instrument(skip(self), fields(work_dir = %self.work_dir.display()))]
    fn latest_tag(&self) -> Result<Option<String>> {
        if !self.has_tag_history()? {
            return Ok(None);
        }
        let output = self.run("describe", &["--tags", "--abbrev=0"])?;
        Ok(Some(output.trim_end_matches('\n').to_string()))
    }

    #[instrument(skip(self), fields(work_dir = %self.work_dir.display()))]
    fn log_since(&self, tag: &str) -> Result<String> {
        let format = format!("--format={}", log_format());
        let range = format!("{}..HEAD", tag);
        self.run("log", &[format.as_str(), range.as_str()])
    }
}

impl SnapshotSource for GitCli {
    #[instrument(skip(self), fields(work_dir = %self.work_dir.display()))]
    fn latest_prerelease_tag(&self) -> Result<Option<String>> {
        if !self.has_tag_history()? {
            return Ok(None);
        }
        let output = self.run("describe", &["--tags"])?;
        Ok(Some(strip_describe_marker(output.trim_end_matches('\n'))))
    }
}
