use thiserror::Error;

/// Unified error type for semversioner operations
#[derive(Error, Debug)]
pub enum VersionerError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("git {command} failed: {stderr}")]
    GitCommand { command: String, stderr: String },

    #[error("Failed to run git {command}: {source}")]
    GitSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a git repository: {0}")]
    NotARepository(String),

    #[error("Malformed commit record #{index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("Invalid commit date '{value}': {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid version tag '{tag}': {source}")]
    InvalidTag {
        tag: String,
        #[source]
        source: semver::Error,
    },

    #[error("Invalid pre-release identifier '{name}': {source}")]
    InvalidPrerelease {
        name: String,
        #[source]
        source: semver::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in semversioner
pub type Result<T> = std::result::Result<T, VersionerError>;

impl VersionerError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionerError::Config(msg.into())
    }

    /// Create a malformed record error for the record at `index`
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        VersionerError::MalformedRecord {
            index,
            reason: reason.into(),
        }
    }

    /// Create an error for a git sub-command that exited unsuccessfully
    pub fn git_command(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        VersionerError::GitCommand {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// True when the raw history text itself was unusable.
    ///
    /// These errors abort the whole run; a partially tokenized log would
    /// silently skew the bump decision.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            VersionerError::MalformedRecord { .. }
                | VersionerError::InvalidDate { .. }
                | VersionerError::InvalidTag { .. }
        )
    }
}
