use chrono::{DateTime, FixedOffset};

/// Commit author as recorded by the history tool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl Author {
    /// Create a new author
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Author {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// One commit exactly as emitted by the history tool.
///
/// Produced by [`crate::git::log::tokenize`] and never mutated afterwards.
/// An absent body is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCommit {
    pub date: DateTime<FixedOffset>,
    pub hash: String,
    pub author: Author,
    pub subject: String,
    pub body: String,
}

impl RawCommit {
    /// Abbreviated hash for display (first 7 characters)
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }
}
