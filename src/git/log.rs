//! Raw history tokenizer.
//!
//! History backends emit one record per commit in a fixed line layout:
//!
//! ```text
//! <committer date, RFC 3339>
//! <hash>
//! <author name>
//! <author email>
//! <subject>
//! <body line 0>
//! ...
//! <sentinel>
//! ```
//!
//! [`tokenize`] turns such a batch back into [`RawCommit`] values, keeping
//! the order the backend produced.

use chrono::DateTime;
use tracing::debug;

use crate::domain::{Author, RawCommit};
use crate::error::{Result, VersionerError};

/// Marks the end of every record in a batch
pub const COMMIT_SENTINEL: &str = "@@__SEMVERSIONER_EOR__@@";

/// Number of header lines preceding the body
const HEADER_LINES: usize = 5;

/// Pretty format passed to `git log --format=...`.
///
/// Every header field sits on its own line even when empty, so an author
/// without a name or email cannot shift the subject into another slot.
pub fn log_format() -> String {
    format!("%n%cI%n%H%n%an%n%ae%n%s%n%b{}", COMMIT_SENTINEL)
}

/// Tokenize a batch delimited by [`COMMIT_SENTINEL`].
pub fn tokenize(raw: &str) -> Result<Vec<RawCommit>> {
    tokenize_with(raw, COMMIT_SENTINEL)
}

/// Tokenize a batch delimited by a caller-supplied sentinel.
///
/// Any bad record fails the whole batch.
pub fn tokenize_with(raw: &str, sentinel: &str) -> Result<Vec<RawCommit>> {
    let commits = split_and_filter(raw, sentinel)
        .enumerate()
        .map(|(index, chunk)| parse_record(index, chunk))
        .collect::<Result<Vec<_>>>()?;

    debug!(count = commits.len(), "tokenized raw history");
    Ok(commits)
}

/// Split on the sentinel, dropping the delimiter artifacts between records.
fn split_and_filter<'a>(raw: &'a str, sentinel: &'a str) -> impl Iterator<Item = &'a str> {
    raw.split(sentinel)
        .filter(|chunk| !matches!(*chunk, "" | "\n" | "\t"))
}

fn parse_record(index: usize, chunk: &str) -> Result<RawCommit> {
    // Only leading line feeds are noise; trailing ones may be empty fields
    let tokens: Vec<&str> = chunk.trim_start_matches('\n').split('\n').collect();
    if tokens.len() < HEADER_LINES {
        return Err(VersionerError::malformed(
            index,
            format!(
                "expected at least {} lines, found {}",
                HEADER_LINES,
                tokens.len()
            ),
        ));
    }

    let date = DateTime::parse_from_rfc3339(tokens[0]).map_err(|source| {
        VersionerError::InvalidDate {
            value: tokens[0].to_string(),
            source,
        }
    })?;

    if tokens[1].is_empty() {
        return Err(VersionerError::malformed(index, "empty commit hash"));
    }

    let body = tokens[HEADER_LINES..]
        .join("\n")
        .trim_end_matches('\n')
        .to_string();

    Ok(RawCommit {
        date,
        hash: tokens[1].to_string(),
        author: Author::new(tokens[2], tokens[3]),
        subject: tokens[4].to_string(),
        body,
    })
}

/// Render a commit in the layout [`tokenize`] reads.
///
/// Used by backends that do not go through `git log` so that every history
/// source shares one parser.
pub fn format_record(commit: &RawCommit) -> String {
    let mut record = format!(
        "\n{}\n{}\n{}\n{}\n{}",
        commit.date.to_rfc3339(),
        commit.hash,
        commit.author.name,
        commit.author.email,
        commit.subject
    );
    if !commit.body.is_empty() {
        record.push('\n');
        record.push_str(&commit.body);
        record.push('\n');
    }
    record.push_str(COMMIT_SENTINEL);
    record
}
