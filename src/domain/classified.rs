use std::io::{self, BufRead};

use tracing::error;

use super::commit::RawCommit;
use super::subject::{parse_subject, CommitType};

/// Body marker that flags a breaking change regardless of the subject
pub const BREAKING_CHANGE_MARKER: &str = "BREAKING CHANGE";

/// A commit whose subject has been parsed and whose breaking status is final
///
/// `ClassifiedCommit::default()` is the empty classification: no type, no
/// scope, not breaking. It stands in for commits that carry no information.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedCommit {
    pub commit_type: CommitType,
    pub scope: Option<String>,
    pub title: String,
    pub body: String,
    pub is_breaking: bool,
    pub raw: RawCommit,
}

impl ClassifiedCommit {
    /// Classify a raw commit.
    ///
    /// Commits with an empty subject yield the empty classification.
    pub fn classify(raw: &RawCommit) -> Self {
        if raw.subject.is_empty() {
            return ClassifiedCommit::default();
        }

        let parsed = parse_subject(&raw.subject);

        let body = match normalize_body(&raw.body) {
            Ok(body) => body,
            Err(e) => {
                error!(hash = %raw.hash, "reading commit message body failed: {}", e);
                return ClassifiedCommit::default();
            }
        };

        // Once set from the subject, the flag stays set
        let is_breaking = parsed.is_breaking || body.contains(BREAKING_CHANGE_MARKER);

        ClassifiedCommit {
            commit_type: parsed.commit_type,
            scope: parsed.scope,
            title: parsed.title,
            body,
            is_breaking,
            raw: raw.clone(),
        }
    }

    /// True when the subject followed the conventional grammar
    pub fn is_conventional(&self) -> bool {
        !self.commit_type.is_empty()
    }
}

/// Re-join the body line by line and drop a single leading line feed.
fn normalize_body(body: &str) -> io::Result<String> {
    let lines = body.as_bytes().lines().collect::<io::Result<Vec<String>>>()?;
    let joined = lines.join("\n");

    Ok(joined
        .strip_prefix('\n')
        .map(str::to_string)
        .unwrap_or(joined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Author;

    fn raw(subject: &str, body: &str) -> RawCommit {
        RawCommit {
            subject: subject.to_string(),
            body: body.to_string(),
            hash: "deadbeef".to_string(),
            author: Author::new("megatron", "megatron@email.com"),
            ..RawCommit::default()
        }
    }

    #[test]
    fn test_classify_fix() {
        let commit = raw(
            "fix: something happened and this should be fixed",
            "I found this bug and fixed it\n\nSigned-of-by: megatron",
        );

        assert_eq!(
            ClassifiedCommit::classify(&commit),
            ClassifiedCommit {
                commit_type: CommitType::new("fix"),
                scope: None,
                title: "something happened and this should be fixed".to_string(),
                body: "I found this bug and fixed it\n\nSigned-of-by: megatron".to_string(),
                is_breaking: false,
                raw: commit.clone(),
            }
        );
    }

    #[test]
    fn test_classify_non_conventional() {
        let commit = raw(
            "This is not conventionalCommit",
            "I found this bug and fixed it\n\nwhoa whoa!",
        );
        let classified = ClassifiedCommit::classify(&commit);

        assert!(classified.commit_type.is_empty());
        assert!(!classified.is_conventional());
        assert_eq!(classified.title, "This is not conventionalCommit");
        assert_eq!(classified.body, "I found this bug and fixed it\n\nwhoa whoa!");
        assert!(!classified.is_breaking);
        assert_eq!(classified.raw, commit);
    }

    #[test]
    fn test_classify_empty_subject() {
        assert_eq!(
            ClassifiedCommit::classify(&RawCommit::default()),
            ClassifiedCommit::default()
        );
    }

    #[test]
    fn test_empty_subject_discards_body_marker() {
        let commit = raw("", "BREAKING CHANGE: ignored");
        assert!(!ClassifiedCommit::classify(&commit).is_breaking);
    }

    #[test]
    fn test_body_breaking_change() {
        let commit = raw(
            "feat: square peg is now a circle",
            "I found this bug and fixed it\n\nBREAKING CHANGE: This requires a circle\nSigned-of-by: megatron",
        );
        assert!(ClassifiedCommit::classify(&commit).is_breaking);
    }

    #[test]
    fn test_body_marker_anywhere() {
        let commit = raw("docs: typo", "see the note, BREAKING CHANGE applies");
        assert!(ClassifiedCommit::classify(&commit).is_breaking);
    }

    #[test]
    fn test_subject_marker_survives_plain_body() {
        let commit = raw("refactor!: rename crate", "nothing special");
        assert!(ClassifiedCommit::classify(&commit).is_breaking);
    }

    #[test]
    fn test_normalize_body_strips_one_leading_newline() {
        assert_eq!(normalize_body("\nthis is the body\n\nlalala").unwrap(), "this is the body\n\nlalala");
        assert_eq!(normalize_body("\n\ntwo").unwrap(), "\ntwo");
    }

    #[test]
    fn test_normalize_body_drops_carriage_returns_and_trailing_newline() {
        assert_eq!(normalize_body("one\r\ntwo\r\n").unwrap(), "one\ntwo");
        assert_eq!(normalize_body("").unwrap(), "");
    }
}
