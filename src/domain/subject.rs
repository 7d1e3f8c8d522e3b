//! Conventional-commit subject grammar.
//!
//! A subject line has the shape `type(scope)!: title`. Everything up to the
//! first colon is the *prefix*; the prefix is then split into a type and an
//! optional parenthesized scope. Types are not validated against any
//! vocabulary: `build`, `wip` or `release-notes` are all accepted.

use regex::Regex;
use std::fmt;

/// Open, string-valued commit type (`fix`, `feat`, `chore`, ...)
///
/// The empty type marks a subject that did not follow the grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CommitType(String);

impl CommitType {
    /// Type token that selects a patch bump
    pub const FIX: &'static str = "fix";
    /// Type token for features. Features fall through to the default minor
    /// bump, so the decision engine never checks for it.
    pub const FEATURE: &'static str = "feat";

    pub fn new(value: impl Into<String>) -> Self {
        CommitType(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommitType {
    fn from(value: &str) -> Self {
        CommitType::new(value)
    }
}

impl PartialEq<str> for CommitType {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CommitType {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Result of parsing a single subject line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSubject {
    pub commit_type: CommitType,
    pub scope: Option<String>,
    pub title: String,
    pub is_breaking: bool,
}

/// Parse a subject line according to the conventional commits summary grammar.
///
/// Handles subjects such as:
/// - `chore: remove elastic APM in staging`
/// - `fix(apm): add development to environment chart`
/// - `feat(api)!: drop v1 endpoints`
///
/// A subject without a colon becomes the title as-is.
pub fn parse_subject(subject: &str) -> ParsedSubject {
    let captures = Regex::new(r"^([^:]*):\s*(.*)")
        .ok()
        .and_then(|re| re.captures(subject));

    match captures {
        Some(captures) => {
            let prefix = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            let title = captures
                .get(2)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();

            ParsedSubject {
                title,
                ..parse_prefix(prefix)
            }
        }
        None => ParsedSubject {
            title: subject.to_string(),
            ..ParsedSubject::default()
        },
    }
}

/// Split a subject prefix (`feat`, `fix(ui)`, `feat(api)!`) into type, scope
/// and breaking marker. The returned title is always empty.
///
/// The breaking marker is read from the last character of the whole prefix,
/// so `feat(api)!` is breaking while `feat!(api)` is not.
pub fn parse_prefix(prefix: &str) -> ParsedSubject {
    let is_breaking = prefix.ends_with('!');

    if let Some(captures) = Regex::new(r"([a-zA-Z].*)\((.*?)\)")
        .ok()
        .and_then(|re| re.captures(prefix))
    {
        let commit_type = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let scope = captures
            .get(2)
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        return ParsedSubject {
            commit_type: CommitType::new(commit_type),
            scope,
            title: String::new(),
            is_breaking,
        };
    }

    // Only one trailing '!' belongs to the marker
    let commit_type = prefix.strip_suffix('!').unwrap_or(prefix);

    ParsedSubject {
        commit_type: CommitType::new(commit_type),
        scope: None,
        title: String::new(),
        is_breaking,
    }
}
