//! Domain logic - pure business rules independent of git operations

pub mod classified;
pub mod commit;
pub mod subject;
pub mod version;

pub use classified::{ClassifiedCommit, BREAKING_CHANGE_MARKER};
pub use commit::{Author, RawCommit};
pub use subject::{parse_subject, CommitType, ParsedSubject};
pub use version::{
    bump_version, parse_tag_version, render_version, with_prerelease, ReleaseType, VersionBump,
};
