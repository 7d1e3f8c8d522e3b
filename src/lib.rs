pub mod analyzer;
pub mod boundary;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod ui;
pub mod versioner;

pub use analyzer::{determine_next_version, Analysis, VersionAnalyzer};
pub use domain::{render_version, ClassifiedCommit, RawCommit, ReleaseType, VersionBump};
pub use error::{Result, VersionerError};
pub use versioner::{Release, Versioner};
