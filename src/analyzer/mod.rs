//! Analysis engine for determining version bumps from commits

pub mod version_analyzer;

pub use version_analyzer::{determine_next_version, partition_commits, Analysis, VersionAnalyzer};
