//! Pure formatting functions for terminal output.
//!
//! The computed version is the only thing written to stdout; everything in
//! this module goes to stderr so the output stays scriptable.

use console::style;

use crate::analyzer::Analysis;
use crate::boundary::BoundaryWarning;
use crate::domain::{render_version, ClassifiedCommit};

/// Commits listed by [`display_analysis`] before the remainder is summarized
const MAX_LISTED_COMMITS: usize = 10;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// One line per commit: short hash, type, scope, breaking marker and title.
pub fn format_commit_line(commit: &ClassifiedCommit) -> String {
    let kind = if commit.commit_type.is_empty() {
        "-".to_string()
    } else {
        match &commit.scope {
            Some(scope) => format!("{}({})", commit.commit_type, scope),
            None => commit.commit_type.to_string(),
        }
    };
    let marker = if commit.is_breaking { "!" } else { "" };

    format!(
        "{} {}{} {}",
        commit.raw.short_hash(),
        kind,
        marker,
        commit.title
    )
}

/// Display the commit analysis behind a conventional release.
///
/// Shows the latest tag, up to 10 commits, the bump and the next version.
///
/// # Arguments
/// * `analysis` - Result of the analysis
/// * `prefix` - Prefix used when rendering versions
pub fn display_analysis(analysis: &Analysis, prefix: &str) {
    match &analysis.latest_tag {
        Some(tag) => eprintln!("{} {}", style("Latest tag:").bold(), tag),
        None => eprintln!("{} (none)", style("Latest tag:").bold()),
    }

    eprintln!(
        "{}",
        style(format!("{} commits since tag:", analysis.commits.len())).underlined()
    );
    for (i, commit) in analysis.commits.iter().take(MAX_LISTED_COMMITS).enumerate() {
        eprintln!("  {}. {}", i + 1, format_commit_line(commit));
    }
    if analysis.commits.len() > MAX_LISTED_COMMITS {
        eprintln!(
            "  ... and {} more commits",
            analysis.commits.len() - MAX_LISTED_COMMITS
        );
    }

    for warning in &analysis.warnings {
        display_boundary_warning(warning);
    }

    let bump = analysis
        .bump
        .map(|b| b.to_string())
        .unwrap_or_else(|| "initial".to_string());
    eprintln!(
        "{} {} -> {}",
        style("Bump:").bold(),
        bump,
        style(render_version(&analysis.next_version, prefix)).green()
    );
}
