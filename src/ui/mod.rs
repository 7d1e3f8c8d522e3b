//! User interface module - terminal reporting.
//!
//! Only formatting lives here; semversioner never prompts.

pub mod formatter;

pub use formatter::{
    display_analysis, display_boundary_warning, display_error, format_commit_line,
};
