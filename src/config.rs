use crate::domain::{CommitType, ReleaseType};
use crate::error::{Result, VersionerError};
use crate::git::Backend;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the project-local configuration file
pub const CONFIG_FILE_NAME: &str = "semversioner.toml";

/// Represents the complete configuration for semversioner.
///
/// Contains release defaults, history backend selection and versioning rules.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub versioning: VersioningConfig,
}

/// Defaults for the release computed when no flags are given.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default, rename = "type")]
    pub release_type: ReleaseType,

    #[serde(default)]
    pub prerelease: Option<String>,
}

/// Returns the default git executable.
fn default_git_binary() -> String {
    "git".to_string()
}

/// Configuration for the history backend.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default)]
    pub backend: Backend,

    #[serde(default = "default_git_binary")]
    pub binary: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            backend: Backend::default(),
            binary: default_git_binary(),
        }
    }
}

/// Returns the default prefix used when rendering versions.
fn default_tag_prefix() -> String {
    "v".to_string()
}

/// Returns the default bootstrap base version.
fn default_initial_version() -> String {
    "0.0.0".to_string()
}

/// Returns the default commit type that selects a patch bump.
fn default_fix_type() -> String {
    CommitType::FIX.to_string()
}

/// Rules applied when deriving and rendering versions.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersioningConfig {
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    #[serde(default = "default_initial_version")]
    pub initial_version: String,

    #[serde(default = "default_fix_type")]
    pub fix_type: String,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        VersioningConfig {
            tag_prefix: default_tag_prefix(),
            initial_version: default_initial_version(),
            fix_type: default_fix_type(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Same as [`load_config_in`] with the current directory as project root.
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    load_config_in(config_path, Path::new("."))
}

/// Loads configuration for the project at `work_dir`.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `semversioner.toml` in `work_dir`
/// 3. `.semversioner.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
/// * `work_dir` - Directory searched for the project-local file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config_in(config_path: Option<&str>, work_dir: &Path) -> Result<Config> {
    let local = work_dir.join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        read_config(Path::new(path))?
    } else if local.exists() {
        read_config(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            read_config(&config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse configuration from TOML text
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| VersionerError::config(e.to_string()))
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| VersionerError::config(format!("cannot read {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.release.release_type, ReleaseType::Conventional);
        assert_eq!(config.release.prerelease, None);
        assert_eq!(config.git.backend, Backend::Cli);
        assert_eq!(config.git.binary, "git");
        assert_eq!(config.versioning.tag_prefix, "v");
        assert_eq!(config.versioning.initial_version, "0.0.0");
        assert_eq!(config.versioning.fix_type, "fix");
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = parse_config(
            r#"
[git]
backend = "libgit2"

[versioning]
tag_prefix = ""
"#,
        )
        .unwrap();

        assert_eq!(config.git.backend, Backend::Libgit2);
        assert_eq!(config.git.binary, "git");
        assert_eq!(config.versioning.tag_prefix, "");
        assert_eq!(config.versioning.fix_type, "fix");
    }

    #[test]
    fn test_unknown_release_type_is_config_error() {
        let err = parse_config("[release]\ntype = \"sideways\"\n").unwrap_err();
        assert!(matches!(err, VersionerError::Config(_)));
    }
}
