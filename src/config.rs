use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AutoverError, Result};

/// Represents the complete configuration for autover.
///
/// Controls where rendered artifacts land and how links are built; version
/// computation itself takes no configuration beyond the explicit CLI flags.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub notes: NotesConfig,
}

/// Project-level settings shared by the renderers
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProjectConfig {
    /// Repository base URL used for compare links (e.g.
    /// `https://github.com/owner/repo`); links are omitted when unset.
    #[serde(default)]
    pub repository: Option<String>,

    /// Prefix prepended to versions when building tag names in links
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            repository: None,
            tag_prefix: default_tag_prefix(),
        }
    }
}

/// Changelog renderer settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default = "default_changelog_path")]
    pub path: String,

    #[serde(default = "default_changelog_title")]
    pub title: String,
}

fn default_changelog_path() -> String {
    "CHANGELOG.md".to_string()
}

fn default_changelog_title() -> String {
    "Changelog".to_string()
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            path: default_changelog_path(),
            title: default_changelog_title(),
        }
    }
}

/// Release-notes renderer settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NotesConfig {
    #[serde(default = "default_notes_path")]
    pub path: String,
}

fn default_notes_path() -> String {
    "RELEASE_NOTES.md".to_string()
}

impl Default for NotesConfig {
    fn default() -> Self {
        NotesConfig {
            path: default_notes_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            project: ProjectConfig::default(),
            changelog: ChangelogConfig::default(),
            notes: NotesConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `autover.toml` in current directory
/// 3. `.autover.toml` in user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./autover.toml").exists() {
        fs::read_to_string("./autover.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".autover.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config =
        toml::from_str(&config_str).map_err(|e| AutoverError::config(e.to_string()))?;
    Ok(config)
}
