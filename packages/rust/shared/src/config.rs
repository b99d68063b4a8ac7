//! Application configuration for linklift.
//!
//! User config lives at `~/.linklift/linklift.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LinkliftError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "linklift.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".linklift";

// ---------------------------------------------------------------------------
// Config structs (matching linklift.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Import defaults.
    #[serde(default)]
    pub import: ImportConfig,

    /// Tag derivation policy.
    #[serde(default)]
    pub tags: TagsConfig,
}

/// `[import]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Default link-tag strategy: "folder-path", "closed-folder", or "other".
    #[serde(default = "default_strategy")]
    pub strategy: String,

    /// File extensions accepted at the selection boundary.
    #[serde(default = "default_accept_extensions")]
    pub accept_extensions: Vec<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            accept_extensions: default_accept_extensions(),
        }
    }
}

fn default_strategy() -> String {
    "folder-path".into()
}
fn default_accept_extensions() -> Vec<String> {
    vec![".html".into(), ".htm".into()]
}

/// `[tags]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsConfig {
    /// The always-present, non-removable tag.
    #[serde(default = "default_fallback_tag")]
    pub fallback: String,

    /// Folder name never offered as a default tag (the browser's own
    /// bookmarks-bar folder, post-sanitization).
    #[serde(default = "default_reserved_tag")]
    pub reserved: String,

    /// Maximum tag name length in characters; longer names cannot be linked.
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            fallback: default_fallback_tag(),
            reserved: default_reserved_tag(),
            max_name_len: default_max_name_len(),
        }
    }
}

fn default_fallback_tag() -> String {
    "Other".into()
}
fn default_reserved_tag() -> String {
    "Bookmarks-bar".into()
}
fn default_max_name_len() -> usize {
    20
}

// ---------------------------------------------------------------------------
// Tag policy (runtime, merged from config)
// ---------------------------------------------------------------------------

/// Runtime tag-derivation policy — the merged view consumed by the core.
#[derive(Debug, Clone)]
pub struct TagPolicy {
    /// The always-present, non-removable fallback tag.
    pub fallback: String,
    /// Reserved folder name excluded from default-checked tags.
    pub reserved: String,
    /// Maximum linkable tag name length in characters.
    pub max_name_len: usize,
}

impl From<&AppConfig> for TagPolicy {
    fn from(config: &AppConfig) -> Self {
        Self {
            fallback: config.tags.fallback.clone(),
            reserved: config.tags.reserved.clone(),
            max_name_len: config.tags.max_name_len,
        }
    }
}

impl Default for TagPolicy {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.linklift/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| LinkliftError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.linklift/linklift.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| LinkliftError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| LinkliftError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| LinkliftError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| LinkliftError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| LinkliftError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Whether a file name passes an accept-extension list (case-insensitive).
pub fn accepts_file_name(extensions: &[String], name: &str) -> bool {
    let name = name.to_lowercase();
    extensions.iter().any(|ext| name.ends_with(&ext.to_lowercase()))
}

/// Whether a path passes the accept-extension boundary filter.
pub fn accepts_path(config: &AppConfig, path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    accepts_file_name(&config.import.accept_extensions, &name)
}
