//! Configuration for new sitemap documents.
//!
//! Settings are stored in TOML and only affect documents created from
//! scratch; a document read from disk keeps the namespace it declares.
//!
//! ## Lookup order
//!
//! 1. `$SITEMAP_CONFIG`, when set
//! 2. `config.toml` in the platform config directory
//!    (`~/.config/sitemap/config.toml` on Linux)
//! 3. Built-in defaults when no file exists
//!
//! ## Example Configuration File
//!
//! ```toml
//! [defaults]
//! namespace = "http://www.sitemaps.org/schemas/sitemap/0.9"
//! pretty = true
//! indent = 2
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Namespace written when nothing else is configured.
pub const DEFAULT_NAMESPACE: &str = "http://www.google.com/schemas/sitemap/0.84";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SITEMAP_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for new documents.
    pub defaults: DefaultsConfig,
}

/// Defaults applied to newly created documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// `xmlns` declared on the `urlset` root.
    pub namespace: String,
    /// Write indented output with one element per field.
    pub pretty: bool,
    /// Spaces per nesting level when `pretty` is set.
    pub indent: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            pretty: true,
            indent: 2,
        }
    }
}

impl Config {
    /// Load from `$SITEMAP_CONFIG` or the platform config directory.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };
        Self::load_from(&path)
    }

    /// Load from an explicit file, falling back to defaults if it is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)?;

        if config.defaults.namespace.trim().is_empty() {
            return Err(Error::Config("defaults.namespace must not be empty".into()));
        }
        Ok(config)
    }

    /// Write the configuration as TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config: {e}")))
    }

    /// `config.toml` inside the platform config directory, if one exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "outfitter", "sitemap")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
