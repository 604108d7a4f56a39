//! Configuration module for addondeck.
//!
//! Handles loading and parsing the .addondeckrc configuration file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::addons::{CatalogSource, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::logging::LogConfig;
use crate::route::ADDONS_HASH;

/// Default .addondeckrc file content with all settings documented.
const DEFAULT_RC: &str = r#"# addondeck Configuration File
# ============================
# This file is read on application startup.
# Lines starting with '#' are comments.
#
# Catalogs
# --------
# Format: catalog = <name>|<manifest url>|<catalog id>|<type>[,<type>...]
# Each catalog addon must serve the addon_catalog resource:
#   <manifest url minus manifest.json>/addon_catalog/<type>/<catalog id>.json
# file:// URLs are read from disk with the same layout.
#
# catalog = Community|https://addons.example.com/manifest.json|all|movie,series,channel

# Installed Addons
# ----------------
# Transport URLs of addons shown as installed (repeatable).
#
# installed = https://addons.example.com/subtitles/manifest.json

# Startup
# -------
# Route opened when none is given on the command line.
# start_route = #/addons

# Network
# -------
# request_timeout = 30     # Seconds before a catalog request fails

# Logging Configuration
# ---------------------
# Logs are stored in ~/.addondeck/logs/ with automatic cleanup.
#
# log_enabled = true       # Enable/disable file logging (true/false)
# log_level = info         # Log level: trace, debug, info, warn, error, off
# log_retention = 24       # Hours to keep log files (default: 24)
"#;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Configured catalog sources.
    pub catalogs: Vec<CatalogSource>,
    /// Transport URLs of installed addons.
    pub installed: Vec<String>,
    /// Route opened when none is given on the command line.
    pub start_route: String,
    /// Catalog request timeout in seconds.
    pub request_timeout: u64,
    /// Path to config file.
    pub config_path: PathBuf,
    /// Logging configuration.
    pub log_config: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalogs: Vec::new(),
            installed: Vec::new(),
            start_route: ADDONS_HASH.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
            config_path: Self::default_config_path(),
            log_config: LogConfig::default(),
        }
    }
}

impl Config {
    /// Returns the default config file path (~/.addondeckrc).
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".addondeckrc")
    }

    /// Loads configuration from the default path, creating it if it doesn't exist.
    ///
    /// # Errors
    /// Returns error if config cannot be read.
    pub fn load() -> io::Result<Self> {
        let path = Self::default_config_path();
        Self::load_from(&path)
    }

    /// Loads configuration from a specific path.
    ///
    /// # Errors
    /// Returns error if config cannot be read.
    pub fn load_from(path: &Path) -> io::Result<Self> {
        if !path.exists() {
            Self::create_default_config(path)?;
        }

        let content = fs::read_to_string(path)?;
        let mut config = Self {
            config_path: path.to_path_buf(),
            ..Self::default()
        };
        config.parse(&content);
        Ok(config)
    }

    /// Creates the default config file.
    fn create_default_config(path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = fs::File::create(path)?;
        file.write_all(DEFAULT_RC.as_bytes())?;
        Ok(())
    }

    /// Parses the config file content.
    pub fn parse(&mut self, content: &str) {
        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = strip_inline_comment(value.trim());
                self.apply_setting(key, value);
            }
        }
    }

    /// Applies a single setting.
    fn apply_setting(&mut self, key: &str, value: &str) {
        match key {
            "catalog" => match parse_catalog_line(value) {
                Some(source) => self.catalogs.push(source),
                None => warn!("[CONFIG] Ignoring malformed catalog entry: {}", value),
            },
            "installed" => {
                if !value.is_empty() && !self.installed.iter().any(|u| u == value) {
                    self.installed.push(value.to_string());
                }
            }
            "start_route" => {
                if value.starts_with(ADDONS_HASH) {
                    self.start_route = value.to_string();
                } else {
                    warn!("[CONFIG] Ignoring start_route outside {}: {}", ADDONS_HASH, value);
                }
            }
            "request_timeout" => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => self.request_timeout = secs,
                _ => warn!("[CONFIG] Invalid request_timeout: {}", value),
            },
            "log_level" => {
                self.log_config.level = LogConfig::parse_level(value);
            }
            "log_retention" | "log_retention_hours" => {
                self.log_config.retention_hours = LogConfig::parse_retention(value);
            }
            "log_enabled" | "logging" => {
                self.log_config.enabled = parse_bool(value);
            }
            _ => warn!("[CONFIG] Unknown setting: {}", key),
        }
    }
}

/// Parses `<name>|<manifest url>|<catalog id>|<type>[,<type>...]`.
#[must_use]
pub fn parse_catalog_line(value: &str) -> Option<CatalogSource> {
    let mut parts = value.split('|').map(str::trim);
    let name = parts.next().filter(|s| !s.is_empty())?;
    let base = parts.next().filter(|s| !s.is_empty())?;
    let id = parts.next().filter(|s| !s.is_empty())?;
    let types = parts
        .next()
        .map(|t| {
            t.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    if parts.next().is_some() {
        return None;
    }

    Some(CatalogSource {
        name: name.to_string(),
        base: base.to_string(),
        id: id.to_string(),
        types,
    })
}

/// Removes a trailing ` # comment`. A `#` glued to the value is kept, since
/// routes start with one.
fn strip_inline_comment(value: &str) -> &str {
    match value.find(" #") {
        Some(idx) => value[..idx].trim(),
        None => value,
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "yes" | "1" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_catalog_line() {
        let source =
            parse_catalog_line("Community | https://a.example.com/manifest.json | all | movie, series")
                .expect("valid line");
        assert_eq!(source.name, "Community");
        assert_eq!(source.base, "https://a.example.com/manifest.json");
        assert_eq!(source.id, "all");
        assert_eq!(source.types, vec!["movie".to_string(), "series".to_string()]);
    }

    #[test]
    fn test_parse_catalog_line_rejects_missing_fields() {
        assert!(parse_catalog_line("Only a name").is_none());
        assert!(parse_catalog_line("Name||all|movie").is_none());
        assert!(parse_catalog_line("a|b|c|d|e").is_none());
    }

    #[test]
    fn test_parse_settings() {
        let mut config = Config::default();
        config.parse(
            "# comment\n\
             catalog = Main|file:///tmp/manifest.json|all|movie\n\
             installed = https://x.example.com/manifest.json\n\
             installed = https://x.example.com/manifest.json\n\
             start_route = #/addons?addon=foo # trailing\n\
             request_timeout = 5\n\
             log_level = DEBUG\n\
             log_enabled = off\n",
        );
        assert_eq!(config.catalogs.len(), 1);
        assert_eq!(config.installed.len(), 1);
        assert_eq!(config.start_route, "#/addons?addon=foo");
        assert_eq!(config.request_timeout, 5);
        assert_eq!(config.log_config.level, "debug");
        assert!(!config.log_config.enabled);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let mut config = Config::default();
        config.parse("request_timeout = 0\nstart_route = /settings\n");
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.start_route, ADDONS_HASH);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join(".addondeckrc");

        let config = Config::load_from(&path).expect("load");
        assert!(path.exists());
        assert!(config.catalogs.is_empty());
        assert_eq!(config.start_route, ADDONS_HASH);
        assert_eq!(config.config_path, path);
    }
}
