//! Configuration system for deepquill.
//!
//! This module provides the configuration structure for deepquill with
//! sensible defaults and support for serialization/deserialization via serde.
//! Configuration is loaded from a TOML file and supplies the baseline search
//! options that command-line arguments add to.
//!
//! # Example
//!
//! ```
//! use deepquill::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.verbose_level, 1);
//! assert!(config.pretty);
//!
//! // Create custom configuration
//! let custom = Config {
//!     verbose_level: 2,
//!     ..Config::default()
//! };
//! ```

use std::collections::HashSet;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::search::{Kind, SearchOptions};

/// Configuration for the deepquill application.
///
/// Unknown keys in the config file are rejected rather than ignored, for the
/// same reason unknown search options are: a misspelled exclusion must not
/// silently widen a search.
///
/// # Fields
///
/// * `verbose_level` - Report detail used when no flag is given (default: 1)
/// * `exclude_paths` - Paths skipped in every search (default: empty)
/// * `exclude_kinds` - Kinds skipped in every search (default: empty)
/// * `pretty` - Pretty-print report JSON (default: true)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Report detail used when no verbosity flag is given
    #[serde(default = "default_verbose_level")]
    pub verbose_level: u8,

    /// Paths skipped in every search
    #[serde(default)]
    pub exclude_paths: HashSet<String>,

    /// Kinds skipped in every search
    #[serde(default)]
    pub exclude_kinds: HashSet<Kind>,

    /// Pretty-print report JSON
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

/// Returns the default verbosity level.
fn default_verbose_level() -> u8 {
    1
}

/// Returns the default for pretty-printing.
fn default_pretty() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose_level: default_verbose_level(),
            exclude_paths: HashSet::new(),
            exclude_kinds: HashSet::new(),
            pretty: default_pretty(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/deepquill/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("deepquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing file yields the default configuration. A file that exists
    /// but cannot be read or parsed is an error; falling back silently would
    /// run searches without the user's standing exclusions.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Ok(Self::default()),
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config file: {}", config_path.display()))
    }

    /// The baseline search options this configuration describes.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            verbose_level: self.verbose_level,
            exclude_paths: self.exclude_paths.clone(),
            exclude_kinds: self.exclude_kinds.clone(),
        }
    }
}
