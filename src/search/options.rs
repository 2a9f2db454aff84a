//! Search options and their validation.
//!
//! Options are validated before any traversal starts. Unrecognized option
//! names are rejected rather than ignored, so a misspelled `exclude_paths`
//! cannot silently widen a search.
//!
//! # Example
//!
//! ```
//! use deepquill::search::options::SearchOptions;
//!
//! let options = SearchOptions::from_toml("verbose_level = 2\n").unwrap();
//! assert_eq!(options.verbose_level, 2);
//! ```

use std::collections::HashSet;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::document::node::Value;
use crate::search::classify::Kind;
use crate::search::error::SearchError;
use crate::search::path::Path;

/// Option names [`SearchOptions::from_toml`] accepts.
const RECOGNIZED: [&str; 3] = ["verbose_level", "exclude_paths", "exclude_kinds"];

/// Controls for a single search run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchOptions {
    /// Report detail: 1 lists matched paths, 2 also carries the values found
    /// at them.
    pub verbose_level: u8,
    /// Exact path strings to skip, subtree and all.
    pub exclude_paths: HashSet<String>,
    /// Traversal categories to skip wherever they occur.
    pub exclude_kinds: HashSet<Kind>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            verbose_level: 1,
            exclude_paths: HashSet::new(),
            exclude_kinds: HashSet::new(),
        }
    }
}

impl SearchOptions {
    /// Builds options from a TOML fragment, rejecting unknown option names.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownOption`] for an unrecognized name, and
    /// parse or validation errors for malformed values.
    pub fn from_toml(text: &str) -> Result<SearchOptions> {
        let table: toml::Table = text.parse().context("Failed to parse search options")?;
        for key in table.keys() {
            if !RECOGNIZED.contains(&key.as_str()) {
                return Err(SearchError::UnknownOption { name: key.clone() }.into());
            }
        }
        let options: SearchOptions = table.try_into().context("Invalid search options")?;
        options.validate()?;
        Ok(options)
    }

    /// Checks option values. Called by the engine before every search.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !(1..=2).contains(&self.verbose_level) {
            return Err(SearchError::InvalidVerboseLevel {
                level: self.verbose_level,
            });
        }
        Ok(())
    }

    /// The single exclusion gate: a value is skipped when its path is listed
    /// or its kind is excluded.
    pub fn excludes(&self, path: &Path, value: &Value) -> bool {
        self.exclude_paths.contains(path.as_str())
            || self.exclude_kinds.contains(&Kind::of(value))
    }
}
