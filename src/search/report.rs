//! Search report: what matched, and what could not be examined.
//!
//! Matches land in two disjoint buckets. A hit on a mapping key, record
//! field name or attribute name goes to `matched_keys`; a hit on a value
//! goes to `matched_values`. Paths whose contents could not be read are
//! listed under `unprocessed`.
//!
//! Rendering follows the verbosity the report was built with: level 1 lists
//! matched paths, level 2 maps each path to the value found there. Empty
//! buckets are omitted entirely, so a search with no results renders as `{}`.

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;

use crate::search::path::Path;

/// One recorded match: where, and (at verbosity 2) what.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub path: String,
    /// Snapshot of the value at the matched location. `None` below
    /// verbosity 2, where values are not reported.
    pub value: Option<JsonValue>,
}

/// The outcome of one search run. Records keep discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    verbose_level: u8,
    matched_keys: Vec<MatchRecord>,
    matched_values: Vec<MatchRecord>,
    unprocessed: Vec<String>,
}

impl SearchReport {
    pub(crate) fn new(verbose_level: u8) -> Self {
        Self {
            verbose_level,
            matched_keys: Vec::new(),
            matched_values: Vec::new(),
            unprocessed: Vec::new(),
        }
    }

    pub(crate) fn record_key_match(&mut self, path: &Path, value: Option<JsonValue>) {
        self.matched_keys.push(MatchRecord {
            path: path.to_string(),
            value,
        });
    }

    pub(crate) fn record_value_match(&mut self, path: &Path, value: Option<JsonValue>) {
        self.matched_values.push(MatchRecord {
            path: path.to_string(),
            value,
        });
    }

    pub(crate) fn record_unprocessed(&mut self, path: &Path) {
        self.unprocessed.push(path.to_string());
    }

    pub fn matched_keys(&self) -> &[MatchRecord] {
        &self.matched_keys
    }

    pub fn matched_values(&self) -> &[MatchRecord] {
        &self.matched_values
    }

    pub fn unprocessed(&self) -> &[String] {
        &self.unprocessed
    }

    /// True when at least one key or value matched. Unprocessed paths do not
    /// count as matches.
    pub fn has_matches(&self) -> bool {
        !self.matched_keys.is_empty() || !self.matched_values.is_empty()
    }

    /// True when the report carries nothing at all.
    pub fn is_empty(&self) -> bool {
        !self.has_matches() && self.unprocessed.is_empty()
    }

    /// Renders the report as a JSON value.
    pub fn to_json(&self) -> JsonValue {
        let mut root = serde_json::Map::new();
        if !self.matched_keys.is_empty() {
            root.insert("matched_keys".to_string(), self.bucket_json(&self.matched_keys));
        }
        if !self.matched_values.is_empty() {
            root.insert(
                "matched_values".to_string(),
                self.bucket_json(&self.matched_values),
            );
        }
        if !self.unprocessed.is_empty() {
            let paths = self.unprocessed.iter().map(|p| JsonValue::from(p.clone()));
            root.insert("unprocessed".to_string(), JsonValue::Array(paths.collect()));
        }
        JsonValue::Object(root)
    }

    /// Renders the report as pretty-printed JSON text.
    pub fn render(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.to_json()).context("Failed to render search report")
    }

    fn bucket_json(&self, records: &[MatchRecord]) -> JsonValue {
        if self.verbose_level >= 2 {
            let mut object = serde_json::Map::new();
            for record in records {
                object.insert(
                    record.path.clone(),
                    record.value.clone().unwrap_or(JsonValue::Null),
                );
            }
            JsonValue::Object(object)
        } else {
            JsonValue::Array(
                records
                    .iter()
                    .map(|record| JsonValue::from(record.path.clone()))
                    .collect(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_report_renders_as_empty_object() {
        let report = SearchReport::new(1);
        assert!(report.is_empty());
        assert!(!report.has_matches());
        assert_eq!(report.to_json(), json!({}));
    }

    #[test]
    fn test_level_one_lists_paths() {
        let mut report = SearchReport::new(1);
        report.record_value_match(&Path::root().field("a"), None);
        report.record_key_match(&Path::root().field("b"), None);

        assert_eq!(
            report.to_json(),
            json!({
                "matched_keys": ["root.b"],
                "matched_values": ["root.a"],
            })
        );
    }

    #[test]
    fn test_level_two_carries_values() {
        let mut report = SearchReport::new(2);
        report.record_value_match(&Path::root().field("a"), Some(json!("somewhere")));
        report.record_key_match(&Path::root().field("somewhere_good"), Some(json!(22)));

        assert_eq!(
            report.to_json(),
            json!({
                "matched_keys": {"root.somewhere_good": 22},
                "matched_values": {"root.a": "somewhere"},
            })
        );
    }

    #[test]
    fn test_unprocessed_is_always_a_list() {
        let mut report = SearchReport::new(2);
        report.record_unprocessed(&Path::root());

        assert!(!report.has_matches());
        assert!(!report.is_empty());
        assert_eq!(report.to_json(), json!({"unprocessed": ["root"]}));
    }

    #[test]
    fn test_render_pretty_prints() {
        let mut report = SearchReport::new(1);
        report.record_value_match(&Path::root(), None);
        let text = report.render().unwrap();
        assert!(text.contains("\"matched_values\""));
        assert!(text.contains("\"root\""));
    }
}
