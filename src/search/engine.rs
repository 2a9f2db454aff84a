//! The traversal engine: a depth-first walk that probes keys and values.
//!
//! The walk visits every reachable location once per route, probing mapping
//! keys, record fields and attribute names against the target on the way
//! down and scalar values at the leaves. Shared substructure is revisited
//! once per distinct route; a route that would revisit one of its own
//! ancestors is pruned, which is what makes self-referential inputs
//! terminate.
//!
//! Exclusions are applied on the parent's side, before a child is probed or
//! entered, so an excluded path contributes nothing at all, not even a key
//! match.
//!
//! # Example
//!
//! ```
//! use deepquill::document::node::Value;
//! use deepquill::search::{search, SearchOptions};
//!
//! let haystack = Value::list(vec![
//!     Value::from("something somewhere"),
//!     Value::from("nothing here"),
//! ]);
//! let report = search(&haystack, &Value::from("somewhere"), &SearchOptions::default()).unwrap();
//! assert_eq!(report.matched_values()[0].path, "root[0]");
//! ```

use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::document::node::{FieldSource, Key, Record, Value};
use crate::search::classify::Kind;
use crate::search::error::SearchError;
use crate::search::matcher;
use crate::search::options::SearchOptions;
use crate::search::path::Path;
use crate::search::report::SearchReport;

/// Searches `value` for `target` and reports every matching location.
///
/// # Arguments
///
/// * `value` - The structure to search
/// * `target` - What to look for: text matches by containment, everything
///   else by equality
/// * `options` - Verbosity and exclusions
///
/// # Errors
///
/// Fails only on invalid options; the walk itself records unreadable
/// locations in the report instead of failing.
pub fn search(
    value: &Value,
    target: &Value,
    options: &SearchOptions,
) -> Result<SearchReport, SearchError> {
    options.validate()?;
    debug!(
        target_kind = %Kind::of(target),
        verbose_level = options.verbose_level,
        excluded_paths = options.exclude_paths.len(),
        excluded_kinds = options.exclude_kinds.len(),
        "Starting structural search"
    );

    let mut walker = Walker {
        target,
        options,
        visiting: HashSet::new(),
        report: SearchReport::new(options.verbose_level),
        noted_unordered: false,
    };
    let root = Path::root();
    if !options.excludes(&root, value) {
        walker.walk(value, &root);
    }

    let report = walker.report;
    debug!(
        keys = report.matched_keys().len(),
        values = report.matched_values().len(),
        unprocessed = report.unprocessed().len(),
        "Search complete"
    );
    Ok(report)
}

/// One search run's mutable state.
struct Walker<'a> {
    target: &'a Value,
    options: &'a SearchOptions,
    /// Identities of composites on the route from the root to the current
    /// node. Membership here means entering again would loop.
    visiting: HashSet<usize>,
    report: SearchReport,
    noted_unordered: bool,
}

impl Walker<'_> {
    /// Visits one value. Callers have already applied the exclusion gate to
    /// it.
    fn walk(&mut self, value: &Value, path: &Path) {
        let id = match value.identity() {
            Some(id) => id,
            None => {
                if matcher::value_matches(self.target, value) {
                    self.report.record_value_match(path, self.snapshot(value));
                }
                return;
            }
        };
        if !self.visiting.insert(id) {
            // A back-reference on the current route; entering would loop.
            return;
        }
        match value {
            Value::List(items) => self.walk_items(&items.borrow(), path),
            Value::Set(items) => {
                self.note_unordered(path);
                self.walk_items(&items.borrow(), path);
            }
            Value::Map(entries) => self.walk_entries(&entries.borrow(), path),
            Value::Record(record) => self.walk_record(&record.borrow(), path),
            Value::Object(source) => self.walk_object(&*source.borrow(), path),
            _ => {} // scalars returned above
        }
        self.visiting.remove(&id);
    }

    fn walk_items(&mut self, items: &[Value], path: &Path) {
        for (index, item) in items.iter().enumerate() {
            let item_path = path.index(index);
            if self.options.excludes(&item_path, item) {
                continue;
            }
            self.walk(item, &item_path);
        }
    }

    fn walk_entries(&mut self, entries: &IndexMap<Key, Value>, path: &Path) {
        for (key, child) in entries {
            let child_path = path.key(key);
            if self.options.excludes(&child_path, child) {
                continue;
            }
            if matcher::key_matches(self.target, key) {
                self.report.record_key_match(&child_path, self.snapshot(child));
            }
            self.walk(child, &child_path);
        }
    }

    fn walk_record(&mut self, record: &Record, path: &Path) {
        for (name, child) in record.fields() {
            let child_path = path.field(name);
            if self.options.excludes(&child_path, child) {
                continue;
            }
            if matcher::name_matches(self.target, name) {
                self.report.record_key_match(&child_path, self.snapshot(child));
            }
            self.walk(child, &child_path);
        }
    }

    fn walk_object(&mut self, source: &dyn FieldSource, path: &Path) {
        let names = match source.field_names() {
            Ok(names) => names,
            Err(error) => {
                warn!(
                    %path,
                    %error,
                    type_name = source.type_name(),
                    "Cannot list fields, leaving path unprocessed"
                );
                self.report.record_unprocessed(path);
                return;
            }
        };
        for name in names {
            // Underscore-prefixed names are internal machinery, not data.
            if name.starts_with('_') {
                continue;
            }
            let child_path = path.field(&name);
            // The path gate runs before access so an excluded field is never
            // even read; the kind gate needs the value and runs after.
            if self.options.exclude_paths.contains(child_path.as_str()) {
                continue;
            }
            let child = match source.field(&name) {
                Ok(child) => child,
                Err(error) => {
                    warn!(path = %child_path, %error, "Cannot read field, leaving path unprocessed");
                    self.report.record_unprocessed(&child_path);
                    continue;
                }
            };
            if self.options.exclude_kinds.contains(&Kind::of(&child)) {
                continue;
            }
            if matcher::name_matches(self.target, &name) {
                self.report.record_key_match(&child_path, self.snapshot(&child));
            }
            self.walk(&child, &child_path);
        }
    }

    fn snapshot(&self, value: &Value) -> Option<JsonValue> {
        if self.options.verbose_level >= 2 {
            Some(value.to_json())
        } else {
            None
        }
    }

    fn note_unordered(&mut self, path: &Path) {
        if !self.noted_unordered {
            self.noted_unordered = true;
            debug!(%path, "Set members are addressed positionally, in insertion order");
        }
    }
}
