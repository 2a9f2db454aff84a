//! deepquill - deep structural search for nested data.
//!
//! deepquill walks arbitrarily nested values (mappings, lists, sets, records
//! and attribute-bearing objects) looking for a target, and reports every hit
//! as a path from the root, like `root[1]['somewhere']` or `root.point.x`.
//! Text targets match by substring containment; everything else matches by
//! equality. Self-referential structures are handled by reference identity,
//! so searches always terminate.
//!
//! # Example
//!
//! ```
//! use deepquill::document::node::Value;
//! use deepquill::search::{search, SearchOptions};
//!
//! let doc = Value::map(vec![
//!     ("long", Value::from("somewhere")),
//!     ("somewhere", Value::from("around")),
//! ]);
//!
//! let report = search(&doc, &Value::from("somewhere"), &SearchOptions::default()).unwrap();
//! assert_eq!(report.matched_keys()[0].path, "root['somewhere']");
//! assert_eq!(report.matched_values()[0].path, "root['long']");
//! ```

pub mod config;
pub mod document;
pub mod file;
pub mod search;

pub use document::node::Value;
pub use search::{search, SearchOptions, SearchReport};
