//! Deep structural search over nested values.
//!
//! This module provides the search pipeline, enabling users to find a target
//! anywhere inside a nested structure by key, field name or value, with every
//! hit reported as a path from the root.
//!
//! # Path Notation
//!
//! - `root` - the searched value itself
//! - `root['name']` - mapping entry under a text key
//! - `root[3]` - mapping entry under an integer key, or a positional element
//! - `root.field` - record field or object attribute
//!
//! # Examples
//!
//! ```
//! use deepquill::document::node::Value;
//! use deepquill::search::{search, SearchOptions};
//!
//! let doc = Value::map(vec![
//!     ("long", Value::from("somewhere")),
//!     ("somewhere", Value::from("around")),
//! ]);
//! let report = search(&doc, &Value::from("somewhere"), &SearchOptions::default()).unwrap();
//! assert!(report.has_matches());
//! ```

pub mod classify;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod options;
pub mod path;
pub mod report;

pub use classify::Kind;
pub use engine::search;
pub use error::SearchError;
pub use options::SearchOptions;
pub use path::Path;
pub use report::{MatchRecord, SearchReport};
