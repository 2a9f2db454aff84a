//! Searchable value model and document parsing.
//!
//! This module provides the [`Value`] tree that the search engine walks, plus
//! parsers that build values from JSON and YAML text.
//!
//! # Examples
//!
//! ```
//! use deepquill::document::{parse_json, Value};
//!
//! let doc = parse_json(r#"{"status": "somewhere"}"#).unwrap();
//! assert_ne!(doc, Value::Null);
//! ```

pub mod node;
pub mod parser;

pub use node::{FieldError, FieldSource, Instance, Key, Number, Record, Value};
pub use parser::{from_json, from_yaml, parse_json, parse_yaml};
