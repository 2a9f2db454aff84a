//! Path notation for reporting where matches live.
//!
//! Every reported location is a path string rooted at `root`. Container
//! entries use subscript notation (`root[3]`, `root['name']`), record fields
//! and object attributes use attribute notation (`root.point.x`). Paths are
//! plain strings once built; the exclusion filter compares them for exact
//! textual equality.
//!
//! # Example
//!
//! ```
//! use deepquill::document::node::Key;
//! use deepquill::search::path::Path;
//!
//! let path = Path::root().index(1).key(&Key::from("somewhere"));
//! assert_eq!(path.to_string(), "root[1]['somewhere']");
//! ```

use std::fmt;

use crate::document::node::Key;

/// A location in the searched structure, rendered incrementally.
///
/// Extending a path clones the parent's text, so sibling branches never see
/// each other's segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    text: String,
}

impl Path {
    /// The path of the top-level value.
    pub fn root() -> Path {
        Path {
            text: "root".to_string(),
        }
    }

    /// Extends with a subscript for a mapping key.
    ///
    /// Text keys are quoted, integer and boolean keys appear bare:
    /// `root['name']`, `root[0]`, `root[true]`.
    pub fn key(&self, key: &Key) -> Path {
        let rendered = match key {
            Key::Text(s) => quote_text_key(s),
            Key::Int(i) => i.to_string(),
            Key::Bool(b) => b.to_string(),
        };
        Path {
            text: format!("{}[{}]", self.text, rendered),
        }
    }

    /// Extends with a subscript for a positional index.
    pub fn index(&self, index: usize) -> Path {
        Path {
            text: format!("{}[{}]", self.text, index),
        }
    }

    /// Extends with an attribute segment for a record field or object
    /// attribute.
    pub fn field(&self, name: &str) -> Path {
        Path {
            text: format!("{}.{}", self.text, name),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Quotes a text key for subscript rendering.
///
/// Single quotes are preferred. A key containing a single quote switches to
/// double quotes; a key containing both kinds gets double quotes with every
/// quote backslash-escaped.
fn quote_text_key(key: &str) -> String {
    let has_single = key.contains('\'');
    let has_double = key.contains('"');
    if has_single && has_double {
        let mut escaped = String::with_capacity(key.len() + 2);
        for ch in key.chars() {
            if ch == '\'' || ch == '"' {
                escaped.push('\\');
            }
            escaped.push(ch);
        }
        format!("\"{}\"", escaped)
    } else if has_single {
        format!("\"{}\"", key)
    } else {
        format!("'{}'", key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_root_renders_bare() {
        assert_eq!(Path::root().to_string(), "root");
    }

    #[test]
    fn test_segments_chain() {
        let path = Path::root()
            .index(1)
            .key(&Key::from("long"))
            .field("b");
        assert_eq!(path.to_string(), "root[1]['long'].b");
    }

    #[test]
    fn test_integer_and_bool_keys_render_bare() {
        assert_eq!(Path::root().key(&Key::from(0)).to_string(), "root[0]");
        assert_eq!(Path::root().key(&Key::from(true)).to_string(), "root[true]");
    }

    #[test]
    fn test_text_key_quoting() {
        assert_eq!(quote_text_key("plain"), "'plain'");
        assert_eq!(quote_text_key("it's"), "\"it's\"");
        assert_eq!(quote_text_key("a'b\"c"), "\"a\\'b\\\"c\"");
    }

    #[test]
    fn test_sibling_paths_stay_independent() {
        let parent = Path::root().key(&Key::from("outer"));
        let first = parent.index(0);
        let second = parent.index(1);
        assert_eq!(first.to_string(), "root['outer'][0]");
        assert_eq!(second.to_string(), "root['outer'][1]");
    }

    #[test]
    fn test_paths_work_as_set_members() {
        let mut seen = HashSet::new();
        seen.insert(Path::root().field("a"));
        assert!(seen.contains(&Path::root().field("a")));
        assert!(!seen.contains(&Path::root().field("b")));
    }
}
