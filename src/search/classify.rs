//! Traversal category classification.
//!
//! Every value falls into exactly one [`Kind`]. The engine dispatches on the
//! kind to pick a traversal strategy, and the exclusion filter uses kinds as
//! its category labels, so adding a new kind means teaching both in one
//! place.

use std::fmt;
use std::str::FromStr;

use crate::document::node::Value;
use crate::search::error::SearchError;

/// The closed set of traversal categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Number,
    Text,
    List,
    Set,
    Map,
    Record,
    Object,
}

impl Kind {
    /// Classifies a value. Total over the value model.
    pub fn of(value: &Value) -> Kind {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::Text(_) => Kind::Text,
            Value::List(_) => Kind::List,
            Value::Set(_) => Kind::Set,
            Value::Map(_) => Kind::Map,
            Value::Record(_) => Kind::Record,
            Value::Object(_) => Kind::Object,
        }
    }

    /// The canonical label, as accepted by [`Kind::from_str`].
    pub fn label(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Number => "number",
            Kind::Text => "text",
            Kind::List => "list",
            Kind::Set => "set",
            Kind::Map => "map",
            Kind::Record => "record",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl serde::Serialize for Kind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> serde::Deserialize<'de> for Kind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

impl FromStr for Kind {
    type Err = SearchError;

    /// Parses a kind label. `str` and `string` are accepted for [`Kind::Text`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "null" => Ok(Kind::Null),
            "bool" => Ok(Kind::Bool),
            "number" => Ok(Kind::Number),
            "text" | "str" | "string" => Ok(Kind::Text),
            "list" => Ok(Kind::List),
            "set" => Ok(Kind::Set),
            "map" => Ok(Kind::Map),
            "record" => Ok(Kind::Record),
            "object" => Ok(Kind::Object),
            other => Err(SearchError::UnknownKind {
                name: other.to_string(),
            }),
        }
    }
}
