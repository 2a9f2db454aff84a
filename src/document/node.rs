//! Value model for deep structural search.
//!
//! This module provides the core data structures for representing the values
//! deepquill searches. A `Value` is a closed tagged enum over every traversal
//! category the engine knows: scalars (null, bool, number, text), ordered
//! containers (lists), unordered containers (sets), associative containers
//! (maps), records (named-tuple-like, ordered named fields), and generic
//! attribute-bearing objects behind the [`FieldSource`] trait.
//!
//! Composite variants hold `Rc<RefCell<…>>` so callers can build shared and
//! self-referential structures; the search engine relies on the resulting
//! reference identity (see [`Value::identity`]) to terminate on cycles.
//!
//! # Example
//!
//! ```
//! use deepquill::document::node::{Key, Value};
//!
//! let value = Value::map(vec![
//!     (Key::from("user"), Value::from("alice")),
//!     (Key::from("logins"), Value::from(3)),
//! ]);
//! assert!(value.identity().is_some());
//! ```
//!
//! Building a self-referential list:
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use deepquill::document::node::Value;
//!
//! let items = Rc::new(RefCell::new(vec![Value::from("tail")]));
//! let list = Value::List(items.clone());
//! items.borrow_mut().push(list.clone()); // the list now contains itself
//! ```

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// Represents numbers (integer or float).
///
/// Equality compares across variants through `as_f64`, so `Integer(2)` equals
/// `Float(2.0)`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Number) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

/// A mapping key: the closed set of hashable key types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Text(s) => write!(f, "{}", s),
            Key::Int(i) => write!(f, "{}", i),
            Key::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Key {
        Key::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Key {
        Key::Text(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Key {
        Key::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Key {
        Key::Int(i as i64)
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Key {
        Key::Bool(b)
    }
}

/// Error raised by [`FieldSource`] when a field or the field listing itself
/// cannot be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    message: String,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FieldError {}

/// The "enumerable fields" capability for generic attribute-bearing objects.
///
/// The search engine depends only on this trait when it walks an object, so
/// new object-like categories plug in as new adapters. Both the field listing
/// and each individual access are fallible: a listing failure marks the whole
/// object unprocessed, a single-field failure marks only that field's path.
pub trait FieldSource {
    /// Runtime type label, used in diagnostics and rendering.
    fn type_name(&self) -> &str;

    /// Names of the instance-level fields, in their natural order.
    fn field_names(&self) -> Result<Vec<String>, FieldError>;

    /// Reads one field by name.
    fn field(&self, name: &str) -> Result<Value, FieldError>;
}

/// A plain attribute holder: the shipped [`FieldSource`] adapter.
///
/// # Example
///
/// ```
/// use deepquill::document::node::{Instance, Value};
///
/// let mut point = Instance::new("Point");
/// point.set("x", Value::from(3));
/// point.set("y", Value::from(4));
/// let value = Value::object(point);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Instance {
    type_name: String,
    fields: IndexMap<String, Value>,
}

impl Instance {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Sets a field, replacing any previous value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }
}

impl FieldSource for Instance {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn field_names(&self) -> Result<Vec<String>, FieldError> {
        Ok(self.fields.keys().cloned().collect())
    }

    fn field(&self, name: &str) -> Result<Value, FieldError> {
        self.fields
            .get(name)
            .cloned()
            .ok_or_else(|| FieldError::new(format!("no field named '{}'", name)))
    }
}

/// A named-tuple-like record: a type name plus ordered named fields with
/// infallible access.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    type_name: String,
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }
}

/// A searchable value.
///
/// Scalar variants are plain data; composite variants share ownership so the
/// same value can appear in several places (and, via `RefCell`, point back at
/// itself). Cloning a composite clones the handle, not the contents.
#[derive(Clone)]
pub enum Value {
    /// The null value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number (integer or float).
    Number(Number),
    /// Text. Always a leaf, even though text is nominally iterable.
    Text(String),
    /// An ordered container.
    List(Rc<RefCell<Vec<Value>>>),
    /// An unordered container. Enumeration order is insertion order.
    Set(Rc<RefCell<Vec<Value>>>),
    /// An associative container with ordered entries.
    Map(Rc<RefCell<IndexMap<Key, Value>>>),
    /// A record with declared, ordered, named fields.
    Record(Rc<RefCell<Record>>),
    /// A generic attribute-bearing object behind the [`FieldSource`] trait.
    Object(Rc<RefCell<dyn FieldSource>>),
}

impl Value {
    /// Creates a list from the given items.
    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(RefCell::new(items)))
    }

    /// Creates a set from the given items, dropping duplicates.
    ///
    /// Composites deduplicate by identity, scalars by equality, matching what
    /// a hash-based set would do where every object hashes by address.
    pub fn set(items: Vec<Value>) -> Value {
        let mut unique: Vec<Value> = Vec::new();
        for item in items {
            if !unique.iter().any(|existing| same_set_entry(existing, &item)) {
                unique.push(item);
            }
        }
        Value::Set(Rc::new(RefCell::new(unique)))
    }

    /// Creates a map from the given entries. A repeated key keeps the last
    /// value, like repeated insertion would.
    pub fn map<K: Into<Key>>(entries: Vec<(K, Value)>) -> Value {
        let map: IndexMap<Key, Value> = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        Value::Map(Rc::new(RefCell::new(map)))
    }

    /// Wraps a record.
    pub fn record(record: Record) -> Value {
        Value::Record(Rc::new(RefCell::new(record)))
    }

    /// Wraps any [`FieldSource`] implementation.
    pub fn object(source: impl FieldSource + 'static) -> Value {
        Value::Object(Rc::new(RefCell::new(source)))
    }

    /// Returns the reference identity of a composite value, or `None` for
    /// scalars.
    ///
    /// Two handles to the same allocation report the same identity; the cycle
    /// guard keys on this.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::List(rc) | Value::Set(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Map(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Record(rc) => Some(Rc::as_ptr(rc) as usize),
            Value::Object(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            _ => None,
        }
    }

    /// Renders the value as JSON.
    ///
    /// Sets render as arrays, records and objects as plain field maps, map
    /// keys through their `Display` form. A back-reference renders as the
    /// string `"<cycle>"`; an object whose fields cannot be listed renders as
    /// its type name in angle brackets. Non-finite floats become JSON null.
    pub fn to_json(&self) -> JsonValue {
        self.render_json(&mut HashSet::new())
    }

    fn render_json(&self, on_path: &mut HashSet<usize>) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Number(Number::Integer(i)) => JsonValue::from(*i),
            Value::Number(Number::Float(f)) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Text(s) => JsonValue::String(s.clone()),
            Value::List(items) | Value::Set(items) => {
                let id = Rc::as_ptr(items) as usize;
                if !on_path.insert(id) {
                    return cycle_marker();
                }
                let rendered = items
                    .borrow()
                    .iter()
                    .map(|item| item.render_json(on_path))
                    .collect();
                on_path.remove(&id);
                JsonValue::Array(rendered)
            }
            Value::Map(entries) => {
                let id = Rc::as_ptr(entries) as usize;
                if !on_path.insert(id) {
                    return cycle_marker();
                }
                let mut object = serde_json::Map::new();
                for (key, value) in entries.borrow().iter() {
                    object.insert(key.to_string(), value.render_json(on_path));
                }
                on_path.remove(&id);
                JsonValue::Object(object)
            }
            Value::Record(record) => {
                let id = Rc::as_ptr(record) as usize;
                if !on_path.insert(id) {
                    return cycle_marker();
                }
                let mut object = serde_json::Map::new();
                for (name, value) in record.borrow().fields() {
                    object.insert(name.clone(), value.render_json(on_path));
                }
                on_path.remove(&id);
                JsonValue::Object(object)
            }
            Value::Object(source) => {
                let id = Rc::as_ptr(source) as *const () as usize;
                if !on_path.insert(id) {
                    return cycle_marker();
                }
                let source = source.borrow();
                let rendered = match source.field_names() {
                    Ok(names) => {
                        let mut object = serde_json::Map::new();
                        for name in names {
                            // Unreadable fields are simply left out of the
                            // rendering; the search engine reports them.
                            if let Ok(value) = source.field(&name) {
                                object.insert(name, value.render_json(on_path));
                            }
                        }
                        JsonValue::Object(object)
                    }
                    Err(_) => JsonValue::String(format!("<{}>", source.type_name())),
                };
                on_path.remove(&id);
                rendered
            }
        }
    }
}

fn cycle_marker() -> JsonValue {
    JsonValue::String("<cycle>".to_string())
}

/// Set membership test: identity for composites, equality for scalars.
fn same_set_entry(a: &Value, b: &Value) -> bool {
    match (a.identity(), b.identity()) {
        (Some(x), Some(y)) => x == y,
        (None, None) => a == b,
        _ => false,
    }
}

impl PartialEq for Value {
    /// Scalars compare by value (numbers across integer/float), lists, sets,
    /// maps and records structurally, objects by reference identity.
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Set(a), Value::Set(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Value::Record(a), Value::Record(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Value::List(items) => f.debug_tuple("List").field(&*items.borrow()).finish(),
            Value::Set(items) => f.debug_tuple("Set").field(&*items.borrow()).finish(),
            Value::Map(entries) => f.debug_tuple("Map").field(&*entries.borrow()).finish(),
            Value::Record(record) => f.debug_tuple("Record").field(&*record.borrow()).finish(),
            Value::Object(source) => write!(f, "Object({})", source.borrow().type_name()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::Number(Number::Integer(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Value {
        Value::Number(Number::Integer(i as i64))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::Number(Number::Float(f))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}
