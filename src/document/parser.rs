//! Document parsing into the searchable value model.
//!
//! This module provides functionality to parse JSON and YAML text into
//! [`Value`] trees. The conversions are structural: scalars map to scalar
//! variants, arrays and sequences to lists, objects and mappings to maps with
//! typed keys. Parsed documents are always acyclic; cyclic values only arise
//! when callers build them through the model's shared handles.
//!
//! # Example
//!
//! ```
//! use deepquill::document::parser::parse_json;
//!
//! let value = parse_json(r#"{"name": "Alice", "age": 30}"#).unwrap();
//! assert!(value.identity().is_some());
//! ```

use super::node::{Key, Number, Value};
use anyhow::{bail, Context, Result};
use serde_json::Value as SerdeValue;
use serde_yaml::Value as YamlValue;

/// Parses a JSON document into a [`Value`].
///
/// # Arguments
///
/// * `source` - The JSON text to parse
///
/// # Errors
///
/// Returns an error if the text is not valid JSON.
pub fn parse_json(source: &str) -> Result<Value> {
    let parsed: SerdeValue = serde_json::from_str(source).context("Failed to parse JSON")?;
    Ok(from_json(&parsed))
}

/// Parses a YAML document into a [`Value`].
///
/// # Arguments
///
/// * `source` - The YAML text to parse
///
/// # Errors
///
/// Returns an error if the text is not valid YAML, or if a mapping uses a
/// sequence or mapping as a key.
pub fn parse_yaml(source: &str) -> Result<Value> {
    let parsed: YamlValue = serde_yaml::from_str(source).context("Failed to parse YAML")?;
    from_yaml(&parsed)
}

/// Converts an already-parsed JSON value.
pub fn from_json(value: &SerdeValue) -> Value {
    match value {
        SerdeValue::Null => Value::Null,
        SerdeValue::Bool(b) => Value::Bool(*b),
        SerdeValue::Number(n) => Value::Number(convert_json_number(n)),
        SerdeValue::String(s) => Value::Text(s.clone()),
        SerdeValue::Array(items) => Value::list(items.iter().map(from_json).collect()),
        SerdeValue::Object(fields) => Value::map(
            fields
                .iter()
                .map(|(key, value)| (Key::Text(key.clone()), from_json(value)))
                .collect(),
        ),
    }
}

/// Converts an already-parsed YAML value.
///
/// YAML allows richer mapping keys than JSON. String, integer and boolean
/// keys convert directly; null and float keys fold into their textual form;
/// composite keys are rejected.
pub fn from_yaml(value: &YamlValue) -> Result<Value> {
    let converted = match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Number(n) => Value::Number(convert_yaml_number(n)),
        YamlValue::String(s) => Value::Text(s.clone()),
        YamlValue::Sequence(items) => {
            let items: Result<Vec<Value>> = items.iter().map(from_yaml).collect();
            Value::list(items?)
        }
        YamlValue::Mapping(mapping) => {
            let mut entries = Vec::with_capacity(mapping.len());
            for (key, value) in mapping {
                entries.push((convert_yaml_key(key)?, from_yaml(value)?));
            }
            Value::map(entries)
        }
        YamlValue::Tagged(tagged) => from_yaml(&tagged.value)?,
    };
    Ok(converted)
}

fn convert_json_number(n: &serde_json::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::Integer(i)
    } else {
        Number::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn convert_yaml_number(n: &serde_yaml::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::Integer(i)
    } else {
        Number::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn convert_yaml_key(key: &YamlValue) -> Result<Key> {
    match key {
        YamlValue::String(s) => Ok(Key::Text(s.clone())),
        YamlValue::Bool(b) => Ok(Key::Bool(*b)),
        YamlValue::Number(n) => match convert_yaml_number(n) {
            Number::Integer(i) => Ok(Key::Int(i)),
            float => Ok(Key::Text(float.to_string())),
        },
        YamlValue::Null => Ok(Key::Text("null".to_string())),
        YamlValue::Tagged(tagged) => convert_yaml_key(&tagged.value),
        other => bail!("Unsupported mapping key: {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json_object() {
        let value = parse_json(r#"{"name": "Alice", "age": 30, "tags": ["a", "b"]}"#).unwrap();
        assert_eq!(
            value.to_json(),
            json!({"name": "Alice", "age": 30, "tags": ["a", "b"]})
        );
    }

    #[test]
    fn test_parse_json_scalars() {
        assert_eq!(parse_json("null").unwrap(), Value::Null);
        assert_eq!(parse_json("true").unwrap(), Value::from(true));
        assert_eq!(parse_json("3").unwrap(), Value::from(3));
        assert_eq!(parse_json("3.5").unwrap(), Value::from(3.5));
        assert_eq!(parse_json("\"hi\"").unwrap(), Value::from("hi"));
    }

    #[test]
    fn test_parse_json_rejects_garbage() {
        let result = parse_json("{not json");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse JSON"));
    }

    #[test]
    fn test_parse_yaml_mapping_with_typed_keys() {
        let value = parse_yaml("name: quill\n7: seven\ntrue: yes\n").unwrap();
        if let Value::Map(entries) = &value {
            let entries = entries.borrow();
            assert!(entries.contains_key(&Key::from("name")));
            assert!(entries.contains_key(&Key::from(7)));
            assert!(entries.contains_key(&Key::from(true)));
        } else {
            panic!("Expected a map");
        }
    }

    #[test]
    fn test_parse_yaml_nested_sequence() {
        let value = parse_yaml("items:\n  - 1\n  - inner:\n      deep: true\n").unwrap();
        assert_eq!(
            value.to_json(),
            json!({"items": [1, {"inner": {"deep": true}}]})
        );
    }

    #[test]
    fn test_parse_yaml_rejects_composite_keys() {
        let result = parse_yaml("[1, 2]: pair\n");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Unsupported mapping key"));
    }

    #[test]
    fn test_parse_yaml_null_key_folds_to_text() {
        let value = parse_yaml("~: present\n").unwrap();
        if let Value::Map(entries) = &value {
            assert!(entries.borrow().contains_key(&Key::from("null")));
        } else {
            panic!("Expected a map");
        }
    }

    #[test]
    fn test_from_json_reuses_parsed_values() {
        let parsed = json!({"a": [1, 2.5]});
        assert_eq!(from_json(&parsed).to_json(), parsed);
    }
}
