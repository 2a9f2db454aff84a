//! Match rules for keys, names and values.
//!
//! A textual target matches by substring containment against textual
//! candidates only. Every other target matches by exact equality, with
//! integer and float numbers comparing across representations. Text never
//! matches a number's rendering and a number never matches its own digits
//! inside text, so the two regimes stay disjoint.
//!
//! The engine probes scalars with these rules; composite values are
//! traversed into rather than matched as wholes.

use crate::document::node::{Key, Number, Value};

/// Does the target match this candidate value?
pub fn value_matches(target: &Value, candidate: &Value) -> bool {
    match (target, candidate) {
        (Value::Text(t), Value::Text(c)) => c.contains(t.as_str()),
        (Value::Text(_), _) => false,
        _ => target == candidate,
    }
}

/// Does the target match this mapping key?
pub fn key_matches(target: &Value, key: &Key) -> bool {
    match (target, key) {
        (Value::Text(t), Key::Text(k)) => k.contains(t.as_str()),
        (Value::Number(n), Key::Int(i)) => *n == Number::Integer(*i),
        (Value::Bool(b), Key::Bool(k)) => b == k,
        _ => false,
    }
}

/// Does the target match this record field or attribute name?
pub fn name_matches(target: &Value, name: &str) -> bool {
    match target {
        Value::Text(t) => name.contains(t.as_str()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_target_uses_containment() {
        let target = Value::from("somewhere");
        assert!(value_matches(&target, &Value::from("somewhere")));
        assert!(value_matches(&target, &Value::from("something somewhere")));
        assert!(!value_matches(&target, &Value::from("somewhe")));
    }

    #[test]
    fn test_text_target_ignores_non_text_candidates() {
        let target = Value::from("2");
        assert!(!value_matches(&target, &Value::from(2)));
        assert!(!value_matches(&target, &Value::from(true)));
        assert!(!value_matches(&target, &Value::Null));
    }

    #[test]
    fn test_number_target_uses_equality_across_representations() {
        assert!(value_matches(&Value::from(2), &Value::from(2.0)));
        assert!(value_matches(&Value::from(2.0), &Value::from(2)));
        assert!(!value_matches(&Value::from(2), &Value::from(21)));
        assert!(!value_matches(&Value::from(2), &Value::from("2")));
    }

    #[test]
    fn test_nan_target_never_matches() {
        let target = Value::from(f64::NAN);
        assert!(!value_matches(&target, &Value::from(f64::NAN)));
        assert!(!value_matches(&target, &Value::from(0)));
    }

    #[test]
    fn test_null_and_bool_targets() {
        assert!(value_matches(&Value::Null, &Value::Null));
        assert!(!value_matches(&Value::Null, &Value::from(false)));
        assert!(value_matches(&Value::from(true), &Value::from(true)));
        assert!(!value_matches(&Value::from(true), &Value::from(false)));
    }

    #[test]
    fn test_key_matching() {
        let target = Value::from("somewhere");
        assert!(key_matches(&target, &Key::from("somewhere")));
        assert!(key_matches(&target, &Key::from("somewhere_good")));
        assert!(!key_matches(&target, &Key::from("some")));
        assert!(!key_matches(&target, &Key::from(0)));

        assert!(key_matches(&Value::from(0), &Key::from(0)));
        assert!(!key_matches(&Value::from(0), &Key::from("0")));
        assert!(key_matches(&Value::from(true), &Key::from(true)));
    }

    #[test]
    fn test_name_matching() {
        let target = Value::from("somewhere");
        assert!(name_matches(&target, "somewhere_good"));
        assert!(!name_matches(&target, "elsewhere"));
        assert!(!name_matches(&Value::from(7), "7"));
    }
}
