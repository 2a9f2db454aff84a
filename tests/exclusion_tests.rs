//! Integration tests for path and kind exclusions.
//!
//! Exclusions are structural: skipping a location skips everything beneath
//! it, while siblings and unrelated branches are searched as usual.

use serde_json::json;

use deepquill::document::node::{FieldError, FieldSource, Instance, Key, Value};
use deepquill::search::{search, Kind, SearchOptions};

fn run(obj: &Value, options: &SearchOptions) -> serde_json::Value {
    search(obj, &Value::from("somewhere"), options)
        .unwrap()
        .to_json()
}

fn exclude_paths(paths: &[&str]) -> SearchOptions {
    SearchOptions {
        exclude_paths: paths.iter().map(|p| p.to_string()).collect(),
        ..SearchOptions::default()
    }
}

fn exclude_kinds(kinds: &[Kind]) -> SearchOptions {
    SearchOptions {
        exclude_kinds: kinds.iter().copied().collect(),
        ..SearchOptions::default()
    }
}

/// {"keep": ["somewhere"], "drop": ["somewhere", {"deep": "somewhere"}]}
fn two_branches() -> Value {
    Value::map(vec![
        (Key::from("keep"), Value::list(vec![Value::from("somewhere")])),
        (
            Key::from("drop"),
            Value::list(vec![
                Value::from("somewhere"),
                Value::map(vec![(Key::from("deep"), Value::from("somewhere"))]),
            ]),
        ),
    ])
}

#[test]
fn test_excluded_branch_leaves_siblings_alone() {
    assert_eq!(
        run(&two_branches(), &exclude_paths(&["root['drop']"])),
        json!({"matched_values": ["root['keep'][0]"]})
    );
}

#[test]
fn test_exclusion_is_exact_not_prefix() {
    // root['drop'][1] goes away; root['drop'][0] is a different path and
    // stays
    assert_eq!(
        run(&two_branches(), &exclude_paths(&["root['drop'][1]"])),
        json!({"matched_values": ["root['keep'][0]", "root['drop'][0]"]})
    );
}

#[test]
fn test_nonexistent_excluded_path_changes_nothing() {
    assert_eq!(
        run(&two_branches(), &exclude_paths(&["root['absent']"])),
        run(&two_branches(), &SearchOptions::default())
    );
}

#[test]
fn test_excluded_key_is_not_probed() {
    let obj = Value::map(vec![
        (Key::from("somewhere"), Value::from("around")),
        (Key::from("other"), Value::from("somewhere")),
    ]);
    // Without the exclusion this would also report the key match
    assert_eq!(
        run(&obj, &exclude_paths(&["root['somewhere']"])),
        json!({"matched_values": ["root['other']"]})
    );
}

#[test]
fn test_exclude_list_kind_skips_every_list() {
    let obj = Value::map(vec![
        (Key::from("inline"), Value::from("somewhere")),
        (Key::from("listed"), Value::list(vec![Value::from("somewhere")])),
    ]);
    assert_eq!(
        run(&obj, &exclude_kinds(&[Kind::List])),
        json!({"matched_values": ["root['inline']"]})
    );
}

#[test]
fn test_exclude_text_kind_gates_whole_entries() {
    // An entry whose value is text disappears, key probe and all; an entry
    // with a non-text value keeps its key probe
    let obj = Value::map(vec![
        (Key::from("somewhere"), Value::from("somewhere too")),
        (Key::from("somewhere_count"), Value::from(3)),
    ]);
    assert_eq!(
        run(&obj, &exclude_kinds(&[Kind::Text])),
        json!({"matched_keys": ["root['somewhere_count']"]})
    );
}

#[test]
fn test_exclude_object_kind() {
    let mut instance = Instance::new("Holder");
    instance.set("note", Value::from("somewhere"));
    let obj = Value::map(vec![
        (Key::from("boxed"), Value::object(instance)),
        (Key::from("free"), Value::from("somewhere")),
    ]);
    assert_eq!(
        run(&obj, &exclude_kinds(&[Kind::Object])),
        json!({"matched_values": ["root['free']"]})
    );
}

#[test]
fn test_exclude_number_kind() {
    let target = Value::from(2);
    let obj = Value::list(vec![Value::from(2), Value::from("two"), Value::from(2.0)]);
    let report = search(&obj, &target, &exclude_kinds(&[Kind::Number])).unwrap();
    assert_eq!(report.to_json(), json!({}));
}

#[test]
fn test_excluded_root_kind_yields_empty_report() {
    assert_eq!(run(&two_branches(), &exclude_kinds(&[Kind::Map])), json!({}));
}

/// An object that refuses to list its fields.
struct Unreadable;

impl FieldSource for Unreadable {
    fn type_name(&self) -> &str {
        "Unreadable"
    }

    fn field_names(&self) -> Result<Vec<String>, FieldError> {
        Err(FieldError::new("cannot list"))
    }

    fn field(&self, _name: &str) -> Result<Value, FieldError> {
        Err(FieldError::new("cannot read"))
    }
}

#[test]
fn test_excluded_path_never_surfaces_as_unprocessed() {
    let obj = Value::map(vec![
        (Key::from("broken"), Value::object(Unreadable)),
        (Key::from("fine"), Value::from("somewhere")),
    ]);
    // Without the exclusion the broken entry would be reported unprocessed
    assert_eq!(
        run(&obj, &SearchOptions::default()),
        json!({
            "matched_values": ["root['fine']"],
            "unprocessed": ["root['broken']"],
        })
    );
    assert_eq!(
        run(&obj, &exclude_paths(&["root['broken']"])),
        json!({"matched_values": ["root['fine']"]})
    );
}

#[test]
fn test_paths_and_kinds_combine() {
    let options = SearchOptions {
        exclude_paths: ["root['drop']".to_string()].into_iter().collect(),
        exclude_kinds: [Kind::List].into_iter().collect(),
        ..SearchOptions::default()
    };
    // The kind exclusion removes root['keep'] as well, leaving nothing
    assert_eq!(run(&two_branches(), &options), json!({}));
}
