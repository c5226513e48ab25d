//! Integration tests for reference resolution against on-disk fixtures

use merge_json::{Config, MergeError, Merger};
use serde_json::{json, Value};
use similar_asserts::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn fixture(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().expect("tmp");
    for (name, content) in files {
        let path = tmp.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(&path, content).expect("write fixture");
    }
    tmp
}

fn merge_in(root: &Path, input: &str) -> Result<Value, MergeError> {
    Merger::new(root.to_path_buf())?.merge(Path::new(input))
}

fn keys(value: &Value) -> Vec<&str> {
    value.as_object().expect("object").keys().map(String::as_str).collect()
}

#[test]
fn object_with_external_reference() {
    let tmp = fixture(&[
        ("main.json", r#"{"foo": {"...": "other.json#/a"}, "local": 1}"#),
        ("other.json", r#"{"a": {"val": 5}}"#),
    ]);

    let merged = merge_in(tmp.path(), "main.json").expect("merge");
    assert_eq!(merged, json!({"foo": {"val": 5}, "local": 1}));
}

#[test]
fn external_reference_merges_with_local_overrides() {
    let tmp = fixture(&[
        (
            "main.json",
            r#"{"...": "base.json", "foo": "bar2", "x": {"y": 9}, "list": [9], "extra": true}"#,
        ),
        ("base.json", r#"{"foo": "bar", "x": {"y": 1, "z": 2}, "list": [1, 2], "kept": "yes"}"#),
    ]);

    let merged = merge_in(tmp.path(), "main.json").expect("merge");
    assert_eq!(
        merged,
        json!({
            "foo": "bar2",
            "x": {"y": 9, "z": 2},
            "list": [9],
            "kept": "yes",
            "extra": true
        })
    );
    assert_eq!(keys(&merged), vec!["foo", "x", "list", "kept", "extra"]);
}

#[test]
fn array_with_pattern_reference_sorted_by_file_name() {
    let tmp = fixture(&[
        ("main.json", r#"[{"...": "items/*.json"}]"#),
        ("items/y.json", r#"{"n": 2}"#),
        ("items/x.json", r#"{"n": 1}"#),
    ]);

    let merged = merge_in(tmp.path(), "main.json").expect("merge");
    assert_eq!(merged, json!([{"n": 1}, {"n": 2}]));
}

#[test]
fn pattern_matches_each_receive_sibling_keys() {
    let tmp = fixture(&[
        ("main.json", r#"["first", {"...": "parts/*.json", "from": "array-item"}, "last"]"#),
        ("parts/a.json", r#"{"foo": "bar2", "from": "file"}"#),
        ("parts/b.json", r#"{"foobar": {"...": "../shared.json"}}"#),
        ("shared.json", r#"{"bar": "foo"}"#),
    ]);

    let merged = merge_in(tmp.path(), "main.json").expect("merge");
    assert_eq!(
        merged,
        json!([
            "first",
            {"foo": "bar2", "from": "array-item"},
            {"foobar": {"bar": "foo"}, "from": "array-item"},
            "last"
        ])
    );
}

#[test]
fn pattern_reference_in_object_is_rejected() {
    let tmp = fixture(&[
        ("main.json", r#"{"items": {"...": "items/*.json"}}"#),
        ("items/x.json", r#"{"n": 1}"#),
    ]);

    let err = merge_in(tmp.path(), "main.json").unwrap_err();
    assert!(matches!(err, MergeError::PatternNotAllowed { .. }), "got {err:?}");
}

#[test]
fn dotted_pattern_and_bracket_file_names() {
    let tmp = fixture(&[
        ("main.json", r#"{"list": [{"...": ".*.json"}], "odd": {"...": "a]b.json"}}"#),
        (".a.json", r#"{"hidden": true}"#),
        ("a]b.json", r#"{"odd": 1}"#),
    ]);

    let merged = merge_in(tmp.path(), "main.json").expect("merge");
    assert_eq!(merged, json!({"list": [{"hidden": true}], "odd": {"odd": 1}}));
}

#[test]
fn pattern_without_matches_contributes_nothing() {
    let tmp = fixture(&[("main.json", r#"[1, {"...": "none/*.json"}, 2]"#)]);

    let merged = merge_in(tmp.path(), "main.json").expect("merge");
    assert_eq!(merged, json!([1, 2]));
}

#[test]
fn nested_arrays_are_not_flattened() {
    let tmp = fixture(&[
        ("main.json", r#"[[[{"...": "other.json"}]], {"another": "entry"}, "notanentry"]"#),
        ("other.json", r#"{"foo": "bar2"}"#),
    ]);

    let merged = merge_in(tmp.path(), "main.json").expect("merge");
    assert_eq!(merged, json!([[[{"foo": "bar2"}]], {"another": "entry"}, "notanentry"]));
}

#[test]
fn internal_references_in_array_elements() {
    let tmp = fixture(&[(
        "main.json",
        r##"[
            {"name": "base"},
            {"...": "#/0", "id": "foobar", "key": "value"},
            {"...": "#/foobar", "id": "barfoo", "a": "b"}
        ]"##,
    )]);

    let merged = merge_in(tmp.path(), "main.json").expect("merge");
    assert_eq!(
        merged,
        json!([
            {"name": "base"},
            {"name": "base", "id": "foobar", "key": "value"},
            {"name": "base", "id": "barfoo", "key": "value", "a": "b"}
        ])
    );
}

#[test]
fn relative_references_follow_the_referencing_file() {
    let tmp = fixture(&[
        ("main.json", r#"{"a": {"...": "lib/one.json"}}"#),
        ("lib/one.json", r#"{"...": "two.json", "one": 1}"#),
        ("lib/two.json", r#"{"two": 2}"#),
    ]);

    let merged = merge_in(tmp.path(), "main.json").expect("merge");
    assert_eq!(merged, json!({"a": {"two": 2, "one": 1}}));
}

#[test]
fn local_references_in_imported_files_use_their_own_document() {
    let tmp = fixture(&[
        ("main.json", r#"{"defs": {"x": "main"}, "item": {"...": "other.json#/item"}}"#),
        ("other.json", r##"{"defs": {"x": "other"}, "item": {"...": "#/defs"}}"##),
    ]);

    let merged = merge_in(tmp.path(), "main.json").expect("merge");
    assert_eq!(merged, json!({"defs": {"x": "main"}, "item": {"x": "other"}}));
}

#[test]
fn reference_outside_working_directory_fails() {
    let tmp = fixture(&[
        ("secret.json", r#"{"token": "x"}"#),
        ("root/main.json", r#"{"a": {"b": [{"c": {"...": "../secret.json"}}]}}"#),
    ]);
    let root = tmp.path().join("root");

    let err = merge_in(&root, "main.json").unwrap_err();
    assert!(matches!(err, MergeError::OutsideWorkingDirectory { .. }), "got {err:?}");
}

#[test]
fn nested_file_reference_outside_working_directory_fails() {
    let tmp = fixture(&[
        ("secret.json", r#"{"token": "x"}"#),
        ("root/main.json", r#"{"a": {"...": "lib/inner.json"}}"#),
        ("root/lib/inner.json", r#"{"deep": {"...": "../../secret.json"}}"#),
    ]);
    let root = tmp.path().join("root");

    let err = merge_in(&root, "main.json").unwrap_err();
    assert!(matches!(err, MergeError::OutsideWorkingDirectory { .. }), "got {err:?}");
}

#[test]
fn pattern_matches_outside_working_directory_fail() {
    let tmp = fixture(&[
        ("secret.json", r#"{"token": "x"}"#),
        ("root/main.json", r#"[{"...": "../*.json"}]"#),
    ]);
    let root = tmp.path().join("root");

    let err = merge_in(&root, "main.json").unwrap_err();
    assert!(matches!(err, MergeError::OutsideWorkingDirectory { .. }), "got {err:?}");
}

#[test]
fn missing_segment_names_the_segment() {
    let tmp = fixture(&[
        ("main.json", r#"{"a": {"...": "other.json#/missing/key"}}"#),
        ("other.json", r#"{"present": {"key": 1}}"#),
    ]);

    let err = merge_in(tmp.path(), "main.json").unwrap_err();
    match err {
        MergeError::ReferenceNotFound { reference, segment } => {
            assert_eq!(reference.as_str(), "/missing/key");
            assert_eq!(segment.as_str(), "missing");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_and_malformed_files_fail() {
    let tmp = fixture(&[
        ("missing.json", r#"{"a": {"...": "absent.json"}}"#),
        ("broken.json", r#"{"a": {"...": "bad.json"}}"#),
        ("bad.json", "{not json"),
    ]);

    let err = merge_in(tmp.path(), "missing.json").unwrap_err();
    assert!(matches!(err, MergeError::Io { .. }), "got {err:?}");

    let err = merge_in(tmp.path(), "broken.json").unwrap_err();
    assert!(matches!(err, MergeError::Parse { .. }), "got {err:?}");
}

#[test]
fn cross_file_cycle_is_detected() {
    let tmp = fixture(&[
        ("a.json", r#"{"...": "b.json", "from": "a"}"#),
        ("b.json", r#"{"...": "a.json", "from": "b"}"#),
    ]);

    let err = merge_in(tmp.path(), "a.json").unwrap_err();
    assert!(matches!(err, MergeError::CyclicReference { .. }), "got {err:?}");
}

#[test]
fn repeated_non_cyclic_references_are_allowed() {
    let tmp = fixture(&[
        ("main.json", r#"{"a": {"...": "base.json"}, "b": {"...": "base.json"}, "c": [{"...": "base.json"}]}"#),
        ("base.json", r#"{"v": 1}"#),
    ]);

    let merged = merge_in(tmp.path(), "main.json").expect("merge");
    assert_eq!(merged, json!({"a": {"v": 1}, "b": {"v": 1}, "c": [{"v": 1}]}));
}

#[test]
fn custom_reference_key_from_config() {
    let tmp = fixture(&[
        ("main.json", r#"{"a": {"$import": "other.json"}, "b": {"...": "kept literally"}}"#),
        ("other.json", r#"{"v": 1}"#),
    ]);
    let config = Config { reference_key: "$import".into(), ..Config::default() };

    let merged = Merger::new(tmp.path().to_path_buf())
        .expect("merger")
        .with_config(&config)
        .merge(Path::new("main.json"))
        .expect("merge");
    assert_eq!(merged, json!({"a": {"v": 1}, "b": {"...": "kept literally"}}));
}

#[test]
fn merged_output_is_idempotent() {
    let tmp = fixture(&[
        ("main.json", r#"{"z": 1, "list": [{"...": "items/*.json", "k": "v"}], "a": {"...": "items/x.json"}}"#),
        ("items/x.json", r#"{"n": 1}"#),
        ("items/y.json", r#"{"n": 2}"#),
    ]);

    let first = merge_in(tmp.path(), "main.json").expect("merge");
    fs::write(tmp.path().join("resolved.json"), serde_json::to_string(&first).expect("json"))
        .expect("write");
    let second = merge_in(tmp.path(), "resolved.json").expect("merge again");

    assert_eq!(first, second);
    assert_eq!(keys(&first), vec!["z", "list", "a"]);
}

#[test]
fn sequential_and_parallel_agree() {
    let tmp = fixture(&[
        ("main.json", r#"[{"...": "items/*.json"}, {"...": "items/a.json#/inner"}, [{"...": "items/b.json"}]]"#),
        ("items/a.json", r#"{"inner": {"id": "a"}}"#),
        ("items/b.json", r#"{"id": "b"}"#),
        ("items/c.json", r#"{"id": "c"}"#),
    ]);

    let parallel = merge_in(tmp.path(), "main.json").expect("parallel");
    let sequential = Merger::new(tmp.path().to_path_buf())
        .expect("merger")
        .parallel(false)
        .merge(Path::new("main.json"))
        .expect("sequential");
    assert_eq!(parallel, sequential);
    assert_eq!(parallel[0], json!({"inner": {"id": "a"}}));
    assert_eq!(parallel[3], json!({"id": "a"}));
}
