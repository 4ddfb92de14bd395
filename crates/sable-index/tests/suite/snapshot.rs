use std::path::PathBuf;

use pretty_assertions::assert_eq;
use sable_fuzzy::MatchOptions;
use sable_index::{IndexError, IndexSnapshot, MemoryIndex, SearchIndex, TypeQuery};
use sable_types::Accessibility;

fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(name)
}

#[test]
fn loads_checked_in_snapshot() {
    let index = MemoryIndex::load(&testdata("small_index.json")).expect("load snapshot");
    assert_eq!(index.type_count(), 5);

    let query = TypeQuery::new("Listen", MatchOptions::PREFIX_ONLY);
    let found: Vec<_> = index.find_types(&query).collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].access, Accessibility::Discouraged);

    let query = TypeQuery::new("Array", MatchOptions::PREFIX_ONLY);
    let ctors: Vec<_> = index.find_constructors(&query).collect();
    assert_eq!(ctors.len(), 1);
    assert_eq!(ctors[0].params, vec!["int".to_string()]);
    assert_eq!(ctors[0].param_names[0].as_str(), "initialCapacity");
}

#[test]
fn snapshot_survives_a_trip_through_disk() {
    let original = IndexSnapshot::load(&testdata("small_index.json")).expect("load snapshot");
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("index.json");
    std::fs::write(&path, original.to_json().expect("serialize")).expect("write");

    let reloaded = IndexSnapshot::load(&path).expect("reload");
    assert_eq!(reloaded, original);
}

#[test]
fn missing_file_reports_its_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.json");
    match IndexSnapshot::load(&path) {
        Err(IndexError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected an io error, got {other:?}"),
    }
}

#[test]
fn malformed_json_does_not_echo_file_contents() {
    let err = IndexSnapshot::from_json_str(r#"{"types": [{"simple_name": "SECRET-TOKEN", "#)
        .expect_err("truncated json");
    let message = err.to_string();
    assert!(message.contains("line 1"), "{message}");
    assert!(!message.contains("SECRET-TOKEN"), "{message}");
}

#[test]
fn missing_sections_default_to_empty() {
    let snapshot = IndexSnapshot::from_json_str(r#"{"packages": ["org.example"]}"#)
        .expect("parse");
    assert!(snapshot.types.is_empty());
    let index = MemoryIndex::build(snapshot);
    assert_eq!(index.snapshot().packages.len(), 2);
}
