//! Integration tests for the client-local key/value store.

use moodchat::storage::Store;
use tempfile::TempDir;

#[test]
fn set_and_get_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let store = Store::at(dir.path());
    let value = r#"[{"sender":"user","text":"hello","timestamp":"2026-01-01T00:00:00Z"}]"#;

    store.set("history", value).expect("set succeeds");
    assert_eq!(store.get("history"), Some(value.to_string()));
}

#[test]
fn get_missing_key_is_none() {
    let dir = TempDir::new().expect("temp dir");
    let store = Store::at(dir.path());
    assert_eq!(store.get("nonexistent"), None);
}

#[test]
fn remove_deletes_the_key() {
    let dir = TempDir::new().expect("temp dir");
    let store = Store::at(dir.path());

    store.set("theme", "dark").expect("set succeeds");
    assert!(store.get("theme").is_some());

    store.remove("theme").expect("remove succeeds");
    assert_eq!(store.get("theme"), None);
}

#[test]
fn remove_missing_key_is_ok() {
    let dir = TempDir::new().expect("temp dir");
    let store = Store::at(dir.path());
    store.remove("never_set").expect("remove is a no-op");
}

#[test]
fn keys_lists_sorted_key_names() {
    let dir = TempDir::new().expect("temp dir");
    let store = Store::at(dir.path());

    store.set("theme", "dark").expect("set theme");
    store.set("history", "[]").expect("set history");

    assert_eq!(store.keys(), vec!["history".to_string(), "theme".to_string()]);
}

#[test]
fn overwrite_replaces_value() {
    let dir = TempDir::new().expect("temp dir");
    let store = Store::at(dir.path());

    store.set("theme", "dark").expect("set dark");
    store.set("theme", "light").expect("set light");
    assert_eq!(store.get("theme"), Some("light".to_string()));
}

#[test]
fn profiles_are_isolated() {
    let dir = TempDir::new().expect("temp dir");
    let a = Store::at(dir.path().join("a"));
    let b = Store::at(dir.path().join("b"));

    a.set("history", "[1]").expect("set in a");
    assert_eq!(b.get("history"), None);
}
