use super::*;

// =============================================================
// MemoryCredentialStore
// =============================================================

#[test]
fn memory_store_starts_empty() {
    assert!(MemoryCredentialStore::new().load().is_none());
}

#[test]
fn memory_store_save_replaces_previous_token() {
    let store = MemoryCredentialStore::with_token("first");
    store.save("second");
    assert_eq!(store.load().as_deref(), Some("second"));
}

#[test]
fn memory_store_clear_is_idempotent() {
    let store = MemoryCredentialStore::with_token("abc");
    store.clear();
    store.clear();
    assert!(store.load().is_none());
}

// =============================================================
// FileCredentialStore
// =============================================================

#[test]
fn file_store_missing_file_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("storage.json"));
    assert!(store.load().is_none());
}

#[test]
fn file_store_save_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("quill").join("storage.json");
    let store = FileCredentialStore::new(&path);
    store.save("tok-1");
    assert!(path.exists());
    assert_eq!(store.load().as_deref(), Some("tok-1"));
}

#[test]
fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    FileCredentialStore::new(&path).save("tok-2");
    assert_eq!(FileCredentialStore::new(&path).load().as_deref(), Some("tok-2"));
}

#[test]
fn file_store_keeps_unrelated_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

    let store = FileCredentialStore::new(&path);
    store.save("tok-3");
    store.clear();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value, serde_json::json!({"theme": "dark"}));
}

#[test]
fn file_store_clear_without_file_does_not_create_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    FileCredentialStore::new(&path).clear();
    assert!(!path.exists());
}

#[test]
fn file_store_corrupt_file_is_absent_and_backed_up_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "not json").unwrap();

    let store = FileCredentialStore::new(&path);
    assert!(store.load().is_none());
    store.save("tok-4");
    assert_eq!(store.load().as_deref(), Some("tok-4"));
    assert_eq!(store.backup_path(), dir.path().join("storage.json.bak"));
    assert_eq!(std::fs::read_to_string(store.backup_path()).unwrap(), "not json");
}

#[test]
fn file_store_never_overwrites_unreadable_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::create_dir(&path).unwrap();
    std::fs::write(path.join("keep"), "data").unwrap();

    let store = FileCredentialStore::new(&path);
    store.save("tok-5");

    assert!(store.load().is_none());
    assert!(path.is_dir());
    assert_eq!(std::fs::read_to_string(path.join("keep")).unwrap(), "data");
}

#[test]
fn file_store_empty_token_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, r#"{"token":""}"#).unwrap();
    assert!(FileCredentialStore::new(&path).load().is_none());
}
