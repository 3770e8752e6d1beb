use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn from_lookup_defaults() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[("HOME", "/home/ada")])).unwrap();
    assert_eq!(cfg.base_url, DEFAULT_API_URL);
    assert_eq!(cfg.storage_path, PathBuf::from("/home/ada/.quill/storage.json"));
    assert_eq!(cfg.connect_timeout, None);
}

#[test]
fn from_lookup_without_home_uses_current_dir() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg.storage_path, PathBuf::from("./.quill/storage.json"));
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        ("QUILL_API_URL", "https://blog.example.test/api/v1/"),
        ("QUILL_STORAGE_PATH", "/tmp/quill-test.json"),
        ("QUILL_CONNECT_TIMEOUT_SECS", "7"),
    ]))
    .unwrap();
    assert_eq!(cfg.base_url, "https://blog.example.test/api/v1");
    assert_eq!(cfg.storage_path, PathBuf::from("/tmp/quill-test.json"));
    assert_eq!(cfg.connect_timeout, Some(Duration::from_secs(7)));
}

#[test]
fn from_lookup_blank_url_falls_back_to_default() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[("QUILL_API_URL", "  ")])).unwrap();
    assert_eq!(cfg.base_url, DEFAULT_API_URL);
}

#[test]
fn from_lookup_rejects_non_http_url() {
    let err = ClientConfig::from_lookup(lookup_from(&[("QUILL_API_URL", "ftp://example.test")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
}

#[test]
fn from_lookup_rejects_relative_url() {
    let err = ClientConfig::from_lookup(lookup_from(&[("QUILL_API_URL", "/api/v1")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
}

#[test]
fn from_lookup_rejects_bad_timeout() {
    let err = ClientConfig::from_lookup(lookup_from(&[("QUILL_CONNECT_TIMEOUT_SECS", "soon")]))
        .unwrap_err()
        .to_string();
    assert!(err.contains("QUILL_CONNECT_TIMEOUT_SECS"));
}

#[test]
fn new_trims_trailing_slash() {
    let cfg = ClientConfig::new("http://127.0.0.1:9000/").unwrap();
    assert_eq!(cfg.base_url, "http://127.0.0.1:9000");
}

#[test]
fn with_storage_path_overrides() {
    let cfg = ClientConfig::new(DEFAULT_API_URL).unwrap().with_storage_path("/var/tmp/x.json");
    assert_eq!(cfg.storage_path, PathBuf::from("/var/tmp/x.json"));
}
