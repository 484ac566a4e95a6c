//! Unit tests for bootstrap configuration loading

use ctriage_common::config::{
    is_valid_key, load_toml_config, parse_toml_config, TomlConfig, DEFAULT_MODEL, DEFAULT_PORT,
};
use ctriage_common::Error;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_empty_file_uses_defaults() {
    let config = parse_toml_config("").unwrap();
    assert_eq!(config, TomlConfig::default());
    assert_eq!(config.port(), DEFAULT_PORT);
    assert_eq!(config.model(), DEFAULT_MODEL);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_full_file_is_parsed() {
    let content = r#"
host = "0.0.0.0"
port = 8080
api_key = "abc123"
model = "gemini-2.0-flash"
api_base_url = "http://localhost:9000"
request_timeout_secs = 30

[logging]
level = "debug"
"#;
    let config = parse_toml_config(content).unwrap();
    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(config.port(), 8080);
    assert_eq!(config.api_key.as_deref(), Some("abc123"));
    assert_eq!(config.model(), "gemini-2.0-flash");
    assert_eq!(config.api_base_url(), "http://localhost:9000");
    assert_eq!(config.request_timeout_secs(), 30);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_zero_port_is_rejected() {
    let result = parse_toml_config("port = 0");
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_malformed_toml_is_rejected() {
    let result = parse_toml_config("port = \"not a number\"");
    assert!(matches!(result, Err(Error::Toml(_))));
}

#[test]
fn test_load_explicit_path() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "port = 6001").unwrap();

    let config = load_toml_config(Some(file.path())).unwrap();
    assert_eq!(config.port(), 6001);
}

#[test]
fn test_load_missing_explicit_path_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let result = load_toml_config(Some(&missing));
    assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("not found")));
}

#[test]
fn test_load_reports_path_on_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "port = [").unwrap();

    let err = load_toml_config(Some(file.path())).unwrap_err();
    assert!(err.to_string().contains(&file.path().display().to_string()));
}

#[test]
fn test_key_validation() {
    assert!(is_valid_key("abc"));
    assert!(!is_valid_key(""));
    assert!(!is_valid_key("   \t"));
}
