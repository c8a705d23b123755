use schoolhub::config::{ApiConfig, Config, ConfigError, DEFAULT_BASE_URL};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.api.timeout(), Duration::from_secs(30));
    assert_eq!(config.api.connect_timeout(), Duration::from_secs(5));
    assert!(config.storage.path.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    assert!(Config::config_path().ends_with("schoolhub/config.toml"));
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
}

#[test]
fn test_load_full_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[api]
base_url = "https://school.example.com/api"
timeout_seconds = 12
connect_timeout_seconds = 3

[storage]
path = "/var/lib/schoolhub/storage.json"
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.api.base_url, "https://school.example.com/api");
    assert_eq!(config.api.timeout(), Duration::from_secs(12));
    assert_eq!(config.api.connect_timeout(), Duration::from_secs(3));
    assert_eq!(
        config.storage.resolved_path(),
        PathBuf::from("/var/lib/schoolhub/storage.json")
    );
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[api]\nbase_url = \"http://10.0.0.2:5000\"\n");

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.api.base_url, "http://10.0.0.2:5000");
    assert_eq!(config.api.timeout_seconds, 30);
    assert!(config.storage.path.is_none());
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[api\nbase_url = ");

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_non_http_base_url_fails_validation() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[api]\nbase_url = \"ftp://files.example.com\"\n");

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
}

#[test]
fn test_zero_timeout_fails_validation() {
    let config = Config {
        api: ApiConfig {
            timeout_seconds: 0,
            ..ApiConfig::default()
        },
        ..Config::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("timeouts"));
}

#[test]
fn test_relative_base_url_fails_validation() {
    let config = Config {
        api: ApiConfig {
            base_url: "localhost:5000".to_string(),
            ..ApiConfig::default()
        },
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_env_override_replaces_base_url() {
    let config = Config::default()
        .with_base_url_override(Some("https://school.example.com".to_string()))
        .unwrap();
    assert_eq!(config.api.base_url, "https://school.example.com");
}

#[test]
fn test_blank_env_override_keeps_configured_url() {
    let config = Config::default()
        .with_base_url_override(Some("   ".to_string()))
        .unwrap();
    assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
}

#[test]
fn test_invalid_env_override_fails_validation() {
    for bad in ["localhost:5000", "ftp://files.example.com"] {
        let err = Config::default()
            .with_base_url_override(Some(bad.to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }), "{}", bad);
        assert!(err.to_string().contains(bad));
    }
}
