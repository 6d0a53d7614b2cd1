//! Configuration file loading tests
//!
//! - Missing TOML files do not fail startup
//! - TOML values apply beneath command-line/environment overrides

use pashu_common::config::{ConfigOverrides, GatewayConfig, TomlConfig};
use std::io::Write;

#[test]
fn test_missing_config_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let file = TomlConfig::load(&dir.path().join("absent.toml")).expect("Missing file is not an error");

    let config = GatewayConfig::resolve(ConfigOverrides::default(), file);
    assert_eq!(config, GatewayConfig::default());
}

#[test]
fn test_config_file_values_applied() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
port = 8100
bind_address = "127.0.0.1"
database_url = "sqlite://audit.db"
database_name = "pashu_audit"
max_upload_bytes = 1048576
"#
    )
    .unwrap();

    let toml = TomlConfig::load(file.path()).unwrap();
    let config = GatewayConfig::resolve(ConfigOverrides::default(), toml);

    assert_eq!(config.port, 8100);
    assert_eq!(config.bind_address, "127.0.0.1");
    assert!(config.database_url_set());
    assert!(config.database_name_set());
    assert_eq!(config.max_upload_bytes, 1_048_576);
    assert_eq!(config.store_timeout_secs, 5);
}

#[test]
fn test_environment_override_beats_file() {
    let toml = TomlConfig::parse("database_url = \"sqlite://file.db\"").unwrap();
    let overrides = ConfigOverrides {
        database_url: Some("sqlite://env.db".to_string()),
        ..Default::default()
    };

    let config = GatewayConfig::resolve(overrides, toml);
    assert_eq!(config.database_url.as_deref(), Some("sqlite://env.db"));
}
