//! Loading configuration from files on disk.

use std::path::PathBuf;
use twinverse::AppConfig;

fn write_config(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("twinverse-{}-{}.toml", name, std::process::id()));
    std::fs::write(&path, content).expect("Failed to write config file");
    path
}

#[test]
fn test_load_reads_named_file() {
    let path = write_config(
        "named",
        r#"
        [gemini]
        model = "gemini-2.0-flash"
        max_attempts = 2
        request_timeout_secs = 30

        [database]
        max_connections = 3
        "#,
    );

    let config = AppConfig::load(Some(&path)).expect("Config loads");
    std::fs::remove_file(&path).ok();

    assert_eq!(config.gemini().model(), "gemini-2.0-flash");
    assert_eq!(*config.gemini().max_attempts(), 2);
    assert_eq!(*config.database().max_connections(), 3);
    assert_eq!(config.logging().filter(), "info");
}

#[test]
fn test_load_rejects_missing_named_file() {
    let path = std::env::temp_dir().join("twinverse-does-not-exist.toml");
    assert!(AppConfig::load(Some(&path)).is_err());
}

#[test]
fn test_rejects_zero_attempt_budget() {
    let result = AppConfig::from_toml_str(
        r#"
        [gemini]
        max_attempts = 0
        "#,
    );
    assert!(result.is_err());
}
