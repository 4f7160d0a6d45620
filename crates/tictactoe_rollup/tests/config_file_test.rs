//! Loading handler configuration from disk.

use std::io::Write;
use tictactoe_rollup::DappConfig;

#[test]
fn test_loads_toml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "rollup_url = \"http://127.0.0.1:5004\"\nboard_size = 4\npoll_interval_ms = 250\nseed = 42"
    )
    .unwrap();

    let config = DappConfig::from_file(file.path()).unwrap();
    assert_eq!(config.rollup_url().as_deref(), Some("http://127.0.0.1:5004"));
    assert_eq!(*config.board_size(), 4);
    assert_eq!(*config.poll_interval_ms(), 250);
    assert_eq!(*config.seed(), Some(42));
    assert!(config.validate().is_ok());
}

#[test]
fn test_cli_overrides_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "board_size = 4\nseed = 1").unwrap();

    let config = DappConfig::from_file(file.path())
        .unwrap()
        .with_overrides(None, Some(5), Some(2));
    assert_eq!(*config.board_size(), 5);
    assert_eq!(*config.seed(), Some(2));
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = DappConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_invalid_toml_is_config_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "board_size = \"three\"").unwrap();
    let err = DappConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}
