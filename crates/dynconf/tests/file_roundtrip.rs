//! Integration tests for dynconf file loading and persistence.
//!
//! These tests exercise the public API end to end: parsing from disk,
//! saving back, round-trip value equality, and the diagnostic dump under
//! a real tracing subscriber.

use std::path::PathBuf;

use dynconf::{Config, ConfigError};
use uuid::Uuid;

/// Creates a unique scratch directory under the system temp dir.
fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dynconf_test_{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("must create scratch dir");
    dir
}

#[test]
fn test_from_file_on_nonexistent_path_returns_io_error() {
    // Arrange
    let path = PathBuf::from("/nonexistent/path/that/cannot/exist/config.json");

    // Act
    let result = Config::from_file(&path);

    // Assert – an I/O error carrying the offending path, no partial config
    match result {
        Err(ConfigError::Io { path: p, source }) => {
            assert_eq!(p, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_from_file_on_malformed_json_returns_parse_error() {
    // Arrange
    let dir = scratch_dir();
    let path = dir.join("broken.json");
    std::fs::write(&path, "{{{ not json").unwrap();

    // Act
    let result = Config::from_file(&path);

    // Assert
    assert!(matches!(result, Err(ConfigError::Parse(_))));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_save_then_from_file_round_trips() {
    // Arrange
    let dir = scratch_dir();
    let path = dir.join("nested").join("config.json");

    let mut cfg = Config::new();
    cfg.set("name", "edge-agent");
    cfg.set("port", 8080i64);
    cfg.set("hosts", vec!["alpha", "beta"]);

    // Act – save creates the parent directory itself
    cfg.save(&path).expect("save must succeed");
    let restored = Config::from_file(&path).expect("reload must succeed");

    // Assert
    assert_eq!(restored, cfg);
    assert_eq!(restored.get_str("name").unwrap(), "edge-agent");
    assert_eq!(restored.get_i64("port").unwrap(), 8080);
    assert_eq!(restored.get_str_vec("hosts").unwrap(), vec!["alpha", "beta"]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_dump_load_dump_is_stable() {
    // Loads(Dumps(Loads(d))) must equal Loads(d) for any valid document.
    let document = br#"{
        "name": "edge-agent",
        "threshold": 3.9,
        "enabled": true,
        "tags": ["a", "b"],
        "limits": {"cpu": 4, "mem": 2048},
        "nothing": null
    }"#;

    let first = Config::from_slice(document).expect("parse");
    let second = Config::from_slice(&first.to_vec().expect("dump")).expect("reparse");

    assert_eq!(second, first);
}

#[test]
fn test_debug_dump_emits_under_installed_subscriber() {
    // Arrange – a real subscriber at debug level, scoped to this test
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .finish();

    let cfg = Config::from_str(r#"{"a": 1, "b": "two"}"#).unwrap();

    // Act / Assert – must not panic, regardless of subscriber state
    tracing::subscriber::with_default(subscriber, || {
        cfg.debug();
    });
}

#[test]
fn test_required_accessors_through_file_loaded_config() {
    // Arrange
    let dir = scratch_dir();
    let path = dir.join("config.json");
    std::fs::write(
        &path,
        r#"{"service": "relay", "replicas": 3, "peers": ["n1", "n2"]}"#,
    )
    .unwrap();

    // Act
    let cfg = Config::from_file(&path).expect("load must succeed");

    // Assert – success paths of the fail-fast tier
    assert_eq!(cfg.require_str("service"), "relay");
    assert_eq!(cfg.require_u64("replicas"), 3);
    assert_eq!(cfg.require_str_vec("peers"), vec!["n1", "n2"]);

    std::fs::remove_dir_all(&dir).ok();
}
