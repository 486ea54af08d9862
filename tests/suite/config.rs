//! Config file loading

use std::fs;

use tempfile::TempDir;
use upshot::{CONFIG_ENV, ConfigError, FaultLogLevel, UpshotConfig};

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn full_config_round_trips_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "config.toml",
        r#"
[faults]
log = "info"
message_limit = 64
"#,
    );

    let config = UpshotConfig::load_from(&path).unwrap();
    assert_eq!(config.faults.log, FaultLogLevel::Info);
    assert_eq!(config.faults.message_limit, 64);
}

#[test]
fn broken_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "broken.toml", "[faults]\nmessage_limit = \"many\"\n");

    match UpshotConfig::load_from(&path) {
        Err(err @ ConfigError::Parse { .. }) => {
            assert_eq!(err.path(), path);
            assert!(err.to_string().contains("broken.toml"));
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn directory_is_not_a_readable_config() {
    let dir = tempfile::tempdir().unwrap();
    let err = UpshotConfig::load_from(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn init_loads_the_file_named_by_the_environment() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "env.toml", "[faults]\nlog = \"warn\"\nmessage_limit = 32\n");

    // The only test that touches this variable.
    unsafe { std::env::set_var(CONFIG_ENV, &path) };
    assert_eq!(upshot::config_path(), Some(path.clone()));
    let loaded = upshot::init();
    unsafe { std::env::remove_var(CONFIG_ENV) };

    let config = loaded.unwrap().expect("config file present");
    assert_eq!(config.faults.log, FaultLogLevel::Warn);
    assert_eq!(config.faults.message_limit, 32);
}
