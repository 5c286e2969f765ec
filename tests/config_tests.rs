//! Configuration system tests
//!
//! Loading, validation and precedence of the TOML configuration, through the
//! library API and through the binary.

mod common;

use std::fs;
use std::path::PathBuf;

use predicates::prelude::*;
use tempfile::TempDir;

use dirs_engine::config::{generate_default_config, DirsConfig};
use dirs_engine::error::Error;

use common::{invalid_config_fixture, valid_config_fixture, TestEnv};

/// A config file in its own temporary directory
struct ConfigFixture {
    _temp_dir: TempDir,
    config_path: PathBuf,
}

impl ConfigFixture {
    fn new(content: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, content).unwrap();
        Self {
            _temp_dir: temp_dir,
            config_path,
        }
    }

    fn path(&self) -> &str {
        self.config_path.to_str().unwrap()
    }
}

// ─────────────────────────────────────────────────────────────────
// Library API
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_load_valid_fixture() {
    let config = DirsConfig::load(valid_config_fixture().to_str()).unwrap();
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.max_files, 2);
    assert_eq!(config.storage.data_dir, "./dirs-data");
}

#[test]
fn test_load_invalid_fixture() {
    let err = DirsConfig::load(invalid_config_fixture().to_str()).unwrap_err();
    assert!(matches!(err, Error::ConfigValidation { .. }));
    assert_eq!(err.exit_code(), 10);
}

#[test]
fn test_empty_file_uses_defaults() {
    let fixture = ConfigFixture::new("");
    let config = DirsConfig::load(Some(fixture.path())).unwrap();
    assert_eq!(config.logging.level, "warn");
    assert!(!config.storage.data_dir.starts_with('~'));
}

#[test]
fn test_unknown_sections_are_ignored() {
    let fixture = ConfigFixture::new(
        r#"
[storage]
data_dir = "/srv/dirs"

[telemetry]
enabled = true
"#,
    );
    let config = DirsConfig::load(Some(fixture.path())).unwrap();
    assert_eq!(config.storage.data_dir, "/srv/dirs");
}

#[test]
fn test_wrong_type_is_parse_error() {
    let fixture = ConfigFixture::new(
        r#"
[logging]
max_files = "three"
"#,
    );
    let err = DirsConfig::load(Some(fixture.path())).unwrap_err();
    assert!(matches!(err, Error::ConfigParse { .. }));
    assert_eq!(err.code().as_str(), "E101");
}

#[test]
fn test_generated_default_loads() {
    let fixture = ConfigFixture::new(&generate_default_config());
    let config = DirsConfig::load(Some(fixture.path())).unwrap();
    assert_eq!(config.logging.max_file_size_mb, 10);
}

// ─────────────────────────────────────────────────────────────────
// Through the binary
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_config_file_sets_data_dir() {
    let env = TestEnv::new();
    let data_dir = env.root().join("from-config");
    let fixture = ConfigFixture::new(&format!(
        "[storage]\ndata_dir = \"{}\"\n",
        data_dir.display()
    ));

    env.bare_cmd()
        .args(["--config", fixture.path(), "answer", "ai-literacy", "1", "5"])
        .assert()
        .success();

    assert!(data_dir.join("dirs_assessment.json").exists());
}

#[test]
fn test_data_dir_flag_beats_config_file() {
    let env = TestEnv::new();
    let from_file = env.root().join("from-config");
    let fixture = ConfigFixture::new(&format!(
        "[storage]\ndata_dir = \"{}\"\n",
        from_file.display()
    ));

    env.cmd()
        .args(["--config", fixture.path(), "answer", "ai-literacy", "1", "5"])
        .assert()
        .success();

    assert!(env.slot_file("dirs_assessment").exists());
    assert!(!from_file.exists());
}

#[test]
fn test_env_data_dir_used() {
    let env = TestEnv::new();
    let from_env = env.root().join("from-env");

    env.bare_cmd()
        .env("DIRS_DATA_DIR", &from_env)
        .args(["answer", "critical-thinking", "5", "2"])
        .assert()
        .success();

    assert!(from_env.join("dirs_assessment.json").exists());
}

#[test]
fn test_config_in_working_directory_is_found() {
    let env = TestEnv::new();
    fs::write(
        env.root().join("dirs-engine.toml"),
        "[logging]\nlevel = \"error\"\n",
    )
    .unwrap();

    env.cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("level = \"error\""));
}

#[test]
fn test_log_file_written() {
    let env = TestEnv::new();
    let log_dir = env.root().join("logs");
    let fixture = ConfigFixture::new(&format!(
        "[logging]\nlevel = \"debug\"\nfile = \"{}\"\n",
        log_dir.join("dirs.log").display()
    ));

    env.cmd()
        .args(["--config", fixture.path(), "status"])
        .assert()
        .success();

    assert!(log_dir.exists());
}
