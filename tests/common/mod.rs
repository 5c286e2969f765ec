//! Common test utilities and fixtures
//!
//! Every CLI test runs against its own temporary directory, used as the data
//! directory, working directory and home so no user configuration leaks in.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

use dirs_engine::storage::{DirsStore, FileStore};
use dirs_engine::types::{AnswerSet, Pillar};

/// Get the path to the test fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

pub fn valid_config_fixture() -> PathBuf {
    fixture_path("valid_config.toml")
}

pub fn invalid_config_fixture() -> PathBuf {
    fixture_path("invalid_config.toml")
}

/// An isolated sandbox for one test.
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    /// Path of the file backing a storage slot.
    pub fn slot_file(&self, key: &str) -> PathBuf {
        self.data_dir().join(format!("{}.json", key))
    }

    /// Binary invocation without a data directory argument.
    pub fn bare_cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("dirs-engine").unwrap();
        cmd.current_dir(self.root())
            .env("HOME", self.root())
            .env("XDG_CONFIG_HOME", self.root().join(".config"))
            .env_remove("DIRS_CONFIG")
            .env_remove("DIRS_DATA_DIR")
            .env_remove("DIRS_LOG_LEVEL")
            .env_remove("DIRS_LOG_FILE")
            .env_remove("DIRS_LOG_JSON")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Binary invocation pointed at this sandbox's data directory.
    pub fn cmd(&self) -> Command {
        let mut cmd = self.bare_cmd();
        cmd.arg("--data-dir").arg(self.data_dir());
        cmd
    }

    pub fn store(&self) -> DirsStore<FileStore> {
        DirsStore::new(FileStore::new(self.data_dir()))
    }

    /// Store a complete answer set with every question answered `value`.
    pub fn seed_answers(&self, value: i32) {
        self.store().set_assessment(&uniform_answers(value)).unwrap();
    }
}

/// A complete answer set with the same value everywhere.
pub fn uniform_answers(value: i32) -> AnswerSet {
    let mut answers = AnswerSet::new();
    for pillar in Pillar::all() {
        for i in 0..5 {
            answers.set_answer(*pillar, i, value).unwrap();
        }
    }
    answers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_exist() {
        assert!(valid_config_fixture().exists());
        assert!(invalid_config_fixture().exists());
    }
}
