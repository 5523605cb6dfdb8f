#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::Command;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// The three-row ledger used across the suites: budget 130, spent 65.
pub const REFERENCE_SCRIPT: &str = "\
add Alice Book 50 40 yes
add Alice Game 50 0 no
add Bob Toy 30 25 yes
";

/// Creates an isolated application home directory.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// The CLI binary in script mode, rooted at `home`, without colors or ambient overrides.
pub fn script_command(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gift_ledger_cli").expect("cli binary");
    cmd.env("GIFT_LEDGER_CLI_SCRIPT", "1")
        .env("GIFT_LEDGER_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("GIFT_LEDGER_DB")
        .env_remove("RUST_LOG");
    cmd
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}
