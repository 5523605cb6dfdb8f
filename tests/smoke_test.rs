mod common;

use common::{script_command, temp_home};
use predicates::{prelude::PredicateBooleanExt, str::contains};

#[test]
fn version_reports_package_version() {
    let home = temp_home();
    script_command(&home)
        .write_stdin("version\nexit\n")
        .assert()
        .success()
        .stdout(contains(format!("Gift Ledger {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn help_lists_every_command() {
    let home = temp_home();
    script_command(&home)
        .write_stdin("help\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("Available commands")
                .and(contains("import"))
                .and(contains("export"))
                .and(contains("chart"))
                .and(contains("save")),
        );
}

#[test]
fn help_for_one_command_shows_usage() {
    let home = temp_home();
    script_command(&home)
        .write_stdin("help chart\nexit\n")
        .assert()
        .success()
        .stdout(contains("Usage: chart [recipient]"));
}

#[test]
fn empty_ledger_lists_nothing() {
    let home = temp_home();
    script_command(&home)
        .write_stdin("list\nsummary\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("No gifts recorded yet.")
                .and(contains("Total Budget: $0.00"))
                .and(contains("Gifts: 0 (0 purchased)")),
        );
}

#[test]
fn end_of_input_ends_the_session() {
    let home = temp_home();
    script_command(&home)
        .write_stdin("add Alice Book 50 40 yes\n# trailing comment\n\n")
        .assert()
        .success()
        .stdout(contains("Added gift `Book` for Alice (row 0)."));
}
