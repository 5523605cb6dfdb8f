mod common;

use common::{script_command, temp_home, write_file, REFERENCE_SCRIPT};
use predicates::{prelude::PredicateBooleanExt, str::contains};

#[test]
fn script_mode_reports_reference_totals() {
    let home = temp_home();
    script_command(&home)
        .write_stdin(format!("{REFERENCE_SCRIPT}summary\nexit\n"))
        .assert()
        .success()
        .stdout(
            contains("Added gift `Book` for Alice (row 0).")
                .and(contains("Total Budget: $130.00"))
                .and(contains("Total Spent: $65.00"))
                .and(contains("Remaining: $65.00"))
                .and(contains("Gifts: 3 (2 purchased)")),
        );
}

#[test]
fn chart_shows_waterfall_for_one_recipient() {
    let home = temp_home();
    script_command(&home)
        .write_stdin(format!("{REFERENCE_SCRIPT}chart Alice\nexit\n"))
        .assert()
        .success()
        .stdout(
            contains("Alice (budget $300.00)")
                .and(contains("$40.00"))
                .and(contains("$260.00"))
                .and(contains("Bob (budget").not()),
        );
}

#[test]
fn groups_report_remaining_against_fixed_budget() {
    let home = temp_home();
    script_command(&home)
        .write_stdin(format!("{REFERENCE_SCRIPT}groups Bob\ngroups Zed\nexit\n"))
        .assert()
        .success()
        .stdout(
            contains("Remaining of $300.00: $275.00")
                .and(contains("No gifts recorded for `Zed`.")),
        );
}

#[test]
fn export_then_import_round_trips() {
    let home = temp_home();
    let out = home.join("gifts.csv");
    script_command(&home)
        .write_stdin(format!("{REFERENCE_SCRIPT}export {}\nexit\n", out.display()))
        .assert()
        .success()
        .stdout(contains("Exported 3 gift(s)"));

    let text = std::fs::read_to_string(&out).expect("exported file");
    assert!(text.starts_with("Recipient,Gift,Budget,Cost,Purchased,Gift Link\n"));
    assert!(text.contains("Alice,Book,50,40,Yes,"));

    let fresh = temp_home();
    script_command(&fresh)
        .write_stdin(format!("import {}\nsummary\nexit\n", out.display()))
        .assert()
        .success()
        .stdout(
            contains("Imported 3 gift(s)")
                .and(contains("Total Budget: $130.00"))
                .and(contains("Total Spent: $65.00")),
        );
}

#[test]
fn default_export_lands_in_home() {
    let home = temp_home();
    script_command(&home)
        .write_stdin(format!("{REFERENCE_SCRIPT}export\nexit\n"))
        .assert()
        .success();
    assert!(home.join("christmas_gift_list.csv").exists());
}

#[test]
fn form_headers_import_with_coercion_warning() {
    let home = temp_home();
    let upload = write_file(
        &home,
        "form.csv",
        "Recipient Name,Gift Idea,Cost,Purchased?,Gift Link\n\
         Alice,Book,40,Yes,https://shop.example/book\n\
         Bob,Toy,about ten,No,\n",
    );
    script_command(&home)
        .write_stdin(format!("import {}\nlist\nsummary\nexit\n", upload.display()))
        .assert()
        .success()
        .stdout(
            contains("Imported 2 gift(s)")
                .and(contains("could not be read"))
                .and(contains("Total Spent: $40.00"))
                .and(contains("2 gift(s).")),
        );
}

#[test]
fn import_missing_columns_keeps_current_table() {
    let home = temp_home();
    let upload = write_file(&home, "bad.csv", "Recipient Name,Cost\nAlice,10\n");
    script_command(&home)
        .write_stdin(format!(
            "{REFERENCE_SCRIPT}import {}\nlist\nexit\n",
            upload.display()
        ))
        .assert()
        .success()
        .stdout(
            contains("Missing required columns: Gift Idea, Purchased?, Gift Link")
                .and(contains("3 gift(s).")),
        );
}

#[test]
fn edit_and_remove_rows() {
    let home = temp_home();
    let script = format!(
        "{REFERENCE_SCRIPT}\
edit 1 purchased yes
edit 1 cost 10
summary
remove 0
remove 9
edit 9 cost 1
exit
"
    );
    script_command(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            contains("Updated row 1: Cost is now `10`.")
                .and(contains("Total Spent: $75.00"))
                .and(contains("Removed gift `Book` for Alice (row 0)."))
                .and(contains("Row 9 does not exist; nothing removed."))
                .and(contains("Row 9 does not exist.")),
        );
}

#[test]
fn invalid_arguments_are_reported_and_shell_continues() {
    let home = temp_home();
    script_command(&home)
        .write_stdin("add Cara Scarf -5 0 no\nadd Cara Scarf\nlist\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("invalid budget `-5`")
                .and(contains("usage: add"))
                .and(contains("No gifts recorded yet.")),
        );
}

#[test]
fn unknown_command_gets_suggestion() {
    let home = temp_home();
    script_command(&home)
        .write_stdin("summry\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `summry`").and(contains("Suggestion: `summary`?")));
}

#[test]
fn fixed_budget_setting_changes_charts_and_persists() {
    let home = temp_home();
    script_command(&home)
        .write_stdin(format!(
            "config set fixed_budget 100\n{REFERENCE_SCRIPT}chart Alice\nexit\n"
        ))
        .assert()
        .success()
        .stdout(
            contains("Set `fixed_budget` to `100`.")
                .and(contains("Alice (budget $100.00)"))
                .and(contains("$60.00")),
        );

    script_command(&home)
        .write_stdin("config show\nexit\n")
        .assert()
        .success()
        .stdout(contains("fixed_budget").and(contains(": 100")));
}
