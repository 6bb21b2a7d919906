//! End-to-end tests for the tally binary
//!
//! Each test runs against its own temporary data directory via the
//! `TALLY_DATA_DIR` override, so tests never touch real user data and can
//! run in parallel.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Build a tally command pointed at an isolated data directory
///
/// The working directory is also set to the sandbox so report files land
/// there instead of the test runner's directory.
fn tally(sandbox: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env("TALLY_DATA_DIR", sandbox.path())
        .current_dir(sandbox.path());
    cmd
}

fn init(sandbox: &TempDir) {
    tally(sandbox).arg("init").assert().success();
}

/// Run `tally add` and return its stdout
fn add(sandbox: &TempDir, args: &[&str]) -> String {
    let assert = tally(sandbox).arg("add").args(args).assert().success();
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

/// Pull the short transaction ID out of `tally add` output
fn extract_id(stdout: &str) -> String {
    stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix("ID:"))
        .map(|rest| rest.trim().to_string())
        .unwrap()
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_seeds_default_categories() {
    let sandbox = TempDir::new().unwrap();

    tally(&sandbox)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"))
        .stdout(predicate::str::contains("Salary, Freelance"));

    tally(&sandbox)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary"))
        .stdout(predicate::str::contains("Food"));
}

#[test]
fn init_twice_is_a_noop() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);

    tally(&sandbox)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"));
}

// ---------------------------------------------------------------------------
// add
// ---------------------------------------------------------------------------

#[test]
fn add_records_transaction() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);

    tally(&sandbox)
        .args(["add", "expense", "12.50", "Food", "-D", "Lunch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created transaction:"))
        .stdout(predicate::str::contains("$12.50"))
        .stdout(predicate::str::contains("Category: Food"))
        .stdout(predicate::str::contains("Lunch"));
}

#[test]
fn add_rejects_unknown_type() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);

    tally(&sandbox)
        .args(["add", "widgets", "10", "Food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Use income or expense"));
}

#[test]
fn add_rejects_bad_date() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);

    tally(&sandbox)
        .args(["add", "expense", "10", "Food", "--date", "2025-13-40"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn add_rejects_negative_amount() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);

    tally(&sandbox)
        .args(["add", "--", "expense", "-5.00", "Food"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount cannot be negative"));
}

// ---------------------------------------------------------------------------
// transaction
// ---------------------------------------------------------------------------

#[test]
fn transaction_list_filters_by_type() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);
    add(&sandbox, &["income", "100", "Salary"]);
    add(&sandbox, &["expense", "25", "Food"]);

    tally(&sandbox)
        .args(["transaction", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 2 transactions"));

    tally(&sandbox)
        .args(["transaction", "list", "-t", "income"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary"))
        .stdout(predicate::str::contains("Showing 1 transactions"))
        .stdout(predicate::str::contains("Food").not());
}

#[test]
fn transaction_show_finds_by_short_id() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);
    let id = extract_id(&add(&sandbox, &["expense", "9.99", "Food", "-D", "Snacks"]));

    tally(&sandbox)
        .args(["txn", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("$9.99"))
        .stdout(predicate::str::contains("Snacks"));
}

#[test]
fn transaction_edit_updates_fields() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);
    let id = extract_id(&add(&sandbox, &["expense", "10", "Food"]));

    tally(&sandbox)
        .args(["transaction", "edit", &id, "-a", "200", "-c", "Utilities"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated transaction:"))
        .stdout(predicate::str::contains("$200.00"))
        .stdout(predicate::str::contains("Utilities"));
}

#[test]
fn transaction_edit_without_changes_is_noop() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);
    let id = extract_id(&add(&sandbox, &["expense", "10", "Food"]));

    tally(&sandbox)
        .args(["transaction", "edit", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes specified"));
}

#[test]
fn transaction_delete_requires_force() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);
    let id = extract_id(&add(&sandbox, &["expense", "10", "Food"]));

    tally(&sandbox)
        .args(["transaction", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Use --force to confirm deletion"));

    tally(&sandbox)
        .args(["transaction", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 1 transactions"));

    tally(&sandbox)
        .args(["transaction", "delete", &id, "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted transaction:"));

    tally(&sandbox)
        .args(["transaction", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing 0 transactions"));
}

#[test]
fn unknown_transaction_id_fails() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);

    tally(&sandbox)
        .args(["transaction", "show", "deadbeef"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transaction not found: deadbeef"));
}

// ---------------------------------------------------------------------------
// category
// ---------------------------------------------------------------------------

#[test]
fn category_lifecycle() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);

    tally(&sandbox)
        .args(["category", "add", "Gym"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created category: Gym"))
        .stdout(predicate::str::contains("Type: Expense"));

    tally(&sandbox)
        .args(["category", "rename", "Gym", "Fitness"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed category: Gym -> Fitness"));

    tally(&sandbox)
        .args(["category", "delete", "Fitness", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted category: Fitness"));

    tally(&sandbox)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fitness").not());
}

#[test]
fn category_delete_keeps_referencing_transactions() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);
    add(&sandbox, &["expense", "10", "Food"]);

    tally(&sandbox)
        .args(["category", "delete", "Food", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted category: Food"))
        .stdout(predicate::str::contains(
            "1 transactions still carry the name 'Food'",
        ));

    // The transaction keeps its recorded category name.
    tally(&sandbox)
        .args(["transaction", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("Showing 1 transactions"));
}

// ---------------------------------------------------------------------------
// summary
// ---------------------------------------------------------------------------

#[test]
fn summary_reports_totals() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);
    add(&sandbox, &["income", "100", "Salary"]);
    add(&sandbox, &["expense", "30", "Food"]);

    tally(&sandbox)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Income:   $100.00"))
        .stdout(predicate::str::contains("Total Expenses: $30.00"))
        .stdout(predicate::str::contains("Balance:        $70.00"));
}

#[test]
fn summary_on_empty_ledger_shows_zeroes() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);

    tally(&sandbox)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Income:   $0.00"))
        .stdout(predicate::str::contains("Balance:        $0.00"));
}

// ---------------------------------------------------------------------------
// report
// ---------------------------------------------------------------------------

#[test]
fn report_stdout_includes_sections() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);
    add(&sandbox, &["expense", "30", "Food", "-D", "Groceries"]);

    tally(&sandbox)
        .args(["report", "expense", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense Report"))
        .stdout(predicate::str::contains("Generated on:"))
        .stdout(predicate::str::contains("Total Expenses: $30.00"))
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("Subtotal: $30.00"));
}

#[test]
fn report_stdout_for_empty_type_has_no_sections() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);

    tally(&sandbox)
        .args(["report", "income", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Income Report"))
        .stdout(predicate::str::contains("Total Income: $0.00"))
        .stdout(predicate::str::contains("Subtotal:").not());
}

#[test]
fn report_writes_dated_file() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);
    add(&sandbox, &["expense", "30", "Food"]);

    tally(&sandbox)
        .args(["report", "expense"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report exported to: expense-report-"));

    let report = std::fs::read_dir(sandbox.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .find(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            name.starts_with("expense-report-") && name.ends_with(".txt")
        });
    let report = report.unwrap();

    let content = std::fs::read_to_string(report.path()).unwrap();
    assert!(content.starts_with("Expense Report"));
    assert!(content.contains("Total Expenses: $30.00"));
}

#[test]
fn report_csv_format_writes_header_and_total() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);
    add(&sandbox, &["expense", "15.50", "Food"]);

    tally(&sandbox)
        .args(["report", "expense", "-f", "csv", "-o", "out.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report exported to: out.csv"));

    let content = std::fs::read_to_string(sandbox.path().join("out.csv")).unwrap();
    assert!(content.starts_with("Category,Date,Amount,Description"));
    assert!(content.contains("Total,,15.50,"));
}

#[test]
fn report_rejects_bad_format() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);

    tally(&sandbox)
        .args(["report", "expense", "-f", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid report format"));
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

#[test]
fn export_transactions_writes_csv() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);
    add(&sandbox, &["expense", "10", "Food"]);

    tally(&sandbox)
        .args(["export", "transactions", "out.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 transactions to"));

    let content = std::fs::read_to_string(sandbox.path().join("out.csv")).unwrap();
    assert!(content.starts_with("ID,Date,Type,Category,Amount,Description"));
    assert!(content.contains("Food"));
}

#[test]
fn export_all_json_round_trips() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);
    add(&sandbox, &["income", "50", "Salary"]);

    tally(&sandbox)
        .args(["export", "all", "ledger.json", "--pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Full ledger exported to"));

    let content = std::fs::read_to_string(sandbox.path().join("ledger.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert!(parsed["transactions"].as_array().is_some_and(|t| t.len() == 1));
    assert!(parsed["categories"].as_array().is_some_and(|c| !c.is_empty()));
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_show_lists_settings() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);

    tally(&sandbox)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Currency symbol:"))
        .stdout(predicate::str::contains("Date format:"))
        .stdout(predicate::str::contains("Default report format:"));
}

#[test]
fn config_set_persists_between_runs() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);

    tally(&sandbox)
        .args(["config", "set", "report-format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated report-format to 'csv'"));

    tally(&sandbox)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default report format: csv"));
}

#[test]
fn config_set_rejects_unknown_key() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);

    tally(&sandbox)
        .args(["config", "set", "color-scheme", "dark"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting"));
}

#[test]
fn config_set_rejects_bad_date_format() {
    let sandbox = TempDir::new().unwrap();
    init(&sandbox);

    tally(&sandbox)
        .args(["config", "set", "date-format", "%Q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}
