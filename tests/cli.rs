use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `kiosk` command isolated in its own data directory
fn kiosk(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("kiosk").unwrap();
    cmd.env("KIOSK_DATA_DIR", dir)
        .env_remove("KIOSK_USER")
        .env_remove("KIOSK_PASSWORD")
        .env_remove("KIOSK_PIN")
        .env_remove("KIOSK_NEW_PASSWORD")
        .env_remove("KIOSK_LOG");
    cmd
}

/// A `kiosk` command logged in as the seeded administrator
fn as_admin(dir: &Path) -> Command {
    let mut cmd = kiosk(dir);
    cmd.env("KIOSK_USER", "admin").env("KIOSK_PASSWORD", "admin123");
    cmd
}

fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    kiosk(dir.path()).arg("init").assert().success();
    dir
}

#[test]
fn init_seeds_data_once() {
    let dir = TempDir::new().unwrap();

    kiosk(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"))
        .stdout(predicate::str::contains("admin / admin123"))
        .stdout(predicate::str::contains("$1000"));

    assert!(dir.path().join("data").join("inventory.json").exists());

    kiosk(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"));
}

#[test]
fn first_command_initializes_automatically() {
    let dir = TempDir::new().unwrap();

    as_admin(dir.path())
        .args(["product", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("First run"))
        .stdout(predicate::str::contains("Wireless Mouse"))
        .stdout(predicate::str::contains("3 product(s)"));
}

#[test]
fn wrong_password_is_rejected() {
    let dir = initialized();

    kiosk(dir.path())
        .args(["--user", "admin", "--password", "letmein", "product", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password"));
}

#[test]
fn product_add_and_show() {
    let dir = initialized();

    as_admin(dir.path())
        .args([
            "product", "add", "USB-C Hub", "-c", "Accessories", "-p", "19.99", "-q", "12", "-m", "5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added product: USB-C Hub"))
        .stdout(predicate::str::contains("ID: P0004"));

    as_admin(dir.path())
        .args(["product", "show", "usb-c hub"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Price:       $19.99"))
        .stdout(predicate::str::contains("Quantity:    12"));

    as_admin(dir.path())
        .args(["product", "add", "usb-c HUB", "-c", "Accessories", "-p", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn removing_more_stock_than_on_hand_fails() {
    let dir = initialized();

    as_admin(dir.path())
        .args(["stock", "remove", "P0002", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not enough stock"));

    as_admin(dir.path())
        .args(["product", "show", "P0002"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quantity:    42"));
}

#[test]
fn stock_movements_show_in_activity() {
    let dir = initialized();

    as_admin(dir.path())
        .args(["stock", "add", "P0003", "10", "-n", "restock"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 10 unit(s) to Monitor Stand: 8 -> 18"));

    as_admin(dir.path())
        .args(["stock", "remove", "P0003", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("18 -> 13"))
        .stdout(predicate::str::contains("Warning: Monitor Stand"));

    as_admin(dir.path())
        .args(["report", "activity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monitor Stand"))
        .stdout(predicate::str::contains("restock"));
}

#[test]
fn staff_cannot_delete_products() {
    let dir = initialized();

    as_admin(dir.path())
        .args(["user", "add", "clerk", "--new-password", "secret1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created user: clerk"));

    kiosk(dir.path())
        .env("KIOSK_USER", "clerk")
        .env("KIOSK_PASSWORD", "secret1")
        .args(["product", "delete", "P0001", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Permission denied"));

    as_admin(dir.path())
        .args(["product", "delete", "P0001", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted product: Premium Laptop"));
}

#[test]
fn report_summary_totals() {
    let dir = initialized();

    as_admin(dir.path())
        .args(["report", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inventory Summary"))
        .stdout(predicate::str::contains("Total Products:   3"))
        .stdout(predicate::str::contains("Total Units:      65"));
}

#[test]
fn json_export_omits_password_hashes() {
    let dir = initialized();
    let output = dir.path().join("export.json");

    as_admin(dir.path())
        .args(["export", "json", "--pretty"])
        .arg(&output)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(value["metadata"]["product_count"], 3);
    assert_eq!(value["users"][0]["username"], "admin");
    assert!(!contents.contains("password_hash"));
    assert!(!contents.contains("argon2"));
}

#[test]
fn atm_withdrawal_rules() {
    let dir = initialized();

    kiosk(dir.path())
        .args(["atm", "withdraw", "150", "--pin", "1234"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("multiples of $100"));

    kiosk(dir.path())
        .args(["atm", "withdraw", "900", "--pin", "1234"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Insufficient funds"));

    kiosk(dir.path())
        .args(["atm", "withdraw", "200", "--pin", "1234"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New Balance: $800"));

    kiosk(dir.path())
        .env("KIOSK_PIN", "1234")
        .args(["atm", "balance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current Balance: $800"));
}

#[test]
fn atm_wrong_pin_is_rejected() {
    let dir = initialized();

    kiosk(dir.path())
        .args(["atm", "deposit", "50", "--pin", "9999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incorrect PIN"));
}

#[test]
fn atm_statement_lists_recent_events() {
    let dir = initialized();

    kiosk(dir.path())
        .args(["atm", "deposit", "50", "--pin", "1234"])
        .assert()
        .success();

    kiosk(dir.path())
        .args(["atm", "statement", "--pin", "1234"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Last 5 Transactions"))
        .stdout(predicate::str::contains("Current Balance: $1050"));
}

#[test]
fn atm_session_over_stdin() {
    let dir = initialized();

    kiosk(dir.path())
        .args(["atm", "session"])
        .write_stdin("1234\nb\nw\n200\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current Balance: $1000"))
        .stdout(predicate::str::contains("New balance: $800"));

    kiosk(dir.path())
        .args(["atm", "session"])
        .write_stdin("0000\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Incorrect PIN"));
}

#[test]
fn oversized_or_malformed_amounts_are_rejected() {
    let dir = initialized();

    kiosk(dir.path())
        .args(["atm", "deposit", "99999999999999999", "--pin", "1234"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount is too large"));

    kiosk(dir.path())
        .args(["atm", "deposit", "1.€", "--pin", "1234"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));

    kiosk(dir.path())
        .args(["atm", "balance", "--pin", "1234"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current Balance: $1000"));

    as_admin(dir.path())
        .args(["product", "add", "Cable", "-c", "Accessories", "-p", "10.999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid price format"));

    as_admin(dir.path())
        .args([
            "product", "add", "Vault", "-c", "Safes", "-p", "90000000000000000", "-q", "2",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount is too large"));
}
