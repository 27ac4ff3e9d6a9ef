use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const EXPORT: &str = r#"[
    ["A", "B", "C"],
    [1, 2, 3],
    [1748854800, 1748855700, 1748856600],
    [[1, 2], [1, 2, 3], [1, 2]]
]"#;

const HEADER: &str = "timestamp,start,end,length,people\r\n";

fn poll(dir: &TempDir) -> String {
    let path = dir.path().join("poll.json");
    fs::write(&path, EXPORT).unwrap();
    path.display().to_string()
}

fn zeitfenster() -> Command {
    Command::cargo_bin("zeitfenster").unwrap()
}

#[test]
fn test_window_with_minimum_people() {
    let dir = TempDir::new().unwrap();

    zeitfenster()
        .args([poll(&dir).as_str(), "0:30", "--people", "2", "--utc"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}<t:1748854800:F>,Mon Jun  2 09:00:00 2025,Mon Jun  2 09:45:00 2025,0:45,\"2 (A, B)\"\r\n",
            HEADER
        )));
}

#[test]
fn test_defaults_to_everyone() {
    let dir = TempDir::new().unwrap();

    zeitfenster()
        .args([poll(&dir).as_str(), "0:15", "--utc"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}<t:1748855700:F>,Mon Jun  2 09:15:00 2025,Mon Jun  2 09:30:00 2025,0:15,\"3 (A, B, C)\"\r\n",
            HEADER
        )));
}

#[test]
fn test_zero_people_is_no_minimum() {
    let dir = TempDir::new().unwrap();

    zeitfenster()
        .args([poll(&dir).as_str(), "0:15", "--people", "0", "--utc"])
        .assert()
        .success()
        .stdout(predicate::str::contains(",0:45,\"2 (A, B)\"\r\n"))
        .stdout(predicate::str::contains(",0:15,\"3 (A, B, C)\"\r\n"));
}

#[test]
fn test_help_explains_zero_people() {
    zeitfenster()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("An explicit 0 means no minimum"));
}

#[test]
fn test_blank_category_line_is_rejected() {
    let dir = TempDir::new().unwrap();
    let categories = dir.path().join("categories.tsv");
    fs::write(&categories, "A\tStaff\n\nB\tGuest\n").unwrap();

    zeitfenster()
        .args([poll(&dir).as_str(), "0:30", "-c"])
        .arg(&categories)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_no_windows_prints_header() {
    let dir = TempDir::new().unwrap();

    zeitfenster()
        .args([poll(&dir).as_str(), "1:00", "--utc"])
        .assert()
        .success()
        .stdout(HEADER);
}

#[test]
fn test_category_columns() {
    let dir = TempDir::new().unwrap();
    let categories = dir.path().join("categories.tsv");
    fs::write(&categories, "A\tStaff \nD\tGuest\n").unwrap();

    zeitfenster()
        .args([poll(&dir).as_str(), "0:30", "-p", "2", "--utc", "-c"])
        .arg(&categories)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "timestamp,start,end,length,people,Staff\r\n",
        ))
        .stdout(predicate::str::ends_with(",0:45,2,1 (A)\r\n"))
        .stdout(predicate::str::contains("Guest").not());
}

#[test]
fn test_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("windows.csv");

    zeitfenster()
        .args([poll(&dir).as_str(), "0:30", "-p", "2", "--utc", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.starts_with(HEADER));
    assert_eq!(written.lines().count(), 2);
}

#[test]
fn test_longer_slots_join_up() {
    let dir = TempDir::new().unwrap();

    // Every other slot lines up when slots are 30 minutes long
    zeitfenster()
        .args([poll(&dir).as_str(), "0:30", "-p", "2", "--utc", "-s", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains(",1:00,\"2 (A, B)\"\r\n"))
        .stdout(predicate::str::contains(",0:30,\"3 (A, B, C)\"\r\n"));
}

#[test]
fn test_rejects_malformed_mintime() {
    let dir = TempDir::new().unwrap();

    zeitfenster()
        .args([poll(&dir).as_str(), "90"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Expected H:MM"));
}

#[test]
fn test_rejects_zero_slot_length() {
    let dir = TempDir::new().unwrap();

    zeitfenster()
        .args([poll(&dir).as_str(), "0:30", "--slot-minutes", "0"])
        .assert()
        .failure();
}

#[test]
fn test_rejects_category_line_without_tab() {
    let dir = TempDir::new().unwrap();
    let categories = dir.path().join("categories.tsv");
    fs::write(&categories, "A\tStaff\nB Guest\n").unwrap();

    zeitfenster()
        .args([poll(&dir).as_str(), "0:30", "-c"])
        .arg(&categories)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_rejects_missing_datafile() {
    let dir = TempDir::new().unwrap();

    zeitfenster()
        .arg(dir.path().join("missing.json"))
        .arg("0:30")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open"));
}

#[test]
fn test_rejects_malformed_export() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("poll.json");
    fs::write(&path, r#"[["A"], [1, 2], [], []]"#).unwrap();

    zeitfenster()
        .arg(&path)
        .arg("0:30")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PeopleIDs"));
}
