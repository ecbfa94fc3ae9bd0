use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const QUOTATION: &str = "見積書\n株式会社ABC\n令和5年4月1日\n合計 98,000円\n";

fn denpyo(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("denpyo").unwrap();
    cmd.env_remove("MY_COMPANY_NAME")
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home);
    cmd
}

fn write_quotation(dir: &Path, name: &str) {
    fs::write(dir.join(name), QUOTATION).unwrap();
}

#[test]
fn extract_prints_record_and_file_name() {
    let dir = TempDir::new().unwrap();
    write_quotation(dir.path(), "scan.txt");

    denpyo(dir.path())
        .arg("extract")
        .arg(dir.path().join("scan.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"counterparty_name\":\"ABC\""))
        .stdout(predicate::str::contains("\"total_amount\":\"98,000\""))
        .stdout(predicate::str::contains("\"file_name\":\"見積書_ABC_230401.txt\""));
}

#[test]
fn extract_applies_overrides() {
    let dir = TempDir::new().unwrap();
    write_quotation(dir.path(), "scan.txt");

    denpyo(dir.path())
        .arg("extract")
        .arg(dir.path().join("scan.txt"))
        .args(["--counterparty", "DEF", "--issue-date", "240101"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"file_name\":\"見積書_DEF_240101.txt\""));
}

#[test]
fn extract_rejects_invalid_override() {
    let dir = TempDir::new().unwrap();
    write_quotation(dir.path(), "scan.txt");

    denpyo(dir.path())
        .arg("extract")
        .arg(dir.path().join("scan.txt"))
        .args(["--issue-date", "2024-01-01"])
        .assert()
        .failure();
}

#[test]
fn extract_excludes_self_company_from_env() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("invoice.txt"),
        "請求書\nABC株式会社\nXYZ株式会社 御中\n2024/02/29\n合計 55,000円\n",
    )
    .unwrap();

    denpyo(dir.path())
        .env("MY_COMPANY_NAME", "ABC株式会社")
        .arg("extract")
        .arg(dir.path().join("invoice.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"file_name\":\"請求書_XYZ_240229.txt\""));
}

#[test]
fn extract_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    denpyo(dir.path())
        .arg("extract")
        .arg(dir.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn rename_copies_into_output_dir() {
    let dir = TempDir::new().unwrap();
    let inbox = dir.path().join("inbox");
    let out = dir.path().join("out");
    fs::create_dir_all(&inbox).unwrap();
    write_quotation(&inbox, "scan.txt");

    let pattern = format!("{}/*.txt", inbox.display());
    denpyo(dir.path())
        .args(["rename", &pattern, "--output-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("scan.txt -> 見積書_ABC_230401.txt"));

    assert!(out.join("見積書_ABC_230401.txt").exists());
    assert!(inbox.join("scan.txt").exists());
}

#[test]
fn rename_replaces_path_separators_in_names() {
    let dir = TempDir::new().unwrap();
    let inbox = dir.path().join("inbox");
    let out = dir.path().join("out");
    fs::create_dir_all(&inbox).unwrap();
    fs::write(
        inbox.join("a.txt"),
        "請求書\n株式会社Ａ／Ｂ商事\n2024/1/5\n",
    )
    .unwrap();
    write_quotation(&inbox, "b.txt");

    let pattern = format!("{}/*.txt", inbox.display());
    denpyo(dir.path())
        .args(["rename", &pattern, "--continue-on-error", "--output-dir"])
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("請求書_Ａ／Ｂ商事_240105.txt").exists());
    assert!(out.join("見積書_ABC_230401.txt").exists());
}

#[test]
fn rename_does_not_overwrite_within_one_run() {
    let dir = TempDir::new().unwrap();
    let inbox = dir.path().join("inbox");
    let out = dir.path().join("out");
    fs::create_dir_all(&inbox).unwrap();
    write_quotation(&inbox, "a.txt");
    fs::write(inbox.join("b.txt"), format!("{QUOTATION}控え\n")).unwrap();

    let pattern = format!("{}/*.txt", inbox.display());
    denpyo(dir.path())
        .args(["rename", &pattern, "--force", "--continue-on-error", "--output-dir"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("already written by another document"));

    assert_eq!(
        fs::read_to_string(out.join("見積書_ABC_230401.txt")).unwrap(),
        QUOTATION
    );
}

#[test]
fn rename_stops_on_copy_failure_without_continue_flag() {
    let dir = TempDir::new().unwrap();
    let inbox = dir.path().join("inbox");
    let out = dir.path().join("out");
    fs::create_dir_all(&inbox).unwrap();
    fs::create_dir_all(&out).unwrap();
    write_quotation(&inbox, "a.txt");
    fs::write(out.join("見積書_ABC_230401.txt"), "kept").unwrap();

    let pattern = format!("{}/*.txt", inbox.display());
    denpyo(dir.path())
        .args(["rename", &pattern, "--output-dir"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(
        fs::read_to_string(out.join("見積書_ABC_230401.txt")).unwrap(),
        "kept"
    );
}

#[test]
fn rename_without_output_dir_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write_quotation(dir.path(), "scan.txt");

    let pattern = format!("{}/*.txt", dir.path().display());
    denpyo(dir.path())
        .args(["rename", &pattern])
        .assert()
        .success()
        .stdout(predicate::str::contains("見積書_ABC_230401.txt"));

    assert!(!dir.path().join("見積書_ABC_230401.txt").exists());
}

#[test]
fn config_init_then_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    denpyo(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "init", "--self-company", "ABC株式会社"])
        .assert()
        .success();

    denpyo(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "extraction.self_company_name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ABC株式会社"));
}
