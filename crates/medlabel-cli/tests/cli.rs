use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PARACETAMOL: &str = "PARACETAMOL 500MG\nBatch No: AB1234\nMFG: 01/2023\nEXP: 01/2025\n";

fn medlabel(dir: &TempDir) -> Command {
    let config = dir.path().join("config.json");
    if !config.exists() {
        fs::write(&config, "{}").unwrap();
    }

    let mut cmd = Command::cargo_bin("medlabel").unwrap();
    cmd.arg("--config").arg(&config);
    cmd
}

#[test]
fn extract_json_from_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("label.txt");
    fs::write(&input, PARACETAMOL).unwrap();

    medlabel(&dir)
        .args(["extract", "--today", "2024-06-01"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""expiryDate": "2025-01-01""#))
        .stdout(predicate::str::contains(r#""batchNumber": "AB1234""#))
        .stdout(predicate::str::contains(r#""medicineName": "PARACETAMOL 500MG""#))
        .stdout(predicate::str::contains("manufactureDate\"").count(1))
        .stdout(predicate::str::contains(r#""status": "valid""#));
}

#[test]
fn extract_from_stdin_as_text() {
    let dir = TempDir::new().unwrap();

    medlabel(&dir)
        .args(["extract", "-", "--format", "text", "--today", "2025-04-01"])
        .write_stdin("Exp: 03/04/2025\nCrocin")
        .assert()
        .success()
        .stdout(predicate::str::contains("Medicine:     Crocin"))
        .stdout(predicate::str::contains("Expires:      2025-04-03"))
        .stdout(predicate::str::contains("expires in 2 day(s)"));
}

#[test]
fn extract_fail_on_expired() {
    let dir = TempDir::new().unwrap();

    medlabel(&dir)
        .args(["extract", "-", "--fail-on-expired", "--today", "2026-01-01"])
        .write_stdin(PARACETAMOL)
        .assert()
        .failure()
        .stderr(predicate::str::contains("expired 365 day(s) ago"));
}

#[test]
fn extract_missing_file() {
    let dir = TempDir::new().unwrap();

    medlabel(&dir)
        .args(["extract", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_writes_reports_and_summary() {
    let dir = TempDir::new().unwrap();
    let scans = dir.path().join("scans");
    let out = dir.path().join("out");
    fs::create_dir_all(&scans).unwrap();
    fs::write(scans.join("a.txt"), PARACETAMOL).unwrap();
    fs::write(scans.join("b.txt"), "Exp: 03/04/2025\nCrocin").unwrap();
    fs::write(scans.join("empty.txt"), "   ").unwrap();
    fs::write(scans.join("garbled.txt"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();
    fs::write(scans.join("ignored.md"), PARACETAMOL).unwrap();

    medlabel(&dir)
        .arg("batch")
        .arg(format!("{}/*", scans.display()))
        .arg("--output-dir")
        .arg(&out)
        .args(["--summary", "--continue-on-error", "--today", "2025-02-01"])
        .assert()
        .success()
        .stderr(predicate::str::contains("3 successful, 1 failed, 1 expired"));

    let a = fs::read_to_string(out.join("a.json")).unwrap();
    assert!(a.contains(r#""batchNumber": "AB1234""#));
    assert!(out.join("b.json").exists());
    let empty = fs::read_to_string(out.join("empty.json")).unwrap();
    assert!(empty.contains("missingFields"));
    assert!(!empty.contains("expiryDate\": \""));
    assert!(!out.join("ignored.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,medicine_name"));
    assert!(summary.contains("a.txt,success,PARACETAMOL 500MG,AB1234,,2025-01-01,"));
    assert!(summary.contains("empty.txt,success,,,,,,"));
    assert!(summary.contains("garbled.txt,error"));
}

#[test]
fn batch_stops_on_error_by_default() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("garbled.txt"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();

    medlabel(&dir)
        .arg("batch")
        .arg(format!("{}/*.txt", dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn batch_accepts_empty_transcript() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    fs::write(dir.path().join("empty.txt"), "").unwrap();

    medlabel(&dir)
        .arg("batch")
        .arg(format!("{}/*.txt", dir.path().display()))
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("1 successful, 0 failed, 0 expired"));

    let report = fs::read_to_string(out.join("empty.json")).unwrap();
    assert!(report.contains(r#""medicineName""#));
    assert!(!report.contains(r#""medicineName": ""#));
}

#[test]
fn config_set_and_get() {
    let dir = TempDir::new().unwrap();

    medlabel(&dir)
        .args(["config", "set", "expiry.warning_days", "90"])
        .assert()
        .success();

    medlabel(&dir)
        .args(["config", "get", "expiry.warning_days"])
        .assert()
        .success()
        .stdout(predicate::str::diff("90\n"));

    medlabel(&dir)
        .args(["config", "set", "expiry.warning_days", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value"));

    medlabel(&dir)
        .args(["config", "get", "extraction.nope"])
        .assert()
        .failure();
}
