//! End-to-end tests for the recruit binary
//!
//! These tests run the real binary against a mock tracking service:
//! - Import with vacancy/status lookup and résumé upload
//! - Row-local warnings
//! - Checkpoint flushing on transport failure
//! - Dry run, status, reset and preview

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::{
    matchers::{body_partial_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const SHEET: &str = "\
vacancy,name,money,comment,status
Dev ,Ivanov Ivan,120 000,ok, New Lead
QA,Petrov Petr Petrovich,90000,,Unknown Stage
,,,,
";

/// Helper to write the spreadsheet and a résumé for the first candidate
fn create_database(dir: &TempDir) -> PathBuf {
    let database = dir.path().join("candidates.csv");
    fs::write(&database, SHEET).expect("Failed to write database");

    fs::create_dir_all(dir.path().join("Dev")).expect("Failed to create vacancy dir");
    fs::write(dir.path().join("Dev").join("Ivanov Ivan.pdf"), b"%PDF-1.4")
        .expect("Failed to write resume");

    database
}

fn read_checkpoint(dir: &Path) -> String {
    fs::read_to_string(dir.join("status")).expect("Failed to read checkpoint")
}

/// Mount the dictionaries every import fetches first
async fn mount_dictionaries(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{ "id": 7, "name": "Acme" }]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/account/7/vacancies"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{ "id": 11, "position": "Dev" }, { "id": 12, "position": "QA" }],
            "pages": 1
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/account/7/vacancy/statuses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{ "id": 21, "name": "New Lead" }, { "id": 22, "name": "Declined" }]
        })))
        .mount(server)
        .await;
}

fn import_cmd(dir: &TempDir, database: &Path, server: &MockServer) -> Command {
    let mut cmd = Command::cargo_bin("recruit").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RECRUIT_API_TOKEN")
        .env("LOG_LEVEL", "warn")
        .arg("import")
        .arg(database)
        .arg("--token")
        .arg("test-token")
        .arg("--api-url")
        .arg(server.uri());
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn test_import_full_run() {
    let server = MockServer::start().await;
    mount_dictionaries(&server).await;

    Mock::given(method("POST"))
        .and(path("/account/7/upload"))
        .and(header("x-file-parse", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 31,
            "name": "Ivanov Ivan.pdf",
            "text": "Ivanov Ivan, developer",
            "fields": { "email": "ivan@example.com", "phones": ["+7 900 000 00 00"] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/account/7/applicants"))
        .and(body_partial_json(serde_json::json!({
            "last_name": "Ivanov",
            "first_name": "Ivan",
            "money": "120000 руб",
            "email": "ivan@example.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": 101 })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/account/7/applicants"))
        .and(body_partial_json(serde_json::json!({
            "last_name": "Petrov",
            "first_name": "Petr",
            "middle_name": "Petrovich"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": 102 })))
        .expect(1)
        .mount(&server)
        .await;

    // Only the first candidate has both a known vacancy and a known status;
    // the padding around "Dev " and " New Lead" does not get in the way
    Mock::given(method("POST"))
        .and(path("/account/7/applicants/101/vacancy"))
        .and(body_partial_json(serde_json::json!({
            "vacancy": 11,
            "status": 21,
            "comment": "ok",
            "files": [{ "id": 31 }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/account/7/applicants/102/vacancy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": 2 })))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let database = create_database(&dir);

    import_cmd(&dir, &database, &server)
        .assert()
        .success()
        .stdout(predicate::str::contains("Import finished"))
        .stdout(predicate::str::contains("Submitted: 2"))
        .stdout(predicate::str::contains("Warnings:  2"));

    assert_eq!(read_checkpoint(dir.path()), "3");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_import_failure_keeps_failed_row() {
    let server = MockServer::start().await;
    mount_dictionaries(&server).await;

    Mock::given(method("POST"))
        .and(path("/account/7/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": 31 })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/account/7/applicants"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let database = create_database(&dir);

    import_cmd(&dir, &database, &server)
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 500"))
        .stderr(predicate::str::contains("row 1"));

    assert_eq!(read_checkpoint(dir.path()), "1");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_import_unknown_account() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let database = create_database(&dir);

    import_cmd(&dir, &database, &server)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Account #0 not available"));

    assert!(!dir.path().join("status").exists());
}

#[test]
fn test_import_requires_token() {
    let dir = TempDir::new().unwrap();
    let database = create_database(&dir);

    let mut cmd = Command::cargo_bin("recruit").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RECRUIT_API_TOKEN")
        .arg("import")
        .arg(&database);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("API token missing"));
}

#[test]
fn test_dry_run_leaves_checkpoint_alone() {
    let dir = TempDir::new().unwrap();
    let database = create_database(&dir);

    let mut cmd = Command::cargo_bin("recruit").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RECRUIT_API_TOKEN")
        .arg("import")
        .arg(&database)
        .arg("--dry-run")
        .arg("--api-url")
        .arg("http://127.0.0.1:9");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Dry run finished"))
        .stdout(predicate::str::contains("Submitted: 2"));

    assert!(!dir.path().join("status").exists());
}

#[test]
fn test_dry_run_keeps_existing_checkpoint() {
    let dir = TempDir::new().unwrap();
    let database = create_database(&dir);
    fs::write(dir.path().join("status"), "2").unwrap();

    let mut cmd = Command::cargo_bin("recruit").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RECRUIT_API_TOKEN")
        .arg("import")
        .arg(&database)
        .arg("--dry-run");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Submitted: 1"));

    assert_eq!(read_checkpoint(dir.path()), "2");
}

#[test]
fn test_status_and_reset() {
    let dir = TempDir::new().unwrap();
    let database = create_database(&dir);

    Command::cargo_bin("recruit")
        .unwrap()
        .arg("status")
        .arg(&database)
        .assert()
        .success()
        .stdout(predicate::str::contains("Next row: 1"));

    Command::cargo_bin("recruit")
        .unwrap()
        .arg("reset")
        .arg(&database)
        .arg("--row")
        .arg("2")
        .assert()
        .success();

    Command::cargo_bin("recruit")
        .unwrap()
        .arg("status")
        .arg(&database)
        .assert()
        .success()
        .stdout(predicate::str::contains("Next row: 2"));
}

#[test]
fn test_preview_prints_records_from_checkpoint() {
    let dir = TempDir::new().unwrap();
    let database = create_database(&dir);
    fs::write(dir.path().join("status"), "2").unwrap();

    Command::cargo_bin("recruit")
        .unwrap()
        .arg("preview")
        .arg(&database)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""row":2"#))
        .stdout(predicate::str::contains(r#""middle_name":"Petrovich""#))
        .stdout(predicate::str::contains("Ivanov").not());

    assert_eq!(read_checkpoint(dir.path()), "2");
}

#[test]
fn test_corrupt_checkpoint_is_reported() {
    let dir = TempDir::new().unwrap();
    let database = create_database(&dir);
    fs::write(dir.path().join("status"), "abc").unwrap();

    Command::cargo_bin("recruit")
        .unwrap()
        .arg("status")
        .arg(&database)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid checkpoint"));
}
