//! Integration tests for the `studyrooms` CLI binary.
//!
//! Most cases run without a server; the last few point the binary at a
//! wiremock server with a pre-seeded session file.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `studyrooms` binary with env isolation.
///
/// Clears all `STUDYROOMS_*` env vars and points config and data
/// directories at `home` so tests never touch the user's real files.
fn studyrooms_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("studyrooms");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("STUDYROOMS_PROFILE")
        .env_remove("STUDYROOMS_SERVER")
        .env_remove("STUDYROOMS_SESSION_FILE")
        .env_remove("STUDYROOMS_OUTPUT")
        .env_remove("STUDYROOMS_INSECURE")
        .env_remove("STUDYROOMS_TIMEOUT")
        .env_remove("STUDYROOMS_USERNAME")
        .env_remove("STUDYROOMS_PASSWORD");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Write `config.toml` where the binary looks for it under `home`.
fn write_config(home: &Path, contents: &str) -> std::path::PathBuf {
    let dir = home.join("config").join("studyrooms");
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("config.toml");
    std::fs::write(&file, contents).unwrap();
    file
}

/// Write a session token file and return its path.
fn seed_session(home: &Path) -> std::path::PathBuf {
    let token = home.join("session.token");
    std::fs::write(&token, "test-token\n").unwrap();
    token
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = studyrooms_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn help_lists_command_groups() {
    let home = tempfile::tempdir().unwrap();
    studyrooms_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("spaces")
                .and(predicate::str::contains("reservations"))
                .and(predicate::str::contains("staff"))
                .and(predicate::str::contains("login")),
        );
}

#[test]
fn version_flag() {
    let home = tempfile::tempdir().unwrap();
    studyrooms_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("studyrooms"));
}

#[test]
fn completions_zsh() {
    let home = tempfile::tempdir().unwrap();
    studyrooms_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn spaces_list_without_server() {
    let home = tempfile::tempdir().unwrap();
    studyrooms_cmd(home.path())
        .args(["spaces", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No server configured"));
}

#[test]
fn unknown_profile_is_reported() {
    let home = tempfile::tempdir().unwrap();
    studyrooms_cmd(home.path())
        .args(["--profile", "campus", "spaces", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile 'campus' not found"));
}

#[test]
fn not_signed_in_exits_with_auth_code() {
    let home = tempfile::tempdir().unwrap();
    let session = home.path().join("missing.token");
    studyrooms_cmd(home.path())
        .args(["--server", "http://127.0.0.1:9", "--session-file"])
        .arg(&session)
        .args(["reservations", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Please authenticate first"));
}

#[test]
fn incomplete_occupancy_query_is_a_usage_error() {
    let home = tempfile::tempdir().unwrap();
    let session = seed_session(home.path());
    studyrooms_cmd(home.path())
        .args(["--server", "http://127.0.0.1:9", "--session-file"])
        .arg(&session)
        .args(["stats", "occupancy", "--from", "2026-10-01"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Select a space and a date range."));
}

#[test]
fn config_show_without_config() {
    let home = tempfile::tempdir().unwrap();
    studyrooms_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn malformed_config_is_reported_not_overwritten() {
    let home = tempfile::tempdir().unwrap();
    let broken = "[profiles.default\nserver = ";
    let file = write_config(home.path(), broken);

    for args in [
        &["config", "set", "timeout", "5"][..],
        &["config", "use", "default"][..],
        &["config", "init"][..],
    ] {
        studyrooms_cmd(home.path())
            .args(args)
            .write_stdin("")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Configuration error"));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), broken);
    }
}

// ── Against a mock server ───────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn incomplete_occupancy_query_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let session = home.path().join("no-session.token");
    studyrooms_cmd(home.path())
        .env("STUDYROOMS_USERNAME", "student1")
        .env("STUDYROOMS_PASSWORD", "pw")
        .args(["--server", &server.uri(), "--session-file"])
        .arg(&session)
        .args(["stats", "occupancy", "--space", "1", "--from", "2026-10-01"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Select a space and a date range."));
    assert!(!session.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn spaces_list_uses_stored_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/spaces"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Library Room A", "capacity": 20,
              "openTime": "08:00:00", "closeTime": "20:00:00" },
            { "id": 2, "name": "24h Lab", "capacity": 8, "fullDay": true }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let session = seed_session(home.path());
    studyrooms_cmd(home.path())
        .args(["--server", &server.uri(), "--session-file"])
        .arg(&session)
        .args(["-o", "plain", "spaces", "list"])
        .assert()
        .success()
        .stdout("1\n2\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn config_defaults_choose_output_format() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/spaces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 7, "name": "Quiet Room", "capacity": 4, "fullDay": true }
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    write_config(home.path(), "[defaults]\noutput = \"plain\"\ncolor = \"never\"\n");
    let session = seed_session(home.path());
    studyrooms_cmd(home.path())
        .args(["--server", &server.uri(), "--session-file"])
        .arg(&session)
        .args(["spaces", "list"])
        .assert()
        .success()
        .stdout("7\n");

    // An explicit flag still wins over the file.
    studyrooms_cmd(home.path())
        .args(["--server", &server.uri(), "--session-file"])
        .arg(&session)
        .args(["-o", "json-compact", "spaces", "list"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[{"));
}

#[tokio::test(flavor = "multi_thread")]
async fn cancel_succeeds_even_if_reload_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reservations/my"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 5, "studySpace": { "id": 1, "name": "Library Room A" },
            "date": "2026-10-20", "startTime": "10:00:00", "endTime": "12:00:00",
            "status": "CONFIRMED"
        }])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/reservations/my"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "db down" })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/reservations/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let session = seed_session(home.path());
    studyrooms_cmd(home.path())
        .args(["--server", &server.uri(), "--session-file"])
        .arg(&session)
        .args(["--yes", "reservations", "cancel", "5"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Reservation #5 cancelled"))
        .stderr(predicate::str::contains("Could not reload the list: db down"));
}

#[tokio::test(flavor = "multi_thread")]
async fn expired_token_is_removed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reservations/my"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Token expired" })))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let session = seed_session(home.path());
    studyrooms_cmd(home.path())
        .args(["--server", &server.uri(), "--session-file"])
        .arg(&session)
        .args(["reservations", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Token expired"));
    assert!(!session.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn cancel_without_yes_is_refused_off_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reservations/my"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 5, "studySpace": { "id": 1, "name": "Library Room A" },
            "date": "2026-10-20", "startTime": "10:00:00", "endTime": "12:00:00",
            "status": "CONFIRMED"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let session = seed_session(home.path());
    studyrooms_cmd(home.path())
        .args(["--server", &server.uri(), "--session-file"])
        .arg(&session)
        .args(["reservations", "cancel", "5"])
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("requires confirmation"));
}
