//! Integration tests for the `roost` CLI binary.
//!
//! Argument parsing, help output, completions and error handling run
//! without a service; the rest talk to a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `roost` binary with env isolation.
///
/// Clears all `ROOST_*` env vars and points config and data directories
/// into `home` so tests never touch the user's real files.
fn roost_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("roost");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("ROOST_CONFIG_FILE", home.join("config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("ROOST_PROFILE")
        .env_remove("ROOST_API_URL")
        .env_remove("ROOST_OUTPUT")
        .env_remove("ROOST_INSECURE")
        .env_remove("ROOST_TIMEOUT")
        .env_remove("ROOST_NO_CACHE");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// A URL nothing listens on.
fn closed_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/")
}

fn two_apartments() -> serde_json::Value {
    json!([
        { "id": "a1", "name": "Sunny studio", "rooms": 1, "price": 400, "description": "" },
        { "id": "b2", "name": "Garden flat", "rooms": 3, "price": 1250.5, "description": "Quiet street" },
    ])
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = TempDir::new().unwrap();
    let output = roost_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    roost_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("apartment")
            .and(predicate::str::contains("list"))
            .and(predicate::str::contains("add"))
            .and(predicate::str::contains("remove")),
    );
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    roost_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("roost"));
}

#[test]
fn test_invalid_subcommand() {
    let home = TempDir::new().unwrap();
    let output = roost_cmd(home.path()).arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    roost_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    let home = TempDir::new().unwrap();
    roost_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honours_override() {
    let home = TempDir::new().unwrap();
    roost_cmd(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_defaults_as_json() {
    let home = TempDir::new().unwrap();
    let output = roost_cmd(home.path())
        .args(["config", "show", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let shown: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown["default_profile"], "default");
    assert_eq!(shown["defaults"]["sort"], "asc");
}

#[test]
fn test_set_default_unknown_profile() {
    let home = TempDir::new().unwrap();
    roost_cmd(home.path())
        .args(["config", "set-default", "nowhere"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nowhere"));
}

#[test]
fn test_unknown_profile_flag() {
    let home = TempDir::new().unwrap();
    roost_cmd(home.path())
        .args(["--profile", "nowhere", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Profile 'nowhere' not found"));
}

// ── Local failures ──────────────────────────────────────────────────

#[test]
fn test_add_reports_every_invalid_field() {
    let home = TempDir::new().unwrap();
    roost_cmd(home.path())
        .args(["--api-url", closed_url().as_str()])
        .args(["add", "--name", "", "--rooms", "0", "--price", "-5"])
        .assert()
        .code(2)
        .stderr(
            predicate::str::contains("Apartment name cannot be empty")
                .and(predicate::str::contains("Number of rooms must be greater than 0"))
                .and(predicate::str::contains("Price must be greater than 0")),
        );
}

#[test]
fn test_remove_requires_yes_when_not_interactive() {
    let home = TempDir::new().unwrap();
    roost_cmd(home.path())
        .args(["--api-url", closed_url().as_str(), "remove", "a1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn test_edit_needs_a_field() {
    let home = TempDir::new().unwrap();
    roost_cmd(home.path())
        .args(["--api-url", closed_url().as_str(), "edit", "a1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nothing to change"));
}

#[test]
fn test_list_unreachable_without_cache() {
    let home = TempDir::new().unwrap();
    roost_cmd(home.path())
        .args(["--no-cache", "--api-url", closed_url().as_str(), "list"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Could not reach the apartment service"));
}

#[test]
fn test_list_unreachable_falls_back_to_cache() {
    let home = TempDir::new().unwrap();
    let cache = home.path().join("cache.json");
    std::fs::write(
        &cache,
        r#"[{"id":"c9","name":"Cached loft","rooms":2,"price":800,"description":""}]"#,
    )
    .unwrap();
    std::fs::write(
        home.path().join("config.toml"),
        format!(
            "default_profile = \"local\"\n\n[profiles.local]\napi_url = \"{}\"\ncache_file = \"{}\"\n",
            closed_url(),
            cache.display()
        ),
    )
    .unwrap();

    roost_cmd(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Available apartments (1)")
                .and(predicate::str::contains("Cached loft")),
        )
        .stderr(predicate::str::contains("warning"));
}

// ── Against a live mock service ─────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_list_renders_table_with_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apartments"))
        .and(query_param("priceSort", "desc"))
        .and(query_param("rooms", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_apartments()))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    roost_cmd(home.path())
        .args(["--no-cache", "--api-url", server.uri().as_str()])
        .args(["list", "--sort", "desc", "--rooms", "3"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Available apartments (2)")
                .and(predicate::str::contains("Sunny studio"))
                .and(predicate::str::contains("1250.50")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_plain_prints_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apartments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_apartments()))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    roost_cmd(home.path())
        .args(["--no-cache", "--api-url", server.uri().as_str(), "-o", "plain", "list"])
        .assert()
        .success()
        .stdout("a1\nb2\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_missing_apartment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apartments/zz"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "not found" })))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    roost_cmd(home.path())
        .args(["--no-cache", "--api-url", server.uri().as_str(), "show", "zz"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Apartment 'zz' not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_persists_to_cache() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apartments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "n1", "name": "Attic", "rooms": 1, "price": 350, "description": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let cache = home.path().join("apartments.json");
    std::fs::write(
        home.path().join("config.toml"),
        format!(
            "[profiles.default]\napi_url = \"{}\"\ncache_file = \"{}\"\n",
            server.uri(),
            cache.display()
        ),
    )
    .unwrap();

    roost_cmd(home.path())
        .args(["-o", "json", "add", "--name", "Attic", "--rooms", "1", "--price", "350"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": \"n1\""))
        .stderr(predicate::str::contains("created"));

    let saved: serde_json::Value = serde_json::from_slice(&std::fs::read(&cache).unwrap()).unwrap();
    assert_eq!(saved[0]["name"], "Attic");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_rejection_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/apartments"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "errors": ["name already taken"]
        })))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    roost_cmd(home.path())
        .args(["--no-cache", "--api-url", server.uri().as_str()])
        .args(["add", "--name", "Loft", "--rooms", "2", "--price", "900"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("name already taken"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_renders_detail_view() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apartments/b2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_apartments()[1].clone()))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    roost_cmd(home.path())
        .args(["--no-cache", "--api-url", server.uri().as_str(), "show", "b2"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Name:        Garden flat")
                .and(predicate::str::contains("Price:       1250.50"))
                .and(predicate::str::contains("Description: Quiet street")),
        );
}

/// Mount the listing that `edit` reads before changing anything.
async fn mount_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/apartments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_apartments()))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_edit_sends_merged_fields() {
    let server = MockServer::start().await;
    mount_listing(&server).await;
    Mock::given(method("PUT"))
        .and(path("/apartments/a1"))
        .and(body_json(json!({
            "name": "Sunny studio", "rooms": 1, "price": 999.0, "description": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "a1", "name": "Sunny studio", "rooms": 1, "price": 999, "description": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    roost_cmd(home.path())
        .args(["--no-cache", "--api-url", server.uri().as_str()])
        .args(["edit", "a1", "--price", "999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Price:       999"))
        .stderr(predicate::str::contains("Apartment 'a1' updated"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_edit_without_changes_skips_the_request() {
    let server = MockServer::start().await;
    mount_listing(&server).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    roost_cmd(home.path())
        .args(["--no-cache", "--api-url", server.uri().as_str()])
        .args(["edit", "a1", "--price", "400", "--name", "Sunny studio"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Nothing changed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remove_with_yes_deletes() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/apartments/a1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    roost_cmd(home.path())
        .args(["--no-cache", "--api-url", server.uri().as_str(), "remove", "a1", "--yes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Apartment 'a1' removed"));
}

// ── Broken config ───────────────────────────────────────────────────

#[test]
fn test_set_default_keeps_broken_config_untouched() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("config.toml");
    std::fs::write(&file, "default_profile = [not toml").unwrap();

    roost_cmd(home.path())
        .args(["config", "set-default", "default"])
        .assert()
        .failure();

    assert_eq!(
        std::fs::read_to_string(&file).unwrap(),
        "default_profile = [not toml"
    );
}
