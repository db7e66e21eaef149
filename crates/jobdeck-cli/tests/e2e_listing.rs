//! E2E tests for `jobdeck list` and `jobdeck config` against a mock backend.

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

/// A `jobdeck` invocation isolated from the user's config and environment.
fn jobdeck_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("jobdeck"));
    cmd.env("JOBDECK_LOG", "error");
    cmd.env("HOME", home.path());
    cmd.env("XDG_CONFIG_HOME", home.path().join(".config"));
    cmd.env_remove("JOBDECK_API_URL");
    cmd.env_remove("JOBDECK_PAGE_SIZE");
    cmd.env_remove("FORMAT");
    cmd
}

fn run_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command should not crash");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

#[test]
fn list_json_reports_page_and_query() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/jobs")
            .query_param("page", "1")
            .query_param("limit", "15")
            .query_param("sort", "posting_date_desc");
        then.status(200).json_body(json!({
            "jobs": [
                {"id": 1, "title": "Pricing Actuary", "company": "Acme Re"},
                {"id": 2, "title": "Data Analyst", "company": "Initech"}
            ],
            "total": 2
        }));
    });

    let out = run_json(
        jobdeck_cmd(&home).args(["--api-url", &server.base_url(), "list", "--json"]),
    );

    mock.assert();
    assert_eq!(out["total"], 2);
    assert_eq!(out["page"], 1);
    assert_eq!(out["last_page"], 1);
    assert_eq!(out["page_size"], 15);
    assert_eq!(out["jobs"].as_array().map(Vec::len), Some(2));
    assert_eq!(out["jobs"][0]["title"], "Pricing Actuary");
    assert_eq!(out["query"]["sort"], "posting_date_desc");
}

#[test]
fn list_sends_filters_as_query_parameters() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/jobs")
            .query_param("keyword", "actuary")
            .query_param("location", "USA,UK")
            .query_param("tag", "Remote")
            .query_param("job_type", "")
            .query_param("sort", "title_asc")
            .query_param("page", "2")
            .query_param("limit", "10");
        then.status(200)
            .json_body(json!({"jobs": [{"id": 11, "title": "Actuary II"}], "total": 11}));
    });

    let out = run_json(jobdeck_cmd(&home).args([
        "--api-url",
        &server.base_url(),
        "list",
        "actuary",
        "--country",
        "USA,UK",
        "--tag",
        "Remote",
        "--sort",
        "title_asc",
        "--page",
        "2",
        "--limit",
        "10",
        "--json",
    ]));

    mock.assert();
    assert_eq!(out["page"], 2);
    assert_eq!(out["last_page"], 2);
    assert_eq!(out["query"]["location"], "USA,UK");
}

#[test]
fn list_past_the_last_page_is_clamped() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start();
    let past_end = server.mock(|when, then| {
        when.method(GET).path("/api/jobs").query_param("page", "9");
        then.status(200).json_body(json!({"jobs": [], "total": 20}));
    });
    let last = server.mock(|when, then| {
        when.method(GET).path("/api/jobs").query_param("page", "2");
        then.status(200)
            .json_body(json!({"jobs": [{"id": 16}, {"id": 17}], "total": 20}));
    });

    let out = run_json(jobdeck_cmd(&home).args([
        "--api-url",
        &server.base_url(),
        "list",
        "--page",
        "9",
        "--json",
    ]));

    past_end.assert();
    last.assert();
    assert_eq!(out["page"], 2);
    assert_eq!(out["jobs"].as_array().map(Vec::len), Some(2));
}

#[test]
fn list_text_output_has_header_and_footer() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/jobs");
        then.status(200)
            .json_body(json!([{"id": 3, "title": "Quant", "company": "Hooli"}]));
    });

    jobdeck_cmd(&home)
        .args(["--api-url", &server.base_url(), "list", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ID  TITLE  COMPANY  COUNTRY  POSTED"))
        .stdout(predicate::str::contains("3  Quant  Hooli  -  -"))
        .stdout(predicate::str::contains("Page 1 of 1 (1 jobs)"));
}

#[test]
fn list_with_no_results_says_so() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/jobs");
        then.status(200).json_body(json!({"jobs": [], "total": 0}));
    });

    jobdeck_cmd(&home)
        .args(["--api-url", &server.base_url(), "list", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No jobs found."));
}

#[test]
fn list_server_error_exits_nonzero_with_code() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/jobs");
        then.status(500).json_body(json!({"error": "database is locked"}));
    });

    jobdeck_cmd(&home)
        .args(["--api-url", &server.base_url(), "list", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E4001"))
        .stderr(predicate::str::contains("database is locked"));
}

#[test]
fn list_unknown_sort_is_rejected_before_any_request() {
    let home = TempDir::new().unwrap();
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/jobs");
        then.status(200).json_body(json!([]));
    });

    jobdeck_cmd(&home)
        .args(["--api-url", &server.base_url(), "list", "--sort", "salary_desc"])
        .assert()
        .failure();
    mock.assert_hits(0);
}

#[test]
fn unreachable_backend_reports_transport_error() {
    let home = TempDir::new().unwrap();

    jobdeck_cmd(&home)
        .args(["--api-url", "http://127.0.0.1:1", "list", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E4002"));
}

#[test]
fn config_json_reflects_flag_and_environment() {
    let home = TempDir::new().unwrap();

    let out = run_json(
        jobdeck_cmd(&home)
            .env("JOBDECK_PAGE_SIZE", "25")
            .args(["--api-url", "http://jobs.internal:8080/", "config", "--json"]),
    );

    assert_eq!(out["api_url"], "http://jobs.internal:8080");
    assert_eq!(out["page_size"], 25);
    assert_eq!(out["resolved_output"], "json");
    assert_eq!(out["config_file"], Value::Null);
}

#[test]
fn config_file_values_are_used() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".config/jobdeck");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("config.toml"),
        "api_url = \"http://10.0.0.5:5000\"\npage_size = 30\ntimeout_secs = 4\n",
    )
    .unwrap();

    let out = run_json(jobdeck_cmd(&home).args(["config", "--json"]));

    assert_eq!(out["api_url"], "http://10.0.0.5:5000");
    assert_eq!(out["page_size"], 30);
    assert_eq!(out["timeout_secs"], 4);
    assert!(
        out["config_file"]
            .as_str()
            .is_some_and(|p| p.ends_with("jobdeck/config.toml"))
    );
}

#[test]
fn broken_config_file_fails_with_hint() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".config/jobdeck");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), "page_size = \"many\"\n").unwrap();

    jobdeck_cmd(&home)
        .args(["config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("jobdeck config --path"));
}

#[test]
fn non_http_api_url_is_rejected() {
    let home = TempDir::new().unwrap();

    jobdeck_cmd(&home)
        .args(["--api-url", "ftp://jobs.example", "config", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must use http or https"));
}

#[test]
fn config_path_points_into_config_dir() {
    let home = TempDir::new().unwrap();

    jobdeck_cmd(&home)
        .args(["config", "--path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jobdeck/config.toml"));
}
