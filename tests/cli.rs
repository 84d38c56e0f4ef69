use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn scrape_cmd() -> Command {
    let mut cmd = Command::cargo_bin("event-scrape").unwrap();
    cmd.env_remove("EVENT_SCRAPE_USER_AGENT")
        .env_remove("EVENT_SCRAPE_TIMEOUT_SECS");
    cmd
}

#[test]
fn extracts_from_saved_html_file() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("event.html");
    fs::write(
        &html_path,
        r#"<html><head><title>Spring Fair | Facebook</title></head>
        <body><span content="2024-05-01T19:00:00Z"></span></body></html>"#,
    )
    .unwrap();

    let output = scrape_cmd()
        .arg("--html")
        .arg(&html_path)
        .arg("https://www.facebook.com/events/42")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["eventName"], "Spring Fair");
    assert_eq!(value["date"], "2024-05-01");
    assert_eq!(value["time"], "19:00");
    assert_eq!(value["isFree"], true);
    assert!(value["price"].is_null());
    assert!(value["imageUrl"].is_null());
    assert_eq!(value.as_object().unwrap().len(), 9);
}

#[test]
fn invalid_url_reports_error_on_stdout() {
    scrape_cmd()
        .arg("not-a-url")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::starts_with("Error: Invalid URL format"));
}

#[test]
fn fetches_and_prints_indented_json() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/events/wine-walk");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(
                r#"<html><head><title>Wine Walk | Example</title></head><body>
                <p>Price: $45</p>
                <img src="/media/wine.jpg" width="800" height="600">
                </body></html>"#,
            );
    });

    let output = scrape_cmd()
        .arg(server.url("/events/wine-walk"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    mock.assert();
    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains("\n  \"eventName\": \"Wine Walk\""));
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["isFree"], false);
    assert_eq!(value["price"], "$45");
    assert_eq!(
        value["imageUrl"],
        format!("{}/media/wine.jpg", server.base_url())
    );
}

#[test]
fn non_success_status_fails_the_run() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/gone");
        then.status(404);
    });

    scrape_cmd()
        .arg(server.url("/gone"))
        .assert()
        .failure()
        .stdout(predicate::str::starts_with(
            "Error: Failed to fetch the event page",
        ))
        .stdout(predicate::str::contains("eventName").not());

    mock.assert();
}
