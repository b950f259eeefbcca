//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("folio")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_cli_html_to_stdout() {
    cmd()
        .args(["-f", "html", "-o", "-", &get_fixture_path("sample_page.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("<title>Scraped Data Report: Field Notes: Urban Beekeeping</title>"))
        .stdout(predicate::str::contains("Links (5 found)"));
}

#[test]
fn test_cli_json_format() {
    let output = cmd()
        .args(["-f", "json", "-o", "-", &get_fixture_path("sample_page.html")])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["title"], "Field Notes: Urban Beekeeping");
    assert!(value["url"].as_str().unwrap().starts_with("file://"));
    assert!(value["url"].as_str().unwrap().ends_with("sample_page.html"));
    assert_eq!(value["summary"]["links"], 5);
}

#[test]
fn test_cli_url_override() {
    cmd()
        .args(["-f", "json", "-o", "-", "--url", "https://example.com/bees", &get_fixture_path("sample_page.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"url\": \"https://example.com/bees\""));
}

#[test]
fn test_cli_stdin_input() {
    let html = std::fs::read_to_string(get_fixture_path("sample_page.html")).unwrap();
    cmd()
        .args(["-f", "json", "-o", "-", "-"])
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("file:///dev/stdin"));
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("report.html");

    cmd()
        .args(["-f", "html", "-o", output.to_str().unwrap()])
        .arg(get_fixture_path("sample_page.html"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Report written to"));

    let html = std::fs::read_to_string(output).unwrap();
    assert!(html.contains("Urban Beekeeping"));
}

#[test]
fn test_cli_generated_file_name() {
    let tmp = TempDir::new().unwrap();

    cmd()
        .args(["-f", "json", "--out-dir", tmp.path().to_str().unwrap()])
        .arg(get_fixture_path("sample_page.html"))
        .assert()
        .success();

    let names: Vec<String> = std::fs::read_dir(tmp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("scraped-data-"));
    assert!(names[0].ends_with(".json"));
}

#[test]
fn test_cli_pdf_falls_back_to_html() {
    let tmp = TempDir::new().unwrap();
    let requested = tmp.path().join("report.pdf");

    cmd()
        .args(["--chrome", "/nonexistent/chromium", "-o", requested.to_str().unwrap()])
        .arg(get_fixture_path("sample_page.html"))
        .assert()
        .success()
        .stderr(predicate::str::contains("writing HTML instead"));

    assert!(!requested.exists());
    let html = std::fs::read_to_string(tmp.path().join("report.html")).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
}

#[test]
fn test_cli_truncated_report() {
    cmd()
        .args(["-f", "html", "-o", "-", &get_fixture_path("many_items.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("... and 5 more links"))
        .stdout(predicate::str::contains("... and 2 more paragraphs"));
}

#[test]
fn test_cli_invalid_file() {
    cmd().arg("nonexistent.html").assert().failure();
}

#[test]
fn test_cli_invalid_url() {
    cmd()
        .args(["-f", "json", "http://"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL"));
}

#[test]
fn test_cli_invalid_format() {
    cmd()
        .args(["-f", "docx", &get_fixture_path("sample_page.html")])
        .assert()
        .failure();
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(["-v", "-f", "json", "-o", "-", &get_fixture_path("sample_page.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Folio"))
        .stderr(predicate::str::contains("Paragraphs:"));
}

#[test]
fn test_cli_completions() {
    cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("folio"))
        .stdout(predicate::str::contains("--out-dir"))
        .stdout(predicate::str::contains("--user-agent"))
        .stdout(predicate::str::contains("--out_dir").not());
}
