use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn get_mobilescore_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("mobilescore")
}

#[test]
fn test_run_help_lists_options() {
    let mut cmd = Command::new(get_mobilescore_bin());
    cmd.arg("run").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--api-key"))
        .stdout(predicate::str::contains("PAGESPEED_API_KEY"))
        .stdout(predicate::str::contains("--max-attempts"))
        .stdout(predicate::str::contains("website_performance_metrics.csv"))
        .stdout(predicate::str::contains("radar_plot.html"));
}

#[test]
fn test_run_requires_api_key() {
    let mut cmd = Command::new(get_mobilescore_bin());
    cmd.env_remove("PAGESPEED_API_KEY")
        .arg("run")
        .arg("--url")
        .arg("https://example.com/");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--api-key"));
}

#[test]
fn test_run_rejects_zero_attempts() {
    let mut cmd = Command::new(get_mobilescore_bin());
    cmd.arg("run")
        .arg("--api-key")
        .arg("test-key")
        .arg("--max-attempts")
        .arg("0");

    cmd.assert().failure();
}

#[test]
fn test_run_rejects_invalid_url() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::new(get_mobilescore_bin());
    cmd.current_dir(temp_dir.path())
        .arg("run")
        .arg("--api-key")
        .arg("test-key")
        .arg("--url")
        .arg("ftp://files.example/");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported URL scheme"));
}

/// An unreachable endpoint fails every URL but the run itself still succeeds
#[test]
fn test_run_with_unreachable_endpoint_is_best_effort() {
    // Arrange
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("metrics.csv");
    let chart_path = temp_dir.path().join("chart.html");

    // Act
    let mut cmd = Command::new(get_mobilescore_bin());
    cmd.env_remove("PAGESPEED_ENDPOINT")
        .arg("--format")
        .arg("json")
        .arg("run")
        .arg("--api-key")
        .arg("test-key")
        .arg("--endpoint")
        .arg("http://127.0.0.1:9/runPagespeed")
        .arg("--url")
        .arg("https://example.com/")
        .arg("--max-attempts")
        .arg("1")
        .arg("--retry-delay")
        .arg("0")
        .arg("--timeout")
        .arg("5")
        .arg("--csv")
        .arg(&csv_path)
        .arg("--chart")
        .arg(&chart_path);

    // Assert
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"failures\""))
        .stdout(predicate::str::contains("https://example.com/"))
        .stdout(predicate::str::contains("\"skipped\""));

    let csv = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 1, "Report should hold only the header");
    assert!(!chart_path.exists(), "No chart without records");
}
