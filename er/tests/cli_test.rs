//! CLI tests for the `er` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"
plan:
  id: summer-offsite
  name: Summer Offsite
  date: 2026-08-14
  budget: 10000
  estimated-cost: 9000
  requirements:
    include-lunch: true
    venue-preference: outdoor
selected-vendors: [park]
vendors:
  - id: park
    category: venue
    price-estimate: 9000
    distance-km: 4.2
  - id: kitchen
    category: catering
    price-estimate: 2000
tasks:
  - id: book
    status: completed
  - id: invite
    status: pending
"#;

const CATALOG: &str = r#"[
  {"id": "kitchen", "category": "catering", "price-estimate": 2000},
  {"id": "park", "category": "venue", "price-estimate": 9000},
  {"id": "bus", "category": "transport", "price-estimate": 300, "availability": false}
]"#;

fn er(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("er").expect("binary should build");
    cmd.current_dir(temp_dir.path())
        .env("XDG_DATA_HOME", temp_dir.path().join("data"))
        .env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
        .env_remove("WEATHER_API_KEY")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_analyze_text_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("snapshot.yml"), SNAPSHOT).unwrap();

    er(&temp_dir)
        .args(["analyze", "snapshot.yml", "--advise"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summer Offsite"))
        .stdout(predicate::str::contains("Lunch is required but no catering service has been selected"))
        .stdout(predicate::str::contains("Distance from CPH Central Station: 4.2 km."))
        .stdout(predicate::str::contains("Critical Issues Requiring Immediate Attention"));
}

#[test]
fn test_analyze_json_with_weather_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("snapshot.yml"), SNAPSHOT).unwrap();
    fs::write(
        temp_dir.path().join("weather.json"),
        r#"{"condition": "Rain", "temperature": 14, "is-bad-weather": true, "needs-indoor": true}"#,
    )
    .unwrap();

    let output = er(&temp_dir)
        .args(["analyze", "snapshot.yml", "--weather", "weather.json", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let risks = json["risks"].as_array().unwrap();
    assert_eq!(risks.len(), 9);
    assert_eq!(risks[4]["type"], "weather");
    assert_eq!(risks[4]["severity"], "high");
    assert_eq!(risks[5]["type"], "budget");
    assert_eq!(risks[5]["severity"], "medium");
}

#[test]
fn test_optimize_sheds_catering() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("vendors.json"), CATALOG).unwrap();

    let output = er(&temp_dir)
        .args(["optimize", "vendors.json", "--budget", "10000", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total-cost"], 9000.0);
    assert_eq!(json["within-budget"], true);
    assert_eq!(json["removed"][0], "catering");
    assert_eq!(json["selections"][0]["vendor-id"], "park");
}

#[test]
fn test_optimize_text_uses_catalog_names() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        temp_dir.path().join("vendors.yml"),
        "- id: park\n  name: Valby Park\n  category: venue\n  price-estimate: 9000\n\
         - id: hall\n  category: venue\n  price-estimate: 9500\n",
    )
    .unwrap();

    er(&temp_dir)
        .args(["optimize", "vendors.yml", "--budget", "10000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Valby Park (9.000 DKK, 1 alternative(s))"))
        .stdout(predicate::str::contains("within budget"));
}

#[test]
fn test_missing_snapshot_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    er(&temp_dir)
        .args(["analyze", "nope.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load snapshot"));
}

#[test]
fn test_weather_without_key_prints_fallback() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    er(&temp_dir)
        .arg("weather")
        .assert()
        .success()
        .stdout(predicate::str::contains("condition: Unknown"));
}

#[test]
fn test_config_rejects_venue_removal() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        temp_dir.path().join(".eventrisk.yml"),
        "budget:\n  removal-priority: [venue]\n",
    )
    .unwrap();

    er(&temp_dir)
        .args(["--config", ".eventrisk.yml", "config"])
        .assert()
        .failure();
}

#[test]
fn test_log_level_from_user_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let user_dir = temp_dir.path().join("config").join("eventrisk");
    fs::create_dir_all(&user_dir).unwrap();
    fs::write(user_dir.join("eventrisk.yml"), "log-level: debug\n").unwrap();

    er(&temp_dir).arg("config").assert().success();

    let log = fs::read_to_string(temp_dir.path().join("data/eventrisk/logs/eventrisk.log")).unwrap();
    assert!(log.contains("Logging initialized (level: DEBUG)"));
}
