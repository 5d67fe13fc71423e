//! CLI Integration Tests
//!
//! These tests run the built `agrotwin` binary against JSON fixtures written
//! to a temporary directory. Every invocation passes `--config` pointing into
//! that directory so the user's real configuration is never read or written.
//!
//! ```
//! cargo test --package agrotwin-cli --test cli_integration
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Get path to the agrotwin binary
fn get_binary_path() -> &'static str {
    env!("CARGO_BIN_EXE_agrotwin")
}

/// Isolated working directory with its own config path.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    /// Run agrotwin with colors disabled and the fixture's config file.
    fn run(&self, args: &[&str]) -> Output {
        Command::new(get_binary_path())
            .arg("--config")
            .arg(self.config_path())
            .arg("--no-color")
            .args(args)
            .env_remove("RUST_LOG")
            .env_remove("AGROTWIN_CONFIG")
            .env_remove("NO_COLOR")
            .output()
            .expect("Failed to run agrotwin binary")
    }
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp path should be UTF-8")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const DRY_TOMATO: &str = r#"{
    "crop": {"cropId": "c-1", "cropName": "Tomato"},
    "sensors": [
        {"sensorId": "s-1", "deviceId": "d-1", "type": "soilMoisture", "value": 15,
         "unit": "%", "timestamp": "2024-06-01T11:55:00Z"}
    ],
    "devices": [{"id": "d-1", "name": "North bed probe"}]
}"#;

const STORMY: &str = r#"{
    "crop": {"cropName": "tomato"},
    "sensors": [
        {"sensorId": "s-1", "type": "soilMoisture", "value": 55, "timestamp": "2024-06-01T11:55:00Z"},
        {"sensorId": "s-2", "type": "temperature", "value": 40, "timestamp": "2024-06-01T11:55:00Z"},
        {"sensorId": "s-3", "type": "lightLevel", "value": 900, "timestamp": "2024-06-01T11:55:00Z"}
    ],
    "weather": {"temperature": 2.0, "condition": "Clear"}
}"#;

const ACTIONS: &str = r#"[
    {"timestamp": "2024-06-01T10:00:00Z", "action": "farm/gh-1/ventilator_on", "status": "sent"},
    {"timestamp": "2024-06-01T10:00:00Z", "action": "farm/gh-1/ventilator_off", "status": "ack"},
    {"timestamp": "2024-06-01T01:00:00Z", "action": "farm/gh-1/open_roof", "status": "ack"},
    {"timestamp": "2024-06-01T05:00:00Z", "action": "farm/gh-1/close_roof", "status": "ack"},
    {"timestamp": "2024-06-01T06:00:00Z", "action": "not-a-path", "status": "ack"}
]"#;

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_command() {
    let output = Fixture::new().run(&["--help"]);

    assert!(output.status.success(), "Help should succeed");

    let stdout = stdout(&output);
    assert!(stdout.contains("agrotwin"), "Help should mention agrotwin");
    for cmd in ["recommend", "twin", "thresholds", "watch", "config"] {
        assert!(stdout.contains(cmd), "Help should list {} command", cmd);
    }
}

#[test]
fn test_version_command() {
    let output = Fixture::new().run(&["--version"]);

    assert!(output.status.success(), "Version should succeed");
    assert!(stdout(&output).contains("agrotwin"));
}

#[test]
fn test_subcommand_help() {
    let fixture = Fixture::new();
    for cmd in ["recommend", "twin", "thresholds", "watch", "config", "completions"] {
        let output = fixture.run(&[cmd, "--help"]);

        assert!(output.status.success(), "{} --help should succeed", cmd);
        assert!(!stdout(&output).is_empty(), "{} --help should produce output", cmd);
    }
}

#[test]
fn test_invalid_subcommand() {
    let output = Fixture::new().run(&["plough"]);
    assert!(!output.status.success());
}

#[test]
fn test_missing_required_args() {
    let output = Fixture::new().run(&["recommend"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--input"));
}

// =============================================================================
// Recommend Command
// =============================================================================

#[test]
fn test_recommend_text_output() {
    let fixture = Fixture::new();
    let input = fixture.write("snapshot.json", DRY_TOMATO);

    let output = fixture.run(&["recommend", "--input", path_arg(&input)]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.starts_with("[CRITICAL]"));
    assert!(stdout.contains("Current: 15%"));
    assert!(stdout.contains("on North bed probe"));
    assert!(!stdout.contains('\u{1b}'), "--no-color output must be plain");
}

#[test]
fn test_recommend_json_output() {
    let fixture = Fixture::new();
    let input = fixture.write("snapshot.json", DRY_TOMATO);

    let output = fixture.run(&[
        "recommend",
        "--input",
        path_arg(&input),
        "--format",
        "json",
        "--now",
        "2024-06-01T12:00:00Z",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("Output should be valid JSON");
    let recs = json.as_array().expect("Output should be an array");
    assert_eq!(recs.len(), 1);

    let rec = &recs[0];
    assert_eq!(rec["category"], "irrigation");
    assert_eq!(rec["priority"], "critical");
    assert_eq!(rec["action"], "irrigate");
    assert_eq!(rec["deviceId"], "d-1");
    assert_eq!(rec["metadata"]["currentValue"], 15.0);
    assert_eq!(rec["metadata"]["cropName"], "Tomato");
    assert_eq!(rec["createdAt"], "2024-06-01T12:00:00Z");
    assert_eq!(rec["expiresAt"], "2024-06-01T16:00:00Z");
}

#[test]
fn test_recommend_sorted_by_priority() {
    let fixture = Fixture::new();
    let input = fixture.write("snapshot.json", STORMY);

    let output = fixture.run(&["recommend", "-i", path_arg(&input), "-f", "json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let recs: Vec<serde_json::Value> = serde_json::from_str(&stdout(&output)).unwrap();
    let priorities: Vec<&str> = recs
        .iter()
        .map(|r| r["priority"].as_str().unwrap())
        .collect();
    // Ventilation and frost (critical) before moisture optimal (low)
    assert_eq!(priorities, vec!["critical", "critical", "low"]);
    assert_eq!(recs[0]["action"], "activate_ventilation");
    assert_eq!(recs[1]["action"], "protect_from_frost");
    assert_eq!(recs[1]["metadata"]["weatherFactor"], true);
}

#[test]
fn test_recommend_missing_file() {
    let fixture = Fixture::new();
    let output = fixture.run(&["recommend", "--input", "/nonexistent/snapshot.json"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("snapshot.json"));
}

#[test]
fn test_recommend_invalid_now() {
    let fixture = Fixture::new();
    let input = fixture.write("snapshot.json", DRY_TOMATO);

    let output = fixture.run(&["recommend", "-i", path_arg(&input), "--now", "noon"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("RFC 3339"));
}

#[test]
fn test_recommend_uses_config_thresholds_and_format() {
    let fixture = Fixture::new();
    fixture.write(
        "config.toml",
        r#"
format = "json"

[engine]
expiry_minutes = 30

[thresholds.tomato.moisture]
critical_low = 10.0
warning_low = 20.0
optimal_min = 30.0
optimal_max = 60.0
warning_high = 70.0
critical_high = 80.0

[thresholds.tomato.temperature]
critical_low = 5.0
warning_low = 10.0
optimal_min = 18.0
optimal_max = 27.0
warning_high = 32.0
critical_high = 35.0

[thresholds.tomato.humidity]
critical_low = 30.0
warning_low = 40.0
optimal_min = 50.0
optimal_max = 70.0
warning_high = 80.0
critical_high = 90.0
"#,
    );
    let input = fixture.write("snapshot.json", DRY_TOMATO);

    let output = fixture.run(&[
        "recommend",
        "-i",
        path_arg(&input),
        "--now",
        "2024-06-01T12:00:00Z",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let recs: Vec<serde_json::Value> = serde_json::from_str(&stdout(&output)).unwrap();
    // 15 is now between critical_low (10) and warning_low (20)
    assert_eq!(recs[0]["priority"], "high");
    assert_eq!(recs[0]["action"], "schedule_irrigation");
    assert_eq!(recs[0]["expiresAt"], "2024-06-01T12:30:00Z");
}

// =============================================================================
// Twin Command
// =============================================================================

#[test]
fn test_twin_text_output() {
    let fixture = Fixture::new();
    let log = fixture.write("actions.json", ACTIONS);

    let output = fixture.run(&["twin", "--log", path_arg(&log)]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("fan         off"));
    assert!(lines[1].starts_with("roof        closed"));
    assert_eq!(lines[2], "light       unknown");
    assert_eq!(lines[3], "humidifier  unknown");
}

#[test]
fn test_twin_json_output() {
    let fixture = Fixture::new();
    let log = fixture.write("actions.json", ACTIONS);

    let output = fixture.run(&["twin", "--log", path_arg(&log), "--format", "json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let states: Vec<serde_json::Value> = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(states.len(), 4);
    assert_eq!(states[0]["actuator"], "fan");
    assert_eq!(states[0]["on"], false);
    assert_eq!(states[0]["updatedAt"], "2024-06-01T10:00:00Z");
    assert_eq!(states[1]["actuator"], "roof");
    assert_eq!(states[1]["updatedAt"], "2024-06-01T05:00:00Z");
    assert_eq!(states[2]["updatedAt"], serde_json::Value::Null);
}

#[test]
fn test_twin_empty_log() {
    let fixture = Fixture::new();
    let log = fixture.write("actions.json", "[]");

    let output = fixture.run(&["twin", "--log", path_arg(&log)]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).matches("unknown").count(), 4);
}

// =============================================================================
// Thresholds Command
// =============================================================================

#[test]
fn test_thresholds_all() {
    let output = Fixture::new().run(&["thresholds"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    for crop in ["default", "tomato", "lettuce", "pepper", "cucumber", "strawberry", "rice"] {
        assert!(stdout.contains(crop), "Should list {}", crop);
    }
}

#[test]
fn test_thresholds_unknown_crop_falls_back() {
    let output = Fixture::new().run(&["thresholds", "kohlrabi", "--format", "json"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["crop"], "kohlrabi");
    assert_eq!(json["resolvedAs"], "default");
    assert_eq!(json["thresholds"]["temperature"]["critical_high"], 38.0);
}

// =============================================================================
// Watch Command
// =============================================================================

#[test]
fn test_watch_limited_count() {
    let fixture = Fixture::new();
    let input = fixture.write("snapshot.json", DRY_TOMATO);
    let log = fixture.write("actions.json", ACTIONS);

    let output = fixture.run(&[
        "watch",
        "--input",
        path_arg(&input),
        "--log",
        path_arg(&log),
        "--interval",
        "1",
        "--count",
        "2",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert_eq!(stdout.matches("1 critical").count(), 2);
    // Changes are only reported on the first tick
    assert_eq!(stdout.matches("fan: unknown -> off").count(), 1);
    assert_eq!(stdout.matches("roof: unknown -> closed").count(), 1);
    assert!(stderr(&output).contains("Completed 2 evaluations"));
}

#[test]
fn test_watch_rejects_zero_interval() {
    let fixture = Fixture::new();
    let input = fixture.write("snapshot.json", DRY_TOMATO);

    let output = fixture.run(&["watch", "-i", path_arg(&input), "--interval", "0", "-n", "1"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Interval"));
}

// =============================================================================
// Config Commands
// =============================================================================

#[test]
fn test_config_path() {
    let fixture = Fixture::new();
    let output = fixture.run(&["config", "path"]);

    assert!(output.status.success(), "Config path should succeed");
    assert_eq!(
        stdout(&output).trim(),
        fixture.config_path().display().to_string()
    );
}

#[test]
fn test_config_show_without_file() {
    let output = Fixture::new().run(&["config", "show"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("expiry_minutes = 240"));
    assert!(stderr(&output).contains("No config file"));
}

#[test]
fn test_config_init_then_show() {
    let fixture = Fixture::new();

    let output = fixture.run(&["config", "init"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(fixture.config_path().exists());

    let again = fixture.run(&["config", "init"]);
    assert!(!again.status.success(), "Second init without --force should fail");

    let shown = fixture.run(&["config", "show"]);
    assert!(shown.status.success());
    assert!(stdout(&shown).contains("interval_secs = 10"));
}

// =============================================================================
// Completions
// =============================================================================

#[test]
fn test_completions_bash() {
    let output = Fixture::new().run(&["completions", "bash"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("agrotwin"));
}
