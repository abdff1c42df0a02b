//! Integration tests: run the `carousel-sim` binary end to end.

use std::env;
use std::path::PathBuf;
use std::process::{Command, Output};

fn temp_path(name: &str) -> PathBuf {
    env::temp_dir().join(format!("carousel_sim_{}_{name}", std::process::id()))
}

fn run_sim(args: &[&str]) -> Output {
    let log_file = temp_path("cli.log");
    Command::new(env!("CARGO_BIN_EXE_carousel-sim"))
        .arg("--log-file")
        .arg(&log_file)
        .args(args)
        .env_remove("CAROUSEL_CONFIG")
        .env_remove("CAROUSEL_WRAP")
        .output()
        .expect("Failed to execute binary")
}

fn json_reports(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is a JSON report"))
        .collect()
}

#[test]
fn binary_prints_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_carousel-sim"))
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("0.1.0"),
        "Expected output to contain version '0.1.0', but got: {}",
        stdout
    );
}

#[test]
fn demo_script_runs_as_json() {
    let output = run_sim(&["--format", "json"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let reports = json_reports(&output);
    assert!(reports.len() > 1);
    assert_eq!(reports[0]["step"], 0);
    assert_eq!(reports[0]["action"], "load");
    for report in &reports {
        assert_eq!(report["phase"], "idle");
    }
}

#[test]
fn script_file_drives_the_engine() {
    let script = temp_path("swipes.toml");
    std::fs::write(
        &script,
        r#"
items = 5

[[step]]
action = "swipe"
direction = "left"

[[step]]
action = "swipe"
direction = "left"

[[step]]
action = "swipe"
direction = "left"
"#,
    )
    .unwrap();

    let output = run_sim(&[script.to_str().unwrap(), "--format", "json"]);
    let _ = std::fs::remove_file(&script);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let reports = json_reports(&output);
    assert_eq!(reports.len(), 4);
    let currents: Vec<u64> = reports
        .iter()
        .map(|r| r["current"].as_u64().unwrap())
        .collect();
    assert_eq!(currents, vec![0, 1, 2, 3]);
    assert_eq!(reports[3]["item_count"], 5);
}

#[test]
fn cli_flags_override_the_script() {
    let output = run_sim(&["--items", "3", "--start", "2", "--no-wrap", "--format", "json"]);
    assert!(output.status.success());

    let reports = json_reports(&output);
    assert_eq!(reports[0]["current"], 2);
    assert_eq!(reports[0]["item_count"], 3);
}

#[test]
fn missing_script_fails() {
    let output = run_sim(&["/nonexistent/carousel/script.toml"]);
    assert!(!output.status.success());
}

#[test]
fn malformed_script_fails() {
    let script = temp_path("bad.toml");
    std::fs::write(&script, "[[step]]\naction = \"spin\"\n").unwrap();

    let output = run_sim(&[script.to_str().unwrap()]);
    let _ = std::fs::remove_file(&script);
    assert!(!output.status.success());
}

#[test]
fn bundled_demo_script_runs() {
    let script = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/swipe.toml");
    let output = run_sim(&[script, "--no-wrap", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let reports = json_reports(&output);
    assert_eq!(reports.len(), 7);
    assert_eq!(reports[4]["item_count"], 5);
    assert_eq!(reports[5]["current"], 0);
}
