//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str], stdin: Option<&str>) -> (String, String, i32) {
    run_cli_bytes(data_dir, args, stdin.map(str::as_bytes))
}

/// Same as `run_cli`, with raw bytes on stdin.
fn run_cli_bytes(data_dir: &Path, args: &[&str], stdin: Option<&[u8]>) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_loophero-cli"))
        .args(args)
        .env("LOOPHERO_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    {
        let mut pipe = child.stdin.take().expect("stdin piped");
        if let Some(input) = stdin {
            pipe.write_all(input).expect("write stdin");
        }
    }

    let output = child.wait_with_output().expect("CLI did not finish");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn swipe_line(delta: i32, at: i64) -> String {
    format!(
        r#"{{"packageIdentifier":"com.instagram.android","elementClassName":"androidx.viewpager.widget.ViewPager","scrollDeltaY":{delta},"eventTime":{at}}}"#
    )
}

fn event_types(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).expect("JSON line");
            value["type"].as_str().unwrap_or_default().to_string()
        })
        .collect()
}

#[test]
fn test_config_get_default_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "numericInput"], None);
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "10");
}

#[test]
fn test_config_set_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["config", "set", "numericInput", "25"], None);
    assert_eq!(code, 0, "Config set failed");

    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "numericInput"], None);
    assert_eq!(stdout.trim(), "25");
    assert!(dir.path().join("settings.toml").exists());
}

#[test]
fn test_config_set_rejects_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "numericInput", "41"], None);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_get_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "theme"], None);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_list_is_json() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "list"], None);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["numericInput"], 10);
    assert_eq!(parsed["firstSetup"], true);
}

#[test]
fn test_setup_flow() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, _) = run_cli(dir.path(), &["setup", "status"], None);
    assert_eq!(stdout.trim(), "pending");

    let (_, _, code) = run_cli(dir.path(), &["setup", "complete"], None);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["setup", "status"], None);
    assert_eq!(stdout.trim(), "done");

    run_cli(dir.path(), &["setup", "reset"], None);
    let (stdout, _, _) = run_cli(dir.path(), &["setup", "status"], None);
    assert_eq!(stdout.trim(), "pending");
}

#[test]
fn test_apps_json() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["apps", "--json"], None);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 3);
}

#[test]
fn test_watch_fires_alert_at_threshold() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["config", "set", "numericInput", "5"], None);

    let feed: Vec<String> = [30, -30, 30, -30, 30]
        .iter()
        .enumerate()
        .map(|(i, delta)| swipe_line(*delta, 10_000 + i as i64 * 501))
        .collect();
    let input = feed.join("\n") + "\n";

    let (stdout, _, code) = run_cli(dir.path(), &["watch", "--seed", "4"], Some(&input));
    assert_eq!(code, 0);

    let types = event_types(&stdout);
    assert_eq!(types.first().map(String::as_str), Some("NotificationPosted"));
    assert_eq!(types.iter().filter(|t| *t == "SwipeCounted").count(), 5);
    assert_eq!(types.iter().filter(|t| *t == "ThresholdReached").count(), 1);
    assert_eq!(types.iter().filter(|t| *t == "AlertPosted").count(), 1);
    assert_eq!(types.last().map(String::as_str), Some("ObserverStopped"));
}

#[test]
fn test_watch_skips_malformed_lines() {
    let dir = tempfile::tempdir().unwrap();
    let input = format!("not json\n{}\n\n", swipe_line(40, 5_000));
    let (stdout, stderr, code) = run_cli(dir.path(), &["watch"], Some(&input));
    assert_eq!(code, 0);
    assert!(event_types(&stdout).contains(&"SwipeCounted".to_string()));
    assert!(stderr.contains("\"swipes_counted\": 1"));
}

#[test]
fn test_watch_skips_non_utf8_lines() {
    let dir = tempfile::tempdir().unwrap();
    let mut input = b"\xff\xfe garbage\n".to_vec();
    input.extend_from_slice(swipe_line(40, 5_000).as_bytes());
    input.push(b'\n');

    let (stdout, _, code) = run_cli_bytes(dir.path(), &["watch"], Some(&input));
    assert_eq!(code, 0);

    let types = event_types(&stdout);
    assert_eq!(types.iter().filter(|t| *t == "SwipeCounted").count(), 1);
    assert!(types.contains(&"NotificationCancelled".to_string()));
    assert_eq!(types.last().map(String::as_str), Some("ObserverStopped"));
}
