use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

fn get_cli_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_skijump-cli"))
}

fn write_scenario(name: &str, body: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("skijump-cli-{}-{}.json", name, std::process::id()));
    let mut file = std::fs::File::create(&path).expect("create temp scenario");
    file.write_all(body.as_bytes()).expect("write temp scenario");
    path
}

#[test]
fn test_cli_simulate_defaults() {
    let output = Command::new(get_cli_binary())
        .args(["simulate"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("SLIDE RESULTS"), "Should contain results table: {}", stdout);
    assert!(stdout.contains("Knuckle"), "Should report knuckle distance");
}

#[test]
fn test_cli_simulate_json_matches_reference() {
    let output = Command::new(get_cli_binary())
        .args([
            "simulate",
            "--friction", "0.18",
            "--inrun-angle", "40",
            "--inrun-length", "43",
            "--transition-length", "10",
            "--kicker-angle", "30",
            "--kicker-length", "11",
            "--output", "json",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let range = json["horizontal_range_m"].as_f64().unwrap();
    let knuckle = json["knuckle_distance_m"].as_f64().unwrap();
    assert!((range - 21.99).abs() / 21.99 < 0.02, "range {}", range);
    assert!((knuckle - 14.29).abs() / 14.29 < 0.02, "knuckle {}", knuckle);
    assert_eq!(json["segments"].as_array().unwrap().len(), 3);
    assert!(json.get("trajectory").is_none(), "trajectory only with --full");
}

#[test]
fn test_cli_simulate_full_json_includes_trajectory() {
    let output = Command::new(get_cli_binary())
        .args(["simulate", "--samples", "20", "--full", "-o", "json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["trajectory"].as_array().unwrap().len(), 20);
    assert_eq!(json["ramp_profile"].as_array().unwrap().len(), 4);
}

#[test]
fn test_cli_output_format_csv() {
    let output = Command::new(get_cli_binary())
        .args(["simulate", "--output", "csv"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("metric,value"), "Should be CSV format");
    assert!(stdout.contains("knuckle_distance_m,"));
}

#[test]
fn test_cli_without_transition() {
    let output = Command::new(get_cli_binary())
        .args(["simulate", "--transition-length", "0", "-o", "json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["segments"].as_array().unwrap().len(), 2);
}

#[test]
fn test_cli_rejects_invalid_length() {
    let output = Command::new(get_cli_binary())
        .args(["simulate", "--inrun-length=-5"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Negative length should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("segments[0].length"), "stderr: {}", stderr);
}

#[test]
fn test_cli_rejects_negative_transition_length() {
    let output = Command::new(get_cli_binary())
        .args(["simulate", "--transition-length=-5"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Negative transition length should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("segments[1].length"), "stderr: {}", stderr);
}

#[test]
fn test_cli_rejects_friction_out_of_range() {
    let output = Command::new(get_cli_binary())
        .args(["simulate", "--friction", "0.8"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Friction above 0.5 should fail");
}

#[test]
fn test_cli_config_file() {
    let mut path = std::env::temp_dir();
    path.push(format!("skijump-cli-test-{}.json", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).expect("create temp scenario");
        write!(
            file,
            r#"{{
                "friction_coefficient": 0.18,
                "drag_coefficient": 0.9,
                "segments": [
                    {{ "direction": "descending", "angle_deg": 40, "length_m": 43 }},
                    {{ "direction": "ascending", "angle_deg": 0, "length_m": 5 }}
                ]
            }}"#
        )
        .expect("write temp scenario");
    }

    let output = Command::new(get_cli_binary())
        .arg("simulate")
        .arg("--config")
        .arg(&path)
        .args(["-o", "json"])
        .output()
        .expect("Failed to execute command");
    let _ = std::fs::remove_file(&path);

    assert!(output.status.success(), "Command should succeed");
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    // Flat kicker: no airborne phase
    assert_eq!(json["flight_time_s"].as_f64().unwrap(), 0.0);
    assert_eq!(json["knuckle_distance_m"].as_f64().unwrap(), 0.0);
}

#[test]
fn test_cli_samples_flag_overrides_config() {
    let path = write_scenario(
        "samples",
        r#"{
            "friction_coefficient": 0.18,
            "drag_coefficient": 0.5,
            "trajectory_samples": 30,
            "segments": [
                { "direction": "descending", "angle_deg": 40, "length_m": 43 },
                { "direction": "ascending", "angle_deg": 30, "length_m": 11 }
            ]
        }"#,
    );

    let from_file = Command::new(get_cli_binary())
        .arg("simulate")
        .arg("--config")
        .arg(&path)
        .args(["--full", "-o", "json"])
        .output()
        .expect("Failed to execute command");
    let overridden = Command::new(get_cli_binary())
        .arg("simulate")
        .arg("--config")
        .arg(&path)
        .args(["--samples", "100", "--full", "-o", "json"])
        .output()
        .expect("Failed to execute command");
    let _ = std::fs::remove_file(&path);

    assert!(from_file.status.success(), "Command should succeed");
    assert!(overridden.status.success(), "Command should succeed");
    let json: serde_json::Value = serde_json::from_slice(&from_file.stdout).expect("valid JSON");
    assert_eq!(json["trajectory"].as_array().unwrap().len(), 30);
    let json: serde_json::Value = serde_json::from_slice(&overridden.stdout).expect("valid JSON");
    assert_eq!(json["trajectory"].as_array().unwrap().len(), 100);
}

#[test]
fn test_cli_config_warns_about_steep_segment() {
    let path = write_scenario(
        "steep",
        r#"{
            "friction_coefficient": 0.18,
            "drag_coefficient": 0.5,
            "segments": [
                { "direction": "descending", "angle_deg": 65, "length_m": 20 },
                { "direction": "ascending", "angle_deg": 30, "length_m": 11 }
            ]
        }"#,
    );

    let output = Command::new(get_cli_binary())
        .env_remove("RUST_LOG")
        .arg("simulate")
        .arg("--config")
        .arg(&path)
        .output()
        .expect("Failed to execute command");
    let _ = std::fs::remove_file(&path);

    assert!(output.status.success(), "Steep slides still run");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("design limit"), "stderr: {}", stderr);
}

#[test]
fn test_cli_sweep_csv() {
    let output = Command::new(get_cli_binary())
        .args(["sweep", "--from", "0.0", "--to", "0.3", "--steps", "4", "-o", "csv"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5, "header + 4 rows: {}", stdout);
    assert!(lines[0].starts_with("friction,"));
}

#[test]
fn test_cli_help() {
    let output = Command::new(get_cli_binary())
        .args(["--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Help command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("simulate"), "Should list simulate command");
    assert!(stdout.contains("sweep"), "Should list sweep command");
    assert!(stdout.contains("info"), "Should list info command");
}

#[test]
fn test_cli_invalid_command() {
    let output = Command::new(get_cli_binary())
        .args(["invalid-command"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Invalid command should fail");
}
