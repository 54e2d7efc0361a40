//! Basic CLI E2E tests.
//!
//! Commands run via cargo against a throwaway data directory.

use std::process::Command;

use tempfile::TempDir;

fn run_cli(data_dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "estuda-cli", "--quiet", "--"])
        .args(args)
        .env("ESTUDA_DATA_DIR", data_dir.path())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn subject_add_then_list() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(
        &dir,
        &[
            "subject", "add", "Matemática", "--priority", "alta", "--topics", "Álgebra,Geometria",
        ],
    );
    assert_eq!(code, 0, "subject add failed: {stderr}");

    let (stdout, _, code) = run_cli(&dir, &["subject", "list"]);
    assert_eq!(code, 0);
    let subjects: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(subjects[0]["name"], "Matemática");
    assert_eq!(subjects[0]["priority"], "alta");
    assert_eq!(subjects[0]["topics"].as_array().unwrap().len(), 2);
}

#[test]
fn subject_edit_renames_and_reprioritizes() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, &["subject", "add", "Fisica", "--topics", "Cinemática,Óptica"]);
    let (_, stderr, code) = run_cli(
        &dir,
        &[
            "subject", "edit", "Fisica", "--rename", "Física", "--priority", "alta",
        ],
    );
    assert_eq!(code, 0, "subject edit failed: {stderr}");

    let (_, _, code) = run_cli(&dir, &["subject", "remove-topic", "Física", "Óptica"]);
    assert_eq!(code, 0);

    let (stdout, _, _) = run_cli(&dir, &["subject", "list"]);
    let subjects: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(subjects[0]["name"], "Física");
    assert_eq!(subjects[0]["priority"], "alta");
    assert_eq!(subjects[0]["topics"].as_array().unwrap().len(), 1);
    assert_eq!(subjects[0]["topics"][0]["name"], "Cinemática");

    // Renaming onto an existing subject is rejected.
    run_cli(&dir, &["subject", "add", "Química"]);
    let (_, _, code) = run_cli(&dir, &["subject", "edit", "Química", "--rename", "Física"]);
    assert_ne!(code, 0);
}

#[test]
fn duplicate_subject_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(&dir, &["subject", "add", "História"]);
    assert_eq!(code, 0);
    let (_, stderr, code) = run_cli(&dir, &["subject", "add", "História"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("already exists"), "stderr: {stderr}");
}

#[test]
fn goal_uniform_split_shows_in_list() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(
        &dir,
        &["goal", "add", "Matemática", "--hours", "15"],
    );
    assert_eq!(code, 0, "goal add failed: {stderr}");

    let (stdout, _, code) = run_cli(&dir, &["goal", "list"]);
    assert_eq!(code, 0);
    let goals: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(goals[0]["distribution_type"], "uniform");
    assert_eq!(goals[0]["schedule"]["monday"]["hours"], 3.0);
    assert_eq!(goals[0]["schedule"]["sunday"]["enabled"], false);
}

#[test]
fn goal_set_day_makes_the_goal_custom() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, &["goal", "add", "Matemática", "--hours", "10"]);
    let (_, stderr, code) = run_cli(&dir, &["goal", "set-day", "0", "saturday", "4"]);
    assert_eq!(code, 0, "goal set-day failed: {stderr}");

    let (stdout, _, _) = run_cli(&dir, &["goal", "list"]);
    let goals: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(goals[0]["distribution_type"], "custom");
    assert_eq!(goals[0]["schedule"]["saturday"]["enabled"], true);
    assert_eq!(goals[0]["schedule"]["saturday"]["hours"], 4.0);
    assert_eq!(goals[0]["schedule"]["monday"]["hours"], 2.0);
}

#[test]
fn simulado_edit_replaces_results() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli(
        &dir,
        &[
            "simulado", "add", "ENEM 1",
            "--result", "Matemática:2:10:8",
            "--result", "Português:1:20:8",
        ],
    );
    assert_eq!(code, 0, "simulado add failed: {stderr}");
    let added: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let id = added["id"].as_str().unwrap().to_string();

    let (stdout, stderr, code) = run_cli(
        &dir,
        &[
            "simulado", "edit", &id,
            "--rename", "ENEM 2024",
            "--result", "Matemática:2:10:6",
            "--drop", "Português",
        ],
    );
    assert_eq!(code, 0, "simulado edit failed: {stderr}");
    let edited: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(edited["name"], "ENEM 2024");
    assert_eq!(edited["overall_accuracy"], 60.0);
    assert!(edited["subjects"].get("Português").is_none());

    // Dropping the last remaining subject is rejected.
    let (_, _, code) = run_cli(&dir, &["simulado", "edit", &id, "--drop", "Matemática"]);
    assert_ne!(code, 0);
}

#[test]
fn timer_completes_a_work_phase_through_ticks() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(&dir, &["config", "set", "pomodoro.work_time", "1"]);
    assert_eq!(code, 0);
    let (_, _, code) = run_cli(&dir, &["timer", "toggle"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(&dir, &["timer", "tick", "--seconds", "60"]);
    assert_eq!(code, 0);
    let events: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(events[0]["type"], "work_completed");
    assert_eq!(events[0]["minutes"], 1);

    let (stdout, _, _) = run_cli(&dir, &["timer", "status"]);
    let status: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(status["running"], false);
    assert_eq!(status["completed_pomodoros"], 1);
    assert_eq!(status["pending_break_min"], 5);
}

#[test]
fn timer_set_updates_durations_and_clock() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli(
        &dir,
        &["timer", "set", "--work-time", "2", "--short-break", "3"],
    );
    assert_eq!(code, 0, "timer set failed: {stderr}");
    let status: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    // Paused engine, so the new work duration lands on the clock.
    assert_eq!(status["remaining_secs"], 120);

    // The change is persisted into settings.
    let (stdout, _, _) = run_cli(&dir, &["config", "get", "pomodoro.short_break"]);
    assert_eq!(stdout.trim(), "3");

    // Zero durations are rejected and nothing is stored.
    let (_, _, code) = run_cli(&dir, &["timer", "set", "--work-time", "0"]);
    assert_ne!(code, 0);
    let (stdout, _, _) = run_cli(&dir, &["config", "get", "pomodoro.work_time"]);
    assert_eq!(stdout.trim(), "2");
}

#[test]
fn stats_overview_reflects_logged_performance() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, &["subject", "add", "Português"]);
    let (_, stderr, code) = run_cli(
        &dir,
        &[
            "subject", "log", "Português", "--hours", "2", "--resolved", "10", "--correct", "8",
        ],
    );
    assert_eq!(code, 0, "log failed: {stderr}");

    let (stdout, _, code) = run_cli(&dir, &["stats", "overview"]);
    assert_eq!(code, 0);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["overview"]["total_questions"], 10);
    assert_eq!(report["overview"]["overall_accuracy"], 80.0);
    assert_eq!(report["band"], "green");
}

#[test]
fn config_roundtrip() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(&dir, &["config", "set", "pomodoro.work_time", "50"]);
    assert_eq!(code, 0);
    let (stdout, _, code) = run_cli(&dir, &["config", "get", "pomodoro.work_time"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "50");

    // Constraint violations leave the stored value alone.
    let (_, _, code) = run_cli(&dir, &["config", "set", "pomodoro.work_time", "0"]);
    assert_ne!(code, 0);
    let (stdout, _, _) = run_cli(&dir, &["config", "get", "pomodoro.work_time"]);
    assert_eq!(stdout.trim(), "50");

    // Unknown keys fail through the normal error path.
    let (_, stderr, code) = run_cli(&dir, &["config", "get", "pomodoro.nonexistent"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"), "stderr: {stderr}");
}
