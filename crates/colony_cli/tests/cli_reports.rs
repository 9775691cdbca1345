use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn colony_save_path() -> PathBuf {
    workspace_root().join("tests/fixtures/colony.rws")
}

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_colony-report"))
        .args(args)
        .output()
        .expect("failed to run colony-report CLI")
}

/// Runs against the fixture save with config and snapshots kept inside `dir`.
fn run_report(dir: &Path, extra: &[&str]) -> std::process::Output {
    let save = colony_save_path().to_string_lossy().to_string();
    let config = dir.join("config.toml").to_string_lossy().to_string();
    let snapshots = dir.join("skills.json").to_string_lossy().to_string();
    let mut args = vec![
        save.as_str(),
        "--config",
        config.as_str(),
        "--snapshots",
        snapshots.as_str(),
    ];
    args.extend_from_slice(extra);
    run_cli(&args)
}

#[test]
fn cli_prints_inventory_by_default() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let output = run_report(dir.path(), &[]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with(" ::: Inventory :::"));
    assert!(stdout.contains("100x Steel"));
    assert!(!dir.path().join("skills.json").exists());
}

#[test]
fn cli_json_output_parses() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let output = run_report(dir.path(), &["production-queue", "--json"]);
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(value["report"], "production-queue");
    assert_eq!(value["data"]["repeat"][0]["name"], "Fine Meal");
    assert_eq!(value["data"]["repeat"][0]["count"], 5);
}

#[test]
fn cli_skills_report_saves_baselines_and_shows_deltas_next_run() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let snapshots = dir.path().join("skills.json");
    fs::write(&snapshots, r#"{"Ace": ["6","4","0","0","6","0","0","0","0","0","0","0"]}"#)
        .expect("seed snapshots");

    let output = run_report(dir.path(), &["skills"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("8++[+2]"), "{stdout}");

    let saved: Value =
        serde_json::from_str(&fs::read_to_string(&snapshots).expect("snapshots written"))
            .expect("snapshots should be json");
    assert_eq!(saved["Ace"][0], "8");
    assert_eq!(saved["Bea"][1], "X");
    assert!(saved.get("Cal").is_some());

    let again = run_report(dir.path(), &["skills"]);
    let stdout = String::from_utf8_lossy(&again.stdout);
    assert!(!stdout.contains("[+2]"));
}

#[test]
fn cli_no_save_leaves_baselines_untouched() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let output = run_report(dir.path(), &["top-skills", "--no-save"]);
    assert!(output.status.success());
    assert!(!dir.path().join("skills.json").exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Ace 8.50"));
}

#[test]
fn cli_equipment_does_not_write_baselines() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let output = run_report(dir.path(), &["equipment"]);
    assert!(output.status.success());
    assert!(!dir.path().join("skills.json").exists());
    assert!(String::from_utf8_lossy(&output.stdout).contains("(Range - 8)"));
}

#[test]
fn cli_requires_a_save() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let config = dir.path().join("config.toml").to_string_lossy().to_string();
    let output = run_cli(&["--config", &config]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_reports_missing_save() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let config = dir.path().join("config.toml").to_string_lossy().to_string();
    let missing = dir.path().join("nope.rws").to_string_lossy().to_string();
    let output = run_cli(&[&missing, "--config", &config]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read save"));
}

#[test]
fn cli_rebuilds_and_resolves_scenarios() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let saves = dir.path().join("saves");
    fs::create_dir(&saves).expect("saves dir");
    fs::copy(colony_save_path(), saves.join("Tundra.rws")).expect("copy fixture");

    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!("saves = {:?}\n", saves.to_string_lossy()),
    )
    .expect("write config");
    let config = config_path.to_string_lossy().to_string();

    let output = run_cli(&["--rebuild-config", "--config", &config]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "added: Tundra");

    let output = run_cli(&["--list-scenarios", "--config", &config]);
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "Tundra");

    let output = run_cli(&["Tundra", "dead-pawns", "--config", &config]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Fang (Pirate) at (40, 41)"));
}

#[test]
fn cli_rebuild_without_saves_dir_fails() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let config = dir.path().join("config.toml").to_string_lossy().to_string();
    let output = run_cli(&["--rebuild-config", "--config", &config]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no saves directory"));
}
