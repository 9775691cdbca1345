use std::fs;
use std::path::PathBuf;

use colony_core::core_api::{Engine, Report, ReportKind, RunOptions};
use colony_core::snapshot::MemorySnapshotStore;
use colony_render::{TextRenderOptions, render_json, render_text};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn run_report(kind: ReportKind) -> Report {
    let path = workspace_root().join("tests/fixtures/colony.rws");
    let text =
        fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {:?}: {}", path, e));
    let session = Engine::new()
        .open_str(&text)
        .unwrap_or_else(|e| panic!("failed to parse {:?}: {}", path, e));
    let mut store = MemorySnapshotStore::default();
    session.run(kind, &RunOptions::default(), &mut store)
}

#[test]
fn every_report_renders_a_titled_text_block() {
    for kind in ReportKind::ALL {
        let text = render_text(&run_report(kind), TextRenderOptions::default());
        let first = text.lines().next().unwrap_or_default();
        assert!(
            first.starts_with(" ::: ") && first.ends_with(" :::"),
            "{kind}: {first:?}"
        );
    }
}

#[test]
fn json_envelope_names_the_report() {
    for kind in ReportKind::ALL {
        let value = render_json(&run_report(kind));
        assert_eq!(value["report"], kind.as_str());
        assert!(value.get("data").is_some(), "{kind} has no data");
    }
}

#[test]
fn inventory_text_and_json_agree() {
    let report = run_report(ReportKind::Inventory);

    let text = render_text(&report, TextRenderOptions::default());
    assert!(text.starts_with(" ::: Inventory :::\n"));
    assert!(text.contains(" Ores\n"));
    assert!(text.contains("100x Steel"));
    assert!(!text.contains("Skipped:"));

    let verbose = render_text(
        &report,
        TextRenderOptions {
            verbose: true,
            ..TextRenderOptions::default()
        },
    );
    assert!(verbose.contains(" Skipped: 40 sealed, 1 biocoded"));

    let value = render_json(&report);
    let data = &value["data"];
    assert_eq!(data["categories"]["Ores"]["Steel"], 100);
    assert_eq!(data["categories"]["Meal"]["Fine"], 4);
    assert_eq!(data["sealed_skipped"], 40);
    assert_eq!(data["biocoded_skipped"], 1);
}

#[test]
fn skills_text_shows_passion_markers_and_mood() {
    let text = render_text(&run_report(ReportKind::Skills), TextRenderOptions::default());
    let ace = text
        .lines()
        .find(|line| line.trim_start().starts_with("Ace"))
        .expect("Ace row");
    assert!(ace.contains("8++"));
    assert!(ace.contains("6+"));
    assert!(ace.ends_with("62%"));

    let cal = text
        .lines()
        .find(|line| line.trim_start().starts_with("Cal"))
        .expect("Cal row");
    assert!(cal.ends_with("R 12.5"));
}

#[test]
fn skills_json_marks_incapable_levels() {
    let value = render_json(&run_report(ReportKind::Skills));
    let rows = value["data"].as_array().expect("rows array");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1]["name"], "Bea");
    assert_eq!(rows[1]["skills"]["Melee"]["level"], "incapable");
    assert_eq!(rows[1]["skills"]["Cooking"]["level"], 9);
    assert_eq!(rows[0]["skills"]["Shooting"]["passion"], "major");
    assert!(rows[2]["mood"].is_null());
    assert_eq!(rows[2]["captivity_resistance"], 12.5);
}

#[test]
fn queue_text_lists_sections_in_order() {
    let text = render_text(
        &run_report(ReportKind::ProductionQueue),
        TextRenderOptions::default(),
    );
    let target = text.find(" Target count").expect("target heading");
    let repeat = text.find(" Repeat count").expect("repeat heading");
    let forever = text.find(" Forever").expect("forever heading");
    assert!(target < repeat && repeat < forever);
    assert!(text.contains("5x Fine Meal"));
    assert!(text.contains("Butcher Corpse Flesh"));
    assert!(!text.contains("Survival"));
}

#[test]
fn dead_pawns_json_carries_position() {
    let value = render_json(&run_report(ReportKind::DeadPawns));
    let pawns = value["data"].as_array().expect("pawns array");
    assert_eq!(pawns[0]["name"], "Fang");
    assert_eq!(pawns[0]["kind"], "Pirate");
    assert_eq!(pawns[0]["position"]["x"], 40);
    assert_eq!(pawns[0]["position"]["y"], 41);
}

#[test]
fn harvest_text_groups_by_location() {
    let text = render_text(&run_report(ReportKind::Harvest), TextRenderOptions::default());
    assert!(text.contains(" hydroponics\n"));
    assert!(text.contains("1x Rice (ripe)"));
    assert!(text.contains("2x Potato (maturing)"));
}
