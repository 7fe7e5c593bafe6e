use chrono::NaiveDate;
use crossrd::catalog::Catalog;
use crossrd::family::{list_families, FamilyDataset, SourceKind};
use crossrd::pipeline::{deep_diff, process_family, validate, OutputDocument, ReferenceTables};
use serde_json::Value;
use std::path::Path;

const DATA_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data");

fn run(date: (i32, u32, u32)) -> OutputDocument {
    let tables = ReferenceTables::standard();
    let dataset = FamilyDataset::load(Path::new(DATA_ROOT), "healthcare", &tables.catalog)
        .expect("sample family loads");
    let today = NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid date");
    process_family(dataset, &tables, today)
}

fn as_json(document: &OutputDocument) -> Value {
    serde_json::to_value(document).expect("document serializes")
}

#[test]
fn sample_family_is_registered() {
    let families = list_families(Path::new(DATA_ROOT)).expect("data root readable");
    assert!(families.contains(&"healthcare".to_string()));
}

#[test]
fn yaml_and_sheet_sources_are_merged() {
    let dataset = FamilyDataset::load(Path::new(DATA_ROOT), "healthcare", &Catalog::standard())
        .expect("sample family loads");
    assert_eq!(dataset.source, SourceKind::Mixed);
    assert_eq!(dataset.subjects.len(), 10);

    let sheet_rows: Vec<&str> = dataset
        .subjects
        .iter()
        .filter(|subject| subject.profession == "OD")
        .map(|subject| subject.name.as_str())
        .collect();
    assert_eq!(
        sheet_rows,
        vec!["Primary Eye Care", "Pediatric Optometry", "Ocular Disease"]
    );
}

#[test]
fn processed_sample_passes_validation() {
    let json = as_json(&run((2026, 10, 19)));
    let report = validate(&json);
    assert!(report.passed(), "validation errors: {:?}", report.errors);
    assert_eq!(report.total_tracks, 10);
    assert_eq!(json["meta"]["source_file"], "yaml+csv");
    assert_eq!(json["meta"]["data_points"], 107);
}

#[test]
fn tracks_carry_every_facet() {
    let document = run((2026, 10, 19));
    let catalog = Catalog::standard();

    for track in &document.tracks {
        assert_eq!(track.record.net_worth.len(), 48, "{}", track.name);
        assert_eq!(track.record.scores.len(), catalog.categories().len());
        for score in track.record.scores.values() {
            assert!((1.0..=10.0).contains(score), "{} scored {score}", track.name);
        }
        assert!(track.record.scenario_totals.get("default").is_some());
        assert!(track.record.scenario_totals.get("max_earnings").is_some());
    }

    let derm = document
        .tracks
        .iter()
        .find(|track| track.name == "Dermatology")
        .expect("dermatology track");
    assert_eq!(derm.key, "derm");
    assert_eq!(derm.color, "#D4A537");
    assert_eq!(derm.path, "Physician");

    let surgery = document
        .tracks
        .iter()
        .find(|track| track.name == "Oral and Maxillofacial Surgery")
        .expect("oral surgery track");
    assert_eq!(surgery.key, "oral_and_maxillofacial_s");
}

#[test]
fn summaries_count_tracks() {
    let json = as_json(&run((2026, 10, 19)));
    assert_eq!(json["professions"]["MD/DO"]["track_count"], 4);
    assert_eq!(json["professions"]["OD"]["track_count"], 3);
    assert_eq!(json["groups"]["surgical"]["count"], 2);
    assert_eq!(json["groups"]["surgical"]["salary_range"][1], 1000.0);
    assert_eq!(json["careers"].as_array().map(Vec::len), Some(10));
    assert_eq!(json["ranking"][0], "derm");
}

#[test]
fn repeated_runs_only_differ_in_timestamp() {
    let first = as_json(&run((2026, 1, 1)));
    let second = as_json(&run((2026, 10, 19)));
    assert_ne!(first["meta"]["last_updated"], second["meta"]["last_updated"]);
    assert!(deep_diff(&first, &second).is_empty());
}
