//! Per-subject evaluation and assembly of the family document.

mod display;
mod output;
mod regression;
mod validate;

pub use display::{generate_key, golden_palette, shade_color, DisplayAssigner};
pub use output::{
    serialize_category_scores, Career, GroupSummary, Meta, OutputDocument, ProfessionSummary,
    RawDataSubset, Track, RAW_DATA_FIELDS,
};
pub use regression::{deep_diff, IGNORED_KEYS};
pub use validate::{validate, ValidationReport};

use crate::catalog::{Catalog, RadarScore};
use crate::difficulty::Difficulty;
use crate::family::{FamilyConfig, FamilyDataset};
use crate::financial::{
    simulate_trajectory, FinancialParams, MoneySummary, NetWorthTrajectory,
    ProfessionDefaultsTable, Timeline,
};
use crate::scoring::{
    all_scenario_totals, CategoryScores, ScenarioProfiles, ScenarioTotals, ScoringEngine,
};
use crate::stress::{derive_stress_scores, MatchResilienceTable, StressScores};
use crate::subject::Subject;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

/// Process-wide constant tables handed to every stage.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    pub catalog: Catalog,
    pub financial_defaults: ProfessionDefaultsTable,
    pub match_resilience: MatchResilienceTable,
}

impl ReferenceTables {
    pub fn standard() -> Self {
        Self {
            catalog: Catalog::standard(),
            financial_defaults: ProfessionDefaultsTable::standard(),
            match_resilience: MatchResilienceTable::standard(),
        }
    }

    /// Copy of the tables with a family's per-profession overrides applied.
    pub fn for_family(&self, config: &FamilyConfig) -> Self {
        Self {
            catalog: self.catalog.clone(),
            financial_defaults: self
                .financial_defaults
                .clone()
                .with_overrides(&config.financial_defaults),
            match_resilience: self
                .match_resilience
                .clone()
                .with_overrides(&config.match_resilience),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StressSummary {
    #[serde(flatten)]
    pub scores: StressScores,
    pub avg: f64,
}

impl From<StressScores> for StressSummary {
    fn from(scores: StressScores) -> Self {
        Self {
            avg: scores.average(),
            scores,
        }
    }
}

/// Every derived facet for one subject.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectRecord {
    #[serde(serialize_with = "serialize_category_scores")]
    pub scores: CategoryScores,
    pub scenario_totals: ScenarioTotals,
    pub financial: FinancialParams,
    pub net_worth: NetWorthTrajectory,
    pub stress: StressSummary,
    pub timeline: Timeline,
    pub radar: Vec<RadarScore>,
    pub money: MoneySummary,
    pub difficulty: Difficulty,
}

/// Adds the difficulty fields to `subject` so later stages can read them.
pub fn apply_difficulty(subject: &mut Subject, annual_graduates: f64) -> Difficulty {
    let difficulty = Difficulty::new(annual_graduates, subject.number_or("annualSpots", 0.0));
    subject.set("oneInX", f64::from(difficulty.one_in_x));
    subject.set("matchComp", f64::from(difficulty.competitiveness));
    difficulty
}

/// Runs every deriver over one subject.
pub fn evaluate_subject(
    subject: &mut Subject,
    annual_graduates: f64,
    engine: &ScoringEngine<'_>,
    profiles: &ScenarioProfiles,
    tables: &ReferenceTables,
) -> SubjectRecord {
    let difficulty = apply_difficulty(subject, annual_graduates);

    let scores = engine.score(subject);
    let scenario_totals = all_scenario_totals(&scores, profiles);

    let financial = FinancialParams::derive(subject, &tables.financial_defaults);
    let net_worth = simulate_trajectory(&financial);
    let money = MoneySummary::new(&financial, &net_worth);
    let timeline = Timeline::from_params(&financial);

    let stress = derive_stress_scores(subject, &tables.match_resilience).into();
    let radar = tables.catalog.radar_scores(&scores);

    debug!(
        subject = %subject.name,
        one_in_x = difficulty.one_in_x,
        lifetime = money.lifetime,
        "evaluated subject"
    );

    SubjectRecord {
        scores,
        scenario_totals,
        financial,
        net_worth,
        stress,
        timeline,
        radar,
        money,
        difficulty,
    }
}

/// Scores every subject of a family and assembles the output document.
/// Tracks keep the dataset's subject order.
pub fn process_family(
    dataset: FamilyDataset,
    tables: &ReferenceTables,
    generated_on: NaiveDate,
) -> OutputDocument {
    let FamilyDataset {
        config,
        subjects,
        rubric,
        coarse,
        profiles,
        source,
    } = dataset;

    let tables = tables.for_family(&config);
    let engine = ScoringEngine::new(&tables.catalog, &rubric, &coarse);
    let mut assigner = DisplayAssigner::new(&config, subjects.len());

    let tracks: Vec<Track> = subjects
        .into_iter()
        .enumerate()
        .map(|(position, mut subject)| {
            let graduates = config.annual_graduates(&subject.profession);
            let record = evaluate_subject(&mut subject, graduates, &engine, &profiles, &tables);
            let (key, color) = assigner.assign(position, &subject);
            Track {
                path: config.profession_label(&subject.profession).to_string(),
                raw_data: RawDataSubset::from_subject(&subject),
                group: subject.group.clone().unwrap_or_default(),
                name: subject.name,
                key,
                profession: subject.profession,
                color,
                record,
            }
        })
        .collect();
    info!(family = %config.slug, tracks = tracks.len(), "scored tracks");

    let professions = config
        .professions
        .iter()
        .enumerate()
        .map(|(position, (profession, info))| {
            let summary = ProfessionSummary {
                label: info.label.clone(),
                color: assigner.profession_color(position, profession),
                track_count: tracks
                    .iter()
                    .filter(|track| track.profession == profession)
                    .count(),
            };
            (profession.to_string(), summary)
        })
        .collect();

    let groups = config
        .groups
        .iter()
        .map(|(slug, info)| {
            let members = || tracks.iter().filter(|track| track.group == slug);
            let summary = GroupSummary {
                label: info.label.clone(),
                icon: info.icon.clone(),
                tagline: info.tagline.clone(),
                description: info.description.clone(),
                count: members().count(),
                salary_range: output::salary_range(members()),
            };
            (slug.to_string(), summary)
        })
        .collect();

    let careers = tracks
        .iter()
        .map(|track| Career {
            key: track.key.clone(),
            name: track.name.clone(),
            color: track.color.clone(),
            path: track.path.clone(),
            group: track.group.clone(),
        })
        .collect();

    let meta = Meta {
        profession_family: config.slug.clone(),
        family_name: config.name.clone(),
        headline: config.headline(),
        subtitle: config.subtitle().to_string(),
        icon: config.icon.clone(),
        last_updated: generated_on,
        total_tracks: tracks.len(),
        data_points: config.data_points.unwrap_or_else(|| coarse.data_point_count()),
        source_file: source,
    };

    OutputDocument {
        meta,
        professions,
        groups,
        careers,
        categories: tables.catalog.categories().to_vec(),
        radar_dimensions: tables.catalog.radar_dimensions().to_vec(),
        scenario_profiles: profiles,
        tracks,
        decision_tree: output::or_empty_map(&config.decision_tree),
        decision_tree_results: output::or_empty_map(&config.decision_tree_results),
        ranking: output::or_empty_list(&config.final_ranking),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{CoarseScores, ScenarioProfile, ScoringRubric};
    use std::collections::BTreeMap;

    fn config() -> FamilyConfig {
        serde_yaml::from_str(
            r##"
name: Healthcare
slug: healthcare
professions:
  MD/DO:
    label: Physician
    color: "#E55934"
    annualGraduates: 2000
  OD:
    label: Optometrist
groups:
  surgical:
    label: Surgical
  clinic:
    label: Clinic
match_resilience:
  OD: 9
final_ranking:
  - neurosurgery
"##,
        )
        .expect("config parses")
    }

    fn dataset(tables: &ReferenceTables) -> FamilyDataset {
        let subjects = vec![
            Subject::new("Neurosurgery", "MD/DO")
                .with_group("surgical")
                .with_field("annualSpots", 250.0)
                .with_field("peakSalary", 900.0)
                .with_field("residencyYears", 7.0),
            Subject::new("General Surgery", "MD/DO")
                .with_group("surgical")
                .with_field("annualSpots", 1000.0)
                .with_field("peakSalary", 500.0),
            Subject::new("Primary Eye Care", "OD").with_group("clinic"),
        ];
        let profiles = ScenarioProfiles::new(
            vec![ScenarioProfile::new(
                "money_only",
                BTreeMap::from([(7, 100)]),
            )],
            &tables.catalog,
        )
        .expect("profiles valid");
        FamilyDataset {
            config: config(),
            subjects,
            rubric: ScoringRubric::default(),
            coarse: CoarseScores::default(),
            profiles,
            source: crate::family::SourceKind::Yaml,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
    }

    #[test]
    fn difficulty_fields_are_written_before_scoring() {
        let mut subject = Subject::new("Neurosurgery", "MD/DO").with_field("annualSpots", 250.0);
        let difficulty = apply_difficulty(&mut subject, 2000.0);
        assert_eq!(difficulty.one_in_x, 8);
        assert_eq!(subject.number("oneInX"), Some(8.0));
        assert_eq!(
            subject.number("matchComp"),
            Some(f64::from(difficulty.competitiveness))
        );

        let mut unknown = Subject::new("Mystery", "MD/DO");
        let difficulty = apply_difficulty(&mut unknown, 2000.0);
        assert_eq!(difficulty.one_in_x, 999);
        assert_eq!(unknown.number("matchComp"), Some(1.0));
    }

    #[test]
    fn document_summarises_professions_groups_and_tracks() {
        let tables = ReferenceTables::standard();
        let document = process_family(dataset(&tables), &tables, today());

        assert_eq!(document.meta.total_tracks, 3);
        assert_eq!(document.meta.headline, "Career Guide: Healthcare");
        assert_eq!(document.meta.data_points, 0);

        let names: Vec<_> = document.tracks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Neurosurgery", "General Surgery", "Primary Eye Care"]);
        assert_eq!(document.tracks[0].key, "neurosurgery");
        assert_eq!(document.tracks[0].path, "Physician");
        assert_eq!(document.tracks[2].path, "Optometrist");

        let md = document.professions.get("MD/DO").expect("MD/DO summary");
        assert_eq!(md.track_count, 2);
        assert_eq!(md.color, "#E55934");

        let surgical = document.groups.get("surgical").expect("surgical group");
        assert_eq!(surgical.count, 2);
        assert_eq!(surgical.salary_range, [500.0, 900.0]);
        let clinic = document.groups.get("clinic").expect("clinic group");
        assert_eq!(clinic.salary_range, [0.0, 0.0]);

        assert_eq!(document.careers.len(), 3);
        assert_eq!(document.categories.len(), 14);
        assert!(document.decision_tree.is_mapping());
        assert!(document.ranking.is_sequence());
    }

    #[test]
    fn every_track_has_complete_facets() {
        let tables = ReferenceTables::standard();
        let document = process_family(dataset(&tables), &tables, today());

        for track in &document.tracks {
            assert_eq!(track.record.scores.len(), 14);
            assert!(track
                .record
                .scores
                .values()
                .all(|score| (1.0..=10.0).contains(score)));
            assert_eq!(track.record.net_worth.len(), 48);
            assert_eq!(track.record.radar.len(), 6);
            assert_eq!(track.record.scenario_totals.get("default"), Some(5.15));
            assert_eq!(track.record.scenario_totals.get("money_only"), Some(5.0));
        }

        let eye_care = &document.tracks[2];
        assert_eq!(eye_care.record.difficulty.one_in_x, 999);
        assert!(eye_care.record.stress.scores.match_failure >= 9);
    }

    #[test]
    fn serialized_track_is_flat() {
        let tables = ReferenceTables::standard();
        let document = process_family(dataset(&tables), &tables, today());
        let json = serde_json::to_value(&document).expect("serialize");

        assert_eq!(json["meta"]["last_updated"], "2026-10-19");
        assert_eq!(json["meta"]["source_file"], "yaml");
        let track = &json["tracks"][0];
        assert_eq!(track["scores"]["category_1"], 5.0);
        assert!(track["scenario_totals"]["default"].is_number());
        assert!(track["stress"]["avg"].is_number());
        assert!(track["stress"]["match"].is_number());
        assert_eq!(track["raw_data"]["oneInX"], 8);
        assert_eq!(track["timeline"]["earnAge"], 33);
        assert_eq!(json["scenario_profiles"]["money_only"]["7"], 100);
        assert_eq!(json["ranking"][0], "neurosurgery");
    }
}
