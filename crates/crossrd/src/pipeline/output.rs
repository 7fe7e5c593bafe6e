//! Shape of the JSON document consumed by the front end.

use super::SubjectRecord;
use crate::catalog::{Category, RadarDimension};
use crate::family::{OrderedMap, SourceKind};
use crate::scoring::{CategoryScores, ScenarioProfiles};
use crate::subject::{RawValue, Subject};
use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Raw fields echoed onto every track, with the value used when absent.
pub const RAW_DATA_FIELDS: &[(&str, f64)] = &[
    ("startSalary", 0.0),
    ("midSalary", 0.0),
    ("peakSalary", 0.0),
    ("typicalPeak", 0.0),
    ("hoursWeek", 0.0),
    ("burnout", 0.0),
    ("satisfaction", 0.0),
    ("chooseAgain", 0.0),
    ("malpracticeCost", 0.0),
    ("vacation", 0.0),
    ("matchComp", 0.0),
    ("annualSpots", 0.0),
    ("oneInX", 999.0),
    ("callSchedule", 0.0),
    ("physicalToll", 0.0),
    ("emotionalToll", 0.0),
];

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub profession_family: String,
    pub family_name: String,
    pub headline: String,
    pub subtitle: String,
    pub icon: String,
    pub last_updated: NaiveDate,
    pub total_tracks: usize,
    pub data_points: usize,
    pub source_file: SourceKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfessionSummary {
    pub label: String,
    pub color: String,
    pub track_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub label: String,
    pub icon: String,
    pub tagline: String,
    pub description: String,
    pub count: usize,
    pub salary_range: [f64; 2],
}

#[derive(Debug, Clone, Serialize)]
pub struct Career {
    pub key: String,
    pub name: String,
    pub color: String,
    pub path: String,
    pub group: String,
}

/// Echo of selected raw fields, in a fixed order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDataSubset(Vec<(&'static str, RawValue)>);

impl RawDataSubset {
    pub fn from_subject(subject: &Subject) -> Self {
        Self(
            RAW_DATA_FIELDS
                .iter()
                .map(|(field, fallback)| {
                    let value = subject
                        .field(field)
                        .cloned()
                        .unwrap_or(RawValue::Number(*fallback));
                    (*field, value)
                })
                .collect(),
        )
    }

    pub fn get(&self, field: &str) -> Option<&RawValue> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
    }
}

impl Serialize for RawDataSubset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(field, value)| (*field, value)))
    }
}

/// Writes category scores as `category_<id>` keys in id order.
pub fn serialize_category_scores<S: Serializer>(
    scores: &CategoryScores,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(
        scores
            .iter()
            .map(|(id, score)| (format!("category_{id}"), score)),
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct Track {
    pub name: String,
    pub key: String,
    pub profession: String,
    pub group: String,
    pub color: String,
    pub path: String,
    pub raw_data: RawDataSubset,
    #[serde(flatten)]
    pub record: SubjectRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputDocument {
    pub meta: Meta,
    pub professions: OrderedMap<ProfessionSummary>,
    pub groups: OrderedMap<GroupSummary>,
    pub careers: Vec<Career>,
    pub categories: Vec<Category>,
    pub radar_dimensions: Vec<RadarDimension>,
    pub scenario_profiles: ScenarioProfiles,
    pub tracks: Vec<Track>,
    pub decision_tree: serde_yaml::Value,
    pub decision_tree_results: serde_yaml::Value,
    pub ranking: serde_yaml::Value,
}

impl OutputDocument {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Peak-salary span across tracks that report one.
pub(crate) fn salary_range<'a>(tracks: impl Iterator<Item = &'a Track>) -> [f64; 2] {
    let peaks: Vec<f64> = tracks
        .filter_map(|track| track.raw_data.get("peakSalary"))
        .filter_map(crate::scoring::parse_numeric)
        .filter(|peak| *peak != 0.0)
        .collect();
    if peaks.is_empty() {
        return [0.0, 0.0];
    }
    let min = peaks.iter().copied().fold(f64::INFINITY, f64::min);
    let max = peaks.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    [min, max]
}

pub(crate) fn or_empty_map(value: &serde_yaml::Value) -> serde_yaml::Value {
    if value.is_null() {
        serde_yaml::Value::Mapping(serde_yaml::Mapping::new())
    } else {
        value.clone()
    }
}

pub(crate) fn or_empty_list(value: &serde_yaml::Value) -> serde_yaml::Value {
    if value.is_null() {
        serde_yaml::Value::Sequence(Vec::new())
    } else {
        value.clone()
    }
}
