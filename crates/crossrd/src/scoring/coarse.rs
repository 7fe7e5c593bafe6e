use super::normalize::round_to;
use crate::catalog::CategoryId;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Profession-wide survey data for one category.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CoarseBucket {
    #[serde(default)]
    pub scores: Vec<f64>,
    #[serde(default)]
    pub average: Option<f64>,
}

impl CoarseBucket {
    pub fn new(scores: Vec<f64>, average: Option<f64>) -> Self {
        Self { scores, average }
    }

    /// The externally computed average, or the list mean when none was stored.
    pub fn precomputed_average(&self) -> Option<f64> {
        self.average.or_else(|| {
            if self.scores.is_empty() {
                None
            } else {
                let sum: f64 = self.scores.iter().sum();
                Some(round_to(sum / self.scores.len() as f64, 2))
            }
        })
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty() && self.average.is_none()
    }
}

/// Coarse buckets for one profession keyed by category.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfessionCoarseScores {
    #[serde(default)]
    pub l1_data_points: BTreeMap<CategoryId, CoarseBucket>,
}

impl ProfessionCoarseScores {
    pub fn bucket(&self, category: CategoryId) -> Option<&CoarseBucket> {
        self.l1_data_points.get(&category)
    }

    pub fn data_point_count(&self) -> usize {
        self.l1_data_points
            .values()
            .map(|bucket| bucket.scores.len())
            .sum()
    }
}

/// All coarse data for a family, keyed by profession.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CoarseScores {
    #[serde(default)]
    professions: BTreeMap<String, ProfessionCoarseScores>,
}

impl CoarseScores {
    pub fn insert(&mut self, profession: impl Into<String>, scores: ProfessionCoarseScores) {
        self.professions.insert(profession.into(), scores);
    }

    pub fn bucket(&self, profession: &str, category: CategoryId) -> Option<&CoarseBucket> {
        self.professions
            .get(profession)
            .and_then(|scores| scores.bucket(category))
    }

    pub fn professions(&self) -> impl Iterator<Item = &str> {
        self.professions.keys().map(String::as_str)
    }

    pub fn data_point_count(&self) -> usize {
        self.professions
            .values()
            .map(ProfessionCoarseScores::data_point_count)
            .sum()
    }
}
