use super::engine::{CategoryScores, NEUTRAL_SCORE};
use super::normalize::round_to;
use super::ScoringError;
use crate::catalog::{Catalog, CategoryId};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::warn;

pub const DEFAULT_PROFILE: &str = "default";

/// Named category weights (percent) describing one user preference.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioProfile {
    pub name: String,
    pub weights: BTreeMap<CategoryId, u32>,
}

impl ScenarioProfile {
    pub fn new(name: impl Into<String>, weights: BTreeMap<CategoryId, u32>) -> Self {
        Self {
            name: name.into(),
            weights,
        }
    }

    pub fn weight_sum(&self) -> u32 {
        self.weights.values().sum()
    }
}

/// Ordered set of profiles; the first is always the catalog's default weights.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioProfiles {
    profiles: Vec<ScenarioProfile>,
}

impl ScenarioProfiles {
    /// Validates profile categories against the catalog and pins the default
    /// profile to the catalog's weights.
    pub fn new(
        profiles: Vec<ScenarioProfile>,
        catalog: &Catalog,
    ) -> Result<Self, ScoringError> {
        let mut ordered = vec![ScenarioProfile::new(
            DEFAULT_PROFILE,
            catalog.default_weights(),
        )];

        for profile in profiles {
            if let Some(unknown) = profile.weights.keys().find(|id| !catalog.contains(**id)) {
                return Err(ScoringError::UnknownCategory {
                    context: format!("scenario profile '{}'", profile.name),
                    category: *unknown,
                });
            }

            if profile.name == DEFAULT_PROFILE {
                if profile.weights != ordered[0].weights {
                    warn!("default profile in source differs from category weights; using category weights");
                }
                continue;
            }

            let sum = profile.weight_sum();
            if !(99..=101).contains(&sum) {
                warn!(profile = %profile.name, sum, "scenario weights do not sum to ~100");
            }
            ordered.push(profile);
        }

        Ok(Self { profiles: ordered })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScenarioProfile> {
        self.profiles.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ScenarioProfile> {
        self.profiles.iter().find(|profile| profile.name == name)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Serialize for ScenarioProfiles {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.profiles.iter().map(|profile| {
            let weights: BTreeMap<String, u32> = profile
                .weights
                .iter()
                .map(|(id, weight)| (id.to_string(), *weight))
                .collect();
            (profile.name.as_str(), weights)
        }))
    }
}

/// Weighted blend of category scores; missing scores count as neutral.
pub fn scenario_total(scores: &CategoryScores, weights: &BTreeMap<CategoryId, u32>) -> f64 {
    let total: f64 = weights
        .iter()
        .map(|(id, weight)| scores.get(id).copied().unwrap_or(NEUTRAL_SCORE) * *weight as f64 / 100.0)
        .sum();
    round_to(total, 2)
}

/// Profile name → total, in profile order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioTotals(Vec<(String, f64)>);

impl ScenarioTotals {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(profile, _)| profile == name)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, total)| (name.as_str(), *total))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ScenarioTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, total)| (name, total)))
    }
}

pub fn all_scenario_totals(scores: &CategoryScores, profiles: &ScenarioProfiles) -> ScenarioTotals {
    ScenarioTotals(
        profiles
            .iter()
            .map(|profile| (profile.name.clone(), scenario_total(scores, &profile.weights)))
            .collect(),
    )
}
