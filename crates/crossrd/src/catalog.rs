use crate::scoring::{round_to, CategoryScores, NEUTRAL_SCORE};
use serde::Serialize;
use std::collections::BTreeMap;

pub type CategoryId = u8;

/// One of the fixed evaluation axes every subject is scored on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: &'static str,
    #[serde(rename = "weight_default")]
    pub weight: u32,
    pub description: &'static str,
}

/// Display-level aggregate averaging a handful of categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadarDimension {
    #[serde(rename = "dim")]
    pub name: &'static str,
    pub emoji: &'static str,
    pub categories: Vec<CategoryId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarScore {
    #[serde(rename = "dim")]
    pub name: &'static str,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    radar: Vec<RadarDimension>,
}

impl Catalog {
    pub fn standard() -> Self {
        let categories = vec![
            category(1, "Pre-Professional Phase", 7, "How hard is it to start?"),
            category(2, "Admissions Competitiveness", 7, "Can you realistically get in?"),
            category(3, "Professional School", 5, "What's the school experience like?"),
            category(4, "Post-Graduate Training", 8, "How long/hard is the road after school?"),
            category(5, "Financial Picture", 10, "Cost, debt, time to financial freedom"),
            category(6, "Scope of Practice & Autonomy", 8, "What can you do independently?"),
            category(7, "Career Economics", 12, "How much do you earn over a career?"),
            category(8, "Daily Life & Practice Reality", 8, "What does the work feel like?"),
            category(9, "Lifestyle & Work-Life Balance", 10, "Can you have a life outside work?"),
            category(10, "Job Market & Demand", 5, "Will you find work?"),
            category(11, "AI Revolution Impact", 7, "How future-proof is this career?"),
            category(12, "Professional Satisfaction", 8, "Will you enjoy this long-term?"),
            category(13, "Demographics & Culture", 3, "Culture fit?"),
            category(14, "Risk Factors & Downsides", 5, "Hidden costs and dangers"),
        ];

        let radar = vec![
            radar("Money", "\u{1f4b0}", &[5, 7]),
            radar("Happiness", "\u{1f60a}", &[12]),
            radar("Free Time", "\u{23f0}", &[9]),
            radar("Hard to Get In", "\u{1f3af}", &[1, 2, 4]),
            radar("Robot-Proof", "\u{1f916}", &[11]),
            radar("Safety Net", "\u{1f6e1}\u{fe0f}", &[14]),
        ];

        Self { categories, radar }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn radar_dimensions(&self) -> &[RadarDimension] {
        &self.radar
    }

    pub fn category_ids(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.categories.iter().map(|category| category.id)
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.categories.iter().any(|category| category.id == id)
    }

    pub fn default_weights(&self) -> BTreeMap<CategoryId, u32> {
        self.categories
            .iter()
            .map(|category| (category.id, category.weight))
            .collect()
    }

    /// Unweighted mean per radar dimension; absent categories count as neutral.
    pub fn radar_scores(&self, scores: &CategoryScores) -> Vec<RadarScore> {
        self.radar
            .iter()
            .map(|dimension| {
                let sum: f64 = dimension
                    .categories
                    .iter()
                    .map(|id| scores.get(id).copied().unwrap_or(NEUTRAL_SCORE))
                    .sum();
                let mean = sum / dimension.categories.len().max(1) as f64;
                RadarScore {
                    name: dimension.name,
                    score: round_to(mean, 1),
                }
            })
            .collect()
    }
}

fn category(
    id: CategoryId,
    name: &'static str,
    weight: u32,
    description: &'static str,
) -> Category {
    Category {
        id,
        name,
        weight,
        description,
    }
}

fn radar(name: &'static str, emoji: &'static str, categories: &[CategoryId]) -> RadarDimension {
    RadarDimension {
        name,
        emoji,
        categories: categories.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_fourteen_weighted_categories() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.categories().len(), 14);
        let ids: Vec<_> = catalog.category_ids().collect();
        assert_eq!(ids, (1..=14).collect::<Vec<CategoryId>>());
        // the published weights total 103, not 100
        assert_eq!(catalog.default_weights().values().sum::<u32>(), 103);
    }

    #[test]
    fn radar_dimensions_reference_known_categories() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.radar_dimensions().len(), 6);
        for dimension in catalog.radar_dimensions() {
            assert!(!dimension.categories.is_empty(), "{} is empty", dimension.name);
            assert!(dimension.categories.iter().all(|id| catalog.contains(*id)));
        }
    }

    #[test]
    fn radar_scores_average_member_categories() {
        let catalog = Catalog::standard();
        let mut scores = CategoryScores::new();
        scores.insert(5, 8.0);
        scores.insert(7, 6.5);
        scores.insert(1, 2.0);
        scores.insert(2, 3.0);

        let radar = catalog.radar_scores(&scores);
        let money = radar.iter().find(|r| r.name == "Money").expect("money");
        assert_eq!(money.score, 7.3);
        // category 4 is missing and counts as neutral
        let entry = radar.iter().find(|r| r.name == "Hard to Get In").expect("entry");
        assert_eq!(entry.score, 3.3);
    }
}
