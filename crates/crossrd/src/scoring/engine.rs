use super::coarse::{CoarseBucket, CoarseScores};
use super::normalize::round_to;
use super::rubric::ScoringRubric;
use crate::catalog::{Catalog, CategoryId};
use crate::subject::Subject;
use std::collections::BTreeMap;
use tracing::debug;

/// Score assigned to a category with no evidence at all.
pub const NEUTRAL_SCORE: f64 = 5.0;

pub type CategoryScores = BTreeMap<CategoryId, f64>;

/// Which evidence produced a blended category score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendSource {
    /// Every coarse data point and every fine score averaged together.
    Combined,
    FineOnly,
    /// The coarse bucket's stored average, used as-is.
    CoarseOnly,
    Neutral,
}

/// Blends coarse and fine evidence for one category, rounded to 2 decimals.
///
/// Coarse points are not pre-averaged in the combined case, so a category with
/// many profession-level points weighs those points more heavily than the
/// subject's own fields.
pub fn blend(coarse: Option<&CoarseBucket>, fine: &[f64]) -> (f64, BlendSource) {
    let coarse_points = coarse.map(|bucket| bucket.scores.as_slice()).unwrap_or(&[]);
    let coarse_average = coarse.and_then(CoarseBucket::precomputed_average);

    let (value, source) = match (coarse_points.is_empty(), fine.is_empty(), coarse_average) {
        (false, false, _) => (
            mean(coarse_points.iter().chain(fine.iter())),
            BlendSource::Combined,
        ),
        (_, false, _) => (mean(fine.iter()), BlendSource::FineOnly),
        (_, true, Some(average)) => (average, BlendSource::CoarseOnly),
        (_, true, None) => (NEUTRAL_SCORE, BlendSource::Neutral),
    };

    (round_to(value.clamp(1.0, 10.0), 2), source)
}

fn mean<'a>(values: impl Iterator<Item = &'a f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        NEUTRAL_SCORE
    } else {
        sum / count as f64
    }
}

/// Scores subjects against a validated rubric and a family's coarse data.
pub struct ScoringEngine<'a> {
    catalog: &'a Catalog,
    rubric: &'a ScoringRubric,
    coarse: &'a CoarseScores,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(catalog: &'a Catalog, rubric: &'a ScoringRubric, coarse: &'a CoarseScores) -> Self {
        Self {
            catalog,
            rubric,
            coarse,
        }
    }

    /// Produces a score for every catalog category.
    pub fn score(&self, subject: &Subject) -> CategoryScores {
        self.catalog
            .category_ids()
            .map(|category| {
                let fine = self.fine_scores(subject, category);
                let coarse = self.coarse.bucket(&subject.profession, category);
                let (score, source) = blend(coarse, &fine);
                debug!(
                    subject = %subject.name,
                    category,
                    score,
                    source = ?source,
                    "blended category score"
                );
                (category, score)
            })
            .collect()
    }

    fn fine_scores(&self, subject: &Subject, category: CategoryId) -> Vec<f64> {
        self.rubric
            .decision_fields(category)
            .filter_map(|entry| {
                subject
                    .field(&entry.field)
                    .and_then(|raw| entry.conversion.apply(raw))
            })
            .collect()
    }
}
