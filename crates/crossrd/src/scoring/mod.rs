//! Conversion of raw subject fields into 1–10 category scores and weighted
//! scenario totals.

mod coarse;
mod engine;
mod normalize;
mod rubric;
mod scenario;

pub use coarse::{CoarseBucket, CoarseScores, ProfessionCoarseScores};
pub use engine::{blend, BlendSource, CategoryScores, ScoringEngine, NEUTRAL_SCORE};
pub use normalize::{parse_numeric, parse_numeric_str, rescale, round_to, FLAT_RANGE_SCORE};
pub use rubric::{
    convert, Conversion, ConversionSpec, FieldKind, RubricEntry, RubricFieldSpec, ScoringRubric,
};
pub use scenario::{
    all_scenario_totals, scenario_total, ScenarioProfile, ScenarioProfiles, ScenarioTotals,
    DEFAULT_PROFILE,
};

use crate::catalog::CategoryId;
use thiserror::Error;

/// Rubric and profile problems. These indicate broken configuration and are
/// never recovered into neutral defaults.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("unknown conversion method '{0}'")]
    UnknownConversion(String),
    #[error("linear conversion requires both min and max")]
    MissingBounds,
    #[error("rubric field '{field}' uses a linear conversion without min/max")]
    FieldMissingBounds { field: String },
    #[error("rubric field '{field}' does not name a category")]
    NoCategory { field: String },
    #[error("{context} references category {category}, which is not in the catalog")]
    UnknownCategory {
        context: String,
        category: CategoryId,
    },
}
