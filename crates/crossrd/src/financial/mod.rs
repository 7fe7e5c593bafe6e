//! Per-subject financial assumptions and the 18–65 net-worth simulation.

mod defaults;
mod params;
mod timeline;
mod trajectory;

pub use defaults::{ProfessionDefaults, ProfessionDefaultsTable};
pub use params::{
    fellowship_years, training_years, FinancialParams, DEFAULT_TRAINING_YEARS, MAX_PHASE_YEARS,
    START_AGE,
};
pub use timeline::Timeline;
pub use trajectory::{
    simulate_trajectory, NetWorthPoint, NetWorthTrajectory, END_AGE, LOAN_TERM_YEARS,
    MID_CAREER_AGE, PEAK_AGE,
};

use serde::Serialize;

/// Headline money figures shown side by side across subjects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoneySummary {
    pub start: f64,
    pub peak: f64,
    pub lifetime: i64,
}

impl MoneySummary {
    pub fn new(params: &FinancialParams, trajectory: &NetWorthTrajectory) -> Self {
        Self {
            start: params.base.starting_salary,
            peak: params.base.peak_salary,
            lifetime: trajectory.lifetime(),
        }
    }
}
