use super::defaults::{ProfessionDefaults, ProfessionDefaultsTable};
use super::trajectory::END_AGE;
use crate::subject::Subject;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Training length used when the subject's duration field is unusable.
pub const DEFAULT_TRAINING_YEARS: u32 = 3;
pub const START_AGE: u32 = 18;
/// Longest single training phase that still fits inside the simulated career.
pub const MAX_PHASE_YEARS: u32 = END_AGE - START_AGE;

static FELLOWSHIP_PATTERN: OnceLock<Regex> = OnceLock::new();

fn fellowship_pattern() -> &'static Regex {
    FELLOWSHIP_PATTERN.get_or_init(|| {
        Regex::new(r"(\d+)\s*(?:-\s*(\d+))?\s*yr").expect("fellowship pattern compiles")
    })
}

/// Everything the trajectory simulator needs for one subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialParams {
    #[serde(flatten)]
    pub base: ProfessionDefaults,
    pub residency_years: u32,
    pub fellowship_years: u32,
    pub age_independent: u32,
    pub typical_peak: f64,
}

impl FinancialParams {
    /// Overlays the subject's salary, liability and training fields on the
    /// profession defaults.
    pub fn derive(subject: &Subject, table: &ProfessionDefaultsTable) -> Self {
        let defaults = table.resolve(&subject.profession);
        let residency_years = training_years(subject);
        let fellowship_years = fellowship_years(subject);

        let mut base = defaults.clone();
        base.starting_salary = subject.number_or("startSalary", defaults.starting_salary);
        base.mid_salary = subject.number_or("midSalary", defaults.mid_salary);
        base.peak_salary = subject.number_or("peakSalary", defaults.peak_salary);
        base.malpractice_per_yr = subject
            .number("malpracticeCost")
            .map(f64::trunc)
            .unwrap_or(defaults.malpractice_per_yr);

        let typical_peak = subject
            .number("typicalPeak")
            .unwrap_or_else(|| (base.mid_salary * 1.2).round_ties_even());

        let mut params = Self {
            base,
            residency_years,
            fellowship_years,
            age_independent: 0,
            typical_peak,
        };
        params.age_independent = params.practice_start();
        params
    }

    /// Phase ends saturate rather than overflow on oversized durations.
    pub fn undergrad_end(&self) -> u32 {
        START_AGE.saturating_add(self.base.undergrad_years)
    }

    pub fn school_end(&self) -> u32 {
        self.undergrad_end().saturating_add(self.base.prof_school_years)
    }

    pub fn training_end(&self) -> u32 {
        self.school_end().saturating_add(self.residency_years)
    }

    pub fn practice_start(&self) -> u32 {
        self.training_end().saturating_add(self.fellowship_years)
    }
}

/// Whole years of residency/training; fractional readings are truncated and
/// implausible lengths are capped at [`MAX_PHASE_YEARS`].
pub fn training_years(subject: &Subject) -> u32 {
    subject
        .number("residencyYears")
        .filter(|years| *years >= 0.0)
        .map(|years| years.trunc().min(f64::from(MAX_PHASE_YEARS)) as u32)
        .unwrap_or(DEFAULT_TRAINING_YEARS)
}

/// Lower bound of an optional fellowship such as "Optional 1-2yr".
pub fn fellowship_years(subject: &Subject) -> u32 {
    subject
        .text("fellowshipOptions")
        .map(str::to_lowercase)
        .and_then(|text| {
            fellowship_pattern()
                .captures(&text)
                .and_then(|captures| captures[1].parse::<u32>().ok())
        })
        .map_or(0, |years| years.min(MAX_PHASE_YEARS))
}
