use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Profession-level financial assumptions. Money is in thousands of dollars
/// per year and rates are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionDefaults {
    pub undergrad_cost_per_yr: f64,
    pub undergrad_years: u32,
    pub prof_school_cost_per_yr: f64,
    pub prof_school_years: u32,
    pub trainee_salary: f64,
    pub education_debt: f64,
    pub loan_rate: f64,
    pub living_expenses: f64,
    pub living_exp_growth: f64,
    pub overhead_per_yr: f64,
    pub salary_growth_to_mid: f64,
    pub salary_growth_to_peak: f64,
    pub post_peak_growth: f64,
    pub npv_discount_rate: f64,
    #[serde(default = "default_starting_salary")]
    pub starting_salary: f64,
    #[serde(default = "default_mid_salary")]
    pub mid_salary: f64,
    #[serde(default = "default_peak_salary")]
    pub peak_salary: f64,
    #[serde(default = "default_malpractice")]
    pub malpractice_per_yr: f64,
}

fn default_starting_salary() -> f64 {
    200.0
}

fn default_mid_salary() -> f64 {
    300.0
}

fn default_peak_salary() -> f64 {
    400.0
}

fn default_malpractice() -> f64 {
    10.0
}

/// Ordered lookup of profession defaults. Unknown professions resolve to the
/// first entry.
#[derive(Debug, Clone)]
pub struct ProfessionDefaultsTable {
    entries: Vec<(String, ProfessionDefaults)>,
}

impl ProfessionDefaultsTable {
    pub fn standard() -> Self {
        #[rustfmt::skip]
        let rows: &[(&str, [f64; 14])] = &[
            // undergrad $/yr, yrs, school $/yr, yrs, trainee, debt, loan%, living, living%, overhead, g_mid, g_peak, post, npv
            ("MD/DO",     [35.0, 4.0, 60.0, 4.0, 65.0, 380.0, 6.5, 50.0, 2.5, 5.0, 3.0, 2.5, 1.0, 5.0]),
            ("DDS/DMD",   [35.0, 4.0, 55.0, 4.0, 60.0, 300.0, 6.5, 48.0, 2.5, 8.0, 3.0, 2.5, 1.0, 5.0]),
            ("DPM",       [35.0, 4.0, 50.0, 4.0, 60.0, 340.0, 6.5, 45.0, 2.5, 5.0, 3.5, 2.5, 1.0, 5.0]),
            ("OD",        [35.0, 4.0, 45.0, 4.0, 0.0, 230.0, 6.5, 45.0, 2.5, 5.0, 3.0, 2.0, 1.0, 5.0]),
            ("JD",        [35.0, 4.0, 55.0, 3.0, 0.0, 200.0, 7.0, 48.0, 2.5, 3.0, 4.0, 3.0, 1.0, 5.0]),
            ("JD+Patent", [35.0, 4.0, 55.0, 3.0, 0.0, 220.0, 7.0, 48.0, 2.5, 3.0, 4.0, 3.0, 1.0, 5.0]),
            ("Paralegal", [25.0, 4.0, 10.0, 1.0, 0.0, 40.0, 6.5, 42.0, 2.5, 0.0, 3.0, 2.0, 1.0, 5.0]),
            ("Judge",     [35.0, 4.0, 55.0, 3.0, 0.0, 200.0, 7.0, 48.0, 2.5, 0.0, 2.0, 1.5, 1.0, 5.0]),
            ("BS",        [25.0, 4.0, 0.0, 0.0, 0.0, 35.0, 5.5, 45.0, 2.5, 0.0, 5.0, 3.0, 1.0, 5.0]),
            ("MS",        [25.0, 4.0, 30.0, 2.0, 25.0, 55.0, 5.5, 45.0, 2.5, 0.0, 5.0, 3.0, 1.0, 5.0]),
            ("PhD",       [25.0, 4.0, 0.0, 5.0, 35.0, 35.0, 5.5, 42.0, 2.5, 0.0, 4.0, 3.0, 1.0, 5.0]),
            ("BBA",       [22.0, 4.0, 0.0, 0.0, 0.0, 30.0, 5.5, 42.0, 2.5, 0.0, 4.0, 3.0, 1.0, 5.0]),
            ("MBA",       [25.0, 4.0, 75.0, 2.0, 0.0, 120.0, 6.5, 52.0, 2.5, 0.0, 7.0, 4.0, 1.0, 5.0]),
            ("CPA-CFA",   [22.0, 4.0, 5.0, 1.0, 50.0, 40.0, 5.5, 42.0, 2.5, 1.0, 5.0, 3.0, 1.0, 5.0]),
        ];

        let entries = rows
            .iter()
            .map(|(profession, row)| (profession.to_string(), from_row(row)))
            .collect();
        Self { entries }
    }

    /// Replaces or appends entries, keeping the original order for known keys.
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, ProfessionDefaults>) -> Self {
        for (profession, defaults) in overrides {
            match self.entries.iter_mut().find(|(key, _)| key == profession) {
                Some((_, existing)) => *existing = defaults.clone(),
                None => self.entries.push((profession.clone(), defaults.clone())),
            }
        }
        self
    }

    pub fn get(&self, profession: &str) -> Option<&ProfessionDefaults> {
        self.entries
            .iter()
            .find(|(key, _)| key == profession)
            .map(|(_, defaults)| defaults)
    }

    /// Defaults for `profession`, falling back to the first entry.
    pub fn resolve(&self, profession: &str) -> &ProfessionDefaults {
        if let Some(defaults) = self.get(profession) {
            return defaults;
        }
        warn!(profession, "no financial defaults for profession; using first entry");
        &self.entries[0].1
    }
}

fn from_row(row: &[f64; 14]) -> ProfessionDefaults {
    ProfessionDefaults {
        undergrad_cost_per_yr: row[0],
        undergrad_years: row[1] as u32,
        prof_school_cost_per_yr: row[2],
        prof_school_years: row[3] as u32,
        trainee_salary: row[4],
        education_debt: row[5],
        loan_rate: row[6],
        living_expenses: row[7],
        living_exp_growth: row[8],
        overhead_per_yr: row[9],
        salary_growth_to_mid: row[10],
        salary_growth_to_peak: row[11],
        post_peak_growth: row[12],
        npv_discount_rate: row[13],
        starting_salary: default_starting_salary(),
        mid_salary: default_mid_salary(),
        peak_salary: default_peak_salary(),
        malpractice_per_yr: default_malpractice(),
    }
}
