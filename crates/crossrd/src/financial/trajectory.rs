use super::params::{FinancialParams, START_AGE};
use serde::Serialize;

pub const END_AGE: u32 = 65;
/// Age by which the salary reaches the mid-career figure.
pub const MID_CAREER_AGE: u32 = 40;
/// Age by which the salary reaches the peak figure.
pub const PEAK_AGE: u32 = 48;
/// Years of practice over which education debt is repaid.
pub const LOAN_TERM_YEARS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetWorthPoint {
    pub age: u32,
    pub net_worth: i64,
}

/// Cumulative net worth for every age from 18 to 65 inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NetWorthTrajectory {
    points: Vec<NetWorthPoint>,
}

impl NetWorthTrajectory {
    pub fn points(&self) -> &[NetWorthPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Net worth at `age`; zero outside the simulated range.
    pub fn net_worth_at(&self, age: u32) -> i64 {
        self.points
            .iter()
            .find(|point| point.age == age)
            .map(|point| point.net_worth)
            .unwrap_or(0)
    }

    pub fn lifetime(&self) -> i64 {
        self.net_worth_at(END_AGE)
    }
}

/// Simulates yearly net cash flow from 18 to 65 and accumulates it.
///
/// Debt is repaid as `(debt / 10) * (1 + loan rate)` for each of the first ten
/// practice years. That is a flat interest-inclusive approximation, not an
/// amortization schedule.
pub fn simulate_trajectory(params: &FinancialParams) -> NetWorthTrajectory {
    let base = &params.base;
    let loan_rate = base.loan_rate / 100.0;
    let living_growth = base.living_exp_growth / 100.0;
    let post_peak_growth = base.post_peak_growth / 100.0;

    let undergrad_end = params.undergrad_end();
    let school_end = params.school_end();
    let practice_start = params.practice_start();

    let mut cumulative = 0.0;
    let points = (START_AGE..=END_AGE)
        .map(|age| {
            let living = base.living_expenses * (1.0 + living_growth).powi((age - START_AGE) as i32);

            let net = if age < undergrad_end {
                -(base.undergrad_cost_per_yr + living)
            } else if age < school_end {
                -(base.prof_school_cost_per_yr + living)
            } else if age < practice_start {
                base.trainee_salary - living
            } else {
                let years_practicing = age - practice_start;
                let salary = salary_at(params, age, post_peak_growth);

                let mut costs = living + base.malpractice_per_yr + base.overhead_per_yr;
                if years_practicing < LOAN_TERM_YEARS {
                    costs += (base.education_debt / LOAN_TERM_YEARS as f64) * (1.0 + loan_rate);
                }
                salary - costs
            };

            cumulative += net;
            NetWorthPoint {
                age,
                net_worth: cumulative.round_ties_even() as i64,
            }
        })
        .collect();

    NetWorthTrajectory { points }
}

/// Start → mid by 40, mid → peak by 48, then compounding at the post-peak rate.
fn salary_at(params: &FinancialParams, age: u32, post_peak_growth: f64) -> f64 {
    let base = &params.base;
    let practice_start = params.practice_start();

    if age <= MID_CAREER_AGE {
        let ramp_years = MID_CAREER_AGE.saturating_sub(practice_start).max(1);
        let progress = (f64::from(age - practice_start) / f64::from(ramp_years)).min(1.0);
        base.starting_salary + progress * (base.mid_salary - base.starting_salary)
    } else if age <= PEAK_AGE {
        let progress = f64::from(age - MID_CAREER_AGE) / f64::from(PEAK_AGE - MID_CAREER_AGE);
        base.mid_salary + progress * (base.peak_salary - base.mid_salary)
    } else {
        base.peak_salary * (1.0 + post_peak_growth).powi((age - PEAK_AGE) as i32)
    }
}
