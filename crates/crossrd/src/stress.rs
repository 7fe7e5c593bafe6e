//! Resilience of a subject against four adverse scenarios, each on 1–10
//! (10 = most resilient).

use crate::scoring::round_to;
use crate::subject::Subject;
use serde::Serialize;
use std::collections::BTreeMap;

/// Prior used for professions missing from the resilience table.
pub const NEUTRAL_RESILIENCE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StressScenario {
    Ai,
    Pay,
    Injury,
    Match,
}

impl StressScenario {
    pub const fn ordered() -> [Self; 4] {
        [Self::Ai, Self::Pay, Self::Injury, Self::Match]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ai => "AI Disruption Accelerates",
            Self::Pay => "Reimbursement Cuts 20%",
            Self::Injury => "Career-Ending Injury at 40",
            Self::Match => "Failure to Match",
        }
    }
}

/// Profession-level base resilience for failing to place. Lower means entry
/// into the profession is more competitive.
#[derive(Debug, Clone)]
pub struct MatchResilienceTable {
    priors: BTreeMap<String, f64>,
}

impl MatchResilienceTable {
    pub fn standard() -> Self {
        let priors = [
            ("MD/DO", 3.0),
            ("DDS/DMD", 7.0),
            ("DPM", 9.0),
            ("OD", 8.0),
            ("JD", 4.0),
            ("JD+Patent", 6.0),
            ("Paralegal", 8.0),
            ("Judge", 2.0),
            ("BS", 7.0),
            ("MS", 6.0),
            ("PhD", 4.0),
            ("BBA", 8.0),
            ("MBA", 5.0),
            ("CPA-CFA", 7.0),
            ("Academy", 8.0),
            ("BA", 5.0),
            ("MA+", 4.0),
            ("Trade School", 8.0),
            ("Apprenticeship", 6.0),
            ("Contractor", 4.0),
            ("Teaching Cert", 8.0),
            ("M.Ed", 5.0),
            ("Research PhD", 3.0),
            ("Applied Science", 6.0),
            ("AI Engineer", 7.0),
            ("AI Scientist", 4.0),
            ("AI Creative", 5.0),
            ("AI Strategist", 6.0),
        ]
        .into_iter()
        .map(|(profession, prior)| (profession.to_string(), prior))
        .collect();

        Self { priors }
    }

    pub fn with_overrides(mut self, overrides: &BTreeMap<String, f64>) -> Self {
        self.priors
            .extend(overrides.iter().map(|(key, prior)| (key.clone(), *prior)));
        self
    }

    pub fn prior(&self, profession: &str) -> f64 {
        self.priors
            .get(profession)
            .copied()
            .unwrap_or(NEUTRAL_RESILIENCE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StressScores {
    pub ai: u8,
    pub pay: u8,
    pub injury: u8,
    #[serde(rename = "match")]
    pub match_failure: u8,
}

impl StressScores {
    pub fn get(&self, scenario: StressScenario) -> u8 {
        match scenario {
            StressScenario::Ai => self.ai,
            StressScenario::Pay => self.pay,
            StressScenario::Injury => self.injury,
            StressScenario::Match => self.match_failure,
        }
    }

    /// Mean of the four scenarios, one decimal.
    pub fn average(&self) -> f64 {
        let sum: u32 = StressScenario::ordered()
            .into_iter()
            .map(|scenario| u32::from(self.get(scenario)))
            .sum();
        round_to(f64::from(sum) / 4.0, 1)
    }
}

/// Rounds half to even and clamps onto 1–10.
fn clamp_score(value: f64) -> u8 {
    value.round_ties_even().clamp(1.0, 10.0) as u8
}

pub fn derive_stress_scores(subject: &Subject, priors: &MatchResilienceTable) -> StressScores {
    let field = |name: &str| subject.number_or(name, 5.0);

    let ai = clamp_score((field("handsOnInsulation") + (11.0 - field("automationRisk"))) / 2.0);

    let satisfaction = subject.number_or("satisfaction", 70.0);
    let satisfaction_score = if satisfaction == 0.0 {
        5.0
    } else {
        f64::from(clamp_score(1.0 + (satisfaction - 50.0) / (95.0 - 50.0) * 9.0))
    };
    let pay = clamp_score(
        field("geographicFlex") * 0.4
            + satisfaction_score * 0.3
            + (11.0 - field("adminBurden")) * 0.3,
    );

    // procedural intensity leaves a career exposed to physical injury
    let injury = clamp_score(
        (11.0 - field("procedureMix")) * 0.5
            + field("partTimeFlex") * 0.25
            + field("careerLongevity") * 0.25,
    );

    let base = priors.prior(&subject.profession);
    let match_failure = clamp_score(base - (field("matchComp") - 5.0) * 0.3);

    StressScores {
        ai,
        pay,
        injury,
        match_failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_subject_scores_mid_scale() {
        let subject = Subject::new("Unknown", "BS");
        let scores = derive_stress_scores(&subject, &MatchResilienceTable::standard());
        assert_eq!(scores.ai, 6);
        assert_eq!(scores.pay, 5);
        assert_eq!(scores.injury, 6);
        assert_eq!(scores.match_failure, 7);
    }

    #[test]
    fn procedural_competitive_specialty_is_fragile() {
        let subject = Subject::new("Neurosurgery", "MD/DO")
            .with_field("procedureMix", 10.0)
            .with_field("partTimeFlex", 2.0)
            .with_field("careerLongevity", 4.0)
            .with_field("matchComp", 9.0)
            .with_field("handsOnInsulation", 10.0)
            .with_field("automationRisk", 1.0)
            .with_field("satisfaction", 95.0)
            .with_field("geographicFlex", 3.0)
            .with_field("adminBurden", 6.0);
        let scores = derive_stress_scores(&subject, &MatchResilienceTable::standard());

        assert_eq!(scores.injury, 2);
        assert_eq!(scores.match_failure, 2);
        assert_eq!(scores.ai, 10);
        assert_eq!(scores.pay, 6);
        assert_eq!(scores.average(), 5.0);
    }

    #[test]
    fn whole_scores_round_half_to_even() {
        assert_eq!(clamp_score(4.5), 4);
        assert_eq!(clamp_score(5.5), 6);
        assert_eq!(clamp_score(2.5), 2);
        assert_eq!(clamp_score(0.5), 1);

        let exposed = Subject::new("Radiology", "MD/DO")
            .with_field("handsOnInsulation", 4.0)
            .with_field("automationRisk", 6.0);
        let scores = derive_stress_scores(&exposed, &MatchResilienceTable::standard());
        assert_eq!(scores.ai, 4);

        let insulated = Subject::new("Surgery", "MD/DO")
            .with_field("handsOnInsulation", 6.0)
            .with_field("automationRisk", 6.0);
        let scores = derive_stress_scores(&insulated, &MatchResilienceTable::standard());
        assert_eq!(scores.ai, 6);
    }

    #[test]
    fn scores_clamp_to_scale() {
        let subject = Subject::new("Extreme", "Judge")
            .with_field("matchComp", 40.0)
            .with_field("automationRisk", 30.0)
            .with_field("handsOnInsulation", 0.0);
        let scores = derive_stress_scores(&subject, &MatchResilienceTable::standard());
        assert_eq!(scores.match_failure, 1);
        assert_eq!(scores.ai, 1);
    }

    #[test]
    fn overrides_and_unknown_professions() {
        let table = MatchResilienceTable::standard()
            .with_overrides(&BTreeMap::from([("Pilot".to_string(), 2.0)]));
        assert_eq!(table.prior("Pilot"), 2.0);
        assert_eq!(table.prior("Astronaut"), NEUTRAL_RESILIENCE);
    }

    #[test]
    fn serializes_match_key() {
        let subject = Subject::new("x", "OD");
        let scores = derive_stress_scores(&subject, &MatchResilienceTable::standard());
        let json = serde_json::to_value(scores).expect("serialize");
        assert!(json.get("match").is_some());
        assert_eq!(StressScenario::Match.label(), "Failure to Match");
    }
}
