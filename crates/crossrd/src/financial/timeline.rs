use super::params::{FinancialParams, START_AGE};
use serde::Serialize;

/// Training phases as `[start_age, end_age]` spans for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub college: [u32; 2],
    pub school: [u32; 2],
    pub residency: Option<[u32; 2]>,
    pub fellowship: Option<[u32; 2]>,
    pub earn_age: u32,
    pub start_salary: f64,
}

impl Timeline {
    pub fn from_params(params: &FinancialParams) -> Self {
        let college_end = params.undergrad_end();
        let school_end = params.school_end();
        let residency_end = params.training_end();

        Self {
            college: [START_AGE, college_end],
            school: [college_end, school_end],
            residency: (params.residency_years > 0).then_some([school_end, residency_end]),
            fellowship: (params.fellowship_years > 0)
                .then_some([residency_end, params.practice_start()]),
            earn_age: params.practice_start(),
            start_salary: params.base.starting_salary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::financial::ProfessionDefaultsTable;
    use crate::subject::Subject;

    #[test]
    fn phases_follow_profession_and_subject_training() {
        let subject = Subject::new("Cardiology", "MD/DO")
            .with_field("residencyYears", 3.0)
            .with_field("fellowshipOptions", "1-2yr")
            .with_field("startSalary", 420.0);
        let params = FinancialParams::derive(&subject, &ProfessionDefaultsTable::standard());
        let timeline = Timeline::from_params(&params);

        assert_eq!(timeline.college, [18, 22]);
        assert_eq!(timeline.school, [22, 26]);
        assert_eq!(timeline.residency, Some([26, 29]));
        assert_eq!(timeline.fellowship, Some([29, 30]));
        assert_eq!(timeline.earn_age, 30);
        assert_eq!(timeline.start_salary, 420.0);
    }

    #[test]
    fn zero_length_phases_are_absent() {
        let subject = Subject::new("Software", "BS").with_field("residencyYears", 0.0);
        let params = FinancialParams::derive(&subject, &ProfessionDefaultsTable::standard());
        let timeline = Timeline::from_params(&params);

        assert_eq!(timeline.school, [22, 22]);
        assert!(timeline.residency.is_none());
        assert!(timeline.fellowship.is_none());
        assert_eq!(timeline.earn_age, 22);

        let json = serde_json::to_value(&timeline).expect("serialize");
        assert!(json["residency"].is_null());
        assert_eq!(json["earnAge"], 22);
    }
}
