use serde::Serialize;

/// Ratio reported when a subject has no openings at all.
pub const UNDEFINED_ONE_IN_X: u32 = 999;
/// Ratio at or beyond which competitiveness bottoms out.
pub const ONE_IN_X_CEILING: u32 = 200;

/// "One in X aspirants lands this track."
pub fn one_in_x(annual_graduates: f64, annual_openings: f64) -> u32 {
    if annual_openings <= 0.0 || annual_openings.is_nan() {
        return UNDEFINED_ONE_IN_X;
    }
    let ratio = (annual_graduates / annual_openings).round_ties_even();
    if ratio.is_finite() {
        ratio.max(1.0) as u32
    } else {
        UNDEFINED_ONE_IN_X
    }
}

/// Log-scale mapping of a difficulty ratio: 1 in 1 → 10, 1 in 200+ → 1.
pub fn competitiveness_score(one_in_x: u32) -> u8 {
    let clamped = one_in_x.clamp(1, ONE_IN_X_CEILING);
    let score = 10.0 - (f64::from(clamped).ln() / f64::from(ONE_IN_X_CEILING).ln()) * 9.0;
    score.round_ties_even().clamp(1.0, 10.0) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Difficulty {
    pub annual_openings: f64,
    pub one_in_x: u32,
    pub competitiveness: u8,
}

impl Difficulty {
    pub fn new(annual_graduates: f64, annual_openings: f64) -> Self {
        let one_in_x = one_in_x(annual_graduates, annual_openings);
        Self {
            annual_openings,
            one_in_x,
            competitiveness: competitiveness_score(one_in_x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ratio_handles_even_split_and_no_openings() {
        assert_eq!(one_in_x(1778.0, 1778.0), 1);
        assert_eq!(one_in_x(100.0, 0.0), UNDEFINED_ONE_IN_X);
        assert_eq!(one_in_x(100.0, -3.0), UNDEFINED_ONE_IN_X);
        assert_eq!(one_in_x(10.0, 400.0), 1, "more openings than aspirants floors at 1");
        assert_eq!(one_in_x(23_000.0, 268.0), 86);
    }

    #[test]
    fn ratio_ties_round_to_even() {
        assert_eq!(one_in_x(5.0, 2.0), 2);
        assert_eq!(one_in_x(7.0, 2.0), 4);
        assert_eq!(one_in_x(3.0, 2.0), 2);
    }

    #[test]
    fn competitiveness_endpoints() {
        assert_eq!(competitiveness_score(1), 10);
        assert_eq!(competitiveness_score(200), 1);
        assert_eq!(competitiveness_score(UNDEFINED_ONE_IN_X), 1);
        assert_eq!(competitiveness_score(0), 10);
        assert_eq!(competitiveness_score(14), 6);
    }

    #[test]
    fn difficulty_bundles_ratio_and_score() {
        let difficulty = Difficulty::new(23_000.0, 268.0);
        assert_eq!(difficulty.one_in_x, 86);
        assert_eq!(difficulty.competitiveness, 2);
    }

    proptest! {
        #[test]
        fn competitiveness_is_on_scale_and_monotone(a in 0u32..5000, b in 0u32..5000) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let easy = competitiveness_score(low);
            let hard = competitiveness_score(high);
            prop_assert!((1..=10).contains(&easy));
            prop_assert!((1..=10).contains(&hard));
            prop_assert!(easy >= hard);
        }
    }
}
