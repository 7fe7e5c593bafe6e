use crate::subject::RawValue;
use regex::Regex;
use std::sync::OnceLock;

/// Score returned by [`rescale`] when the observed range has no width.
pub const FLAT_RANGE_SCORE: f64 = 5.5;

static SUM_PATTERN: OnceLock<Regex> = OnceLock::new();
static RANGE_PATTERN: OnceLock<Regex> = OnceLock::new();
static INTEGER_PATTERN: OnceLock<Regex> = OnceLock::new();

fn sum_pattern() -> &'static Regex {
    SUM_PATTERN.get_or_init(|| {
        Regex::new(r"(\d+(?:\.\d+)?)\s*\+\s*(\d+(?:\.\d+)?)").expect("sum pattern compiles")
    })
}

fn range_pattern() -> &'static Regex {
    RANGE_PATTERN.get_or_init(|| {
        Regex::new(r"(\d+(?:\.\d+)?)\s*[-\u{2013}]\s*(\d+(?:\.\d+)?)")
            .expect("range pattern compiles")
    })
}

fn integer_pattern() -> &'static Regex {
    INTEGER_PATTERN.get_or_init(|| Regex::new(r"\d+").expect("integer pattern compiles"))
}

/// Reads a single number out of a raw cell.
///
/// Text is tried as a plain number first, then as a sum (`"5+2"` → 7), then as
/// a range (`"3-4"` → 3.5), and finally the first integer found anywhere in it.
/// `None` means the field carries no usable signal; it is never zero.
pub fn parse_numeric(raw: &RawValue) -> Option<f64> {
    match raw {
        RawValue::Number(number) if number.is_finite() => Some(*number),
        RawValue::Number(_) | RawValue::Flag(_) => None,
        RawValue::Text(text) => parse_numeric_str(text),
    }
}

pub fn parse_numeric_str(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if let Ok(number) = trimmed.parse::<f64>() {
        if number.is_finite() {
            return Some(number);
        }
    }

    if let Some(captures) = sum_pattern().captures(trimmed) {
        let a: f64 = captures[1].parse().ok()?;
        let b: f64 = captures[2].parse().ok()?;
        return Some(a + b);
    }

    if let Some(captures) = range_pattern().captures(trimmed) {
        let a: f64 = captures[1].parse().ok()?;
        let b: f64 = captures[2].parse().ok()?;
        return Some((a + b) / 2.0);
    }

    integer_pattern()
        .find(trimmed)
        .and_then(|found| found.as_str().parse::<f64>().ok())
}

/// Linearly maps `value` from `[min, max]` onto the 1–10 scale, one decimal.
pub fn rescale(value: f64, min: f64, max: f64, higher_is_better: bool) -> f64 {
    if min == max {
        return FLAT_RANGE_SCORE;
    }

    let (low, high) = if min < max { (min, max) } else { (max, min) };
    let clamped = value.clamp(low, high);
    let mut normalized = (clamped - min) / (max - min);
    if !higher_is_better {
        normalized = 1.0 - normalized;
    }
    round_to(1.0 + normalized * 9.0, 1)
}

/// Rounds half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn text(value: &str) -> RawValue {
        RawValue::Text(value.to_string())
    }

    #[test]
    fn parses_sums_ranges_and_annotations() {
        assert_eq!(parse_numeric(&text("5+2")), Some(7.0));
        assert_eq!(parse_numeric(&text("3-4")), Some(3.5));
        assert_eq!(parse_numeric(&text("1+3 (intern + 3yr)")), Some(4.0));
        assert_eq!(parse_numeric(&text("~85% report")), Some(85.0));
        assert_eq!(parse_numeric(&text(" 6.5 ")), Some(6.5));
        assert_eq!(parse_numeric(&text("abc")), None);
    }

    #[test]
    fn numbers_pass_through_and_flags_do_not() {
        assert_eq!(parse_numeric(&RawValue::Number(12.0)), Some(12.0));
        assert_eq!(parse_numeric(&RawValue::Number(f64::NAN)), None);
        assert_eq!(parse_numeric(&RawValue::Flag(true)), None);
    }

    #[test]
    fn sum_takes_priority_over_range() {
        assert_eq!(parse_numeric_str("2-3 + 1"), Some(4.0));
    }

    #[test]
    fn rescale_respects_direction() {
        assert_eq!(rescale(5.0, 1.0, 10.0, true), 5.0);
        assert_eq!(rescale(5.0, 1.0, 10.0, false), 6.0);
        assert_eq!(rescale(120.0, 40.0, 80.0, true), 10.0);
        assert_eq!(rescale(0.0, 40.0, 80.0, true), 1.0);
    }

    #[test]
    fn rescale_flat_range_is_midpoint() {
        assert_eq!(rescale(42.0, 3.0, 3.0, true), FLAT_RANGE_SCORE);
        assert_eq!(rescale(-1.0, 3.0, 3.0, false), FLAT_RANGE_SCORE);
    }

    proptest! {
        #[test]
        fn rescale_stays_on_scale(
            value in -1.0e6f64..1.0e6,
            min in -1.0e3f64..1.0e3,
            width in 0.001f64..1.0e3,
            higher in any::<bool>(),
        ) {
            let score = rescale(value, min, min + width, higher);
            prop_assert!((1.0..=10.0).contains(&score));
        }
    }
}
