use super::ordered::{null_as_default, OrderedMap};
use crate::financial::ProfessionDefaults;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Display metadata for one profession in a family.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfessionInfo {
    pub label: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(rename = "annualGraduates", default)]
    pub annual_graduates: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GroupInfo {
    pub label: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
}

/// Pinned key and color for a named subject, kept stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyOverride {
    pub key: String,
    pub color: String,
}

/// `data/<family>/config.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FamilyConfig {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub professions: OrderedMap<ProfessionInfo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: OrderedMap<GroupInfo>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_overrides: BTreeMap<String, KeyOverride>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub l2_sheets: OrderedMap<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub l2_columns: BTreeMap<usize, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub financial_defaults: BTreeMap<String, ProfessionDefaults>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub match_resilience: BTreeMap<String, f64>,
    #[serde(default)]
    pub data_points: Option<usize>,
    #[serde(default)]
    pub decision_tree: serde_yaml::Value,
    #[serde(default)]
    pub decision_tree_results: serde_yaml::Value,
    #[serde(default)]
    pub final_ranking: serde_yaml::Value,
}

impl FamilyConfig {
    pub fn headline(&self) -> String {
        self.headline
            .clone()
            .unwrap_or_else(|| format!("Career Guide: {}", self.name))
    }

    pub fn subtitle(&self) -> &str {
        self.subtitle.as_deref().unwrap_or("A Data-Driven Guide")
    }

    pub fn profession_label<'a>(&'a self, profession: &'a str) -> &'a str {
        self.professions
            .get(profession)
            .map(|info| info.label.as_str())
            .unwrap_or(profession)
    }

    pub fn annual_graduates(&self, profession: &str) -> f64 {
        self.professions
            .get(profession)
            .map(|info| info.annual_graduates)
            .unwrap_or(0.0)
    }

    /// Structural checks that do not depend on the subject data.
    pub fn check(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("`name` must not be empty".to_string());
        }
        if !is_valid_slug(&self.slug) {
            return Err(format!(
                "`slug` '{}' must be lowercase letters, digits, '-' or '_'",
                self.slug
            ));
        }
        for (profession, info) in self.professions.iter() {
            if let Some(color) = &info.color {
                if parse_hex_color(color).is_none() {
                    return Err(format!(
                        "profession '{profession}' has invalid color '{color}'"
                    ));
                }
            }
            if info.annual_graduates < 0.0 {
                return Err(format!(
                    "profession '{profession}' has negative annualGraduates"
                ));
            }
        }
        for (name, pinned) in &self.key_overrides {
            if pinned.key.trim().is_empty() {
                return Err(format!("key override for '{name}' has an empty key"));
            }
            if parse_hex_color(&pinned.color).is_none() {
                return Err(format!(
                    "key override for '{name}' has invalid color '{}'",
                    pinned.color
                ));
            }
        }
        if !self.l2_sheets.is_empty() && !self.l2_columns.values().any(|field| field == "name") {
            return Err("`l2_columns` must map a column to `name`".to_string());
        }
        Ok(())
    }
}

pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// `#rrggbb` to 0–255 components.
pub fn parse_hex_color(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
name: Healthcare
slug: healthcare
icon: "🩺"
professions:
  MD/DO:
    label: Physician
    color: "#E55934"
    annualGraduates: 23000
  DDS/DMD:
    label: Dentist
    color: "#3B8EA5"
groups:
  surgical:
    label: Surgical
l2_sheets:
  MD/DO: md_do
l2_columns:
  0: name
  4: startSalary
"##;

    fn sample() -> FamilyConfig {
        serde_yaml::from_str(SAMPLE).expect("sample config parses")
    }

    #[test]
    fn parses_and_keeps_profession_order() {
        let config = sample();
        assert_eq!(
            config.professions.keys().collect::<Vec<_>>(),
            vec!["MD/DO", "DDS/DMD"]
        );
        assert_eq!(config.annual_graduates("MD/DO"), 23_000.0);
        assert_eq!(config.annual_graduates("DDS/DMD"), 0.0);
        assert_eq!(config.profession_label("DDS/DMD"), "Dentist");
        assert_eq!(config.profession_label("Unknown"), "Unknown");
        assert_eq!(config.headline(), "Career Guide: Healthcare");
        assert_eq!(config.subtitle(), "A Data-Driven Guide");
        assert_eq!(config.l2_columns.get(&4).map(String::as_str), Some("startSalary"));
        assert!(config.decision_tree.is_null());
        config.check().expect("sample config is valid");
    }

    #[test]
    fn null_sections_are_empty() {
        let config: FamilyConfig =
            serde_yaml::from_str("name: Law\nslug: law\nprofessions:\nl2_sheets:\n")
                .expect("starter shape parses");
        assert!(config.professions.is_empty());
        assert!(config.l2_sheets.is_empty());
        config.check().expect("empty sections are allowed");
    }

    #[test]
    fn check_rejects_bad_slug_and_colors() {
        let mut config = sample();
        config.slug = "Health Care".to_string();
        assert!(config.check().is_err());

        let broken = SAMPLE.replace("#E55934", "red");
        let config: FamilyConfig = serde_yaml::from_str(&broken).expect("parses");
        let err = config.check().expect_err("invalid color rejected");
        assert!(err.contains("MD/DO"));
    }

    #[test]
    fn check_requires_name_column_for_sheets() {
        let broken = SAMPLE.replace("0: name", "0: title");
        let config: FamilyConfig = serde_yaml::from_str(&broken).expect("parses");
        assert!(config.check().is_err());
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#ff8000"), Some([255, 128, 0]));
        assert_eq!(parse_hex_color("ff8000"), None);
        assert_eq!(parse_hex_color("#ff80"), None);
        assert_eq!(parse_hex_color("#gg8000"), None);
    }
}
