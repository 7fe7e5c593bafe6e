use super::normalize::{parse_numeric, rescale};
use super::ScoringError;
use crate::catalog::{Catalog, CategoryId};
use crate::subject::RawValue;
use serde::Deserialize;

/// Whether a rubric field feeds category scoring or is informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[serde(alias = "Decision")]
    Decision,
    #[serde(alias = "Reference")]
    Reference,
}

/// Conversion as written in the rubric file, before validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ConversionSpec {
    Method(String),
    Detailed {
        method: String,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
        #[serde(default = "default_higher_is_better")]
        higher_is_better: bool,
    },
}

fn default_higher_is_better() -> bool {
    true
}

impl Default for ConversionSpec {
    fn default() -> Self {
        Self::Method("passthrough".to_string())
    }
}

impl ConversionSpec {
    pub fn linear(min: f64, max: f64, higher_is_better: bool) -> Self {
        Self::Detailed {
            method: "linear".to_string(),
            min: Some(min),
            max: Some(max),
            higher_is_better,
        }
    }

    fn method(&self) -> &str {
        match self {
            Self::Method(method) | Self::Detailed { method, .. } => method,
        }
    }

    /// Resolves the written spec into a conversion, rejecting unknown methods.
    pub fn resolve(&self) -> Result<Conversion, ScoringError> {
        match self.method().trim().to_ascii_lowercase().as_str() {
            "passthrough" => Ok(Conversion::Passthrough),
            "linear" => match self {
                Self::Detailed {
                    min: Some(min),
                    max: Some(max),
                    higher_is_better,
                    ..
                } => Ok(Conversion::Linear {
                    min: *min,
                    max: *max,
                    higher_is_better: *higher_is_better,
                }),
                _ => Err(ScoringError::MissingBounds),
            },
            _ => Err(ScoringError::UnknownConversion(self.method().to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conversion {
    /// Value is already on the 1–10 scale.
    Passthrough,
    Linear {
        min: f64,
        max: f64,
        higher_is_better: bool,
    },
}

impl Conversion {
    pub fn apply(&self, raw: &RawValue) -> Option<f64> {
        let value = parse_numeric(raw)?;
        Some(match self {
            Conversion::Passthrough => value,
            Conversion::Linear {
                min,
                max,
                higher_is_better,
            } => rescale(value, *min, *max, *higher_is_better),
        })
    }
}

/// Converts one raw value; absent in, absent out.
pub fn convert(raw: Option<&RawValue>, spec: &ConversionSpec) -> Result<Option<f64>, ScoringError> {
    let conversion = spec.resolve()?;
    Ok(raw.and_then(|value| conversion.apply(value)))
}

#[derive(Debug, Clone, PartialEq)]
pub struct RubricEntry {
    pub field: String,
    pub categories: Vec<CategoryId>,
    pub kind: FieldKind,
    pub conversion: Conversion,
}

impl RubricEntry {
    pub fn targets(&self, category: CategoryId) -> bool {
        self.kind == FieldKind::Decision && self.categories.contains(&category)
    }
}

/// Rubric entry as it appears in `scoring_rubric.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RubricFieldSpec {
    #[serde(default)]
    pub category: Option<CategoryId>,
    #[serde(default)]
    pub categories: Option<Vec<CategoryId>>,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub conversion: ConversionSpec,
}

/// Validated mapping from raw subject fields to the categories they score.
#[derive(Debug, Clone, Default)]
pub struct ScoringRubric {
    entries: Vec<RubricEntry>,
}

impl ScoringRubric {
    /// Validates every entry against the catalog. Any broken entry is fatal.
    pub fn from_specs<I>(specs: I, catalog: &Catalog) -> Result<Self, ScoringError>
    where
        I: IntoIterator<Item = (String, RubricFieldSpec)>,
    {
        let mut entries = Vec::new();
        for (field, spec) in specs {
            let mut categories = spec.categories.unwrap_or_default();
            if let Some(category) = spec.category {
                if !categories.contains(&category) {
                    categories.insert(0, category);
                }
            }
            if categories.is_empty() {
                return Err(ScoringError::NoCategory { field });
            }
            if let Some(unknown) = categories.iter().find(|id| !catalog.contains(**id)) {
                return Err(ScoringError::UnknownCategory {
                    context: format!("rubric field '{field}'"),
                    category: *unknown,
                });
            }
            let conversion = spec.conversion.resolve().map_err(|err| match err {
                ScoringError::MissingBounds => ScoringError::FieldMissingBounds {
                    field: field.clone(),
                },
                other => other,
            })?;
            entries.push(RubricEntry {
                field,
                categories,
                kind: spec.kind,
                conversion,
            });
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[RubricEntry] {
        &self.entries
    }

    pub fn decision_fields(&self, category: CategoryId) -> impl Iterator<Item = &RubricEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.targets(category))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
