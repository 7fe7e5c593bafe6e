use crate::scoring::parse_numeric;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// A raw cell from the source data before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl RawValue {
    /// Interprets a spreadsheet cell; blank cells carry no value.
    pub fn from_cell(cell: &str) -> Option<Self> {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<f64>() {
            Ok(number) if number.is_finite() => Some(Self::Number(number)),
            _ => Some(Self::Text(trimmed.to_string())),
        }
    }

    pub fn from_yaml(value: &serde_yaml::Value) -> Option<Self> {
        match value {
            serde_yaml::Value::Number(number) => number.as_f64().map(Self::Number),
            serde_yaml::Value::String(text) => Some(Self::Text(text.clone())),
            serde_yaml::Value::Bool(flag) => Some(Self::Flag(*flag)),
            serde_yaml::Value::Tagged(tagged) => Self::from_yaml(&tagged.value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RawValue::Number(number) if number.fract() == 0.0 && number.abs() < 1e15 => {
                serializer.serialize_i64(*number as i64)
            }
            RawValue::Number(number) => serializer.serialize_f64(*number),
            RawValue::Text(text) => serializer.serialize_str(text),
            RawValue::Flag(flag) => serializer.serialize_bool(*flag),
        }
    }
}

/// One scored career track, tagged with the profession it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    pub name: String,
    pub profession: String,
    pub group: Option<String>,
    fields: BTreeMap<String, RawValue>,
}

impl Subject {
    pub fn new(name: impl Into<String>, profession: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profession: profession.into(),
            group: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_field(mut self, name: &str, value: impl Into<RawValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<RawValue>) {
        self.fields.insert(name.to_string(), value.into());
    }

    pub fn field(&self, name: &str) -> Option<&RawValue> {
        self.fields.get(name)
    }

    /// Numeric reading of a field; `None` when absent or unparseable.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.field(name).and_then(parse_numeric)
    }

    pub fn number_or(&self, name: &str, default: f64) -> f64 {
        self.number(name).unwrap_or(default)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(RawValue::as_text)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}
