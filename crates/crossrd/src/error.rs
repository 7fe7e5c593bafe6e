use crate::config::ConfigError;
use crate::family::LoadError;
use crate::scoring::ScoringError;
use crate::telemetry::TelemetryError;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Load(LoadError),
    Scoring(ScoringError),
    Json(serde_json::Error),
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    ValidationFailed {
        errors: usize,
    },
    RegressionDetected {
        differences: usize,
    },
    NoFamilies(PathBuf),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Load(err) => write!(f, "load error: {}", err),
            AppError::Scoring(err) => write!(f, "scoring error: {}", err),
            AppError::Json(err) => write!(f, "json error: {}", err),
            AppError::Write { path, source } => {
                write!(f, "could not write {}: {}", path.display(), source)
            }
            AppError::ValidationFailed { errors } => {
                write!(f, "validation failed with {} error(s)", errors)
            }
            AppError::RegressionDetected { differences } => {
                write!(f, "output differs from reference in {} place(s)", differences)
            }
            AppError::NoFamilies(root) => {
                write!(f, "no families found under {}", root.display())
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Load(err) => Some(err),
            AppError::Scoring(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Write { source, .. } => Some(source),
            AppError::ValidationFailed { .. }
            | AppError::RegressionDetected { .. }
            | AppError::NoFamilies(_) => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<LoadError> for AppError {
    fn from(value: LoadError) -> Self {
        Self::Load(value)
    }
}

impl From<ScoringError> for AppError {
    fn from(value: ScoringError) -> Self {
        Self::Scoring(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
