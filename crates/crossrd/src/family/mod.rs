//! Loading a profession family from `data/<family>/`.

mod config;
mod ordered;
mod sheet;
mod starter;

pub use config::{
    is_valid_slug, parse_hex_color, FamilyConfig, GroupInfo, KeyOverride, ProfessionInfo,
};
pub use ordered::OrderedMap;
pub use starter::{bootstrap_family, starter_config};

use crate::catalog::{Catalog, CategoryId};
use crate::scoring::{
    CoarseScores, RubricFieldSpec, ScenarioProfile, ScenarioProfiles, ScoringError, ScoringRubric,
};
use crate::subject::{RawValue, Subject};
use ordered::null_as_default;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const CONFIG_FILE: &str = "config.yaml";
const SPECIALTIES_DIR: &str = "specialties";
const COARSE_FILE: &str = "l1_scores.yaml";
const RUBRIC_FILE: &str = "scoring_rubric.yaml";
const PROFILES_FILE: &str = "scenario_profiles.yaml";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed YAML in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("malformed sheet {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("no family config found at {}", .0.display())]
    MissingConfig(PathBuf),
    #[error("invalid family data in {}: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// Where the subject records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceKind {
    #[serde(rename = "yaml")]
    Yaml,
    #[serde(rename = "csv")]
    Sheet,
    #[serde(rename = "yaml+csv")]
    Mixed,
}

/// Everything one pipeline run needs from a family directory.
#[derive(Debug, Clone)]
pub struct FamilyDataset {
    pub config: FamilyConfig,
    pub subjects: Vec<Subject>,
    pub rubric: ScoringRubric,
    pub coarse: CoarseScores,
    pub profiles: ScenarioProfiles,
    pub source: SourceKind,
}

impl FamilyDataset {
    /// Loads and validates `<data_root>/<slug>`. Configuration problems are
    /// fatal; missing optional files fall back to empty data.
    pub fn load(data_root: &Path, slug: &str, catalog: &Catalog) -> Result<Self, LoadError> {
        let family_dir = data_root.join(slug);
        let config = load_config(&family_dir)?;

        let (subjects, source) = load_subjects(&family_dir, &config)?;
        info!(family = slug, subjects = subjects.len(), "loaded specialty data");

        let coarse = load_coarse_scores(&family_dir)?;
        let rubric = load_rubric(&family_dir, catalog)?;
        let profiles = load_profiles(&family_dir, catalog)?;
        info!(
            family = slug,
            coarse_points = coarse.data_point_count(),
            rubric_fields = rubric.len(),
            profiles = profiles.len(),
            "loaded scoring inputs"
        );

        for subject in &subjects {
            if !config.professions.contains_key(&subject.profession) {
                warn!(
                    subject = %subject.name,
                    profession = %subject.profession,
                    "profession missing from family config"
                );
            }
        }

        Ok(Self {
            config,
            subjects,
            rubric,
            coarse,
            profiles,
            source,
        })
    }
}

pub fn load_config(family_dir: &Path) -> Result<FamilyConfig, LoadError> {
    let path = family_dir.join(CONFIG_FILE);
    if !path.is_file() {
        return Err(LoadError::MissingConfig(path));
    }
    let config: FamilyConfig = read_yaml(&path)?;
    config
        .check()
        .map_err(|reason| LoadError::Invalid { path, reason })?;
    Ok(config)
}

/// Sorted slugs of every directory under `data_root` holding a `config.yaml`.
pub fn list_families(data_root: &Path) -> Result<Vec<String>, LoadError> {
    let io_error = |source| LoadError::Io {
        path: data_root.to_path_buf(),
        source,
    };
    let mut families = Vec::new();
    for entry in fs::read_dir(data_root).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let path = entry.path();
        if path.is_dir() && path.join(CONFIG_FILE).is_file() {
            if let Some(slug) = path.file_name().and_then(|name| name.to_str()) {
                families.push(slug.to_string());
            }
        }
    }
    families.sort();
    Ok(families)
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_reader(file).map_err(|source| LoadError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

fn read_optional_yaml<T: DeserializeOwned + Default>(path: &Path) -> Result<T, LoadError> {
    if path.is_file() {
        read_yaml(path)
    } else {
        warn!(path = %path.display(), "optional family file missing; using empty data");
        Ok(T::default())
    }
}

#[derive(Debug, Deserialize)]
struct SpecialtyFile {
    profession: String,
    #[serde(default, deserialize_with = "null_as_default")]
    specialties: Vec<serde_yaml::Mapping>,
}

fn load_subjects(
    family_dir: &Path,
    config: &FamilyConfig,
) -> Result<(Vec<Subject>, SourceKind), LoadError> {
    let dir = family_dir.join(SPECIALTIES_DIR);
    let mut subjects = Vec::new();
    let mut from_yaml = false;
    let mut from_sheet = false;

    if dir.is_dir() {
        let mut files: Vec<PathBuf> = fs::read_dir(&dir)
            .map_err(|source| LoadError::Io {
                path: dir.clone(),
                source,
            })?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "yaml"))
            .collect();
        files.sort();

        for path in files {
            let file: SpecialtyFile = read_yaml(&path)?;
            debug!(path = %path.display(), count = file.specialties.len(), "read specialty file");
            for entry in &file.specialties {
                subjects.push(subject_from_yaml(entry, &file.profession, &path)?);
            }
            from_yaml = true;
        }
    }

    for (profession, sheet_name) in config.l2_sheets.iter() {
        if subjects.iter().any(|subject| subject.profession == profession) {
            debug!(profession, "specialty YAML present; skipping sheet");
            continue;
        }
        let path = dir.join(format!("{sheet_name}.csv"));
        if !path.is_file() {
            debug!(profession, path = %path.display(), "no exported sheet");
            continue;
        }
        let file = File::open(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        let rows = sheet::parse_sheet(file, profession, &config.l2_columns)
            .map_err(|source| LoadError::Csv { path, source })?;
        subjects.extend(rows);
        from_sheet = true;
    }

    let source = match (from_yaml, from_sheet) {
        (true, true) => SourceKind::Mixed,
        (false, true) => SourceKind::Sheet,
        _ => SourceKind::Yaml,
    };
    Ok((subjects, source))
}

fn yaml_key(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(text) => Some(text.clone()),
        serde_yaml::Value::Number(number) => Some(number.to_string()),
        serde_yaml::Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn subject_from_yaml(
    entry: &serde_yaml::Mapping,
    profession: &str,
    path: &Path,
) -> Result<Subject, LoadError> {
    let name = entry
        .get("name")
        .and_then(yaml_key)
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| LoadError::Invalid {
            path: path.to_path_buf(),
            reason: "specialty entry without a name".to_string(),
        })?;

    let mut subject = Subject::new(name, profession);
    for (key, value) in entry {
        let Some(field) = yaml_key(key) else {
            continue;
        };
        match field.as_str() {
            "name" | "profession" => {}
            "group" => subject.group = yaml_key(value),
            _ => {
                if let Some(raw) = RawValue::from_yaml(value) {
                    subject.set(&field, raw);
                }
            }
        }
    }
    Ok(subject)
}

fn load_coarse_scores(family_dir: &Path) -> Result<CoarseScores, LoadError> {
    read_optional_yaml(&family_dir.join(COARSE_FILE))
}

#[derive(Debug, Default, Deserialize)]
struct RubricFile {
    #[serde(default, deserialize_with = "null_as_default")]
    fields: OrderedMap<RubricFieldSpec>,
}

fn load_rubric(family_dir: &Path, catalog: &Catalog) -> Result<ScoringRubric, LoadError> {
    let file: RubricFile = read_optional_yaml(&family_dir.join(RUBRIC_FILE))?;
    Ok(ScoringRubric::from_specs(file.fields, catalog)?)
}

#[derive(Debug, Default, Deserialize)]
struct ProfilesFile {
    #[serde(default, deserialize_with = "null_as_default")]
    profiles: OrderedMap<BTreeMap<CategoryId, u32>>,
}

fn load_profiles(family_dir: &Path, catalog: &Catalog) -> Result<ScenarioProfiles, LoadError> {
    let file: ProfilesFile = read_optional_yaml(&family_dir.join(PROFILES_FILE))?;
    let profiles = file
        .profiles
        .into_iter()
        .map(|(name, weights)| ScenarioProfile::new(name, weights))
        .collect();
    Ok(ScenarioProfiles::new(profiles, catalog)?)
}
