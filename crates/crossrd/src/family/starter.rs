use super::config::is_valid_slug;
use super::{LoadError, CONFIG_FILE};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const STARTER_CONFIG: &str = r##"# config.yaml for the {name} profession family
# fill in the sections below, then run:
#   crossrd-pipeline process --family {slug}

name: {name}
slug: {slug}
icon: "💼"
headline: "Which {name} Career Is Right for You?"
subtitle: "A Data-Driven Guide"

# each profession (degree/path) with a label, base color and yearly graduates
professions:
  # BS/MS:
  #   label: "Engineer"
  #   color: "#E55934"
  #   annualGraduates: 120000

# display groups referenced by each specialty's `group` field
groups:
  # design:
  #   label: "Design"
  #   icon: "📐"
  #   tagline: "Build what others imagine"

# pinned keys and colors by specialty name
key_overrides: {}

# profession -> exported sheet name under specialties/<sheet>.csv
l2_sheets:
  # BS/MS: bs_ms

# column index (0-based) -> field name for exported sheets
l2_columns:
  0: name
  1: residencyYears
  3: annualSpots
  4: startSalary
  5: midSalary
  6: peakSalary
  9: partTimeFlex
  12: procedureMix
  13: callSchedule
  14: adminBurden
  16: hoursWeek
  17: burnout
  18: partTimeFeasibility
  19: vacation
  20: careerLongevity
  21: malpracticeFreq
  22: malpracticeCost
  23: geographicFlex
  26: automationRisk
  27: handsOnInsulation
  28: satisfaction
  29: chooseAgain
  30: intellectualStim
  31: varietyRepetition
  32: patientImpact
  34: physicalToll
  35: emotionalToll
  36: malpracticeLiability
  37: injuryCareerRisk

# final ranking (hand-crafted)
final_ranking: []

# decision tree (hand-crafted)
decision_tree:
  q: "First question?"
  "yes":
    q: "Second question?"
    "yes": null
    "no": null
  "no":
    q: "What matters most?"
    options: []

# decision tree result cards
decision_tree_results: {}
"##;

/// Renders the starter `config.yaml` for a new family.
pub fn starter_config(slug: &str, name: &str) -> String {
    STARTER_CONFIG
        .replace("{name}", name)
        .replace("{slug}", slug)
}

/// Creates `<data_root>/<slug>/config.yaml`, refusing to touch an existing
/// family directory.
pub fn bootstrap_family(data_root: &Path, slug: &str, name: &str) -> Result<PathBuf, LoadError> {
    let family_dir = data_root.join(slug);
    let config_path = family_dir.join(CONFIG_FILE);
    if !is_valid_slug(slug) {
        return Err(LoadError::Invalid {
            path: config_path,
            reason: format!("slug '{slug}' must be lowercase letters, digits, '-' or '_'"),
        });
    }
    if name.trim().is_empty() {
        return Err(LoadError::Invalid {
            path: config_path,
            reason: "family name must not be empty".to_string(),
        });
    }
    if family_dir.exists() {
        return Err(LoadError::AlreadyExists(family_dir));
    }

    fs::create_dir_all(family_dir.join("specialties")).map_err(|source| LoadError::Io {
        path: family_dir.clone(),
        source,
    })?;
    fs::write(&config_path, starter_config(slug, name)).map_err(|source| LoadError::Io {
        path: config_path.clone(),
        source,
    })?;

    info!(family = slug, path = %config_path.display(), "bootstrapped family");
    Ok(config_path)
}
