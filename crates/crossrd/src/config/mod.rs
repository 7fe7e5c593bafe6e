use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// Top-level configuration for a pipeline run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub paths: PathConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let data_dir = path_var("APP_DATA_DIR", "data")?;
        let output_dir = path_var("APP_OUTPUT_DIR", "src/data")?;
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            paths: PathConfig {
                data_dir,
                output_dir,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn path_var(name: &'static str, default: &str) -> Result<PathBuf, ConfigError> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::EmptyPath { var: name }),
        Ok(value) => Ok(PathBuf::from(value.trim())),
        Err(_) => Ok(PathBuf::from(default)),
    }
}

/// Locations of the per-family source data and the generated documents.
#[derive(Debug, Clone)]
pub struct PathConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl PathConfig {
    pub fn family_dir(&self, slug: &str) -> PathBuf {
        self.data_dir.join(slug)
    }

    pub fn output_file(&self, slug: &str) -> PathBuf {
        self.output_dir.join(format!("{slug}.json"))
    }

    pub fn data_root(&self) -> &Path {
        &self.data_dir
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyPath { var: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPath { var } => {
                write!(f, "{var} is set but empty; unset it or point it at a directory")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_DATA_DIR");
        env::remove_var("APP_OUTPUT_DIR");
        env::remove_var("APP_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.paths.data_dir, PathBuf::from("data"));
        assert_eq!(config.paths.output_dir, PathBuf::from("src/data"));
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn output_file_is_named_after_family() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_OUTPUT_DIR", "/tmp/crossrd-out");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.paths.output_file("law"),
            PathBuf::from("/tmp/crossrd-out/law.json")
        );
        assert_eq!(
            config.paths.family_dir("law"),
            PathBuf::from("data").join("law")
        );
        reset_env();
    }

    #[test]
    fn rejects_empty_data_dir() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_DATA_DIR", "  ");
        let err = AppConfig::load().expect_err("empty path rejected");
        assert!(matches!(
            err,
            ConfigError::EmptyPath {
                var: "APP_DATA_DIR"
            }
        ));
        reset_env();
    }
}
