use crate::commands::{
    init_family, list_registered_families, process_families, regress_family, validate_document,
    InitArgs, ProcessArgs, RegressArgs, ValidateArgs,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use crossrd::config::AppConfig;
use crossrd::error::AppError;
use crossrd::telemetry;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "crossrd-pipeline",
    about = "Score career tracks and build the per-family JSON documents",
    version
)]
struct Cli {
    /// Override APP_DATA_DIR (root of the per-family data folders)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Override APP_OUTPUT_DIR (where <family>.json is written)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a family (or every registered family) and write its document
    Process(ProcessArgs),
    /// Check a written document for missing facets and out-of-range scores
    Validate(ValidateArgs),
    /// Rebuild a family in memory and diff it against the written document
    Regress(RegressArgs),
    /// List registered families (data folders holding a config.yaml)
    Families,
    /// Bootstrap a new family with a starter config.yaml
    Init(InitArgs),
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    if let Some(data_dir) = cli.data_dir {
        config.paths.data_dir = data_dir;
    }
    if let Some(output_dir) = cli.output_dir {
        config.paths.output_dir = output_dir;
    }

    match cli.command {
        Command::Process(args) => process_families(&config.paths, args),
        Command::Validate(args) => validate_document(args),
        Command::Regress(args) => regress_family(&config.paths, args),
        Command::Families => list_registered_families(&config.paths),
        Command::Init(args) => init_family(&config.paths, args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn process_requires_family_or_all() {
        assert!(Cli::try_parse_from(["crossrd-pipeline", "process"]).is_err());
        assert!(Cli::try_parse_from(["crossrd-pipeline", "process", "--all"]).is_ok());
        assert!(Cli::try_parse_from([
            "crossrd-pipeline",
            "process",
            "--all",
            "--family",
            "healthcare"
        ])
        .is_err());
    }

    #[test]
    fn dates_parse_strictly() {
        assert_eq!(
            parse_date(" 2026-10-19 "),
            Ok(NaiveDate::from_ymd_opt(2026, 10, 19).expect("date"))
        );
        assert!(parse_date("19/10/2026").is_err());
    }
}
