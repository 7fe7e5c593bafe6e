use chrono::{Local, NaiveDate};
use clap::{ArgGroup, Args};
use crossrd::config::PathConfig;
use crossrd::error::AppError;
use crossrd::family::{bootstrap_family, list_families, FamilyDataset, LoadError};
use crossrd::pipeline::{deep_diff, process_family, validate, OutputDocument, ReferenceTables};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// How many differences `regress` prints before summarising.
const DIFF_PREVIEW: usize = 50;

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["family", "all"])))]
pub(crate) struct ProcessArgs {
    /// Family slug (e.g. healthcare)
    #[arg(long)]
    pub(crate) family: Option<String>,
    /// Process every registered family
    #[arg(long)]
    pub(crate) all: bool,
    /// Output path for a single family (defaults to <output dir>/<family>.json)
    #[arg(long, conflicts_with = "all")]
    pub(crate) output: Option<PathBuf>,
    /// Date stamped into meta.last_updated (defaults to today)
    #[arg(long, value_parser = crate::cli::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Written family document to check
    pub(crate) path: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct RegressArgs {
    /// Family slug to rebuild
    #[arg(long, default_value = "healthcare")]
    pub(crate) family: String,
    /// Reference document (defaults to <output dir>/<family>.json)
    #[arg(long)]
    pub(crate) reference: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct InitArgs {
    /// URL-safe slug (e.g. engineering)
    #[arg(long)]
    pub(crate) slug: String,
    /// Display name (e.g. Engineering)
    #[arg(long)]
    pub(crate) name: String,
}

pub(crate) fn process_families(paths: &PathConfig, args: ProcessArgs) -> Result<(), AppError> {
    let ProcessArgs {
        family,
        all,
        output,
        today,
    } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let tables = ReferenceTables::standard();

    let targets = if all {
        let families = list_families(paths.data_root())?;
        if families.is_empty() {
            return Err(AppError::NoFamilies(paths.data_root().to_path_buf()));
        }
        println!("processing {} families: {}", families.len(), families.join(", "));
        families
    } else {
        family.into_iter().collect()
    };

    for slug in targets {
        let destination = output
            .clone()
            .unwrap_or_else(|| paths.output_file(&slug));
        let document = build_document(paths, &tables, &slug, today)?;
        write_document(&document, &destination)?;
        println!(
            "wrote {} ({} tracks scored)",
            destination.display(),
            document.meta.total_tracks
        );
    }
    Ok(())
}

pub(crate) fn validate_document(args: ValidateArgs) -> Result<(), AppError> {
    let document = read_json(&args.path)?;
    let report = validate(&document);

    if report.passed() {
        println!(
            "PASSED: {} tracks, all checks ok",
            report.total_tracks
        );
        return Ok(());
    }

    println!("FAILED: {} errors", report.errors.len());
    for error in &report.errors {
        println!("  x {error}");
    }
    Err(AppError::ValidationFailed {
        errors: report.errors.len(),
    })
}

pub(crate) fn regress_family(paths: &PathConfig, args: RegressArgs) -> Result<(), AppError> {
    let reference_path = args
        .reference
        .unwrap_or_else(|| paths.output_file(&args.family));
    let reference = read_json(&reference_path)?;
    println!("reference loaded: {}", reference_path.display());

    let tables = ReferenceTables::standard();
    let today = Local::now().date_naive();
    let fresh = serde_json::to_value(build_document(paths, &tables, &args.family, today)?)?;

    let diffs = deep_diff(&reference, &fresh);
    if diffs.is_empty() {
        println!("PASSED: output identical to reference (ignoring last_updated)");
        return Ok(());
    }

    println!("DIFFERENCES FOUND ({}):", diffs.len());
    for diff in diffs.iter().take(DIFF_PREVIEW) {
        println!("  {diff}");
    }
    if diffs.len() > DIFF_PREVIEW {
        println!("  ... and {} more", diffs.len() - DIFF_PREVIEW);
    }
    Err(AppError::RegressionDetected {
        differences: diffs.len(),
    })
}

pub(crate) fn list_registered_families(paths: &PathConfig) -> Result<(), AppError> {
    let families = list_families(paths.data_root())?;
    if families.is_empty() {
        println!("no families found under {}", paths.data_root().display());
    }
    for slug in families {
        println!("{slug}");
    }
    Ok(())
}

pub(crate) fn init_family(paths: &PathConfig, args: InitArgs) -> Result<(), AppError> {
    let config_path = bootstrap_family(paths.data_root(), &args.slug, &args.name)?;
    println!("created {}", config_path.display());
    println!();
    println!("next steps:");
    println!(
        "  1. add specialty files under {}",
        paths.family_dir(&args.slug).join("specialties").display()
    );
    println!("  2. edit {} and fill in professions and groups", config_path.display());
    println!("  3. run: crossrd-pipeline process --family {}", args.slug);
    Ok(())
}

fn build_document(
    paths: &PathConfig,
    tables: &ReferenceTables,
    slug: &str,
    today: NaiveDate,
) -> Result<OutputDocument, AppError> {
    let dataset = FamilyDataset::load(paths.data_root(), slug, &tables.catalog)?;
    Ok(process_family(dataset, tables, today))
}

fn write_document(document: &OutputDocument, destination: &Path) -> Result<(), AppError> {
    let json = document.to_json_pretty()?;
    if let Some(parent) = destination.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| AppError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(destination, json).map_err(|source| AppError::Write {
        path: destination.to_path_buf(),
        source,
    })?;
    info!(path = %destination.display(), "wrote family document");
    Ok(())
}

fn read_json(path: &Path) -> Result<Value, AppError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}
