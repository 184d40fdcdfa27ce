#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! `cinedata`: turn film exhibition bulletins into research tables.
//!
//! Every subcommand scans the given bulletins (PDF or pre-extracted text)
//! into the raw per-year table, then exports, groups, ranks or summarizes
//! it. Logging goes through `pretty_env_logger` (set `RUST_LOG=debug` for
//! per-page detail) bridged with the progress bar via
//! [`cinedata_cli_utils::init_logger`].

mod report;

use std::io;
use std::path::{Path, PathBuf};

use cinedata_aggregate::GroupFilter;
use cinedata_cli_utils::{IndicatifProgress, MultiProgress};
use cinedata_export::Table;
use cinedata_extract::{BulletinLayout, DocumentReadError, ScanReport, ScanStatus};
use cinedata_pdf::{AutoExtractor, Document};
use clap::{Args, Parser, Subcommand};

/// Exit code when the batch produced no rows.
const EXIT_EMPTY: i32 = 2;

#[derive(Parser)]
#[command(
    name = "cinedata",
    about = "Film exhibition bulletin extraction and aggregation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Bulletin files (PDF, or text with form feeds between pages)
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Bulletin layout TOML (defaults to the embedded ANCINE layout)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct FilterArgs {
    /// Earliest year to keep (first exhibition year for grouped rows)
    #[arg(long)]
    from: Option<u16>,
    /// Latest year to keep
    #[arg(long)]
    to: Option<u16>,
    /// Keep only Brazilian productions
    #[arg(long)]
    brazilian_only: bool,
}

impl FilterArgs {
    fn to_filter(&self) -> GroupFilter {
        let years = (self.from.is_some() || self.to.is_some())
            .then(|| self.from.unwrap_or(u16::MIN)..=self.to.unwrap_or(u16::MAX));
        GroupFilter {
            years,
            brazilian_only: self.brazilian_only,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the raw per-year table as CSV
    Extract {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        filter: FilterArgs,
        /// Output file (defaults to stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Aggregate rows into per-film totals as CSV
    Group {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        filter: FilterArgs,
        /// Output file (defaults to stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the largest audiences and the smallest credible box office
    Rank {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        filter: FilterArgs,
        /// Number of films in each ranking
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Print extraction diagnostics and per-year market totals
    Summary {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        filter: FilterArgs,
        /// Also write the per-year totals to this CSV file
        #[arg(long)]
        year_totals: Option<PathBuf>,
    },
}

/// Reads every input file. Unreadable files are reported, not fatal.
fn load_documents(paths: &[PathBuf]) -> (Vec<Document>, Vec<DocumentReadError>) {
    let mut documents = Vec::new();
    let mut failures = Vec::new();

    for path in paths {
        match Document::from_path(path) {
            Ok(document) => documents.push(document),
            Err(e) => {
                log::warn!("[{}] skipped: {e}", path.display());
                failures.push(DocumentReadError {
                    document: path.display().to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    (documents, failures)
}

fn load_layout(config: Option<&Path>) -> Result<BulletinLayout, Box<dyn std::error::Error>> {
    Ok(match config {
        Some(path) => BulletinLayout::from_path(path)?,
        None => BulletinLayout::ancine(),
    })
}

/// Scans the inputs, reporting unreadable documents and exiting with
/// [`EXIT_EMPTY`] if nothing was recovered.
fn scan(
    input: &InputArgs,
    multi: &MultiProgress,
) -> Result<ScanReport, Box<dyn std::error::Error>> {
    let layout = load_layout(input.config.as_deref())?;
    let (documents, mut failures) = load_documents(&input.files);

    let progress = IndicatifProgress::documents_bar(multi, "Scanning bulletins");
    let mut report =
        cinedata_extract::scan_documents(&documents, &AutoExtractor, &layout, &progress);
    failures.append(&mut report.failures);
    report.failures = failures;

    for failure in &report.failures {
        eprintln!("warning: {failure}");
    }

    if report.status() == ScanStatus::Empty {
        eprintln!(
            "No valid rows found. Check that the input is a '{}' bulletin.",
            layout.name
        );
        std::process::exit(EXIT_EMPTY);
    }

    if let ScanStatus::Records(count) = report.status() {
        log::info!(
            "{count} exhibition rows from {} document(s), {} failed",
            report.stats.documents_scanned,
            report.failures.len()
        );
    }

    Ok(report)
}

fn write_table(
    output: Option<&Path>,
    table: Table<'_>,
) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => cinedata_export::write_file(path, table)?,
        None => {
            let stdout = io::stdout().lock();
            match table {
                Table::Records(rows) => cinedata_export::write_records(stdout, rows)?,
                Table::Groups(rows) => cinedata_export::write_groups(stdout, rows)?,
                Table::YearTotals(rows) => cinedata_export::write_year_totals(stdout, rows)?,
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = cinedata_cli_utils::init_logger();
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            input,
            filter,
            output,
        } => {
            let report = scan(&input, &multi)?;
            let records = filter.to_filter().apply_records(&report.records);
            write_table(output.as_deref(), Table::Records(&records))?;
        }
        Commands::Group {
            input,
            filter,
            output,
        } => {
            let report = scan(&input, &multi)?;
            let groups = filter
                .to_filter()
                .apply(&cinedata_aggregate::group_table(&report.records));
            write_table(output.as_deref(), Table::Groups(&groups))?;
        }
        Commands::Rank {
            input,
            filter,
            limit,
        } => {
            let report = scan(&input, &multi)?;
            let groups = filter
                .to_filter()
                .apply(&cinedata_aggregate::group_table(&report.records));
            report::print_rankings(&groups, limit);
        }
        Commands::Summary {
            input,
            filter,
            year_totals,
        } => {
            let report = scan(&input, &multi)?;
            let groups = filter
                .to_filter()
                .apply(&cinedata_aggregate::group_table(&report.records));
            let totals = cinedata_aggregate::totals_by_year(&groups);
            report::print_summary(&report, &groups, &totals);
            if let Some(path) = year_totals {
                cinedata_export::write_file(&path, Table::YearTotals(&totals))?;
            }
        }
    }

    Ok(())
}
