//! awexpect-migrate
//!
//! Rewrites FluentAssertions and xunit assertions under the given paths into
//! aweXpect expectations.
//!
//! Usage: `awexpect-migrate [PATHS]... [--config FILE] [--check] [--json] [--diagnose]`

use std::fs;
use std::path::PathBuf;
use std::process;

use awexpect_migrate::{
    diagnose_source, discover, migrate_paths, BatchReport, CancelFlag, Diagnostic, FileStatus,
    MigrationConfig,
};
use clap::Parser;
use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "awexpect-migrate")]
#[command(about = "Migrate FluentAssertions and xunit assertions to aweXpect")]
struct Args {
    /// Files or directories to migrate
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Configuration file (default: awexpect-migrate.yaml in the working directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report what would change without writing; exit 1 if anything would
    #[arg(long)]
    check: bool,

    /// Print the report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// List flagged sites without rewriting anything
    #[arg(long)]
    diagnose: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileDiagnostics {
    path: PathBuf,
    diagnostics: Vec<Diagnostic>,
}

fn main() {
    awexpect_migrate_tools::init_logging();

    let args = Args::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            error!("Cannot read working directory: {}", err);
            process::exit(1);
        }
    };
    let config = match awexpect_migrate_tools::load_config(args.config.as_deref(), &cwd) {
        Ok(config) => config,
        Err(err) => {
            error!("{:#}", err);
            process::exit(1);
        }
    };

    if args.diagnose {
        if !diagnose(&args, &config) {
            process::exit(1);
        }
        return;
    }

    let report = migrate_paths(&args.paths, &config, &CancelFlag::new(), !args.check);
    print_report(&report, args.json);

    if awexpect_migrate_tools::batch_failed(&report, args.check) {
        process::exit(1);
    }
}

/// Print flagged sites; returns false when a file could not be read.
fn diagnose(args: &Args, config: &MigrationConfig) -> bool {
    let (files, errors) = discover(&args.paths, config);
    let mut ok = errors.is_empty();
    for err in &errors {
        error!("{}", err);
    }

    let mut results = Vec::new();
    for path in files {
        match fs::read_to_string(&path) {
            Ok(source) => {
                let diagnostics = diagnose_source(&source, config);
                if !args.json {
                    for d in &diagnostics {
                        println!("{}:{}:{}: {} {}", path.display(), d.line, d.column, d.id, d.message);
                    }
                }
                if !diagnostics.is_empty() {
                    results.push(FileDiagnostics { path, diagnostics });
                }
            }
            Err(err) => {
                error!("{}: {}", path.display(), err);
                ok = false;
            }
        }
    }

    if args.json {
        print_json(&results);
    } else {
        let total: usize = results.iter().map(|file| file.diagnostics.len()).sum();
        info!("{} flagged sites in {} files", total, results.len());
    }
    ok
}

fn print_report(report: &BatchReport, json: bool) {
    for err in &report.errors {
        error!("{}", err);
    }
    for file in &report.files {
        for site in &file.skipped {
            warn!(
                "{}:{}:{}: left unchanged ({}): {}",
                file.path.display(),
                site.line,
                site.column,
                site.reason,
                site.text
            );
        }
        match file.status {
            FileStatus::Changed => info!("{}: {} rewrites pending", file.path.display(), file.applied.len()),
            FileStatus::Failed => error!(
                "{}: {}",
                file.path.display(),
                file.error.as_deref().unwrap_or("failed")
            ),
            _ => {}
        }
    }

    if json {
        print_json(report);
        return;
    }

    info!(
        "{} files changed, {} rewrites, {} sites left unchanged, {} failures",
        report.changed_files(),
        report.applied(),
        report.skipped(),
        report.failures()
    );
    if report.was_cancelled() {
        warn!("Migration was cancelled; remaining files were left untouched");
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(err) => error!("Cannot serialize report: {}", err),
    }
}
