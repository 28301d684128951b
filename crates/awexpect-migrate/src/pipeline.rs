//! Per-file and batch migration.
//!
//! A file is migrated in passes. Each pass re-lexes the current text,
//! detects sites, synthesizes and validates replacements, and splices all
//! non-overlapping ones at once. Passes repeat until nothing changes or
//! `maxPasses` is reached, so a site nested inside another is rewritten on
//! the pass after its parent.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use awexpect_migrate_parser::{parse_expression, scan_expressions, tokenize, using_directives};
use awexpect_migrate_semantic::DeclarationIndex;
use rayon::prelude::*;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::MigrationConfig;
use crate::detect::{Detector, Diagnostic, Site};
use crate::error::{MigrateError, Result};
use crate::report::{AppliedRewrite, BatchReport, FileReport, FileStatus, SkipReason, SkippedSite};
use crate::splice::{self, Edit};
use crate::synth::synthesize;

/// Result of migrating one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub output: String,
    /// Rewrites from every pass, in the order they were applied.
    pub applied: Vec<AppliedRewrite>,
    /// Sites still flagged after the last pass.
    pub skipped: Vec<SkippedSite>,
    pub passes: usize,
}

impl FileOutcome {
    pub fn is_changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Shared cancellation flag for a batch.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Migrate every flagged site of `source`.
pub fn migrate_source(source: &str, config: &MigrationConfig) -> FileOutcome {
    let mut output = source.to_string();
    let mut applied = Vec::new();
    let mut skipped = Vec::new();
    let mut passes = 0;

    while passes < config.max_passes.max(1) {
        passes += 1;
        let pass = run_pass(&output, config);
        skipped = pass.skipped;
        if pass.edits.is_empty() {
            break;
        }
        debug!("pass {passes}: {} rewrites", pass.edits.len());
        output = splice::apply(&output, &pass.edits);
        applied.extend(pass.applied);
    }

    FileOutcome {
        output,
        applied,
        skipped,
        passes,
    }
}

/// Flagged sites of `source` without rewriting anything.
pub fn diagnose_source(source: &str, config: &MigrationConfig) -> Vec<Diagnostic> {
    let lexed = tokenize(source);
    let exprs = scan_expressions(&lexed.tokens);
    let detector = Detector::new(config, &using_directives(&lexed.tokens));
    detector
        .find_sites(&exprs)
        .iter()
        .map(|site| Diagnostic::new(site, source))
        .collect()
}

/// Migrate a single expression, as if every namespace were imported.
pub fn migrate_expression(text: &str, config: &MigrationConfig) -> Result<String> {
    parse_expression(text)?;
    let config = MigrationConfig {
        require_usings: false,
        ..config.clone()
    };
    Ok(migrate_source(text, &config).output)
}

struct Pass {
    edits: Vec<Edit>,
    applied: Vec<AppliedRewrite>,
    skipped: Vec<SkippedSite>,
}

fn run_pass(source: &str, config: &MigrationConfig) -> Pass {
    let lexed = tokenize(source);
    let exprs = scan_expressions(&lexed.tokens);
    let detector = Detector::new(config, &using_directives(&lexed.tokens));
    let model = DeclarationIndex::build(source, &lexed.tokens, &config.type_hints);

    let mut candidates = Vec::new();
    let mut skipped = Vec::new();
    for site in detector.find_sites(&exprs) {
        let rewritten = synthesize(&site, source, &model, config).and_then(|text| {
            splice::validate(&text)?;
            Ok(text)
        });
        match rewritten {
            Ok(replacement) => candidates.push((site, replacement)),
            Err(reason) => {
                debug!("skipped {}: {reason}", site.expr.text(source));
                skipped.push(skipped_site(&site, source, reason));
            }
        }
    }

    let (kept, overlapping) = splice::select(candidates, |(site, _)| site.expr.span);
    skipped.extend(
        overlapping
            .iter()
            .map(|(site, _)| skipped_site(site, source, SkipReason::Overlap)),
    );
    skipped.sort_by_key(|site| (site.line, site.column));

    let mut edits = Vec::with_capacity(kept.len());
    let mut applied = Vec::with_capacity(kept.len());
    for (site, replacement) in kept {
        let (line, column) = site.span.line_col(source);
        applied.push(AppliedRewrite {
            library: site.library,
            line,
            column,
            original: site.expr.text(source).to_string(),
            replacement: replacement.clone(),
        });
        edits.push(Edit {
            span: site.expr.span,
            replacement,
        });
    }

    Pass {
        edits,
        applied,
        skipped,
    }
}

fn skipped_site(site: &Site<'_>, source: &str, reason: SkipReason) -> SkippedSite {
    let (line, column) = site.span.line_col(source);
    SkippedSite {
        library: site.library,
        line,
        column,
        text: site.expr.text(source).to_string(),
        reason,
    }
}

/// Source files under `paths`, sorted, plus discovery errors.
///
/// A path naming a file is taken as is; directories are walked, skipping
/// excluded directory names.
pub fn discover(paths: &[PathBuf], config: &MigrationConfig) -> (Vec<PathBuf>, Vec<String>) {
    let mut files = Vec::new();
    let mut errors = Vec::new();

    for root in paths {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !entry.file_name().to_str().is_some_and(|name| config.is_excluded_dir(name))
        });
        for entry in walker {
            match entry {
                Ok(e) => {
                    if e.file_type().is_file() && config.matches_extension(e.path()) {
                        files.push(e.path().to_path_buf());
                    }
                }
                Err(err) => errors.push(err.to_string()),
            }
        }
    }

    files.sort();
    files.dedup();
    (files, errors)
}

/// Migrate every source file under `paths` in parallel.
///
/// With `write` unset the files are only reported. Cancellation is checked
/// before each file is read and again before it is written; a cancelled
/// file is never partially written.
pub fn migrate_paths(
    paths: &[PathBuf],
    config: &MigrationConfig,
    cancel: &CancelFlag,
    write: bool,
) -> BatchReport {
    let (files, errors) = discover(paths, config);
    info!("migrating {} files", files.len());

    let files = files
        .par_iter()
        .map(|path| match migrate_file(path, config, cancel, write) {
            Ok(report) => report,
            Err(MigrateError::Cancelled) => FileReport::new(path.clone(), FileStatus::Cancelled),
            Err(err) => {
                warn!("{err}");
                FileReport::failed(path.clone(), err)
            }
        })
        .collect();

    BatchReport { files, errors }
}

fn migrate_file(path: &Path, config: &MigrationConfig, cancel: &CancelFlag, write: bool) -> Result<FileReport> {
    if cancel.is_cancelled() {
        return Err(MigrateError::Cancelled);
    }
    let source = fs::read_to_string(path).map_err(|err| MigrateError::io(path, err))?;
    let outcome = migrate_source(&source, config);

    let status = if !outcome.is_changed() {
        FileStatus::Unchanged
    } else if write {
        if cancel.is_cancelled() {
            return Err(MigrateError::Cancelled);
        }
        fs::write(path, &outcome.output).map_err(|err| MigrateError::io(path, err))?;
        info!("{}: {} rewrites", path.display(), outcome.applied.len());
        FileStatus::Written
    } else {
        FileStatus::Changed
    };

    Ok(FileReport {
        applied: outcome.applied,
        skipped: outcome.skipped,
        ..FileReport::new(path.to_path_buf(), status)
    })
}
