// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! awexpect-migrate tools
//!
//! Shared setup for the command-line front end.

use std::path::Path;

use anyhow::Context;
use awexpect_migrate::{BatchReport, MigrationConfig};
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging with a default filter.
///
/// Use `RUST_LOG` environment variable to override the default filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,awexpect_migrate=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Configuration from `explicit`, else from the working directory, else the
/// defaults.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> anyhow::Result<MigrationConfig> {
    if let Some(path) = explicit {
        return MigrationConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()));
    }
    let found = MigrationConfig::discover(cwd)
        .with_context(|| format!("loading configuration from {}", cwd.display()))?;
    Ok(found.unwrap_or_default())
}

/// Whether a finished batch should end the process with a failure status.
///
/// Failures always count; in check mode so does any file that would change.
pub fn batch_failed(report: &BatchReport, check: bool) -> bool {
    report.failures() > 0 || (check && report.changed_files() > 0)
}
