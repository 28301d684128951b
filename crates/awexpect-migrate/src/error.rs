//! Migration errors
//!
//! Only failures that stop a whole file or batch are errors. A call site that
//! cannot be migrated is reported as a [`SkipReason`](crate::SkipReason) and
//! the file continues.

use std::path::PathBuf;

use awexpect_migrate_parser::ParseError;
use thiserror::Error;

/// Migration result type
pub type Result<T> = std::result::Result<T, MigrateError>;

/// Migration errors
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("migration cancelled")]
    Cancelled,
}

impl MigrateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MigrateError::Io {
            path: path.into(),
            source,
        }
    }
}
