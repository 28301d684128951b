// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Migrates FluentAssertions and xunit assertions to aweXpect.
//!
//! ```text
//! subject.Should().Be(expected)   =>  Expect.That(subject).IsEqualTo(expected)
//! Assert.Equal(expected, actual)  =>  Expect.That(actual).IsEqualTo(expected)
//! ```
//!
//! A site passes through [`walker`], [`resolver`] and [`synth`], and the
//! result is checked and applied by [`splice`]. [`pipeline`] drives this for
//! whole files and directory trees. A site that cannot be migrated keeps its
//! original text and is reported with a [`SkipReason`].

pub mod catalog;
pub mod config;
pub mod detect;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod resolver;
pub mod splice;
pub mod synth;
pub mod walker;

pub use catalog::Library;
pub use config::{MigrationConfig, Sources, DEFAULT_CONFIG_FILE};
pub use detect::{Detector, Diagnostic, Site};
pub use error::{MigrateError, Result};
pub use pipeline::{
    diagnose_source, discover, migrate_expression, migrate_paths, migrate_source, CancelFlag,
    FileOutcome,
};
pub use report::{AppliedRewrite, BatchReport, FileReport, FileStatus, SkipReason, SkippedSite};
