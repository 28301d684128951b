//! Per-site, per-file and batch reports.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::catalog::Library;

/// Why a flagged site was left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// The assertion method has no rewrite rule.
    NoCatalogEntry,
    /// The chain contains a call, connector or argument shape the rules do
    /// not cover.
    UnsupportedChain,
    /// No subject could be found below the entry point.
    MissingSubject,
    /// The synthesized text did not parse as an expression.
    Reparse,
    /// Another edit in the same pass already covers this text.
    Overlap,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::NoCatalogEntry => "no rewrite rule for this assertion",
            SkipReason::UnsupportedChain => "unsupported call chain",
            SkipReason::MissingSubject => "no subject found",
            SkipReason::Reparse => "rewritten text does not parse",
            SkipReason::Overlap => "overlaps another rewrite",
        };
        f.write_str(text)
    }
}

/// One rewrite that was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedRewrite {
    pub library: Library,
    /// 1-based position in the text of the pass that applied it
    pub line: usize,
    pub column: usize,
    pub original: String,
    pub replacement: String,
}

/// One flagged site that was left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedSite {
    pub library: Library,
    pub line: usize,
    pub column: usize,
    pub text: String,
    pub reason: SkipReason,
}

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FileStatus {
    /// Nothing to rewrite.
    Unchanged,
    /// Rewrites found but not written (check mode).
    Changed,
    /// Rewrites written back to disk.
    Written,
    /// Left untouched because the batch was cancelled.
    Cancelled,
    /// Read, write or decode error.
    Failed,
}

/// Report for one file of a batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
    pub applied: Vec<AppliedRewrite>,
    pub skipped: Vec<SkippedSite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub(crate) fn new(path: PathBuf, status: FileStatus) -> Self {
        Self {
            path,
            status,
            applied: Vec::new(),
            skipped: Vec::new(),
            error: None,
        }
    }

    pub(crate) fn failed(path: PathBuf, error: impl fmt::Display) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::new(path, FileStatus::Failed)
        }
    }
}

/// Report for a batch run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// One entry per discovered file, in path order.
    pub files: Vec<FileReport>,
    /// Discovery errors (unreadable directories and the like).
    pub errors: Vec<String>,
}

impl BatchReport {
    /// Files whose text changed or would change.
    pub fn changed_files(&self) -> usize {
        self.files
            .iter()
            .filter(|file| matches!(file.status, FileStatus::Changed | FileStatus::Written))
            .count()
    }

    /// Total rewrites across all files.
    pub fn applied(&self) -> usize {
        self.files.iter().map(|file| file.applied.len()).sum()
    }

    /// Total skipped sites across all files.
    pub fn skipped(&self) -> usize {
        self.files.iter().map(|file| file.skipped.len()).sum()
    }

    /// Files that failed plus discovery errors.
    pub fn failures(&self) -> usize {
        self.errors.len()
            + self
                .files
                .iter()
                .filter(|file| file.status == FileStatus::Failed)
                .count()
    }

    /// Whether any file was left untouched because of cancellation.
    pub fn was_cancelled(&self) -> bool {
        self.files.iter().any(|file| file.status == FileStatus::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_counts() {
        let mut written = FileReport::new(PathBuf::from("a.cs"), FileStatus::Written);
        written.applied.push(AppliedRewrite {
            library: Library::Xunit,
            line: 3,
            column: 9,
            original: "Assert.True(x)".to_string(),
            replacement: "Expect.That(x).IsTrue()".to_string(),
        });
        let report = BatchReport {
            files: vec![
                written,
                FileReport::new(PathBuf::from("b.cs"), FileStatus::Unchanged),
                FileReport::failed(PathBuf::from("c.cs"), "stream did not contain valid UTF-8"),
            ],
            errors: vec!["permission denied".to_string()],
        };
        assert_eq!(report.changed_files(), 1);
        assert_eq!(report.applied(), 1);
        assert_eq!(report.skipped(), 0);
        assert_eq!(report.failures(), 2);
        assert!(!report.was_cancelled());
    }

    #[test]
    fn test_serializes_camel_case() {
        let site = SkippedSite {
            library: Library::FluentAssertions,
            line: 1,
            column: 1,
            text: "x.Should().AllSatisfy(f)".to_string(),
            reason: SkipReason::NoCatalogEntry,
        };
        let json = serde_json::to_string(&site).unwrap();
        assert!(json.contains("\"library\":\"fluentAssertions\""));
        assert!(json.contains("\"reason\":\"noCatalogEntry\""));
    }
}
