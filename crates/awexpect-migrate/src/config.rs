//! Migration configuration.
//!
//! Configuration is read from `awexpect-migrate.yaml` in the working
//! directory, or from a file given on the command line. Every key is
//! optional:
//!
//! ```yaml
//! sources:
//!   fluentAssertions: true
//!   xunit: false
//!
//! requireUsings: true
//! extensions: [cs]
//! exclude: [bin, obj, .git]
//! maxPasses: 8
//! syncAdapter: aweXpect.Synchronous.Synchronously.Verify
//!
//! typeHints:
//!   subject: string[]
//!   Items: List<int>
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{MigrateError, Result};

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "awexpect-migrate.yaml";

/// Settings for one migration run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationConfig {
    /// Which assertion libraries to migrate.
    #[serde(default)]
    pub sources: Sources,

    /// Bare `.Should()` and `Assert.` calls only count when the file imports
    /// the library namespace.
    #[serde(default = "default_true")]
    pub require_usings: bool,

    /// File extensions considered by directory discovery, without the dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Directory names skipped by directory discovery.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Upper bound on rewrite passes per file.
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,

    /// Call that wraps expectations rewritten inside lambda bodies.
    #[serde(default = "default_sync_adapter")]
    pub sync_adapter: String,

    /// Identifier or member name to C# type, consulted before declarations.
    #[serde(default)]
    pub type_hints: IndexMap<String, String>,
}

/// Source library switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sources {
    #[serde(default = "default_true")]
    pub fluent_assertions: bool,

    #[serde(default = "default_true")]
    pub xunit: bool,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            fluent_assertions: true,
            xunit: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    vec!["cs".to_string()]
}

fn default_exclude() -> Vec<String> {
    ["bin", "obj", ".git"].iter().map(|dir| dir.to_string()).collect()
}

fn default_max_passes() -> usize {
    8
}

fn default_sync_adapter() -> String {
    "aweXpect.Synchronous.Synchronously.Verify".to_string()
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            sources: Sources::default(),
            require_usings: true,
            extensions: default_extensions(),
            exclude: default_exclude(),
            max_passes: default_max_passes(),
            sync_adapter: default_sync_adapter(),
            type_hints: IndexMap::new(),
        }
    }
}

impl MigrationConfig {
    /// Load a configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|err| MigrateError::io(path, err))?;
        Self::from_yaml_str(&content)
    }

    /// Parse a configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load [`DEFAULT_CONFIG_FILE`] from `dir` if it exists.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = dir.as_ref().join(DEFAULT_CONFIG_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }

    /// Whether `path` has one of the configured extensions.
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
    }

    /// Whether a directory with this name is skipped.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude.iter().any(|excluded| excluded == name)
    }
}
