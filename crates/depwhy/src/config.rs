//! Configuration file support.
//!
//! Settings are read from a YAML file, either given explicitly or discovered
//! as `.depwhy.yaml` in the working directory. Command-line flags override
//! anything set here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::why::DEFAULT_MAX_PATHS;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".depwhy.yaml";

/// Persistent analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Path budget for why queries. Zero or negative means unlimited.
    pub max_paths: i64,

    /// Hop limit for why queries. Zero or negative means unlimited.
    pub max_depth: i64,

    /// Module patterns to drop from the graph before analysis.
    pub exclude: Vec<String>,

    /// Root modules. Empty means "first module in the graph".
    pub roots: Vec<String>,

    /// File listing test-only modules, one per line.
    pub test_only_list: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_paths: DEFAULT_MAX_PATHS,
            max_depth: 0,
            exclude: Vec::new(),
            roots: Vec::new(),
            test_only_list: None,
        }
    }
}

impl Config {
    /// Parse configuration from YAML text. An empty document yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the YAML is malformed or has unknown keys.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or [`Error::Config`]
    /// if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| match e {
            Error::Config(message) => Error::Config(format!("{}: {message}", path.display())),
            other => other,
        })
    }

    /// Load `.depwhy.yaml` from `dir` if it exists, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] when the file exists.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(Self::default());
        }
        debug!(path = %path.display(), "Loading configuration");
        Self::load(&path)
    }
}
