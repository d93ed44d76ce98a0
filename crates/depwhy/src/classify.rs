//! Test-only dependency classification.
//!
//! Classification is consulted before the traversal engine runs, never inside
//! it. Any source of truth can plug in through [`DependencyClassifier`]; the
//! crate ships a list-backed implementation.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};

/// Decides whether a module is only needed by tests.
pub trait DependencyClassifier {
    /// Returns `true` if `module` is pulled in only by test code.
    fn is_test_only(&self, module: &str) -> bool;
}

/// A fixed set of test-only modules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestOnlySet {
    modules: HashSet<String>,
}

impl TestOnlySet {
    /// Parse one module per line; blank lines and `#` comments are skipped.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    }

    /// Load a list file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("cannot read test-only list {}: {e}", path.display()),
            ))
        })?;
        Ok(Self::parse(&content))
    }

    /// Number of modules in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TestOnlySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            modules: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl DependencyClassifier for TestOnlySet {
    fn is_test_only(&self, module: &str) -> bool {
        self.modules.contains(module)
    }
}

/// Split `modules` into `(test_only, non_test)` counts.
#[must_use]
pub fn count_by_test_status(
    modules: &[String],
    classifier: &dyn DependencyClassifier,
) -> (usize, usize) {
    let test_only = modules
        .iter()
        .filter(|m| classifier.is_test_only(m))
        .count();
    (test_only, modules.len() - test_only)
}
