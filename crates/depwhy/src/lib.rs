//! # Depwhy: Why Is This Module In My Build?
//!
//! Depwhy answers questions about a module dependency graph in the
//! `go mod graph` text format: through which chains is a module pulled in,
//! how many dependencies do the root modules carry, how deep does the
//! longest chain go, and where does the graph loop back on itself.
//!
//! ## Design Philosophy
//!
//! - **Prune first** - A reverse search from the target bounds every later traversal
//! - **Bounded by default** - Path enumeration stops at a budget and says so
//! - **Deterministic** - Identical input yields byte-identical output
//! - **Library first, CLI second** - The `depwhy` binary is a thin shell over this crate
//!
//! ## Quick Start
//!
//! ```
//! use depwhy::{analyze_why, parse_mod_graph, WhyOptions};
//!
//! let graph = parse_mod_graph(
//!     "example.com/app golang.org/x/net@v0.1.0\n\
//!      golang.org/x/net@v0.1.0 golang.org/x/text@v0.3.0\n",
//! )?;
//! let roots = vec!["example.com/app".to_string()];
//!
//! let report = analyze_why(
//!     &graph,
//!     &roots,
//!     "golang.org/x/text@v0.3.0",
//!     &WhyOptions::default(),
//!     None,
//! )?;
//! assert_eq!(report.paths.len(), 1);
//! assert_eq!(report.paths[0].path.len(), 3);
//! # Ok::<(), depwhy::Error>(())
//! ```

pub mod classify;
pub mod config;
mod error;
pub mod filter;
pub mod graph;
pub mod overview;
pub mod parse;
pub mod render;
pub mod stats;
pub mod why;

pub use classify::{DependencyClassifier, TestOnlySet};
pub use config::Config;
pub use error::{Error, Result};
pub use filter::{apply_exclusions, ExcludeSet};
pub use graph::{DepGraph, Edge};
pub use overview::DependencyOverview;
pub use parse::{parse_mod_graph, read_graph};
pub use stats::{compare_stats, compute_stats, StatsComparison, StatsSnapshot};
pub use why::{analyze_why, WhyMode, WhyOptions, WhyPath, WhyReport};
