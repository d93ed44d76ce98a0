//! Shared input handling: config, graph loading, roots and exclusions.

use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use clap::Args;
use depwhy::{apply_exclusions, read_graph, Config, DepGraph, ExcludeSet, TestOnlySet};
use tracing::{debug, warn};

/// Arguments every command accepts.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Dependency graph file in `go mod graph` format ("-" reads stdin)
    #[arg(short, long, global = true, default_value = "-")]
    pub graph: PathBuf,

    /// Root module (repeatable; defaults to the first module in the graph)
    #[arg(short = 'm', long = "root", global = true)]
    pub roots: Vec<String>,

    /// Exclude modules matching a pattern (repeatable, supports * wildcard)
    #[arg(short = 'x', long, global = true)]
    pub exclude: Vec<String>,

    /// Configuration file (defaults to .depwhy.yaml in the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// File listing test-only modules, one per line
    #[arg(long, global = true)]
    pub test_only_list: Option<PathBuf>,
}

/// Everything a command needs before it can analyze anything.
#[derive(Debug)]
pub struct Context {
    /// Merged configuration (file values, before CLI overrides).
    pub config: Config,
    /// Graph with exclusions applied.
    pub graph: DepGraph,
    /// Roots that survived the exclusions.
    pub roots: Vec<String>,
    /// Active exclusion patterns.
    pub excludes: ExcludeSet,
    /// Test-only modules, when a list was supplied.
    pub classifier: Option<TestOnlySet>,
}

impl Context {
    /// Load config and graph and resolve roots for `args`.
    pub fn load(args: &InputArgs) -> Result<Self> {
        let config = match &args.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => {
                let cwd = std::env::current_dir().context("failed to get current directory")?;
                Config::discover(&cwd)?
            }
        };

        let graph = read_graph(&args.graph).with_context(|| {
            format!("failed to load dependency graph from {}", args.graph.display())
        })?;
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Loaded dependency graph"
        );

        let roots = Self::resolve_roots(args, &config, &graph)?;
        let excludes = ExcludeSet::new(args.exclude.iter().chain(&config.exclude).cloned());
        let (graph, roots) = apply_exclusions(&graph, &roots, &excludes)?;

        let classifier = match args.test_only_list.as_ref().or(config.test_only_list.as_ref()) {
            Some(path) => Some(TestOnlySet::load(path)?),
            None => None,
        };

        Ok(Self {
            config,
            graph,
            roots,
            excludes,
            classifier,
        })
    }

    /// Roots from the command line, else from config, else the first module
    /// in the graph.
    fn resolve_roots(args: &InputArgs, config: &Config, graph: &DepGraph) -> Result<Vec<String>> {
        let roots = if !args.roots.is_empty() {
            args.roots.clone()
        } else if !config.roots.is_empty() {
            config.roots.clone()
        } else {
            match graph.first_node() {
                Some(first) => vec![first.to_string()],
                None => bail!("dependency graph is empty; nothing to analyze"),
            }
        };

        for root in &roots {
            if !graph.contains(root) {
                warn!(root = %root, "Root module does not appear in the graph");
            }
        }
        Ok(roots)
    }

    /// Override `roots` with `explicit` when given, keeping exclusions applied.
    pub fn roots_or_default(&self, explicit: &[String]) -> Vec<String> {
        if explicit.is_empty() {
            self.roots.clone()
        } else {
            self.excludes.retain_roots(explicit)
        }
    }

    /// The classifier as a trait object, if any.
    pub fn classifier(&self) -> Option<&dyn depwhy::DependencyClassifier> {
        self.classifier
            .as_ref()
            .map(|c| c as &dyn depwhy::DependencyClassifier)
    }
}
