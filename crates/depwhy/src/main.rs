//! Depwhy CLI - Explain module dependencies from the command line.
//!
//! Reads a `go mod graph`-style edge list (from a file or stdin) and answers
//! why a module is included, how many dependencies the roots carry, and
//! where the graph has cycles.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::context::InputArgs;

/// Depwhy: Explain why a module is in your dependency graph.
#[derive(Parser)]
#[command(name = "depwhy")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    inputs: InputArgs,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every dependency path from the root modules to a module
    Why {
        /// Module to explain (e.g., "golang.org/x/text@v0.3.0")
        target: String,

        /// Output in JSON format
        #[arg(short, long, conflicts_with_all = ["dot", "svg"])]
        json: bool,

        /// Output the route subgraph in DOT format for Graphviz
        #[arg(long, conflicts_with = "svg")]
        dot: bool,

        /// Output the route subgraph as a self-contained SVG diagram
        #[arg(short, long)]
        svg: bool,

        /// Maximum dependency paths to search (0 = no limit)
        #[arg(long, allow_negative_numbers = true)]
        max_paths: Option<i64>,

        /// Maximum path depth in hops (0 = unlimited)
        #[arg(long, allow_negative_numbers = true)]
        max_depth: Option<i64>,
    },

    /// Show dependency counts and depth for the root modules
    Stats {
        /// Output in JSON format
        #[arg(short, long, conflicts_with = "csv")]
        json: bool,

        /// Output in CSV format
        #[arg(short, long)]
        csv: bool,

        /// Also list every dependency
        #[arg(short, long)]
        list: bool,

        /// Compare two root sets instead of reporting one
        #[arg(long, conflicts_with = "list")]
        compare: bool,

        /// Root modules of the first set (defaults to --root)
        #[arg(long = "roots-a", requires = "compare")]
        roots_a: Vec<String>,

        /// Root modules of the second set (defaults to --root)
        #[arg(long = "roots-b", requires = "compare")]
        roots_b: Vec<String>,

        /// Label of the first set
        #[arg(long, default_value = "A")]
        set_a: String,

        /// Label of the second set
        #[arg(long, default_value = "B")]
        set_b: String,
    },

    /// Detect circular dependencies
    Cycles {
        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    let result = match cli.command {
        Commands::Why {
            target,
            json,
            dot,
            svg,
            max_paths,
            max_depth,
        } => cli::why::run(
            &cli.inputs,
            &target,
            cli::why::WhyArgs {
                format: cli::OutputFormat::select(json, dot, svg, false),
                max_paths,
                max_depth,
            },
        ),
        Commands::Stats {
            json,
            csv,
            list,
            compare,
            roots_a,
            roots_b,
            set_a,
            set_b,
        } => {
            let format = cli::OutputFormat::select(json, false, false, csv);
            if compare {
                cli::stats::run_compare(
                    &cli.inputs,
                    format,
                    &cli::stats::CompareSets {
                        roots_a,
                        roots_b,
                        set_a,
                        set_b,
                    },
                )
            } else {
                cli::stats::run(&cli.inputs, format, list)
            }
        }
        Commands::Cycles { json } => cli::cycles::run(&cli.inputs, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            for cause in e.chain().skip(1) {
                eprintln!("  {}: {cause}", "caused by".dimmed());
            }
            ExitCode::FAILURE
        }
    }
}
