//! `depwhy why` command implementation.

use anyhow::Result;
use colored::Colorize;
use depwhy::graph::PathLimits;
use depwhy::render::{format_path, render_dot, render_svg, to_json};
use depwhy::{analyze_why, WhyMode, WhyOptions, WhyReport};

use super::context::{Context, InputArgs};
use super::OutputFormat;

/// Paths printed in text mode before the list is cut short.
const MAX_TEXT_PATHS: usize = 20;

/// Options specific to the why command.
#[derive(Debug, Clone, Copy)]
pub struct WhyArgs {
    pub format: OutputFormat,
    pub max_paths: Option<i64>,
    pub max_depth: Option<i64>,
}

/// Run the why command.
pub fn run(inputs: &InputArgs, target: &str, args: WhyArgs) -> Result<()> {
    let ctx = Context::load(inputs)?;

    let max_paths = args.max_paths.unwrap_or(ctx.config.max_paths);
    let max_depth = args.max_depth.unwrap_or(ctx.config.max_depth);
    let options = WhyOptions {
        limits: PathLimits::new(max_paths, max_depth),
        mode: match args.format {
            OutputFormat::Dot | OutputFormat::Svg => WhyMode::Subgraph,
            OutputFormat::Text | OutputFormat::Json | OutputFormat::Csv => WhyMode::Paths,
        },
    };

    let report = analyze_why(&ctx.graph, &ctx.roots, target, &options, ctx.classifier())?;

    if args.format == OutputFormat::Json {
        println!("{}", to_json(&report)?);
        return Ok(());
    }
    if print_no_answer(&report) {
        return Ok(());
    }
    match args.format {
        OutputFormat::Dot => print!("{}", render_dot(&report)),
        OutputFormat::Svg => print!("{}", render_svg(&report)),
        _ => print_text(&report, max_paths),
    }
    Ok(())
}

/// Print why the report has nothing to show, if that is the case.
///
/// Returns `true` when a message was printed.
fn print_no_answer(report: &WhyReport) -> bool {
    let target = format!("{:?}", report.target).yellow();
    if report.test_only {
        println!("Dependency {target} is test-only. No non-test paths available.");
    } else if !report.found {
        println!("Dependency {target} not found in the dependency graph.");
    } else if !report.has_routes() {
        println!("Dependency {target} found in graph, but no paths were discovered.");
        println!("Try increasing --max-paths or checking module exclusions.");
    } else {
        return false;
    }
    true
}

fn print_text(report: &WhyReport, max_paths: i64) {
    println!("Why is {} included?", report.target.cyan().bold());
    println!("{}", "=".repeat(50));
    println!();

    println!(
        "Directly depended on by ({} modules):",
        report.direct_dependents.len()
    );
    for dep in &report.direct_dependents {
        let marker = if report.is_root(dep) { "* " } else { "  " };
        println!("  {}{dep}", marker.green());
    }
    println!();

    let shown = &report.paths[..report.paths.len().min(MAX_TEXT_PATHS)];
    println!(
        "Dependency paths (showing {} of {}):",
        shown.len(),
        report.paths.len()
    );
    println!();

    for (i, why_path) in shown.iter().enumerate() {
        let line = format_path(&why_path.path);
        if why_path.direct {
            println!("  {}. {} {line}", i + 1, "[DIRECT]".green().bold());
        } else {
            println!("  {}. {line}", i + 1);
        }
    }

    if report.truncated {
        println!();
        println!(
            "  {}",
            format!("(search truncated at --max-paths={max_paths})").yellow()
        );
    } else if report.paths.len() > shown.len() {
        println!();
        println!(
            "  {}",
            format!(
                "(showing first {MAX_TEXT_PATHS} in text output; use --json, --dot or --svg for the full set)"
            )
            .dimmed()
        );
    }
}
