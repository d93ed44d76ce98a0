//! `depwhy stats` command implementation.

use anyhow::{bail, Result};
use colored::Colorize;
use depwhy::render::{render_comparison_csv, render_stats_csv, to_json};
use depwhy::{compare_stats, compute_stats, DependencyOverview, StatsComparison, StatsSnapshot};

use super::context::{Context, InputArgs};
use super::OutputFormat;

/// The two root sets of a comparison.
#[derive(Debug)]
pub struct CompareSets {
    pub roots_a: Vec<String>,
    pub roots_b: Vec<String>,
    pub set_a: String,
    pub set_b: String,
}

/// Run the stats command for the configured roots.
pub fn run(inputs: &InputArgs, format: OutputFormat, list: bool) -> Result<()> {
    let ctx = Context::load(inputs)?;

    let stats = compute_stats(&ctx.graph, &ctx.roots, ctx.classifier())?;

    match format {
        OutputFormat::Json => println!("{}", to_json(&stats)?),
        OutputFormat::Csv => print!("{}", render_stats_csv(&stats)),
        OutputFormat::Text | OutputFormat::Dot | OutputFormat::Svg => print_snapshot(&stats),
    }

    if list && format == OutputFormat::Text {
        println!();
        println!("{}", "All dependencies:".white().bold());
        for dep in DependencyOverview::compute(&ctx.graph, &ctx.roots).all() {
            println!("  {} {dep}", "•".dimmed());
        }
    }
    Ok(())
}

/// Run the stats command comparing two root sets.
pub fn run_compare(inputs: &InputArgs, format: OutputFormat, sets: &CompareSets) -> Result<()> {
    let ctx = Context::load(inputs)?;
    if ctx.classifier.is_some() {
        bail!("--compare cannot be combined with a test-only list");
    }

    let roots_a = ctx.roots_or_default(&sets.roots_a);
    let roots_b = ctx.roots_or_default(&sets.roots_b);
    let cmp = compare_stats(&ctx.graph, &roots_a, &roots_b, &sets.set_a, &sets.set_b)?;

    match format {
        OutputFormat::Json => println!("{}", to_json(&cmp)?),
        OutputFormat::Csv => print!("{}", render_comparison_csv(&cmp)),
        OutputFormat::Text | OutputFormat::Dot | OutputFormat::Svg => print_comparison(&cmp),
    }
    Ok(())
}

fn print_snapshot(stats: &StatsSnapshot) {
    let rows = [
        ("Direct Dependencies", stats.direct),
        ("Transitive Dependencies", stats.transitive),
        ("Total Dependencies", stats.total),
        ("Max Depth Of Dependencies", stats.max_depth),
    ];
    for (label, value) in rows {
        println!("{}: {}", label.white().bold(), value.to_string().green());
    }
    if let (Some(test_only), Some(non_test_only)) = (stats.test_only, stats.non_test_only) {
        println!("{}: {test_only}", "Test-only Dependencies".white().bold());
        println!("{}: {non_test_only}", "Non-test Dependencies".white().bold());
    }
}

fn print_comparison(cmp: &StatsComparison) {
    println!(
        "{}",
        format!("Stats compare ({} -> {})", cmp.set_a, cmp.set_b)
            .cyan()
            .bold()
    );
    let rows = [
        ("Direct Dependencies", cmp.before.direct, cmp.after.direct, cmp.delta.direct),
        (
            "Transitive Dependencies",
            cmp.before.transitive,
            cmp.after.transitive,
            cmp.delta.transitive,
        ),
        ("Total Dependencies", cmp.before.total, cmp.after.total, cmp.delta.total),
        (
            "Max Depth Of Dependencies",
            cmp.before.max_depth,
            cmp.after.max_depth,
            cmp.delta.max_depth,
        ),
    ];
    for (label, before, after, delta) in rows {
        let delta = format!("{delta:+}");
        let delta = match delta.as_bytes().first() {
            Some(b'+') if delta != "+0" => delta.red(),
            Some(b'-') => delta.green(),
            _ => delta.normal(),
        };
        println!("{}: {before} -> {after} (delta {delta})", label.white().bold());
    }
    if !cmp.only_in_b.is_empty() {
        println!("Only in {}: {}", cmp.set_b, cmp.only_in_b.join(", "));
    }
}
