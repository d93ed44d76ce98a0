//! `depwhy cycles` command implementation.

use anyhow::Result;
use colored::Colorize;
use depwhy::graph::detect_cycles;
use depwhy::render::to_json;

use super::context::{Context, InputArgs};

/// Run the cycles command.
pub fn run(inputs: &InputArgs, json: bool) -> Result<()> {
    let ctx = Context::load(inputs)?;

    let cycles = detect_cycles(&ctx.graph);

    if json {
        println!("{}", to_json(&cycles)?);
        return Ok(());
    }

    if cycles.is_empty() {
        println!("{}", "No circular dependencies detected.".green());
        return Ok(());
    }

    println!(
        "Found {} circular dependencies:",
        cycles.len().to_string().red().bold()
    );
    println!();

    for (i, cycle) in cycles.iter().enumerate() {
        println!("  {} {}:", "Cycle".yellow().bold(), i + 1);
        println!(
            "    {} {}",
            format!("{} modules:", cycle.len()).dimmed(),
            cycle.modules.join(", ")
        );
    }

    Ok(())
}
