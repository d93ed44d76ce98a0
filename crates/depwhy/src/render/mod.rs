//! Machine-readable output formats.
//!
//! Human-readable text lives in the CLI since it depends on terminal colour
//! settings. Everything here is plain and deterministic: the same input
//! always produces byte-identical output.

mod dot;
mod svg;

pub use dot::render_dot;
pub use svg::render_svg;

use std::fmt::Write as _;

use serde::Serialize;

use crate::error::Result;
use crate::stats::{StatsComparison, StatsSnapshot};

/// Separator used when printing a path on one line.
pub const PATH_SEPARATOR: &str = " -> ";

/// Join a path for display: `a -> b -> c`.
#[must_use]
pub fn format_path<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(PATH_SEPARATOR)
}

/// Pretty-printed JSON for any report type.
///
/// # Errors
///
/// Returns [`crate::Error::Json`] if serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Two-line CSV for one snapshot. The test-only columns appear only when the
/// snapshot carries them.
#[must_use]
pub fn render_stats_csv(stats: &StatsSnapshot) -> String {
    let mut out = String::new();
    match (stats.test_only, stats.non_test_only) {
        (Some(test_only), Some(non_test_only)) => {
            out.push_str("Direct,Transitive,Total,MaxDepth,TestOnly,NonTestOnly\n");
            let _ = writeln!(
                out,
                "{},{},{},{},{test_only},{non_test_only}",
                stats.direct, stats.transitive, stats.total, stats.max_depth
            );
        }
        _ => {
            out.push_str("Direct,Transitive,Total,MaxDepth\n");
            let _ = writeln!(
                out,
                "{},{},{},{}",
                stats.direct, stats.transitive, stats.total, stats.max_depth
            );
        }
    }
    out
}

/// CSV for a comparison: one row per set, a delta row, and an `OnlyIn<B>`
/// row listing new dependencies separated by `;` when there are any.
#[must_use]
pub fn render_comparison_csv(cmp: &StatsComparison) -> String {
    let mut out = String::from("Set,Direct,Transitive,Total,MaxDepth\n");
    for (label, s) in [(&cmp.set_a, &cmp.before), (&cmp.set_b, &cmp.after)] {
        let _ = writeln!(
            out,
            "{label},{},{},{},{}",
            s.direct, s.transitive, s.total, s.max_depth
        );
    }
    let d = &cmp.delta;
    let _ = writeln!(
        out,
        "Delta,{},{},{},{}",
        d.direct, d.transitive, d.total, d.max_depth
    );
    if !cmp.only_in_b.is_empty() {
        let _ = writeln!(out, "OnlyIn{},{}", cmp.set_b, cmp.only_in_b.join(";"));
    }
    out
}
