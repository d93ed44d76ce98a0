//! Integration tests for the depwhy CLI.
//!
//! These tests run the real binary against small graph files.

use std::io::Write;
use std::process::{Command, Stdio};

use rstest::{fixture, rstest};
use tempfile::TempDir;

mod common;
use common::{depwhy_binary, run_depwhy_in_dir, write_graph, SAMPLE_GRAPH};

const TEXT: &str = "golang.org/x/text@v0.3.0";

// ============================================================================
// Test Fixtures
// ============================================================================

/// Provides a temporary directory holding `graph.txt` with the sample graph
#[fixture]
fn sample_dir() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    write_graph(temp.path(), SAMPLE_GRAPH);
    temp
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_cli_help_lists_commands() {
    let temp = TempDir::new().unwrap();
    let output = run_depwhy_in_dir(temp.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Usage:"));
    for command in ["why", "stats", "cycles"] {
        assert!(stdout.contains(command), "Help should show '{command}'");
    }
}

#[test]
fn test_cli_version() {
    let temp = TempDir::new().unwrap();
    let output = run_depwhy_in_dir(temp.path(), &["--version"]);

    assert!(output.status.success());
    assert!(stdout_of(&output).contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Why Command Tests
// ============================================================================

#[rstest]
fn test_why_text_output(sample_dir: TempDir) {
    let output = run_depwhy_in_dir(sample_dir.path(), &["--graph", "graph.txt", "why", TEXT]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let expected = "\
Why is golang.org/x/text@v0.3.0 included?
==================================================

Directly depended on by (2 modules):
  * example.com/app
    golang.org/x/net@v0.1.0

Dependency paths (showing 2 of 2):

  1. [DIRECT] example.com/app -> golang.org/x/text@v0.3.0
  2. example.com/app -> golang.org/x/net@v0.1.0 -> golang.org/x/text@v0.3.0
";
    assert_eq!(stdout_of(&output), expected);
}

#[rstest]
fn test_why_json_output(sample_dir: TempDir) {
    let output = run_depwhy_in_dir(
        sample_dir.path(),
        &["--graph", "graph.txt", "why", TEXT, "--json"],
    );

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(json["target"], TEXT);
    assert_eq!(json["found"], true);
    assert_eq!(json["totalPaths"], 2);
    assert_eq!(json["paths"][0]["direct"], true);
    assert_eq!(json["roots"][0], "example.com/app");
}

#[rstest]
fn test_why_dot_output(sample_dir: TempDir) {
    let output = run_depwhy_in_dir(
        sample_dir.path(),
        &["--graph", "graph.txt", "why", TEXT, "--dot"],
    );

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.starts_with("strict digraph {\n"));
    assert!(stdout.contains("\"example.com/app\" [fillcolor=\"#ccffcc\"];"));
    assert!(stdout.contains("\"golang.org/x/text@v0.3.0\" [fillcolor=\"#ffffcc\"];"));
    assert!(stdout.contains("\"example.com/app\" -> \"golang.org/x/net@v0.1.0\";"));
    assert!(!stdout.contains("testify"));
}

#[rstest]
fn test_why_svg_output(sample_dir: TempDir) {
    let output = run_depwhy_in_dir(
        sample_dir.path(),
        &["--graph", "graph.txt", "why", TEXT, "--svg"],
    );

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert!(stdout.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(stdout.contains("Why is golang.org/x/text@v0.3.0 included?"));
    for module in ["example.com/app", "golang.org/x/net@v0.1.0", TEXT] {
        assert!(stdout.contains(&format!("<title>{module}</title>")), "missing {module}");
    }
    assert!(!stdout.contains("testify"));
}

#[rstest]
fn test_why_svg_and_dot_conflict(sample_dir: TempDir) {
    let output = run_depwhy_in_dir(
        sample_dir.path(),
        &["--graph", "graph.txt", "why", TEXT, "--svg", "--dot"],
    );

    assert!(!output.status.success());
}

#[rstest]
fn test_why_json_and_dot_conflict(sample_dir: TempDir) {
    let output = run_depwhy_in_dir(
        sample_dir.path(),
        &["--graph", "graph.txt", "why", TEXT, "--json", "--dot"],
    );

    assert!(!output.status.success());
}

#[rstest]
fn test_why_unknown_target(sample_dir: TempDir) {
    let output = run_depwhy_in_dir(
        sample_dir.path(),
        &["--graph", "graph.txt", "why", "example.com/missing"],
    );

    assert!(output.status.success());
    assert!(stdout_of(&output).contains("not found in the dependency graph"));
}

#[rstest]
fn test_why_unknown_target_dot(sample_dir: TempDir) {
    let output = run_depwhy_in_dir(
        sample_dir.path(),
        &["--graph", "graph.txt", "why", "example.com/missing", "--dot"],
    );

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert_eq!(
        stdout,
        "Dependency \"example.com/missing\" not found in the dependency graph.\n"
    );
    assert!(!stdout.contains("digraph"));
}

#[rstest]
fn test_why_depth_limit_leaves_no_paths(sample_dir: TempDir) {
    let output = run_depwhy_in_dir(
        sample_dir.path(),
        &[
            "--graph",
            "graph.txt",
            "why",
            "golang.org/x/sys@v0.2.0",
            "--max-depth",
            "1",
        ],
    );

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let expected = "\
Dependency \"golang.org/x/sys@v0.2.0\" found in graph, but no paths were discovered.
Try increasing --max-paths or checking module exclusions.
";
    assert_eq!(stdout_of(&output), expected);
}

#[rstest]
fn test_why_max_paths_truncates(sample_dir: TempDir) {
    let output = run_depwhy_in_dir(
        sample_dir.path(),
        &["--graph", "graph.txt", "why", TEXT, "--max-paths", "1"],
    );

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("showing 1 of 1"));
    assert!(stdout.contains("(search truncated at --max-paths=1)"));
}

#[rstest]
fn test_why_max_depth_limits_hops(sample_dir: TempDir) {
    let output = run_depwhy_in_dir(
        sample_dir.path(),
        &["--graph", "graph.txt", "why", TEXT, "--max-depth", "1"],
    );

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("showing 1 of 1"));
    assert!(stdout.contains("[DIRECT]"));
}

#[rstest]
fn test_why_exclude_drops_route(sample_dir: TempDir) {
    let output = run_depwhy_in_dir(
        sample_dir.path(),
        &[
            "--graph",
            "graph.txt",
            "--exclude",
            "golang.org/x/net*",
            "why",
            TEXT,
        ],
    );

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("showing 1 of 1"));
    assert!(!stdout.contains("golang.org/x/net"));
}

#[rstest]
fn test_why_test_only_target(sample_dir: TempDir) {
    std::fs::write(
        sample_dir.path().join("test-only.txt"),
        "github.com/stretchr/testify@v1.8.0\n",
    )
    .unwrap();

    let output = run_depwhy_in_dir(
        sample_dir.path(),
        &[
            "--graph",
            "graph.txt",
            "--test-only-list",
            "test-only.txt",
            "why",
            "github.com/stretchr/testify@v1.8.0",
        ],
    );

    assert!(output.status.success());
    assert!(stdout_of(&output).contains("is test-only"));
}

#[test]
fn test_why_reads_graph_from_stdin() {
    let temp = TempDir::new().unwrap();
    let mut child = Command::new(depwhy_binary())
        .args(["why", TEXT])
        .current_dir(temp.path())
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn depwhy");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(SAMPLE_GRAPH.as_bytes())
        .unwrap();

    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).contains("showing 2 of 2"));
}

// ============================================================================
// Stats Command Tests
// ============================================================================

#[rstest]
fn test_stats_text_output(sample_dir: TempDir) {
    let output = run_depwhy_in_dir(sample_dir.path(), &["--graph", "graph.txt", "stats"]);

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Direct Dependencies: 3"));
    assert!(stdout.contains("Transitive Dependencies: 2"));
    assert!(stdout.contains("Total Dependencies: 5"));
    assert!(stdout.contains("Max Depth Of Dependencies: 3"));
}

#[rstest]
fn test_stats_list_prints_every_dependency(sample_dir: TempDir) {
    let output = run_depwhy_in_dir(
        sample_dir.path(),
        &["--graph", "graph.txt", "stats", "--list"],
    );

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("All dependencies:"));
    assert!(stdout.contains("gopkg.in/yaml.v3@v3.0.1"));
}

#[rstest]
#[case::csv("--csv", "Direct,Transitive,Total,MaxDepth\n3,2,5,3\n")]
fn test_stats_csv_output(sample_dir: TempDir, #[case] flag: &str, #[case] expected: &str) {
    let output = run_depwhy_in_dir(sample_dir.path(), &["--graph", "graph.txt", "stats", flag]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), expected);
}

#[rstest]
fn test_stats_json_output(sample_dir: TempDir) {
    let output = run_depwhy_in_dir(
        sample_dir.path(),
        &["--graph", "graph.txt", "stats", "--json"],
    );

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(json["directDependencies"], 3);
    assert_eq!(json["transitiveDependencies"], 2);
    assert_eq!(json["totalDependencies"], 5);
    assert_eq!(json["maxDepthOfDependencies"], 3);
}

#[rstest]
fn test_stats_compare_csv(sample_dir: TempDir) {
    let output = run_depwhy_in_dir(
        sample_dir.path(),
        &[
            "--graph",
            "graph.txt",
            "stats",
            "--compare",
            "--roots-b",
            "golang.org/x/net@v0.1.0",
            "--csv",
        ],
    );

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let expected = "\
Set,Direct,Transitive,Total,MaxDepth
A,3,2,5,3
B,2,0,2,2
Delta,-1,-2,-3,-1
";
    assert_eq!(stdout_of(&output), expected);
}

#[rstest]
fn test_stats_compare_text(sample_dir: TempDir) {
    let output = run_depwhy_in_dir(
        sample_dir.path(),
        &[
            "--graph",
            "graph.txt",
            "stats",
            "--compare",
            "--roots-b",
            "golang.org/x/net@v0.1.0",
            "--set-a",
            "app",
            "--set-b",
            "net",
        ],
    );

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Stats compare (app -> net)"));
    assert!(stdout.contains("Direct Dependencies: 3 -> 2 (delta -1)"));
}

// ============================================================================
// Cycles Command Tests
// ============================================================================

#[rstest]
fn test_cycles_none(sample_dir: TempDir) {
    let output = run_depwhy_in_dir(sample_dir.path(), &["--graph", "graph.txt", "cycles"]);

    assert!(output.status.success());
    assert!(stdout_of(&output).contains("No circular dependencies detected."));
}

#[test]
fn test_cycles_json() {
    let temp = TempDir::new().unwrap();
    write_graph(temp.path(), "a b\nb c\nc a\nc d\n");

    let output = run_depwhy_in_dir(temp.path(), &["--graph", "graph.txt", "cycles", "--json"]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(json[0]["modules"], serde_json::json!(["a", "b", "c"]));
}

// ============================================================================
// Config and Error Tests
// ============================================================================

#[rstest]
fn test_config_file_sets_defaults(sample_dir: TempDir) {
    std::fs::write(sample_dir.path().join(".depwhy.yaml"), "max-paths: 1\n").unwrap();

    let output = run_depwhy_in_dir(sample_dir.path(), &["--graph", "graph.txt", "why", TEXT]);

    assert!(output.status.success());
    assert!(stdout_of(&output).contains("(search truncated at --max-paths=1)"));
}

#[rstest]
fn test_cli_flag_overrides_config(sample_dir: TempDir) {
    std::fs::write(sample_dir.path().join(".depwhy.yaml"), "max-paths: 1\n").unwrap();

    let output = run_depwhy_in_dir(
        sample_dir.path(),
        &["--graph", "graph.txt", "why", TEXT, "--max-paths", "0"],
    );

    assert!(output.status.success());
    assert!(stdout_of(&output).contains("showing 2 of 2"));
}

#[rstest]
fn test_invalid_config_fails(sample_dir: TempDir) {
    std::fs::write(sample_dir.path().join(".depwhy.yaml"), "max-pathz: 1\n").unwrap();

    let output = run_depwhy_in_dir(sample_dir.path(), &["--graph", "graph.txt", "stats"]);

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("configuration error"));
}

#[rstest]
fn test_excluding_every_root_fails(sample_dir: TempDir) {
    let output = run_depwhy_in_dir(
        sample_dir.path(),
        &["--graph", "graph.txt", "--exclude", "example.com/*", "stats"],
    );

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("no root modules remain after exclusions"));
}

#[test]
fn test_malformed_graph_reports_line() {
    let temp = TempDir::new().unwrap();
    write_graph(temp.path(), "a b\njust-one-field\n");

    let output = run_depwhy_in_dir(temp.path(), &["--graph", "graph.txt", "stats"]);

    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("failed to load dependency graph"));
    assert!(stderr.contains("parse error on line 2"));
}

#[test]
fn test_missing_graph_file_fails() {
    let temp = TempDir::new().unwrap();

    let output = run_depwhy_in_dir(temp.path(), &["--graph", "nope.txt", "stats"]);

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("error"));
}

#[test]
fn test_empty_graph_fails() {
    let temp = TempDir::new().unwrap();
    write_graph(temp.path(), "# nothing here\n");

    let output = run_depwhy_in_dir(temp.path(), &["--graph", "graph.txt", "stats"]);

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("dependency graph is empty"));
}
