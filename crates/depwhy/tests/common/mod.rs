//! Common test utilities shared across integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Sample `go mod graph` output used by the CLI tests.
///
/// ```text
/// example.com/app
///   ├── golang.org/x/net ──┐
///   │     └── golang.org/x/sys
///   ├── golang.org/x/text <┘
///   └── github.com/stretchr/testify
///         └── gopkg.in/yaml.v3
/// ```
pub const SAMPLE_GRAPH: &str = "\
example.com/app golang.org/x/net@v0.1.0
example.com/app golang.org/x/text@v0.3.0
example.com/app github.com/stretchr/testify@v1.8.0
golang.org/x/net@v0.1.0 golang.org/x/text@v0.3.0
golang.org/x/net@v0.1.0 golang.org/x/sys@v0.2.0
github.com/stretchr/testify@v1.8.0 gopkg.in/yaml.v3@v3.0.1
";

/// Path to the compiled depwhy binary.
pub fn depwhy_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_depwhy"))
}

/// Write `content` as `graph.txt` inside `dir` and return its path.
pub fn write_graph(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("graph.txt");
    std::fs::write(&path, content).expect("Failed to write graph file");
    path
}

/// Run the depwhy binary in `dir` with colours disabled.
pub fn run_depwhy_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(depwhy_binary())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute depwhy binary")
}
