//! CLI command implementations.

pub mod context;
pub mod cycles;
pub mod stats;
pub mod why;

/// How a command should print its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Dot,
    Svg,
    Csv,
}

impl OutputFormat {
    /// Pick the format from mutually exclusive flags. Text when none is set.
    pub fn select(json: bool, dot: bool, svg: bool, csv: bool) -> Self {
        if json {
            Self::Json
        } else if dot {
            Self::Dot
        } else if svg {
            Self::Svg
        } else if csv {
            Self::Csv
        } else {
            Self::Text
        }
    }
}
