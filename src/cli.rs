//! Command-line interface definitions for twindiff.
//!
//! All CLI arguments and options use the clap derive API. The tool has a
//! single operation (compare two trees), so there are no subcommands.
//!
//! # Example
//!
//! ```bash
//! # Compare two source trees with the text report on stdout
//! twindiff ./branch-a ./branch-b
//!
//! # Markdown report with histogram, written to a file
//! twindiff ./old ./new --output markdown --histogram --report report.md
//!
//! # Looser matching, custom image extensions
//! twindiff ./a ./b --threshold 80 --image-ext png --image-ext svg
//!
//! # Verbose mode for debugging
//! twindiff -v ./a ./b
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Cross-tree duplication detector.
///
/// twindiff fingerprints every file in two directory trees (BLAKE3 over
/// the raw bytes plus a hash multiset of non-blank lines), pairs files
/// across the trees by mutual-best similarity, and reports identical,
/// partially similar, and unique files.
#[derive(Debug, Parser)]
#[command(name = "twindiff")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// First tree to compare
    #[arg(value_name = "FIRST_TREE")]
    pub first: PathBuf,

    /// Second tree to compare
    #[arg(value_name = "SECOND_TREE")]
    pub second: PathBuf,

    /// Similarity threshold in percent (0-100)
    ///
    /// Files must share strictly more than this percentage of considered
    /// lines to be reported as partial duplicates. Defaults to the
    /// configured value (90 out of the box).
    #[arg(long, value_name = "PERCENT", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub threshold: Option<u8>,

    /// File extensions compared by name only (can be given multiple times)
    ///
    /// Replaces the configured allow-list (default: png, ico).
    #[arg(long = "image-ext", value_name = "EXT")]
    pub image_extensions: Vec<String>,

    /// Glob patterns to ignore (can be given multiple times)
    ///
    /// These patterns are added to any .gitignore found at a corpus root.
    #[arg(short, long = "ignore", value_name = "PATTERN")]
    pub ignore_patterns: Vec<String>,

    /// Skip hidden files and directories (starting with .)
    #[arg(long)]
    pub skip_hidden: bool,

    /// Output format for the report
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Append a similarity histogram to the report
    #[arg(long)]
    pub histogram: bool,

    /// Emit errors as structured JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Increase verbosity level (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and the report itself
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Output format for the comparison report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text report
    Text,
    /// Markdown report
    Markdown,
    /// JSON output for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
