//! Output formatters for corpus match results.
//!
//! This module renders a [`CorpusPartition`](crate::matching::CorpusPartition)
//! in different formats:
//! - Plain text for terminals and report files
//! - Markdown for sharing in docs and reviews
//! - JSON for automation and scripting
//! - A text histogram of similarity scores
//!
//! # Example
//!
//! ```no_run
//! use twindiff::matching::{CorpusMatcher, MatcherConfig};
//! use twindiff::output::TextReport;
//!
//! let matcher = CorpusMatcher::new(MatcherConfig::default());
//! let (partition, _) = matcher.match_corpora(Vec::new(), Vec::new());
//!
//! let report = TextReport::new(&partition);
//! report.write_to(std::io::stdout()).unwrap();
//! ```

pub mod histogram;
pub mod json;
pub mod markdown;
pub mod text;

// Re-export main types
pub use histogram::Histogram;
pub use json::JsonReport;
pub use markdown::MarkdownReport;
pub use text::TextReport;

use crate::matching::{CorpusPartition, FileComparison};

/// Partial pairs sorted by similarity ascending, the order reports
/// render them in.
fn partials_by_similarity(partition: &CorpusPartition) -> Vec<&FileComparison> {
    let mut partials: Vec<&FileComparison> = partition.partial.iter().collect();
    partials.sort_by_key(|cmp| cmp.similarity);
    partials
}
