//! JSON output formatter for corpus match results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "schema_version": 1,
//!   "summary": {
//!     "identical_pairs": 2,
//!     "partial_pairs": 1,
//!     "unique_first": 3,
//!     "unique_second": 0
//!   },
//!   "identical": [
//!     { "first": "/a/x.rs", "second": "/b/x.rs", "similarity": 100 }
//!   ],
//!   "partial": [
//!     {
//!       "first": "/a/y.rs",
//!       "second": "/b/y.rs",
//!       "similarity": 95,
//!       "first_lines": 20,
//!       "second_lines": 19,
//!       "unique_in_first": [ { "line_nr": 7, "content": "let z = 1;" } ],
//!       "unique_in_second": []
//!     }
//!   ],
//!   "unique_first": ["/a/z.rs"],
//!   "unique_second": []
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::matching::{CorpusPartition, FileComparison};

use super::partials_by_similarity;

/// Version of the JSON schema produced by this formatter.
pub const SCHEMA_VERSION: u32 = 1;

/// One diff line in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonLine {
    /// 0-based line number in the original file
    pub line_nr: u32,
    /// Trimmed line content
    pub content: String,
}

/// An identical pair in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonIdenticalPair {
    /// Path in the first corpus
    pub first: String,
    /// Path in the second corpus
    pub second: String,
    /// Always 100 for this bucket
    pub similarity: u8,
}

/// A partial pair with its line-level diff in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonPartialPair {
    /// Path in the first corpus
    pub first: String,
    /// Path in the second corpus
    pub second: String,
    /// Similarity score (0-100)
    pub similarity: u8,
    /// Significant line count of the first file
    pub first_lines: usize,
    /// Significant line count of the second file
    pub second_lines: usize,
    /// Lines only present in the first file, ascending line order
    pub unique_in_first: Vec<JsonLine>,
    /// Lines only present in the second file, ascending line order
    pub unique_in_second: Vec<JsonLine>,
}

/// Summary counts over the whole partition.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Byte-identical (or 100-scored) pairs
    pub identical_pairs: usize,
    /// Pairs above the similarity threshold
    pub partial_pairs: usize,
    /// Unmatched files in the first corpus
    pub unique_first: usize,
    /// Unmatched files in the second corpus
    pub unique_second: usize,
}

/// Complete JSON report document.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    /// Schema version for forward compatibility
    pub schema_version: u32,
    /// Summary counts
    pub summary: JsonSummary,
    /// Identical pairs
    pub identical: Vec<JsonIdenticalPair>,
    /// Partial pairs, sorted by similarity ascending
    pub partial: Vec<JsonPartialPair>,
    /// Unmatched first-corpus paths
    pub unique_first: Vec<String>,
    /// Unmatched second-corpus paths
    pub unique_second: Vec<String>,
}

impl JsonReport {
    /// Build the JSON document from a partition.
    #[must_use]
    pub fn new(partition: &CorpusPartition) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            summary: JsonSummary {
                identical_pairs: partition.exact.len(),
                partial_pairs: partition.partial.len(),
                unique_first: partition.unique_first.len(),
                unique_second: partition.unique_second.len(),
            },
            identical: partition
                .exact
                .iter()
                .map(|cmp| JsonIdenticalPair {
                    first: cmp.first.path.to_string_lossy().into_owned(),
                    second: cmp.second.path.to_string_lossy().into_owned(),
                    similarity: cmp.similarity,
                })
                .collect(),
            partial: partials_by_similarity(partition)
                .into_iter()
                .map(JsonPartialPair::from_comparison)
                .collect(),
            unique_first: partition
                .unique_first
                .iter()
                .map(|fp| fp.path.to_string_lossy().into_owned())
                .collect(),
            unique_second: partition
                .unique_second
                .iter()
                .map(|fp| fp.path.to_string_lossy().into_owned())
                .collect(),
        }
    }

    /// Serialize as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON to the given writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> anyhow::Result<()> {
        let json = self.to_json_pretty()?;
        writeln!(writer, "{json}")?;
        Ok(())
    }
}

impl JsonPartialPair {
    fn from_comparison(cmp: &FileComparison) -> Self {
        Self {
            first: cmp.first.path.to_string_lossy().into_owned(),
            second: cmp.second.path.to_string_lossy().into_owned(),
            similarity: cmp.similarity,
            first_lines: cmp.first.line_count(),
            second_lines: cmp.second.line_count(),
            unique_in_first: cmp
                .unique_first_records()
                .map(|l| JsonLine {
                    line_nr: l.line_nr,
                    content: l.content.clone(),
                })
                .collect(),
            unique_in_second: cmp
                .unique_second_records()
                .map(|l| JsonLine {
                    line_nr: l.line_nr,
                    content: l.content.clone(),
                })
                .collect(),
        }
    }
}
