//! Pairwise comparison and corpus matching.
//!
//! # Overview
//!
//! This module holds the engine's algorithmic core:
//! - [`comparator`]: compares exactly two fingerprints into a
//!   [`FileComparison`] (similarity score + line-level diff sets)
//! - [`matcher`]: reduces the full similarity matrix between two corpora
//!   into a [`CorpusPartition`] via greedy mutual-best matching
//!
//! # Score convention
//!
//! The stored score is **similarity**: 100 means identical, 0 means fully
//! distinct. The dissimilarity used in some descriptions of the algorithm
//! is `100 - similarity`. One convention, applied everywhere.

pub mod comparator;
pub mod matcher;

use std::sync::Arc;

use crate::fingerprint::{FileFingerprint, LineRecord};

pub use comparator::compare;
pub use matcher::{CorpusMatcher, MatchStats, MatcherConfig};

/// Maximum similarity score (identical files).
pub const MAX_SIMILARITY: u8 = 100;

/// The result of comparing exactly two fingerprints.
///
/// Diff sets are stored as indices into the respective fingerprint's line
/// sequence, so line records are referenced rather than copied.
/// `duplicate_pairs` holds one entry per matched pair of lines: the record
/// set spans both files, while the pair count scores once. Which line
/// pairs with which among same-hash lines is arbitrary by design; only
/// counts are semantically meaningful.
#[derive(Debug, Clone)]
pub struct FileComparison {
    /// The first fingerprint (row side).
    pub first: Arc<FileFingerprint>,
    /// The second fingerprint (column side).
    pub second: Arc<FileFingerprint>,
    /// Similarity score: 100 identical, 0 fully distinct.
    pub similarity: u8,
    /// Matched line pairs as (index in first, index in second).
    pub duplicate_pairs: Vec<(u32, u32)>,
    /// Indices of lines present only in the first file, ascending.
    pub unique_in_first: Vec<u32>,
    /// Indices of lines present only in the second file, ascending.
    pub unique_in_second: Vec<u32>,
}

impl FileComparison {
    /// Whether the two files are fully identical under this comparison.
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.similarity == MAX_SIMILARITY
    }

    /// Number of duplicated line records across both files.
    #[must_use]
    pub fn duplicate_line_count(&self) -> usize {
        self.duplicate_pairs.len() * 2
    }

    /// Lines unique to the first file, in ascending line order.
    pub fn unique_first_records(&self) -> impl Iterator<Item = &LineRecord> {
        self.unique_in_first
            .iter()
            .map(|&i| &self.first.lines[i as usize])
    }

    /// Lines unique to the second file, in ascending line order.
    pub fn unique_second_records(&self) -> impl Iterator<Item = &LineRecord> {
        self.unique_in_second
            .iter()
            .map(|&i| &self.second.lines[i as usize])
    }

    /// Total lines considered: matched pairs plus both unique sets.
    #[must_use]
    pub fn considered_lines(&self) -> usize {
        self.duplicate_pairs.len() + self.unique_in_first.len() + self.unique_in_second.len()
    }
}

/// The matcher's final output: three disjoint groupings.
///
/// Every input fingerprint appears in exactly one grouping, exactly once:
/// as half of an exact pair, half of a partial pair, or in one of the
/// unmatched collections.
#[derive(Debug, Default)]
pub struct CorpusPartition {
    /// Byte-identical (or 100-scored) matched pairs.
    pub exact: Vec<FileComparison>,
    /// Matched pairs above the similarity threshold but below 100.
    pub partial: Vec<FileComparison>,
    /// First-corpus files with no acceptable match.
    pub unique_first: Vec<Arc<FileFingerprint>>,
    /// Second-corpus files with no acceptable match.
    pub unique_second: Vec<Arc<FileFingerprint>>,
}

impl CorpusPartition {
    /// Whether any duplication at all was detected.
    #[must_use]
    pub fn has_duplication(&self) -> bool {
        !self.exact.is_empty() || !self.partial.is_empty()
    }

    /// Flat score sequence for the histogram: one similarity per matched
    /// pair, plus a zero-value sentinel per unmatched file on either side.
    #[must_use]
    pub fn similarity_scores(&self) -> Vec<u8> {
        let mut scores = Vec::with_capacity(
            self.exact.len()
                + self.partial.len()
                + self.unique_first.len()
                + self.unique_second.len(),
        );
        scores.extend(self.exact.iter().map(|c| c.similarity));
        scores.extend(self.partial.iter().map(|c| c.similarity));
        scores.extend(std::iter::repeat(0).take(self.unique_first.len()));
        scores.extend(std::iter::repeat(0).take(self.unique_second.len()));
        scores
    }

    /// Total first-corpus fingerprints accounted for.
    #[must_use]
    pub fn first_total(&self) -> usize {
        self.exact.len() + self.partial.len() + self.unique_first.len()
    }

    /// Total second-corpus fingerprints accounted for.
    #[must_use]
    pub fn second_total(&self) -> usize {
        self.exact.len() + self.partial.len() + self.unique_second.len()
    }
}
