//! Corpus matching: pairing files across two fingerprint collections.
//!
//! # Overview
//!
//! Matching runs in three stages:
//! 1. **Exact pass**: group both corpora by whole-file hash; each hash
//!    present on both sides yields one exact pair.
//! 2. **Matrix reduction**: build the full similarity matrix over the
//!    remainders and repeatedly extract mutual-best matches.
//! 3. **Remainder**: anything left unmatched is unique to its corpus.
//!
//! The reduction is a greedy heuristic, deliberately chosen over optimal
//! bipartite assignment for its low cost on large corpora. Tie-breaking
//! is by first occurrence in the (stable) input order, so identical
//! inputs always produce identical partitions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::fingerprint::{Digest, FileFingerprint};
use crate::progress::ProgressCallback;

use super::comparator::compare;
use super::{CorpusPartition, FileComparison, MAX_SIMILARITY};

/// Default similarity threshold: files must share strictly more than this
/// percentage of considered lines to count as partial duplicates.
pub const DEFAULT_SIMILARITY_THRESHOLD: u8 = 90;

/// How often the matrix fill reports progress, in cells.
const PROGRESS_STRIDE: usize = 256;

/// Configuration for corpus matching.
#[derive(Clone)]
pub struct MatcherConfig {
    /// Lower-bound similarity for the partial-duplicate bucket.
    /// A mutual-best pair scoring at or below this is left unmatched.
    pub similarity_threshold: u8,
    /// Optional progress callback for the matrix fill.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for MatcherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatcherConfig")
            .field("similarity_threshold", &self.similarity_threshold)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            progress_callback: None,
        }
    }
}

impl MatcherConfig {
    /// Set the partial-duplicate similarity threshold (clamped to 0-100).
    #[must_use]
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.similarity_threshold = threshold.min(MAX_SIMILARITY);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Statistics from a corpus match run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchStats {
    /// Files in the first corpus
    pub first_files: usize,
    /// Files in the second corpus
    pub second_files: usize,
    /// Exact pairs found by the whole-file hash pass
    pub exact_from_hash: usize,
    /// Pairwise comparisons computed for the matrix
    pub comparisons: usize,
    /// Mutual-best matches recorded during reduction
    pub reduction_matches: usize,
}

/// Matcher that partitions two fingerprint corpora.
///
/// # Example
///
/// ```
/// use twindiff::matching::{CorpusMatcher, MatcherConfig};
///
/// let matcher = CorpusMatcher::new(MatcherConfig::default().with_threshold(80));
/// let (partition, stats) = matcher.match_corpora(Vec::new(), Vec::new());
/// assert!(!partition.has_duplication());
/// assert_eq!(stats.comparisons, 0);
/// ```
pub struct CorpusMatcher {
    config: MatcherConfig,
}

impl CorpusMatcher {
    /// Create a matcher with the given configuration.
    #[must_use]
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Partition the two corpora into exact pairs, partial pairs, and
    /// unmatched remainders. Every input fingerprint lands in exactly one
    /// bucket.
    #[must_use]
    pub fn match_corpora(
        &self,
        first: Vec<Arc<FileFingerprint>>,
        second: Vec<Arc<FileFingerprint>>,
    ) -> (CorpusPartition, MatchStats) {
        let mut stats = MatchStats {
            first_files: first.len(),
            second_files: second.len(),
            ..Default::default()
        };
        let mut partition = CorpusPartition::default();

        log::info!(
            "Matching {} files against {} files",
            first.len(),
            second.len()
        );

        let (rows, cols) = self.exact_pass(first, second, &mut partition, &mut stats);

        log::info!(
            "Exact pass: {} byte-identical pairs, {}x{} matrix remaining",
            stats.exact_from_hash,
            rows.len(),
            cols.len()
        );

        self.reduce_matrix(rows, cols, &mut partition, &mut stats);

        debug_assert_eq!(partition.first_total(), stats.first_files);
        debug_assert_eq!(partition.second_total(), stats.second_files);

        log::info!(
            "Match complete: {} exact, {} partial, {} / {} unique",
            partition.exact.len(),
            partition.partial.len(),
            partition.unique_first.len(),
            partition.unique_second.len()
        );

        (partition, stats)
    }

    /// Stage 1: resolve cross-corpus whole-file hash equality.
    ///
    /// Each hash present on both sides yields one pair (first occurrence
    /// on each side); same-side extra copies are not deduplicated here
    /// and fall through to the matrix.
    fn exact_pass(
        &self,
        first: Vec<Arc<FileFingerprint>>,
        second: Vec<Arc<FileFingerprint>>,
        partition: &mut CorpusPartition,
        stats: &mut MatchStats,
    ) -> (Vec<Arc<FileFingerprint>>, Vec<Arc<FileFingerprint>>) {
        // First occurrence per hash; pairing within same-hash groups is
        // arbitrary, so keeping only the first instance is enough.
        let mut second_by_hash: HashMap<Digest, usize> = HashMap::new();
        for (idx, fp) in second.iter().enumerate() {
            second_by_hash.entry(fp.file_hash).or_insert(idx);
        }

        let mut second_matched = vec![false; second.len()];
        let mut rows = Vec::new();

        for fp in first {
            // Removing the entry enforces one pairing per shared hash.
            match second_by_hash.remove(&fp.file_hash) {
                Some(idx) => {
                    second_matched[idx] = true;
                    log::debug!(
                        "Identical: {} <> {}",
                        fp.path.display(),
                        second[idx].path.display()
                    );
                    partition.exact.push(compare(&fp, &second[idx]));
                    stats.exact_from_hash += 1;
                }
                None => rows.push(fp),
            }
        }

        let cols = second
            .into_iter()
            .zip(second_matched)
            .filter_map(|(fp, matched)| (!matched).then_some(fp))
            .collect();

        (rows, cols)
    }

    /// Stages 2 and 3: mutual-best matrix reduction over the remainders,
    /// then emit whatever is left as unique.
    fn reduce_matrix(
        &self,
        rows: Vec<Arc<FileFingerprint>>,
        cols: Vec<Arc<FileFingerprint>>,
        partition: &mut CorpusPartition,
        stats: &mut MatchStats,
    ) {
        let n_cols = cols.len();
        let mut live_rows: Vec<usize> = (0..rows.len()).collect();
        let mut live_cols: Vec<usize> = (0..n_cols).collect();

        if !rows.is_empty() && !cols.is_empty() {
            let mut matrix = self.build_matrix(&rows, &cols);
            stats.comparisons = matrix.len();

            let similarity = |matrix: &[Option<FileComparison>], r: usize, c: usize| {
                matrix[r * n_cols + c].as_ref().map_or(0, |cmp| cmp.similarity)
            };

            loop {
                // Scan for the next mutual-best match to record. The scan
                // only reads; removal happens after it settles on a pair.
                let mut found: Option<(usize, usize)> = None;

                'row_scan: for (row_pos, &row) in live_rows.iter().enumerate() {
                    // Best column for this row, ties to first occurrence.
                    let mut best: Option<(usize, usize, u8)> = None;
                    for (col_pos, &col) in live_cols.iter().enumerate() {
                        let score = similarity(&matrix, row, col);
                        if best.is_none_or(|(_, _, s)| score > s) {
                            best = Some((col_pos, col, score));
                        }
                    }
                    let Some((col_pos, col, score)) = best else {
                        break;
                    };

                    // Best row for that column; mutual-best check.
                    let mut best_row: Option<(usize, u8)> = None;
                    for &candidate in &live_rows {
                        let s = similarity(&matrix, candidate, col);
                        if best_row.is_none_or(|(_, bs)| s > bs) {
                            best_row = Some((candidate, s));
                        }
                    }
                    if best_row.is_none_or(|(r, _)| r != row) {
                        continue;
                    }

                    if score != MAX_SIMILARITY && score <= self.config.similarity_threshold {
                        // Mutual best but not similar enough; leave both in
                        // play and keep scanning.
                        continue 'row_scan;
                    }

                    found = Some((row_pos, col_pos));
                    break 'row_scan;
                }

                let Some((row_pos, col_pos)) = found else {
                    // A full pass recorded nothing: fixed point reached.
                    break;
                };

                let row = live_rows.remove(row_pos);
                let col = live_cols.remove(col_pos);
                if let Some(cmp) = matrix[row * n_cols + col].take() {
                    log::debug!(
                        "Matched at {}%: {} <> {}",
                        cmp.similarity,
                        cmp.first.path.display(),
                        cmp.second.path.display()
                    );
                    if cmp.is_identical() {
                        partition.exact.push(cmp);
                    } else {
                        partition.partial.push(cmp);
                    }
                    stats.reduction_matches += 1;
                }

                if live_rows.is_empty() || live_cols.is_empty() {
                    break;
                }
            }
        }

        partition
            .unique_first
            .extend(live_rows.into_iter().map(|r| Arc::clone(&rows[r])));
        partition
            .unique_second
            .extend(live_cols.into_iter().map(|c| Arc::clone(&cols[c])));
    }

    /// Fill the |rows| x |cols| comparison matrix in parallel.
    ///
    /// Cells are pure functions of two read-only fingerprints, so the
    /// fill is embarrassingly parallel; each cell is written exactly once.
    fn build_matrix(
        &self,
        rows: &[Arc<FileFingerprint>],
        cols: &[Arc<FileFingerprint>],
    ) -> Vec<Option<FileComparison>> {
        let n_cols = cols.len();
        let total = rows.len() * n_cols;

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start("compare", total);
        }

        let completed = AtomicUsize::new(0);
        let matrix: Vec<Option<FileComparison>> = (0..total)
            .into_par_iter()
            .map(|cell| {
                let cmp = compare(&rows[cell / n_cols], &cols[cell % n_cols]);
                if let Some(ref callback) = self.config.progress_callback {
                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    if done % PROGRESS_STRIDE == 0 {
                        callback.on_progress(done);
                    }
                }
                Some(cmp)
            })
            .collect();

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end("compare");
        }

        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::LineRecord;
    use std::path::PathBuf;

    fn fingerprint(path: &str, file_hash: u8, lines: &[&str]) -> Arc<FileFingerprint> {
        let records = lines
            .iter()
            .enumerate()
            .map(|(nr, content)| LineRecord::new(nr as u32, (*content).to_string()))
            .collect();
        Arc::new(FileFingerprint::new(
            PathBuf::from(path),
            [file_hash; 32],
            records,
            false,
        ))
    }

    fn matcher() -> CorpusMatcher {
        CorpusMatcher::new(MatcherConfig::default())
    }

    #[test]
    fn test_empty_second_corpus() {
        let first = vec![fingerprint("/a/1", 1, &["x"]), fingerprint("/a/2", 2, &["y"])];
        let (partition, _) = matcher().match_corpora(first, Vec::new());

        assert_eq!(partition.unique_first.len(), 2);
        assert!(partition.unique_second.is_empty());
        assert!(partition.exact.is_empty());
        assert!(partition.partial.is_empty());
    }

    #[test]
    fn test_exact_pass_pairs_by_hash() {
        let first = vec![fingerprint("/a/same.rs", 9, &["line"])];
        let second = vec![fingerprint("/b/renamed.rs", 9, &["line"])];

        let (partition, stats) = matcher().match_corpora(first, second);
        assert_eq!(partition.exact.len(), 1);
        assert_eq!(stats.exact_from_hash, 1);
        assert_eq!(stats.comparisons, 0);
        assert!(partition.exact[0].is_identical());
    }

    #[test]
    fn test_same_hash_copies_resolve_through_matrix() {
        // Two identical copies on each side: stage 1 pairs one per shared
        // hash, the leftovers meet in the matrix and score 100.
        let first = vec![
            fingerprint("/a/one.rs", 5, &["dup"]),
            fingerprint("/a/two.rs", 5, &["dup"]),
        ];
        let second = vec![
            fingerprint("/b/one.rs", 5, &["dup"]),
            fingerprint("/b/two.rs", 5, &["dup"]),
        ];

        let (partition, stats) = matcher().match_corpora(first, second);
        assert_eq!(stats.exact_from_hash, 1);
        assert_eq!(partition.exact.len(), 2);
        assert!(partition.unique_first.is_empty());
        assert!(partition.unique_second.is_empty());
    }

    #[test]
    fn test_partial_match_above_threshold() {
        // 19 of 20 considered lines shared -> similarity 95 > 90.
        let shared: Vec<String> = (0..19).map(|i| format!("shared line {i}")).collect();
        let mut a_lines: Vec<&str> = shared.iter().map(String::as_str).collect();
        let b_lines = a_lines.clone();
        a_lines.push("only in a");

        let first = vec![fingerprint("/a/f.rs", 1, &a_lines)];
        let second = vec![fingerprint("/b/f.rs", 2, &b_lines)];

        let (partition, _) = matcher().match_corpora(first, second);
        assert_eq!(partition.partial.len(), 1);
        assert_eq!(partition.partial[0].similarity, 95);
        assert!(partition.unique_first.is_empty());
        assert!(partition.unique_second.is_empty());
    }

    #[test]
    fn test_at_threshold_is_not_matched() {
        // 9 shared + 1 unique of 10 considered -> similarity 90, not
        // strictly above the default threshold.
        let shared: Vec<String> = (0..9).map(|i| format!("shared {i}")).collect();
        let mut a_lines: Vec<&str> = shared.iter().map(String::as_str).collect();
        let b_lines = a_lines.clone();
        a_lines.push("extra");

        let first = vec![fingerprint("/a/f.rs", 1, &a_lines)];
        let second = vec![fingerprint("/b/f.rs", 2, &b_lines)];

        let (partition, _) = matcher().match_corpora(first, second);
        assert!(partition.partial.is_empty());
        assert_eq!(partition.unique_first.len(), 1);
        assert_eq!(partition.unique_second.len(), 1);
    }

    #[test]
    fn test_dissimilar_files_stay_unique() {
        let first = vec![fingerprint("/a/f.rs", 1, &["alpha", "beta"])];
        let second = vec![fingerprint("/b/g.rs", 2, &["gamma", "delta"])];

        let (partition, stats) = matcher().match_corpora(first, second);
        assert_eq!(stats.comparisons, 1);
        assert!(partition.exact.is_empty());
        assert!(partition.partial.is_empty());
        assert_eq!(partition.unique_first.len(), 1);
        assert_eq!(partition.unique_second.len(), 1);
    }

    #[test]
    fn test_mutual_best_prefers_closer_file() {
        // Row a matches b1 at 95 and b2 at 50 (under a low threshold);
        // the mutual-best pair must be (a, b1).
        let shared: Vec<String> = (0..19).map(|i| format!("common {i}")).collect();
        let a_lines: Vec<&str> = shared
            .iter()
            .map(String::as_str)
            .chain(std::iter::once("a only"))
            .collect();
        let b1_lines: Vec<&str> = shared.iter().map(String::as_str).collect();
        let b2_lines: Vec<&str> = shared.iter().take(10).map(String::as_str).collect();

        let config = MatcherConfig::default().with_threshold(10);
        let matcher = CorpusMatcher::new(config);
        let first = vec![fingerprint("/a/f.rs", 1, &a_lines)];
        let second = vec![
            fingerprint("/b/far.rs", 2, &b2_lines),
            fingerprint("/b/near.rs", 3, &b1_lines),
        ];

        let (partition, _) = matcher.match_corpora(first, second);
        assert_eq!(partition.partial.len(), 1);
        assert_eq!(
            partition.partial[0].second.path,
            PathBuf::from("/b/near.rs")
        );
        assert_eq!(partition.unique_second.len(), 1);
    }

    #[test]
    fn test_deterministic_tie_break_first_occurrence() {
        // Both columns score identically against the row; the first one
        // in corpus order must win, every run.
        let lines = ["a", "b", "c"];
        let first = vec![fingerprint("/a/f.rs", 1, &lines)];
        let second = vec![
            fingerprint("/b/tie1.rs", 2, &["a", "b", "x"]),
            fingerprint("/b/tie2.rs", 3, &["a", "b", "y"]),
        ];

        let config = MatcherConfig::default().with_threshold(10);
        for _ in 0..5 {
            let matcher = CorpusMatcher::new(config.clone());
            let (partition, _) =
                matcher.match_corpora(first.clone(), second.clone());
            assert_eq!(partition.partial.len(), 1);
            assert_eq!(
                partition.partial[0].second.path,
                PathBuf::from("/b/tie1.rs")
            );
        }
    }

    #[test]
    fn test_partition_is_complete() {
        let first = vec![
            fingerprint("/a/1.rs", 1, &["q", "w"]),
            fingerprint("/a/2.rs", 2, &["e", "r"]),
            fingerprint("/a/3.rs", 3, &["t", "y"]),
        ];
        let second = vec![
            fingerprint("/b/1.rs", 1, &["q", "w"]),
            fingerprint("/b/2.rs", 4, &["u", "i"]),
        ];

        let (partition, stats) = matcher().match_corpora(first, second);
        assert_eq!(partition.first_total(), stats.first_files);
        assert_eq!(partition.second_total(), stats.second_files);
    }
}
