//! Pairwise fingerprint comparison.
//!
//! Pure function of its two inputs; no failure modes. Comparison order:
//! image name matching, whole-file hash short-circuit, then the
//! bucket-multiset walk over per-line hashes.

use std::sync::Arc;

use crate::fingerprint::FileFingerprint;

use super::{FileComparison, MAX_SIMILARITY};

/// Compare two fingerprints into a [`FileComparison`].
///
/// 1. Two images match at similarity 100 iff their file names are equal;
///    otherwise they fall into the 0-line degenerate comparison (score 0,
///    empty sets); images are matched by name only.
/// 2. Equal whole-file hashes short-circuit to similarity 100 with no
///    per-line sets (the files are byte-identical).
/// 3. Otherwise the per-file hash multisets are walked: equal counts
///    classify every record under the hash as duplicate; unequal counts
///    pair off `min(count)` records and leave the remainder unique to the
///    longer side; hashes absent from the other side are fully unique.
///
/// The score is `100 - round((unique_first + unique_second) / total * 100)`,
/// with a zero-line total defined as maximally different (score 0).
#[must_use]
pub fn compare(first: &Arc<FileFingerprint>, second: &Arc<FileFingerprint>) -> FileComparison {
    if first.is_image() && second.is_image() {
        if first.file_name == second.file_name {
            return short_circuit(first, second, MAX_SIMILARITY);
        }
        // Name mismatch: a 0-line comparison, maximally different.
        return short_circuit(first, second, 0);
    }

    if first.file_hash == second.file_hash {
        return short_circuit(first, second, MAX_SIMILARITY);
    }

    let mut duplicate_pairs: Vec<(u32, u32)> = Vec::new();
    let mut unique_in_first: Vec<u32> = Vec::new();
    let mut unique_in_second: Vec<u32> = Vec::new();

    for (hash, first_idxs) in first.buckets() {
        match second.buckets().get(hash) {
            Some(second_idxs) => {
                let matched = first_idxs.len().min(second_idxs.len());
                duplicate_pairs.extend(
                    first_idxs[..matched]
                        .iter()
                        .zip(&second_idxs[..matched])
                        .map(|(&a, &b)| (a, b)),
                );
                unique_in_first.extend(&first_idxs[matched..]);
                unique_in_second.extend(&second_idxs[matched..]);
            }
            None => unique_in_first.extend(first_idxs),
        }
    }

    for (hash, second_idxs) in second.buckets() {
        if !first.buckets().contains_key(hash) {
            unique_in_second.extend(second_idxs);
        }
    }

    // Bucket iteration order is unspecified; sort so diff sets and pair
    // lists are stable across runs.
    duplicate_pairs.sort_unstable();
    unique_in_first.sort_unstable();
    unique_in_second.sort_unstable();

    let similarity = score(
        duplicate_pairs.len(),
        unique_in_first.len() + unique_in_second.len(),
    );

    FileComparison {
        first: Arc::clone(first),
        second: Arc::clone(second),
        similarity,
        duplicate_pairs,
        unique_in_first,
        unique_in_second,
    }
}

/// Similarity from pair and unique counts; zero considered lines score 0.
fn score(matched_pairs: usize, unique_lines: usize) -> u8 {
    let total = matched_pairs + unique_lines;
    if total == 0 {
        return 0;
    }
    let dissimilarity = (unique_lines as f64 / total as f64 * 100.0).round() as u8;
    MAX_SIMILARITY - dissimilarity
}

fn short_circuit(
    first: &Arc<FileFingerprint>,
    second: &Arc<FileFingerprint>,
    similarity: u8,
) -> FileComparison {
    FileComparison {
        first: Arc::clone(first),
        second: Arc::clone(second),
        similarity,
        duplicate_pairs: Vec::new(),
        unique_in_first: Vec::new(),
        unique_in_second: Vec::new(),
    }
}
