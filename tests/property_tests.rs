use std::path::PathBuf;
use std::sync::Arc;

use proptest::prelude::*;
use twindiff::fingerprint::{hash_line, FileFingerprint, LineRecord};
use twindiff::matching::{compare, CorpusMatcher, MatcherConfig};

/// Build a fingerprint directly from line contents. The file hash is
/// derived from the joined content so byte-equal files share it, as they
/// would on disk.
fn fingerprint(path: &str, lines: &[String]) -> Arc<FileFingerprint> {
    let joined = lines.join("\n");
    let records = lines
        .iter()
        .enumerate()
        .map(|(nr, content)| LineRecord::new(nr as u32, content.clone()))
        .collect();
    Arc::new(FileFingerprint::new(
        PathBuf::from(path),
        hash_line(&joined),
        records,
        false,
    ))
}

/// Lines drawn from a small alphabet so collisions across files are common.
fn line_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "alpha".to_string(),
        "beta".to_string(),
        "gamma".to_string(),
        "delta".to_string(),
        "epsilon".to_string(),
        "zeta".to_string(),
    ])
}

fn file_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(line_strategy(), 0..12)
}

fn corpus_strategy(max_files: usize) -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(file_strategy(), 0..max_files)
}

fn build_corpus(prefix: &str, files: &[Vec<String>]) -> Vec<Arc<FileFingerprint>> {
    files
        .iter()
        .enumerate()
        .map(|(i, lines)| fingerprint(&format!("/{prefix}/file{i}.rs"), lines))
        .collect()
}

proptest! {
    #[test]
    fn test_similarity_is_bounded(a in file_strategy(), b in file_strategy()) {
        let fa = fingerprint("/a/f.rs", &a);
        let fb = fingerprint("/b/f.rs", &b);
        let cmp = compare(&fa, &fb);
        prop_assert!(cmp.similarity <= 100);
    }

    #[test]
    fn test_comparison_accounting(a in file_strategy(), b in file_strategy()) {
        let fa = fingerprint("/a/f.rs", &a);
        let fb = fingerprint("/b/f.rs", &b);
        let cmp = compare(&fa, &fb);

        if fa.file_hash != fb.file_hash {
            // Every line of each file is either paired or unique to it.
            prop_assert_eq!(
                cmp.duplicate_pairs.len() + cmp.unique_in_first.len(),
                fa.line_count()
            );
            prop_assert_eq!(
                cmp.duplicate_pairs.len() + cmp.unique_in_second.len(),
                fb.line_count()
            );
        }
    }

    #[test]
    fn test_similarity_is_symmetric(a in file_strategy(), b in file_strategy()) {
        let fa = fingerprint("/a/f.rs", &a);
        let fb = fingerprint("/b/f.rs", &b);
        prop_assert_eq!(compare(&fa, &fb).similarity, compare(&fb, &fa).similarity);
    }

    #[test]
    fn test_self_comparison_is_identical(a in file_strategy()) {
        let fa = fingerprint("/a/f.rs", &a);
        let fb = fingerprint("/b/f.rs", &a);
        // Same content means same file hash, so the short-circuit fires.
        prop_assert_eq!(compare(&fa, &fb).similarity, 100);
    }

    #[test]
    fn test_partition_is_complete(
        first in corpus_strategy(8),
        second in corpus_strategy(8),
        threshold in 0u8..=100,
    ) {
        let corpus_a = build_corpus("a", &first);
        let corpus_b = build_corpus("b", &second);

        let matcher = CorpusMatcher::new(MatcherConfig::default().with_threshold(threshold));
        let (partition, stats) = matcher.match_corpora(corpus_a, corpus_b);

        // Every fingerprint lands in exactly one bucket, exactly once.
        prop_assert_eq!(partition.first_total(), first.len());
        prop_assert_eq!(partition.second_total(), second.len());
        prop_assert_eq!(stats.first_files, first.len());
        prop_assert_eq!(stats.second_files, second.len());

        let mut first_paths: Vec<PathBuf> = partition
            .exact
            .iter()
            .chain(partition.partial.iter())
            .map(|c| c.first.path.clone())
            .chain(partition.unique_first.iter().map(|f| f.path.clone()))
            .collect();
        first_paths.sort();
        first_paths.dedup();
        prop_assert_eq!(first_paths.len(), first.len());
    }

    #[test]
    fn test_matching_is_deterministic(
        first in corpus_strategy(6),
        second in corpus_strategy(6),
    ) {
        let matcher = CorpusMatcher::new(MatcherConfig::default());
        let (p1, _) = matcher.match_corpora(build_corpus("a", &first), build_corpus("b", &second));
        let (p2, _) = matcher.match_corpora(build_corpus("a", &first), build_corpus("b", &second));

        let pairs = |p: &twindiff::matching::CorpusPartition| {
            p.exact
                .iter()
                .chain(p.partial.iter())
                .map(|c| (c.first.path.clone(), c.second.path.clone(), c.similarity))
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(pairs(&p1), pairs(&p2));
    }

    #[test]
    fn test_histogram_total_matches_scores(
        first in corpus_strategy(6),
        second in corpus_strategy(6),
    ) {
        let matcher = CorpusMatcher::new(MatcherConfig::default());
        let (partition, _) =
            matcher.match_corpora(build_corpus("a", &first), build_corpus("b", &second));

        let scores = partition.similarity_scores();
        let histogram = twindiff::output::Histogram::from_scores(&scores);
        prop_assert_eq!(histogram.total(), scores.len());
    }
}
