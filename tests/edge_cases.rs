use std::fs;
use std::sync::Arc;

use tempfile::TempDir;
use twindiff::fingerprint::{FingerprintBuilder, FingerprintOptions};
use twindiff::matching::{compare, CorpusMatcher, MatcherConfig};
use twindiff::scanner::{scan_corpus, ScanError, ScanOptions};

#[test]
fn test_whitespace_only_files_never_pair() {
    // Different whitespace means different byte hashes, and neither file
    // has significant lines: the zero-line comparison scores 0.
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, "   \n\t\n\n").unwrap();
    fs::write(&b, "\n \n").unwrap();

    let builder = FingerprintBuilder::default();
    let fa = Arc::new(builder.build(&a).unwrap());
    let fb = Arc::new(builder.build(&b).unwrap());

    assert_eq!(fa.line_count(), 0);
    let cmp = compare(&fa, &fb);
    assert_eq!(cmp.similarity, 0);
    assert!(cmp.duplicate_pairs.is_empty());
}

#[test]
fn test_byte_identical_empty_files_short_circuit() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, "").unwrap();
    fs::write(&b, "").unwrap();

    let builder = FingerprintBuilder::default();
    let fa = Arc::new(builder.build(&a).unwrap());
    let fb = Arc::new(builder.build(&b).unwrap());

    // Equal whole-file hashes win before the zero-line degenerate rule.
    assert_eq!(compare(&fa, &fb).similarity, 100);
}

#[test]
fn test_both_corpora_empty() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    let matcher = CorpusMatcher::new(MatcherConfig::default());
    let (partition, stats) = matcher.match_corpora(
        scan_corpus(first.path(), &ScanOptions::default()).unwrap(),
        scan_corpus(second.path(), &ScanOptions::default()).unwrap(),
    );

    assert!(!partition.has_duplication());
    assert_eq!(stats.comparisons, 0);
    assert!(partition.unique_first.is_empty());
    assert!(partition.unique_second.is_empty());
}

#[test]
fn test_missing_corpus_root_aborts() {
    let err = scan_corpus(
        std::path::Path::new("/definitely/not/here"),
        &ScanOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ScanError::NotFound(_)));
}

#[test]
fn test_image_vs_text_compares_structurally() {
    // Only the both-images rule matches by name; an image against a text
    // file falls through to the line comparison, where the image has no
    // lines to offer.
    let dir = TempDir::new().unwrap();
    let img = dir.path().join("data.png");
    let txt = dir.path().join("data.txt");
    fs::write(&img, "binary-ish").unwrap();
    fs::write(&txt, "some\nlines\n").unwrap();

    let builder = FingerprintBuilder::default();
    let fi = Arc::new(builder.build(&img).unwrap());
    let ft = Arc::new(builder.build(&txt).unwrap());

    let cmp = compare(&fi, &ft);
    assert_eq!(cmp.similarity, 0);
    assert_eq!(cmp.unique_in_second.len(), 2);
}

#[test]
fn test_custom_image_extensions_flow_through_scan() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("vector.svg"), "<svg/>").unwrap();

    let options = ScanOptions {
        fingerprint: FingerprintOptions::default()
            .with_image_extensions(vec!["svg".to_string()]),
        ..Default::default()
    };
    let corpus = scan_corpus(dir.path(), &options).unwrap();
    assert_eq!(corpus.len(), 1);
    assert!(corpus[0].is_image());
}

#[test]
fn test_duplicated_lines_within_one_file() {
    // Five copies in the first file against two in the second: two pairs
    // match, three remain unique to the first file.
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, "dup\ndup\ndup\ndup\ndup\n").unwrap();
    fs::write(&b, "dup\ndup\n").unwrap();

    let builder = FingerprintBuilder::default();
    let fa = Arc::new(builder.build(&a).unwrap());
    let fb = Arc::new(builder.build(&b).unwrap());

    let cmp = compare(&fa, &fb);
    assert_eq!(cmp.duplicate_pairs.len(), 2);
    assert_eq!(cmp.unique_in_first.len(), 3);
    assert!(cmp.unique_in_second.is_empty());
    // 3 unique of 5 considered -> round(60) -> similarity 40.
    assert_eq!(cmp.similarity, 40);
}

#[test]
fn test_low_similarity_pairs_stay_unique_at_default_threshold() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    fs::write(first.path().join("f.rs"), "a\nb\nc\nd\n").unwrap();
    fs::write(second.path().join("f.rs"), "a\nb\nx\ny\n").unwrap();

    let matcher = CorpusMatcher::new(MatcherConfig::default());
    let (partition, _) = matcher.match_corpora(
        scan_corpus(first.path(), &ScanOptions::default()).unwrap(),
        scan_corpus(second.path(), &ScanOptions::default()).unwrap(),
    );

    assert!(partition.partial.is_empty());
    assert_eq!(partition.unique_first.len(), 1);
    assert_eq!(partition.unique_second.len(), 1);
}

#[test]
fn test_threshold_zero_matches_any_overlap() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    fs::write(first.path().join("f.rs"), "a\nb\nc\nd\n").unwrap();
    fs::write(second.path().join("f.rs"), "a\nx\ny\nz\n").unwrap();

    let matcher = CorpusMatcher::new(MatcherConfig::default().with_threshold(0));
    let (partition, _) = matcher.match_corpora(
        scan_corpus(first.path(), &ScanOptions::default()).unwrap(),
        scan_corpus(second.path(), &ScanOptions::default()).unwrap(),
    );

    assert_eq!(partition.partial.len(), 1);
}

#[test]
fn test_crlf_and_trailing_whitespace_are_trimmed() {
    let dir = TempDir::new().unwrap();
    let unix = dir.path().join("unix.txt");
    let dos = dir.path().join("dos.txt");
    fs::write(&unix, "line one\nline two\n").unwrap();
    fs::write(&dos, "line one\r\nline two\r\n").unwrap();

    let builder = FingerprintBuilder::default();
    let fu = Arc::new(builder.build(&unix).unwrap());
    let fd = Arc::new(builder.build(&dos).unwrap());

    // Byte hashes differ, but every trimmed line matches.
    assert_ne!(fu.file_hash, fd.file_hash);
    assert_eq!(compare(&fu, &fd).similarity, 100);
}
