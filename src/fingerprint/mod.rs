//! File fingerprinting: content-derived file identities for comparison.
//!
//! A [`FileFingerprint`] is a file's identity for duplication analysis:
//! a whole-file content hash plus a multiset of per-line hashes with
//! line-number provenance. Fingerprints are built once per file at scan
//! time and are immutable afterwards; the comparator and matcher only
//! ever read them, so they are shared via `Arc` without locking.
//!
//! # Example
//!
//! ```no_run
//! use twindiff::fingerprint::{FingerprintBuilder, FingerprintOptions};
//! use std::path::Path;
//!
//! let builder = FingerprintBuilder::new(FingerprintOptions::default());
//! let fp = builder.build(Path::new("src/lib.rs")).unwrap();
//! println!("{}: {} significant lines", fp.path.display(), fp.lines.len());
//! ```

pub mod builder;
pub mod hasher;

use std::collections::HashMap;
use std::path::PathBuf;

pub use builder::{FingerprintBuilder, FingerprintOptions};
pub use hasher::{digest_to_hex, hash_file, hash_line, hash_reader, Digest};

/// One non-blank, whitespace-trimmed line of a file.
///
/// The owning [`FileFingerprint`] carries the file identity; records only
/// hold their position and content. Line numbers are 0-based positions in
/// the *original* file, not renumbered after blank lines are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    /// 0-based line number in the original file.
    pub line_nr: u32,
    /// Trimmed line content.
    pub content: String,
    /// BLAKE3 digest of the trimmed content.
    pub hash: Digest,
}

impl LineRecord {
    /// Create a record for a trimmed line, hashing its content.
    #[must_use]
    pub fn new(line_nr: u32, content: String) -> Self {
        let hash = hash_line(&content);
        Self {
            line_nr,
            content,
            hash,
        }
    }
}

/// A file's content-derived identity for comparison purposes.
///
/// Holds the whole-file hash (computed over the raw byte stream, so
/// whitespace-only edits still change it), the ordered sequence of
/// significant lines, and a derived bucket map from line-content hash to
/// the indices of records sharing that hash.
///
/// Invariant: the union of all bucket index lists is exactly
/// `0..lines.len()`, each index in one bucket.
#[derive(Debug, Clone)]
pub struct FileFingerprint {
    /// Path the fingerprint was built from.
    pub path: PathBuf,
    /// File name component, used for image matching.
    pub file_name: String,
    /// BLAKE3 digest of the raw file bytes.
    pub file_hash: Digest,
    /// Significant lines in original file order. Empty for images.
    pub lines: Vec<LineRecord>,
    /// Whether the file was classified as an image by extension.
    is_image: bool,
    /// Line-content hash -> indices into `lines` sharing that hash.
    buckets: HashMap<Digest, Vec<u32>>,
}

impl FileFingerprint {
    /// Assemble a fingerprint from its parts, deriving the bucket map.
    #[must_use]
    pub fn new(path: PathBuf, file_hash: Digest, lines: Vec<LineRecord>, is_image: bool) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut buckets: HashMap<Digest, Vec<u32>> = HashMap::new();
        for (idx, line) in lines.iter().enumerate() {
            buckets.entry(line.hash).or_default().push(idx as u32);
        }

        Self {
            path,
            file_name,
            file_hash,
            lines,
            is_image,
            buckets,
        }
    }

    /// Whether this file is compared by name only.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.is_image
    }

    /// Number of significant (non-blank) lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The bucket map from line hash to indices of lines sharing it.
    #[must_use]
    pub fn buckets(&self) -> &HashMap<Digest, Vec<u32>> {
        &self.buckets
    }

    /// Whole-file hash as a hexadecimal string.
    #[must_use]
    pub fn file_hash_hex(&self) -> String {
        digest_to_hex(&self.file_hash)
    }
}

/// Errors that can occur while building a fingerprint.
#[derive(thiserror::Error, Debug)]
pub enum FingerprintError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
