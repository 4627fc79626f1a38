//! Scanner module: corpus traversal and fingerprint collection.
//!
//! The comparison engine never walks directories itself; this module is
//! the collaborator that turns a corpus root into the fingerprint
//! collection the matcher consumes.
//!
//! # Example
//!
//! ```no_run
//! use twindiff::scanner::{scan_corpus, ScanOptions};
//! use std::path::Path;
//!
//! let corpus = scan_corpus(Path::new("./src"), &ScanOptions::default()).unwrap();
//! println!("{} files fingerprinted", corpus.len());
//! ```

pub mod walker;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;

use crate::fingerprint::{
    FileFingerprint, FingerprintBuilder, FingerprintError, FingerprintOptions,
};
use crate::progress::ProgressCallback;

pub use walker::Walker;

/// Configuration for corpus scanning.
#[derive(Clone, Default)]
pub struct ScanOptions {
    /// Skip hidden files and directories (names starting with `.`).
    pub skip_hidden: bool,
    /// Glob patterns to ignore (gitignore-style), applied in addition to
    /// any .gitignore file at the corpus root.
    pub ignore_patterns: Vec<String>,
    /// Options forwarded to the fingerprint builder.
    pub fingerprint: FingerprintOptions,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for ScanOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanOptions")
            .field("skip_hidden", &self.skip_hidden)
            .field("ignore_patterns", &self.ignore_patterns)
            .field("fingerprint", &self.fingerprint)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

/// Errors that can occur during corpus scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The corpus root was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The corpus root is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred during traversal.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A file could not be fingerprinted.
    ///
    /// This aborts the scan: silently skipping a file would corrupt the
    /// corpus accounting downstream.
    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),
}

/// Walk `root` and fingerprint every regular file beneath it.
///
/// Output is sorted by path so downstream tie-breaking is reproducible.
/// Fingerprinting runs in parallel; the first failure aborts the scan.
///
/// # Errors
///
/// Returns [`ScanError::NotFound`] or [`ScanError::NotADirectory`] for a
/// bad root, and propagates traversal and fingerprint failures.
pub fn scan_corpus(
    root: &Path,
    options: &ScanOptions,
) -> Result<Vec<Arc<FileFingerprint>>, ScanError> {
    let walker = Walker::new(root, options.skip_hidden, options.ignore_patterns.clone());
    let paths = walker.collect_paths()?;

    log::info!("Scanning {}: {} files", root.display(), paths.len());

    if let Some(ref callback) = options.progress_callback {
        callback.on_phase_start("scan", paths.len());
    }

    let builder = FingerprintBuilder::new(options.fingerprint.clone());
    let fingerprints: Result<Vec<_>, FingerprintError> = paths
        .par_iter()
        .enumerate()
        .map(|(idx, path)| {
            let fp = builder.build(path)?;
            if let Some(ref callback) = options.progress_callback {
                callback.on_progress(idx + 1);
            }
            Ok(Arc::new(fp))
        })
        .collect();

    if let Some(ref callback) = options.progress_callback {
        callback.on_phase_end("scan");
    }

    Ok(fingerprints?)
}
