//! Builds [`FileFingerprint`]s from files on disk.
//!
//! The whole-file hash is computed over the raw byte stream, independent
//! of line filtering: a whitespace-only edit changes the file hash even
//! though it leaves the line-level fingerprint untouched. Blank lines and
//! pure-whitespace lines contribute nothing to the fingerprint; surviving
//! lines keep their original 0-based line numbers.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::hasher;
use super::{FileFingerprint, FingerprintError, LineRecord};

/// Default extensions treated as images (compared by file name only).
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["png", "ico"];

/// Options controlling fingerprint construction.
#[derive(Debug, Clone)]
pub struct FingerprintOptions {
    /// File extensions (lowercase, without dot) classified as images.
    pub image_extensions: Vec<String>,
}

impl Default for FingerprintOptions {
    fn default() -> Self {
        Self {
            image_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl FingerprintOptions {
    /// Replace the image extension allow-list.
    #[must_use]
    pub fn with_image_extensions(mut self, extensions: Vec<String>) -> Self {
        self.image_extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }
}

/// Fingerprint builder holding the classification options.
#[derive(Debug, Clone, Default)]
pub struct FingerprintBuilder {
    options: FingerprintOptions,
}

impl FingerprintBuilder {
    /// Create a builder with the given options.
    #[must_use]
    pub fn new(options: FingerprintOptions) -> Self {
        Self { options }
    }

    /// Whether `path` is classified as an image by extension.
    #[must_use]
    pub fn is_image(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .is_some_and(|ext| self.options.image_extensions.iter().any(|e| *e == ext))
    }

    /// Build the fingerprint for the file at `path`.
    ///
    /// Image files get an empty line sequence and are later compared by
    /// file name equality only.
    ///
    /// # Errors
    ///
    /// Returns [`FingerprintError::NotFound`] if the path does not exist,
    /// or [`FingerprintError::Io`] if reading fails.
    pub fn build(&self, path: &Path) -> Result<FileFingerprint, FingerprintError> {
        if !path.exists() {
            return Err(FingerprintError::NotFound(path.to_path_buf()));
        }

        let file_hash = hasher::hash_file(path).map_err(|source| FingerprintError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_image = self.is_image(path);
        let lines = if is_image {
            Vec::new()
        } else {
            read_line_records(path)?
        };

        log::trace!(
            "Fingerprinted {}: {} lines{}",
            path.display(),
            lines.len(),
            if is_image { " (image)" } else { "" }
        );

        Ok(FileFingerprint::new(
            path.to_path_buf(),
            file_hash,
            lines,
            is_image,
        ))
    }
}

/// Read the significant lines of a text file, keeping original numbering.
fn read_line_records(path: &Path) -> Result<Vec<LineRecord>, FingerprintError> {
    let file = File::open(path).map_err(|source| FingerprintError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    for (line_nr, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| FingerprintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            records.push(LineRecord::new(line_nr as u32, trimmed.to_string()));
        }
    }
    Ok(records)
}
