//! Directory walker built on walkdir with gitignore-style filtering.
//!
//! # Overview
//!
//! Collects the regular-file paths beneath a corpus root in sorted order.
//! Determinism matters here: the matcher breaks ties by first occurrence,
//! so corpus ordering is part of the observable contract.
//!
//! # Features
//!
//! - Gitignore-style pattern matching via the `ignore` crate (a local
//!   `.gitignore` at the root is honored, plus configured patterns)
//! - Hidden file filtering
//! - Symlinks are not followed

use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use walkdir::WalkDir;

use super::ScanError;

/// Directory walker for corpus file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Skip hidden files and directories
    skip_hidden: bool,
    /// Extra gitignore-style patterns
    ignore_patterns: Vec<String>,
}

impl Walker {
    /// Create a new walker for the given corpus root.
    #[must_use]
    pub fn new(root: &Path, skip_hidden: bool, ignore_patterns: Vec<String>) -> Self {
        Self {
            root: root.to_path_buf(),
            skip_hidden,
            ignore_patterns,
        }
    }

    /// Build the gitignore matcher from the root's .gitignore plus
    /// configured patterns.
    fn build_gitignore(&self) -> Option<Gitignore> {
        let mut builder = GitignoreBuilder::new(&self.root);

        let gitignore_path = self.root.join(".gitignore");
        if gitignore_path.exists() {
            if let Some(e) = builder.add(&gitignore_path) {
                log::warn!(
                    "Failed to load .gitignore from {}: {}",
                    gitignore_path.display(),
                    e
                );
            } else {
                log::debug!("Loaded .gitignore from {}", gitignore_path.display());
            }
        }

        for pattern in &self.ignore_patterns {
            if let Err(e) = builder.add_line(None, pattern) {
                log::warn!("Invalid ignore pattern '{}': {}", pattern, e);
            }
        }

        match builder.build() {
            Ok(gitignore) => {
                if gitignore.is_empty() {
                    None
                } else {
                    Some(gitignore)
                }
            }
            Err(e) => {
                log::warn!("Failed to build ignore patterns: {}", e);
                None
            }
        }
    }

    /// Check if a path should be ignored based on configured patterns.
    fn should_ignore(&self, path: &Path, is_dir: bool, gitignore: &Option<Gitignore>) -> bool {
        let Some(gi) = gitignore else {
            return false;
        };
        // Gitignore matching expects paths relative to the root with
        // forward slashes, even on Windows.
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let path_str = relative.to_string_lossy();
        let normalized = if cfg!(windows) {
            path_str.replace('\\', "/")
        } else {
            path_str.into_owned()
        };
        gi.matched(normalized, is_dir).is_ignore()
    }

    fn is_hidden(path: &Path) -> bool {
        path.file_name()
            .map(|n| n.to_string_lossy().starts_with('.'))
            .unwrap_or(false)
    }

    /// Collect all regular-file paths beneath the root, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NotFound`] or [`ScanError::NotADirectory`]
    /// for a bad root, and [`ScanError::Io`] for traversal failures.
    pub fn collect_paths(&self) -> Result<Vec<PathBuf>, ScanError> {
        if !self.root.exists() {
            return Err(ScanError::NotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(ScanError::NotADirectory(self.root.clone()));
        }

        let gitignore = self.build_gitignore();
        let mut paths = Vec::new();

        let walk = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.path() == self.root {
                    return true;
                }
                if self.skip_hidden && Self::is_hidden(entry.path()) {
                    return false;
                }
                !self.should_ignore(entry.path(), entry.file_type().is_dir(), &gitignore)
            });

        for entry in walk {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                match e.into_io_error() {
                    Some(source) => ScanError::Io { path, source },
                    None => ScanError::NotFound(path),
                }
            })?;
            if entry.file_type().is_file() {
                paths.push(entry.into_path());
            }
        }

        paths.sort();
        Ok(paths)
    }
}
