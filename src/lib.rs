//! twindiff - Cross-Tree Duplication Detector
//!
//! Detects duplication between two collections of text files at both
//! whole-file and line-multiset granularity (BLAKE3 content hashing),
//! and pairs near-duplicate files across the collections via a greedy
//! mutual-best-match reduction of the similarity matrix.

pub mod cli;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod logging;
pub mod matching;
pub mod output;
pub mod progress;
pub mod scanner;

use std::fs::File;
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::ExitCode;
use crate::fingerprint::FingerprintOptions;
use crate::matching::{CorpusMatcher, MatcherConfig};
use crate::output::{Histogram, JsonReport, MarkdownReport, TextReport};
use crate::progress::{Progress, ProgressCallback};
use crate::scanner::{scan_corpus, ScanOptions};

/// Run the application: scan both trees, match, and render the report.
///
/// # Errors
///
/// Returns an error for bad corpus roots, I/O failures while scanning or
/// writing the report, and serialization failures.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let config = Config::load();
    let threshold = cli.threshold.unwrap_or(config.similarity_threshold);
    let image_extensions = if cli.image_extensions.is_empty() {
        config.image_extensions
    } else {
        cli.image_extensions
    };

    log::info!(
        "Comparing {} against {} (threshold {}%)",
        cli.first.display(),
        cli.second.display(),
        threshold
    );

    let progress: Arc<dyn ProgressCallback> = Arc::new(Progress::new(cli.quiet));

    let scan_options = ScanOptions {
        skip_hidden: cli.skip_hidden,
        ignore_patterns: cli.ignore_patterns,
        fingerprint: FingerprintOptions::default().with_image_extensions(image_extensions),
        progress_callback: Some(Arc::clone(&progress)),
    };

    let first = scan_corpus(&cli.first, &scan_options)
        .with_context(|| format!("Failed to scan {}", cli.first.display()))?;
    let second = scan_corpus(&cli.second, &scan_options)
        .with_context(|| format!("Failed to scan {}", cli.second.display()))?;

    let matcher = CorpusMatcher::new(
        MatcherConfig::default()
            .with_threshold(threshold)
            .with_progress_callback(progress),
    );
    let (partition, stats) = matcher.match_corpora(first, second);

    log::info!(
        "{} comparisons computed for {} x {} files",
        stats.comparisons,
        stats.first_files,
        stats.second_files
    );

    let mut writer: Box<dyn Write> = match cli.report {
        Some(ref path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create report file {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    match cli.output {
        OutputFormat::Text => TextReport::new(&partition).write_to(&mut writer)?,
        OutputFormat::Markdown => MarkdownReport::new(&partition).write_to(&mut writer)?,
        OutputFormat::Json => JsonReport::new(&partition).write_to(&mut writer)?,
    }

    if cli.histogram {
        writeln!(writer)?;
        Histogram::from_scores(&partition.similarity_scores()).write_to(&mut writer)?;
    }

    if let Some(ref path) = cli.report {
        log::info!("Report written to {}", path.display());
    }

    Ok(if partition.has_duplication() {
        ExitCode::Success
    } else {
        ExitCode::NoDuplication
    })
}
