//! Text histogram of similarity scores.
//!
//! Consumes the flat score sequence from
//! [`CorpusPartition::similarity_scores`](crate::matching::CorpusPartition::similarity_scores):
//! one similarity per matched pair plus a zero sentinel per unmatched
//! file. Fixed bins of width 5 over the 0-100 range; the last bin is
//! inclusive of 100.

use std::io;

/// Width of each histogram bin, in similarity points.
pub const BIN_WIDTH: u8 = 5;

/// Number of bins covering 0-100.
pub const BIN_COUNT: usize = 20;

/// Widest bar rendered, in characters. Counts scale proportionally.
const MAX_BAR_WIDTH: usize = 50;

/// Similarity histogram with fixed width-5 bins.
#[derive(Debug, Clone)]
pub struct Histogram {
    bins: [usize; BIN_COUNT],
    total: usize,
}

impl Histogram {
    /// Bucket the given similarity scores.
    ///
    /// Scores above 100 are clamped into the last bin.
    #[must_use]
    pub fn from_scores(scores: &[u8]) -> Self {
        let mut bins = [0usize; BIN_COUNT];
        for &score in scores {
            let bin = (usize::from(score) / usize::from(BIN_WIDTH)).min(BIN_COUNT - 1);
            bins[bin] += 1;
        }
        Self {
            bins,
            total: scores.len(),
        }
    }

    /// Count in the bin covering the given score.
    #[must_use]
    pub fn count_for(&self, score: u8) -> usize {
        self.bins[(usize::from(score) / usize::from(BIN_WIDTH)).min(BIN_COUNT - 1)]
    }

    /// Total number of scores bucketed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Write the histogram as a text bar chart.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the writer.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "File similarity distribution ({} files)", self.total)?;
        writeln!(writer)?;

        let max = self.bins.iter().copied().max().unwrap_or(0);
        for (idx, &count) in self.bins.iter().enumerate() {
            let low = idx * usize::from(BIN_WIDTH);
            let high = if idx == BIN_COUNT - 1 {
                100
            } else {
                low + usize::from(BIN_WIDTH) - 1
            };
            let width = if max == 0 {
                0
            } else {
                // At least one character for non-empty bins.
                (count * MAX_BAR_WIDTH).div_ceil(max).min(MAX_BAR_WIDTH)
            };
            let bar: String = "#".repeat(if count > 0 { width.max(1) } else { 0 });
            writeln!(writer, "{low:>3}-{high:<3} | {bar} {count}")?;
        }
        Ok(())
    }

    /// Render the histogram as a string.
    ///
    /// # Errors
    ///
    /// Only fails if formatting to the in-memory buffer fails.
    pub fn render(&self) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
