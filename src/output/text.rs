//! Plain-text report formatter.
//!
//! Renders the partition as the classic four-section report: identical
//! pairs, partially similar pairs with their line-level diffs, and the
//! unique files of each corpus. Diff lines are sorted by ascending line
//! number and printed as `line_nr | content`.

use std::io;

use crate::matching::{CorpusPartition, FileComparison};

use super::partials_by_similarity;

/// Plain-text report formatter.
pub struct TextReport<'a> {
    partition: &'a CorpusPartition,
}

impl<'a> TextReport<'a> {
    /// Create a text report over a partition.
    #[must_use]
    pub fn new(partition: &'a CorpusPartition) -> Self {
        Self { partition }
    }

    /// Write the report to the given writer.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the writer.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        let p = self.partition;

        writeln!(writer, "Found {} fully identical files", p.exact.len())?;
        writeln!(writer)?;
        for cmp in &p.exact {
            writeln!(writer, "Identical files found:")?;
            writeln!(writer, "\t{}", cmp.first.path.display())?;
            writeln!(writer, "\t{}", cmp.second.path.display())?;
        }
        writeln!(writer)?;

        let partials = partials_by_similarity(p);
        writeln!(writer, "Found {} partially similar files", partials.len())?;
        writeln!(writer)?;
        for cmp in partials {
            write_partial(&mut writer, cmp)?;
        }

        writeln!(
            writer,
            "Found {} fully unique files in the first corpus",
            p.unique_first.len()
        )?;
        writeln!(
            writer,
            "Found {} fully unique files in the second corpus",
            p.unique_second.len()
        )?;
        writeln!(writer)?;
        for fp in &p.unique_first {
            writeln!(writer, "\t{}", fp.path.display())?;
        }
        writeln!(writer)?;
        for fp in &p.unique_second {
            writeln!(writer, "\t{}", fp.path.display())?;
        }

        Ok(())
    }

    /// Render the report as a string.
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

fn write_partial<W: io::Write>(writer: &mut W, cmp: &FileComparison) -> io::Result<()> {
    writeln!(
        writer,
        "Partially similar files found. First length {}, second length {}, the files are {}% identical:",
        cmp.first.line_count(),
        cmp.second.line_count(),
        cmp.similarity
    )?;
    writeln!(writer, "\t{}", cmp.first.path.display())?;
    writeln!(writer, "\t{}", cmp.second.path.display())?;

    writeln!(writer, "\tUnique lines in first:")?;
    for line in cmp.unique_first_records() {
        writeln!(writer, "\t\t{}\t| {}", line.line_nr, line.content)?;
    }
    writeln!(writer, "\tUnique lines in second:")?;
    for line in cmp.unique_second_records() {
        writeln!(writer, "\t\t{}\t| {}", line.line_nr, line.content)?;
    }
    writeln!(writer)?;
    Ok(())
}
