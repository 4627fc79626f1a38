//! Markdown report formatter.
//!
//! Same content as the plain-text report, rendered with headings and
//! tables so it can be pasted into reviews and docs.

use std::io;

use crate::matching::{CorpusPartition, FileComparison};

use super::partials_by_similarity;

/// Markdown report formatter.
pub struct MarkdownReport<'a> {
    partition: &'a CorpusPartition,
}

impl<'a> MarkdownReport<'a> {
    /// Create a Markdown report over a partition.
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

        writeln!(writer, "# Duplication report")?;
        writeln!(writer)?;
        writeln!(writer, "| Bucket | Count |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Identical pairs | {} |", p.exact.len())?;
        writeln!(writer, "| Partially similar pairs | {} |", p.partial.len())?;
        writeln!(writer, "| Unique in first corpus | {} |", p.unique_first.len())?;
        writeln!(
            writer,
            "| Unique in second corpus | {} |",
            p.unique_second.len()
        )?;
        writeln!(writer)?;

        if !p.exact.is_empty() {
            writeln!(writer, "## Identical files")?;
            writeln!(writer)?;
            for cmp in &p.exact {
                writeln!(
                    writer,
                    "- `{}` = `{}`",
                    cmp.first.path.display(),
                    cmp.second.path.display()
                )?;
            }
            writeln!(writer)?;
        }

        let partials = partials_by_similarity(p);
        if !partials.is_empty() {
            writeln!(writer, "## Partially similar files")?;
            writeln!(writer)?;
            for cmp in partials {
                write_partial(&mut writer, cmp)?;
            }
        }

        write_unique_section(&mut writer, "first", &p.unique_first)?;
        write_unique_section(&mut writer, "second", &p.unique_second)?;

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
        "### `{}` <> `{}` ({}% identical)",
        cmp.first.path.display(),
        cmp.second.path.display(),
        cmp.similarity
    )?;
    writeln!(writer)?;
    writeln!(
        writer,
        "{} lines in first, {} lines in second.",
        cmp.first.line_count(),
        cmp.second.line_count()
    )?;
    writeln!(writer)?;

    writeln!(writer, "Unique lines in first:")?;
    writeln!(writer)?;
    writeln!(writer, "```text")?;
    for line in cmp.unique_first_records() {
        writeln!(writer, "{}\t| {}", line.line_nr, line.content)?;
    }
    writeln!(writer, "```")?;
    writeln!(writer)?;

    writeln!(writer, "Unique lines in second:")?;
    writeln!(writer)?;
    writeln!(writer, "```text")?;
    for line in cmp.unique_second_records() {
        writeln!(writer, "{}\t| {}", line.line_nr, line.content)?;
    }
    writeln!(writer, "```")?;
    writeln!(writer)?;
    Ok(())
}

fn write_unique_section<W: io::Write>(
    writer: &mut W,
    corpus: &str,
    files: &[std::sync::Arc<crate::fingerprint::FileFingerprint>],
) -> io::Result<()> {
    if files.is_empty() {
        return Ok(());
    }
    writeln!(writer, "## Unique to the {corpus} corpus")?;
    writeln!(writer)?;
    for fp in files {
        writeln!(writer, "- `{}`", fp.path.display())?;
    }
    writeln!(writer)?;
    Ok(())
}
