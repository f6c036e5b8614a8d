use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use super::{BatchOutcome, CorpusSummary, ParsedFile, SkippedFile};

/// Per-file outcome of a batch, printable for the command line.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Files that parsed, in upload order
    pub parsed: Vec<ParsedFile>,
    /// Files that were skipped, in upload order
    pub skipped: Vec<SkippedFile>,
    /// Headline counts of the assembled corpus
    pub summary: CorpusSummary,
}

impl BatchReport {
    /// Build the report of a batch outcome
    pub fn from_outcome(outcome: &BatchOutcome) -> Self {
        Self {
            parsed: outcome.parsed.clone(),
            skipped: outcome.skipped.clone(),
            summary: outcome.corpus.summary(),
        }
    }

    /// Whether any uploaded file was left out
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Whether any parsed file dropped rows or cells
    pub fn has_warnings(&self) -> bool {
        self.parsed.iter().any(|f| file_warning(f).is_some())
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static WARN: Emoji<'_, '_> = Emoji("⚠", "[WARN]");
            static SKIP: Emoji<'_, '_> = Emoji("✗", "[SKIP]");

            let mut output = String::new();
            output.push_str(&format!("{}\n", style("GC-MS Batch Report").bold().cyan()));
            output.push_str(&format!("{}\n", style("==================").cyan()));

            for file in &self.parsed {
                match file_warning(file) {
                    None => output.push_str(&format!(
                        "[{}] {} ({})\n",
                        OK,
                        style(&file.name).green(),
                        file_line(file)
                    )),
                    Some(warning) => output.push_str(&format!(
                        "[{}] {} ({}) - {}: {}\n",
                        WARN,
                        style(&file.name).yellow(),
                        file_line(file),
                        style("WARNING").yellow().bold(),
                        warning
                    )),
                }
            }
            for file in &self.skipped {
                output.push_str(&format!(
                    "[{}] {} - {}: {}\n",
                    SKIP,
                    style(&file.name).red(),
                    style("SKIPPED").red().bold(),
                    file.reason
                ));
            }

            output.push('\n');
            output.push_str(&format!(
                "{}: {} samples, {} compounds, {} identified of {} peaks\n",
                style("Summary").bold(),
                style(self.summary.samples).green(),
                style(self.summary.unique_compounds).green(),
                style(self.summary.identified_peaks).green(),
                self.summary.total_peaks
            ));
            if self.has_skipped() {
                output.push_str(&format!(
                    "{}\n",
                    style(format!("{} files skipped", self.skipped.len())).red().bold()
                ));
            }
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

fn file_line(file: &ParsedFile) -> String {
    format!(
        "sample {}: {} peaks, {} matched",
        file.sample,
        file.peaks,
        file.peaks - file.stats.unmatched_peaks
    )
}

fn file_warning(file: &ParsedFile) -> Option<String> {
    let stats = &file.stats;
    let mut notes = Vec::new();
    if stats.dropped_peaks > 0 {
        notes.push(format!("{} peak rows dropped", stats.dropped_peaks));
    }
    if stats.malformed_cells > 0 {
        notes.push(format!("{} malformed cells", stats.malformed_cells));
    }
    if stats.duplicate_library_keys > 0 {
        notes.push(format!(
            "{} extra library hits ignored",
            stats.duplicate_library_keys
        ));
    }
    (!notes.is_empty()).then(|| notes.join(", "))
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GC-MS Batch Report")?;
        writeln!(f, "==================")?;

        for file in &self.parsed {
            match file_warning(file) {
                None => writeln!(f, "[OK] {} ({})", file.name, file_line(file))?,
                Some(warning) => writeln!(
                    f,
                    "[WARN] {} ({}) - WARNING: {}",
                    file.name,
                    file_line(file),
                    warning
                )?,
            }
        }
        for file in &self.skipped {
            writeln!(f, "[SKIP] {} - SKIPPED: {}", file.name, file.reason)?;
        }

        writeln!(f)?;
        writeln!(f, "Summary: {}", self.summary)?;
        if self.has_skipped() {
            writeln!(f, "{} files skipped", self.skipped.len())?;
        }
        Ok(())
    }
}
