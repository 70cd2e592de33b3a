//! Console progress for the inactive user sweep
//!
//! Pretty and table output go to stdout. In JSON mode stdout is reserved for
//! the final document, so progress lines go to stderr instead.

use colored::Colorize;

use crate::cli::OutputFormat;
use crate::models::InactiveUserDisplay;
use crate::models::display::format_last_login;
use crate::output::table::format_table;
use crate::sweep::{DispatchSummary, InactivityRecord, SweepPreview, SweepReporter};

/// Reporter that writes sweep progress to the terminal
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    format: OutputFormat,
}

impl ConsoleReporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    fn emit(&self, text: &str) {
        match self.format {
            OutputFormat::Json => eprintln!("{}", text),
            OutputFormat::Pretty | OutputFormat::Table => println!("{}", text),
        }
    }
}

/// Headline with fetched and inactive counts
pub fn summary_line(preview: &SweepPreview<'_>) -> String {
    format!(
        "Found {} users; {} inactive (>{} days).",
        preview.total_users,
        preview.records.len(),
        preview.threshold_days
    )
}

/// One bullet of the sample list
pub fn sample_line(record: &InactivityRecord) -> String {
    format!(
        "- {} ({}), last_login={}",
        record.id,
        record.email.as_deref().unwrap_or("no email"),
        format_last_login(record.last_login.as_ref())
    )
}

/// Footer counting inactive users left out of the sample
pub fn remaining_line(remaining: usize) -> Option<String> {
    (remaining > 0).then(|| format!("...and {} more.", remaining))
}

pub const DRY_RUN_LINE: &str = "Dry-run enabled; no users were disabled.";
pub const COMPLETED_LINE: &str = "Completed disabling inactive users.";

pub fn batch_line(size: usize) -> String {
    format!("Disabling batch of {} users...", size)
}

impl SweepReporter for ConsoleReporter {
    fn preview(&self, preview: &SweepPreview<'_>) {
        let headline = summary_line(preview);
        match self.format {
            OutputFormat::Pretty => println!("{}", headline.bold()),
            OutputFormat::Table | OutputFormat::Json => self.emit(&headline),
        }

        let sample = preview.sample();
        if sample.is_empty() {
            return;
        }

        match self.format {
            OutputFormat::Table => {
                let rows: Vec<InactiveUserDisplay> =
                    sample.iter().map(InactiveUserDisplay::from).collect();
                println!("{}", format_table(&rows));
            }
            OutputFormat::Pretty | OutputFormat::Json => {
                self.emit("Sample inactive users:");
                for record in sample {
                    self.emit(&sample_line(record));
                }
            }
        }

        if let Some(line) = remaining_line(preview.remaining()) {
            match self.format {
                OutputFormat::Pretty => println!("{}", line.dimmed()),
                OutputFormat::Table | OutputFormat::Json => self.emit(&line),
            }
        }
    }

    fn dry_run(&self) {
        match self.format {
            OutputFormat::Pretty => println!("{}", DRY_RUN_LINE.yellow()),
            OutputFormat::Table | OutputFormat::Json => self.emit(DRY_RUN_LINE),
        }
    }

    fn batch_started(&self, size: usize) {
        match self.format {
            OutputFormat::Pretty => println!("{}", batch_line(size).cyan()),
            OutputFormat::Table | OutputFormat::Json => self.emit(&batch_line(size)),
        }
    }

    fn completed(&self, summary: &DispatchSummary) {
        log::debug!(
            "Dispatched {} batches ({} partial)",
            summary.batches,
            summary.partial_batches
        );
        match self.format {
            OutputFormat::Pretty => println!("{} {}", "✓".green(), COMPLETED_LINE),
            OutputFormat::Table | OutputFormat::Json => self.emit(COMPLETED_LINE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(id: &str, email: Option<&str>, day: Option<u32>) -> InactivityRecord {
        InactivityRecord {
            id: id.to_string(),
            email: email.map(str::to_string),
            last_login: day.map(|d| Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_summary_line() {
        let records = vec![record("a", None, None)];
        let preview = SweepPreview {
            total_users: 4,
            threshold_days: 45,
            records: &records,
        };
        assert_eq!(
            summary_line(&preview),
            "Found 4 users; 1 inactive (>45 days)."
        );
    }

    #[test]
    fn test_sample_line() {
        assert_eq!(
            sample_line(&record("A", Some("a@example.com"), Some(1))),
            "- A (a@example.com), last_login=2024-03-01T00:00:00+00:00"
        );
        assert_eq!(
            sample_line(&record("C", None, None)),
            "- C (no email), last_login=none"
        );
    }

    #[test]
    fn test_remaining_line() {
        assert_eq!(remaining_line(0), None);
        assert_eq!(remaining_line(3).as_deref(), Some("...and 3 more."));
    }

    #[test]
    fn test_batch_line() {
        assert_eq!(batch_line(20), "Disabling batch of 20 users...");
    }
}
