//! Result aggregation, log persistence, and report generation

pub mod html;

use crate::{
    error::{AppError, Result},
    models::{RunConfig, TestRecord},
    stats::RunStats,
};
use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::PathBuf;

/// Owns the in-memory record sequence for one run and persists it.
///
/// Records are held in insertion order, which is chronological order because
/// the single scheduler path is the only writer. Persistence failures are
/// returned to the caller for a warning, never allowed to drop the in-memory
/// record.
pub struct Aggregator {
    records: Vec<TestRecord>,
    server_id: String,
    log_file: PathBuf,
    report_file: PathBuf,
}

impl Aggregator {
    /// Create an aggregator for one run
    pub fn new(config: &RunConfig) -> Self {
        Self {
            records: Vec::new(),
            server_id: config.server_id(),
            log_file: PathBuf::from(&config.log_file),
            report_file: PathBuf::from(&config.report_file),
        }
    }

    /// Append one record to the in-memory sequence and the log file.
    ///
    /// The in-memory append always happens; the returned error only reflects
    /// the log write, which the caller downgrades to a warning.
    pub fn record(&mut self, record: TestRecord) -> Result<()> {
        let line = record.log_line();
        self.records.push(record);
        self.append_log_line(&line)
    }

    /// Recompute statistics over the full record sequence
    pub fn stats(&self) -> RunStats {
        RunStats::from_records(&self.records)
    }

    /// Recompute statistics and overwrite the HTML report wholesale
    pub fn render_report(&self) -> Result<()> {
        let stats = self.stats();
        let document = html::render(&self.server_id, Utc::now(), &stats, &self.records);

        std::fs::write(&self.report_file, document).map_err(|e| {
            AppError::io(format!(
                "Failed to write report {}: {}",
                self.report_file.display(),
                e
            ))
        })
    }

    /// All records in chronological order
    pub fn records(&self) -> &[TestRecord] {
        &self.records
    }

    /// Number of records recorded so far
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True before the first tick completes
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Path of the generated report, for operator display
    pub fn report_path(&self) -> &PathBuf {
        &self.report_file
    }

    /// Path of the append-only log, for operator display
    pub fn log_path(&self) -> &PathBuf {
        &self.log_file
    }

    fn append_log_line(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)
            .map_err(|e| {
                AppError::io(format!("Failed to open log {}: {}", self.log_file.display(), e))
            })?;

        writeln!(file, "{}", line).map_err(|e| {
            AppError::io(format!(
                "Failed to append to log {}: {}",
                self.log_file.display(),
                e
            ))
        })
    }
}
