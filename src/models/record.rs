//! Test record data model produced by the test runner

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of a single speed test tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestOutcome {
    /// Test completed and both throughput figures were parsed
    Success,
    /// Test failed (server busy, refused, unreachable, unparseable output)
    Failure,
    /// Test exceeded the per-test timeout and the subprocess was terminated
    Timeout,
}

impl TestOutcome {
    /// Tag used in the log file and the HTML report
    pub fn tag(&self) -> &'static str {
        match self {
            TestOutcome::Success => "SUCCESS",
            TestOutcome::Failure => "FAILED",
            TestOutcome::Timeout => "TIMEOUT",
        }
    }
}

/// Immutable result of one scheduled speed test invocation.
///
/// Invariant: `outcome == Success` if and only if both rate fields are
/// populated with non-negative values. The constructors below are the only
/// way records are created, so the invariant holds by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRecord {
    /// When the test was executed
    pub timestamp: DateTime<Utc>,

    /// Test outcome
    pub outcome: TestOutcome,

    /// Upload throughput in Mbps (success only)
    pub upload_mbps: Option<f64>,

    /// Download throughput in Mbps (success only)
    pub download_mbps: Option<f64>,

    /// Bytes sent during the test (success only)
    pub upload_bytes: Option<u64>,

    /// Bytes received during the test (success only)
    pub download_bytes: Option<u64>,

    /// Measured test duration in seconds (success only)
    pub duration_secs: Option<f64>,

    /// Server identifier in `host:port` form
    pub server: String,

    /// Diagnostic text (failure/timeout only)
    pub error: Option<String>,
}

impl TestRecord {
    /// Create a successful record. Negative inputs are clamped to zero so the
    /// success invariant (rates present and non-negative) always holds.
    pub fn success(
        server: String,
        upload_mbps: f64,
        download_mbps: f64,
        upload_bytes: u64,
        download_bytes: u64,
        duration_secs: f64,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            outcome: TestOutcome::Success,
            upload_mbps: Some(upload_mbps.max(0.0)),
            download_mbps: Some(download_mbps.max(0.0)),
            upload_bytes: Some(upload_bytes),
            download_bytes: Some(download_bytes),
            duration_secs: Some(duration_secs),
            server,
            error: None,
        }
    }

    /// Create a failed record with diagnostic text
    pub fn failed(server: String, error: String) -> Self {
        Self {
            timestamp: Utc::now(),
            outcome: TestOutcome::Failure,
            upload_mbps: None,
            download_mbps: None,
            upload_bytes: None,
            download_bytes: None,
            duration_secs: None,
            server,
            error: Some(error),
        }
    }

    /// Create a timed-out record
    pub fn timeout(server: String, timeout: Duration) -> Self {
        Self {
            timestamp: Utc::now(),
            outcome: TestOutcome::Timeout,
            upload_mbps: None,
            download_mbps: None,
            upload_bytes: None,
            download_bytes: None,
            duration_secs: None,
            server,
            error: Some(format!("Test timed out after {}s", timeout.as_secs())),
        }
    }

    /// Check if this test was successful
    pub fn is_successful(&self) -> bool {
        matches!(self.outcome, TestOutcome::Success)
    }

    /// One pipe-delimited, append-only log line for this record.
    ///
    /// `2024-05-01T12:00:00Z | SUCCESS | up 25.31 Mbps | down 94.20 Mbps | server host:5201`
    pub fn log_line(&self) -> String {
        let ts = self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
        match self.outcome {
            TestOutcome::Success => format!(
                "{} | {} | up {:6.2} Mbps | down {:6.2} Mbps | server {}",
                ts,
                self.outcome.tag(),
                self.upload_mbps.unwrap_or(0.0),
                self.download_mbps.unwrap_or(0.0),
                self.server,
            ),
            TestOutcome::Failure | TestOutcome::Timeout => format!(
                "{} | {} | server {} | {}",
                ts,
                self.outcome.tag(),
                self.server,
                self.error.as_deref().unwrap_or("unknown error"),
            ),
        }
    }

    /// Short outcome description for console status lines
    pub fn summary(&self) -> String {
        match self.outcome {
            TestOutcome::Success => format!(
                "Upload: {:6.2} Mbps | Download: {:6.2} Mbps",
                self.upload_mbps.unwrap_or(0.0),
                self.download_mbps.unwrap_or(0.0),
            ),
            TestOutcome::Failure | TestOutcome::Timeout => {
                format!("Test failed: {}", self.error.as_deref().unwrap_or("unknown error"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_record_has_rates() {
        let rec = TestRecord::success(
            "example.net:5201".to_string(),
            25.31,
            94.2,
            31_640_000,
            117_750_000,
            10.0,
        );

        assert!(rec.is_successful());
        assert_eq!(rec.upload_mbps, Some(25.31));
        assert_eq!(rec.download_mbps, Some(94.2));
        assert!(rec.error.is_none());
    }

    #[test]
    fn test_failed_record_has_no_rates() {
        let rec = TestRecord::failed(
            "example.net:5201".to_string(),
            "the server is busy running a test".to_string(),
        );

        assert!(!rec.is_successful());
        assert!(rec.upload_mbps.is_none());
        assert!(rec.download_mbps.is_none());
        assert!(rec.error.is_some());
    }

    #[test]
    fn test_timeout_record() {
        let rec = TestRecord::timeout("example.net:5201".to_string(), Duration::from_secs(30));

        assert_eq!(rec.outcome, TestOutcome::Timeout);
        assert!(rec.upload_mbps.is_none());
        assert_eq!(rec.error.as_deref(), Some("Test timed out after 30s"));
    }

    #[test]
    fn test_negative_rates_clamped() {
        let rec = TestRecord::success("s:1".to_string(), -1.0, -2.0, 0, 0, 10.0);
        assert_eq!(rec.upload_mbps, Some(0.0));
        assert_eq!(rec.download_mbps, Some(0.0));
        assert!(rec.is_successful());
    }

    #[test]
    fn test_log_line_success_format() {
        let rec = TestRecord::success("host:5201".to_string(), 25.0, 90.0, 0, 0, 10.0);
        let line = rec.log_line();

        assert!(line.contains("SUCCESS"));
        assert!(line.contains("up  25.00 Mbps"));
        assert!(line.contains("down  90.00 Mbps"));
        assert!(line.contains("server host:5201"));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_log_line_failure_format() {
        let rec = TestRecord::failed("host:5201".to_string(), "connection refused".to_string());
        let line = rec.log_line();

        assert!(line.contains("FAILED"));
        assert!(line.contains("connection refused"));
        assert!(!line.contains("Mbps"));
    }
}
