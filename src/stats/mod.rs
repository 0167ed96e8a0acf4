//! Run statistics derived from the accumulated record sequence

use crate::models::{TestOutcome, TestRecord};
use serde::{Deserialize, Serialize};

/// Min/mean/max summary over one throughput direction.
///
/// Only ever constructed from a non-empty sample set; the absence of any
/// successful records is represented by `None` in [`RunStats`], never by
/// NaN or zero-filled values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSummary {
    /// Minimum observed rate (Mbps)
    pub min_mbps: f64,
    /// Mean rate (Mbps)
    pub mean_mbps: f64,
    /// Maximum observed rate (Mbps)
    pub max_mbps: f64,
}

impl RateSummary {
    fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;

        Some(Self {
            min_mbps: min,
            mean_mbps: mean,
            max_mbps: max,
        })
    }
}

/// Statistics over the full record sequence, recomputed on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// Total records
    pub total_count: usize,
    /// Records with a success outcome
    pub success_count: usize,
    /// Records with a failure outcome
    pub failure_count: usize,
    /// Records with a timeout outcome
    pub timeout_count: usize,
    /// Success rate percentage (0.0 when there are no records)
    pub success_rate: f64,
    /// Upload summary over successful records; `None` when there are none
    pub upload: Option<RateSummary>,
    /// Download summary over successful records; `None` when there are none
    pub download: Option<RateSummary>,
}

impl RunStats {
    /// Compute statistics from the full chronological record sequence
    pub fn from_records(records: &[TestRecord]) -> Self {
        let total_count = records.len();
        let success_count = records.iter().filter(|r| r.is_successful()).count();
        let failure_count = records
            .iter()
            .filter(|r| r.outcome == TestOutcome::Failure)
            .count();
        let timeout_count = records
            .iter()
            .filter(|r| r.outcome == TestOutcome::Timeout)
            .count();

        let success_rate = if total_count == 0 {
            0.0
        } else {
            (success_count as f64 / total_count as f64) * 100.0
        };

        let uploads: Vec<f64> = records.iter().filter_map(|r| r.upload_mbps).collect();
        let downloads: Vec<f64> = records.iter().filter_map(|r| r.download_mbps).collect();

        Self {
            total_count,
            success_count,
            failure_count,
            timeout_count,
            success_rate,
            upload: RateSummary::from_samples(&uploads),
            download: RateSummary::from_samples(&downloads),
        }
    }

    /// Explicit no-data state: zero counts, no rate summaries
    pub fn empty() -> Self {
        Self::from_records(&[])
    }

    /// True when no successful record has been observed yet
    pub fn has_no_data(&self) -> bool {
        self.success_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TestRecord;
    use proptest::prelude::*;
    use std::time::Duration;

    fn success(up: f64, down: f64) -> TestRecord {
        TestRecord::success("host:5201".to_string(), up, down, 0, 0, 10.0)
    }

    #[test]
    fn test_empty_stats_are_explicit_no_data() {
        let stats = RunStats::empty();

        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.success_rate, 0.0);
        assert!(stats.upload.is_none());
        assert!(stats.download.is_none());
        assert!(stats.has_no_data());
    }

    #[test]
    fn test_all_failures_have_no_rate_summary() {
        let records = vec![
            TestRecord::failed("h:1".to_string(), "refused".to_string()),
            TestRecord::timeout("h:1".to_string(), Duration::from_secs(30)),
        ];
        let stats = RunStats::from_records(&records);

        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.failure_count, 1);
        assert_eq!(stats.timeout_count, 1);
        assert_eq!(stats.success_rate, 0.0);
        assert!(stats.upload.is_none());
        assert!(stats.download.is_none());
    }

    #[test]
    fn test_fixed_rates_collapse_min_mean_max() {
        // Four identical successes, as produced by a 2min run at 30s intervals
        let records: Vec<TestRecord> = (0..4).map(|_| success(25.0, 90.0)).collect();
        let stats = RunStats::from_records(&records);

        assert_eq!(stats.total_count, 4);
        assert_eq!(stats.success_rate, 100.0);

        let up = stats.upload.unwrap();
        assert_eq!(up.min_mbps, 25.0);
        assert_eq!(up.mean_mbps, 25.0);
        assert_eq!(up.max_mbps, 25.0);

        let down = stats.download.unwrap();
        assert_eq!(down.min_mbps, 90.0);
        assert_eq!(down.mean_mbps, 90.0);
        assert_eq!(down.max_mbps, 90.0);
    }

    #[test]
    fn test_one_timeout_among_successes() {
        let mut records: Vec<TestRecord> = (0..3).map(|_| success(25.0, 90.0)).collect();
        records.insert(1, TestRecord::timeout("h:1".to_string(), Duration::from_secs(30)));

        let stats = RunStats::from_records(&records);
        assert_eq!(stats.total_count, 4);
        assert_eq!(stats.success_count, 3);
        assert_eq!(stats.success_rate, 75.0);
    }

    #[test]
    fn test_min_mean_max_ordering() {
        let records = vec![success(10.0, 50.0), success(20.0, 100.0), success(30.0, 75.0)];
        let stats = RunStats::from_records(&records);

        let up = stats.upload.unwrap();
        assert_eq!(up.min_mbps, 10.0);
        assert_eq!(up.mean_mbps, 20.0);
        assert_eq!(up.max_mbps, 30.0);

        let down = stats.download.unwrap();
        assert_eq!(down.min_mbps, 50.0);
        assert_eq!(down.max_mbps, 100.0);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let records = vec![success(12.5, 80.0), success(14.0, 78.5)];
        let first = RunStats::from_records(&records);
        let second = RunStats::from_records(&records);
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_summary_bounds_hold(rates in proptest::collection::vec(0.0f64..10_000.0, 1..100)) {
            let records: Vec<TestRecord> =
                rates.iter().map(|&r| success(r, r * 2.0)).collect();
            let stats = RunStats::from_records(&records);

            let up = stats.upload.unwrap();
            prop_assert!(up.min_mbps <= up.mean_mbps);
            prop_assert!(up.mean_mbps <= up.max_mbps);
            prop_assert!(up.min_mbps.is_finite() && up.max_mbps.is_finite());
            prop_assert_eq!(stats.success_count, rates.len());
            prop_assert_eq!(stats.success_rate, 100.0);
        }
    }
}
