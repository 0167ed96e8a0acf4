//! Standalone HTML report rendering
//!
//! The document is regenerated wholesale on each render: inline CSS, no
//! external resources, valid on its own when opened from disk.

use crate::models::{TestOutcome, TestRecord};
use crate::stats::RunStats;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;

/// Render the complete report document
pub fn render(
    server_id: &str,
    generated_at: DateTime<Utc>,
    stats: &RunStats,
    records: &[TestRecord],
) -> String {
    let mut html = String::with_capacity(8 * 1024);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>iperf3 Speed Test Report</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 20px; }}
        .header {{ background: #2196F3; color: white; padding: 20px; border-radius: 5px; }}
        .stats {{ display: flex; gap: 20px; margin: 20px 0; }}
        .stat-box {{ background: #f5f5f5; padding: 15px; border-radius: 5px; flex: 1; }}
        .stat-value {{ font-size: 24px; font-weight: bold; color: #2196F3; }}
        .success {{ color: #4CAF50; }}
        .failure {{ color: #f44336; }}
        table {{ width: 100%; border-collapse: collapse; margin-top: 20px; }}
        th, td {{ padding: 10px; text-align: left; border-bottom: 1px solid #ddd; }}
        th {{ background-color: #f2f2f2; }}
    </style>
</head>
<body>
    <div class="header">
        <h1>iperf3 Speed Test Report</h1>
        <p>Generated: {generated}</p>
        <p>Server: {server}</p>
    </div>
"#,
        generated = generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        server = escape(server_id),
    );

    render_summary_boxes(&mut html, stats);
    render_stats_table(&mut html, stats);
    render_record_table(&mut html, records);

    html.push_str("</body>\n</html>\n");
    html
}

fn render_summary_boxes(html: &mut String, stats: &RunStats) {
    let avg_down = stats.download.map(|s| s.mean_mbps);
    let avg_up = stats.upload.map(|s| s.mean_mbps);

    let _ = write!(
        html,
        r#"    <div class="stats">
        <div class="stat-box"><div class="stat-value">{total}</div><div>Total Tests</div></div>
        <div class="stat-box"><div class="stat-value">{ok}</div><div>Successful</div></div>
        <div class="stat-box"><div class="stat-value">{failed}</div><div>Failed</div></div>
        <div class="stat-box"><div class="stat-value">{rate:.1}%</div><div>Success Rate</div></div>
        <div class="stat-box"><div class="stat-value">{down}</div><div>Avg Download (Mbps)</div></div>
        <div class="stat-box"><div class="stat-value">{up}</div><div>Avg Upload (Mbps)</div></div>
    </div>
"#,
        total = stats.total_count,
        ok = stats.success_count,
        failed = stats.failure_count + stats.timeout_count,
        rate = stats.success_rate,
        down = format_optional_rate(avg_down),
        up = format_optional_rate(avg_up),
    );
}

fn render_stats_table(html: &mut String, stats: &RunStats) {
    html.push_str(
        "    <h2>Speed Statistics</h2>\n    <table>\n        <tr><th>Metric</th><th>Download (Mbps)</th><th>Upload (Mbps)</th></tr>\n",
    );

    let rows: [(&str, Option<f64>, Option<f64>); 3] = [
        (
            "Average",
            stats.download.map(|s| s.mean_mbps),
            stats.upload.map(|s| s.mean_mbps),
        ),
        (
            "Maximum",
            stats.download.map(|s| s.max_mbps),
            stats.upload.map(|s| s.max_mbps),
        ),
        (
            "Minimum",
            stats.download.map(|s| s.min_mbps),
            stats.upload.map(|s| s.min_mbps),
        ),
    ];

    for (label, down, up) in rows {
        let _ = write!(
            html,
            "        <tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            label,
            format_optional_rate(down),
            format_optional_rate(up),
        );
    }

    html.push_str("    </table>\n");
}

fn render_record_table(html: &mut String, records: &[TestRecord]) {
    html.push_str(
        "    <h2>Test Results</h2>\n    <table>\n        <tr><th>Timestamp</th><th>Status</th><th>Download (Mbps)</th><th>Upload (Mbps)</th><th>Details</th></tr>\n",
    );

    for record in records {
        let class = match record.outcome {
            TestOutcome::Success => "success",
            _ => "failure",
        };
        let (down, up, details) = match record.outcome {
            TestOutcome::Success => (
                format!("{:.2}", record.download_mbps.unwrap_or(0.0)),
                format!("{:.2}", record.upload_mbps.unwrap_or(0.0)),
                record
                    .duration_secs
                    .map(|d| format!("Duration: {:.0}s", d))
                    .unwrap_or_default(),
            ),
            _ => (
                "-".to_string(),
                "-".to_string(),
                escape(record.error.as_deref().unwrap_or("unknown error")),
            ),
        };

        let _ = write!(
            html,
            "        <tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.outcome.tag(),
            down,
            up,
            details,
        );
    }

    html.push_str("    </table>\n");
}

fn format_optional_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{:.2}", rate),
        None => "no data".to_string(),
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(up: f64, down: f64) -> TestRecord {
        TestRecord::success("host:5201".to_string(), up, down, 1000, 2000, 10.0)
    }

    #[test]
    fn test_render_is_standalone_html() {
        let records = vec![success(25.0, 90.0)];
        let stats = RunStats::from_records(&records);
        let html = render("host:5201", Utc::now(), &stats, &records);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>\n"));
        assert!(!html.contains("http://"));
        assert!(!html.contains("https://"));
    }

    #[test]
    fn test_render_empty_run_shows_no_data() {
        let html = render("host:5201", Utc::now(), &RunStats::empty(), &[]);

        assert!(html.contains("no data"));
        assert!(!html.contains("NaN"));
    }

    #[test]
    fn test_render_contains_statistics() {
        let records = vec![success(20.0, 80.0), success(30.0, 100.0)];
        let stats = RunStats::from_records(&records);
        let html = render("host:5201", Utc::now(), &stats, &records);

        // mean upload 25.00, max download 100.00
        assert!(html.contains("25.00"));
        assert!(html.contains("100.00"));
        assert!(html.contains("100.0%"));
    }

    #[test]
    fn test_render_lists_every_record_chronologically() {
        let records: Vec<TestRecord> = (0..120).map(|_| success(25.0, 90.0)).collect();
        let stats = RunStats::from_records(&records);
        let html = render("host:5201", Utc::now(), &stats, &records);

        let rows = html.matches("<tr class=\"success\">").count();
        assert_eq!(rows, 120);
        assert!(html.contains(">120<"));
    }

    #[test]
    fn test_render_escapes_error_detail() {
        let records = vec![TestRecord::failed(
            "host:5201".to_string(),
            "<script>alert(1)</script>".to_string(),
        )];
        let stats = RunStats::from_records(&records);
        let html = render("host:5201", Utc::now(), &stats, &records);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_idempotent_for_fixed_records() {
        let records = vec![success(25.0, 90.0), success(25.0, 90.0)];
        let stats = RunStats::from_records(&records);
        let at = Utc::now();

        let first = render("host:5201", at, &stats, &records);
        let second = render("host:5201", at, &stats, &records);
        assert_eq!(first, second);
    }
}
