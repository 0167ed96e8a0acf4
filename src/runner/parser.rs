//! Parsing of iperf3 output into throughput figures
//!
//! The JSON mode (`iperf3 -J`) is the primary contract. A regex fallback over
//! the human-readable sender/receiver summary lines exists for the case where
//! stdout turns out not to be valid JSON.

use crate::error::{AppError, Result};
use regex::Regex;
use serde::Deserialize;

/// Throughput figures extracted from one completed iperf3 run
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedThroughput {
    /// Sender-side rate, normalized to Mbps
    pub upload_mbps: f64,
    /// Receiver-side rate, normalized to Mbps
    pub download_mbps: f64,
    /// Bytes sent over the test
    pub upload_bytes: u64,
    /// Bytes received over the test
    pub download_bytes: u64,
    /// Measured test duration in seconds
    pub duration_secs: f64,
}

/// Top-level iperf3 JSON document (only the fields we consume)
#[derive(Debug, Deserialize)]
struct IperfJson {
    /// Present when iperf3 itself reports a failure (e.g. server busy)
    error: Option<String>,
    end: Option<IperfEnd>,
}

#[derive(Debug, Deserialize)]
struct IperfEnd {
    sum_sent: Option<IperfSum>,
    sum_received: Option<IperfSum>,
}

#[derive(Debug, Deserialize)]
struct IperfSum {
    #[serde(default)]
    bytes: u64,
    #[serde(default)]
    seconds: f64,
    #[serde(default)]
    bits_per_second: f64,
}

const BITS_PER_MEGABIT: f64 = 1_000_000.0;

/// Parse iperf3 JSON output into throughput figures.
///
/// A JSON document carrying iperf3's own `error` field is reported as a
/// parse-level error with that diagnostic; the caller turns it into a
/// failure record.
pub fn parse_json(stdout: &str) -> Result<ParsedThroughput> {
    let doc: IperfJson = serde_json::from_str(stdout)
        .map_err(|e| AppError::parse(format!("Invalid iperf3 JSON output: {}", e)))?;

    if let Some(error) = doc.error {
        return Err(AppError::parse(format!("iperf3 reported: {}", error)));
    }

    let end = doc
        .end
        .ok_or_else(|| AppError::parse("iperf3 JSON output missing 'end' section"))?;

    let sent = end
        .sum_sent
        .ok_or_else(|| AppError::parse("iperf3 JSON output missing 'end.sum_sent'"))?;
    let received = end
        .sum_received
        .ok_or_else(|| AppError::parse("iperf3 JSON output missing 'end.sum_received'"))?;

    Ok(ParsedThroughput {
        upload_mbps: sent.bits_per_second / BITS_PER_MEGABIT,
        download_mbps: received.bits_per_second / BITS_PER_MEGABIT,
        upload_bytes: sent.bytes,
        download_bytes: received.bytes,
        duration_secs: sent.seconds,
    })
}

/// Fallback parser for the human-readable summary, matching lines like
/// `[  5]   0.00-10.00  sec  1.10 GBytes   943 Mbits/sec    0   sender`.
pub fn parse_human_readable(stdout: &str) -> Result<ParsedThroughput> {
    let line_re = Regex::new(
        r"(?m)^\[\s*\d+\]\s+([\d.]+)-([\d.]+)\s+sec\s+[\d.]+\s+\w+\s+([\d.]+)\s+([KMG]?)bits/sec.*\b(sender|receiver)\s*$",
    )
    .map_err(|e| AppError::internal(format!("Invalid fallback regex: {}", e)))?;

    let mut upload_mbps = None;
    let mut download_mbps = None;
    let mut duration_secs = 0.0;

    for caps in line_re.captures_iter(stdout) {
        let start: f64 = caps[1].parse().unwrap_or(0.0);
        let end: f64 = caps[2].parse().unwrap_or(0.0);
        let rate: f64 = caps[3]
            .parse()
            .map_err(|_| AppError::parse("Unparseable throughput figure in iperf3 output"))?;
        let rate_mbps = match &caps[4] {
            "G" => rate * 1_000.0,
            "M" => rate,
            "K" => rate / 1_000.0,
            _ => rate / 1_000_000.0,
        };

        match &caps[5] {
            "sender" => upload_mbps = Some(rate_mbps),
            "receiver" => download_mbps = Some(rate_mbps),
            _ => {}
        }
        duration_secs = end - start;
    }

    match (upload_mbps, download_mbps) {
        (Some(upload_mbps), Some(download_mbps)) => Ok(ParsedThroughput {
            upload_mbps,
            download_mbps,
            // The text summary reports rates and totals per stream; byte
            // totals are not reliably extractable, so they are left at zero.
            upload_bytes: 0,
            download_bytes: 0,
            duration_secs,
        }),
        _ => Err(AppError::parse(
            "No sender/receiver summary lines found in iperf3 output",
        )),
    }
}

/// Parse iperf3 output, preferring JSON and falling back to the text summary
pub fn parse_output(stdout: &str) -> Result<ParsedThroughput> {
    match parse_json(stdout) {
        Ok(parsed) => Ok(parsed),
        // iperf3's own error diagnostics come through the JSON path and must
        // not be masked by a fallback attempt.
        Err(e @ AppError::Parse(_)) if stdout.trim_start().starts_with('{') => Err(e),
        Err(_) => parse_human_readable(stdout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_JSON: &str = r#"{
        "start": {"version": "iperf 3.12"},
        "intervals": [],
        "end": {
            "sum_sent": {"bytes": 31640000, "seconds": 10.0, "bits_per_second": 25310000.0},
            "sum_received": {"bytes": 117750000, "seconds": 10.0, "bits_per_second": 94200000.0}
        }
    }"#;

    #[test]
    fn test_parse_json_success() {
        let parsed = parse_json(SAMPLE_JSON).unwrap();

        assert!((parsed.upload_mbps - 25.31).abs() < 1e-9);
        assert!((parsed.download_mbps - 94.2).abs() < 1e-9);
        assert_eq!(parsed.upload_bytes, 31_640_000);
        assert_eq!(parsed.download_bytes, 117_750_000);
        assert_eq!(parsed.duration_secs, 10.0);
    }

    #[test]
    fn test_parse_json_server_busy_error() {
        let output = r#"{"error": "the server is busy running a test. try again later"}"#;
        let err = parse_json(output).unwrap_err();

        assert_eq!(err.category(), "PARSE");
        assert!(err.to_string().contains("busy"));
    }

    #[test]
    fn test_parse_json_missing_end_section() {
        let output = r#"{"start": {}, "intervals": []}"#;
        assert!(parse_json(output).is_err());
    }

    #[test]
    fn test_parse_json_garbage() {
        assert!(parse_json("not json at all").is_err());
    }

    #[test]
    fn test_parse_human_readable_summary() {
        let output = "\
Connecting to host example.net, port 5201\n\
[  5] local 192.168.1.10 port 50412 connected to 93.184.216.34 port 5201\n\
[  5]   0.00-10.00  sec  1.10 GBytes   943 Mbits/sec    0             sender\n\
[  5]   0.00-10.00  sec  1.09 GBytes   941 Mbits/sec                  receiver\n\
\niperf Done.\n";

        let parsed = parse_human_readable(output).unwrap();
        assert_eq!(parsed.upload_mbps, 943.0);
        assert_eq!(parsed.download_mbps, 941.0);
        assert_eq!(parsed.duration_secs, 10.0);
    }

    #[test]
    fn test_parse_human_readable_gbits_normalized() {
        let output = "\
[  5]   0.00-10.00  sec  11.0 GBytes   9.41 Gbits/sec    0             sender\n\
[  5]   0.00-10.00  sec  10.9 GBytes   9.38 Gbits/sec                  receiver\n";

        let parsed = parse_human_readable(output).unwrap();
        assert_eq!(parsed.upload_mbps, 9410.0);
        assert_eq!(parsed.download_mbps, 9380.0);
    }

    #[test]
    fn test_parse_human_readable_missing_lines() {
        assert!(parse_human_readable("Connecting to host example.net\n").is_err());
    }

    #[test]
    fn test_parse_output_prefers_json() {
        let parsed = parse_output(SAMPLE_JSON).unwrap();
        assert_eq!(parsed.upload_bytes, 31_640_000);
    }

    #[test]
    fn test_parse_output_falls_back_to_text() {
        let output = "\
[  5]   0.00-10.00  sec  30.2 MBytes   25.3 Mbits/sec    0             sender\n\
[  5]   0.00-10.00  sec  112 MBytes    94.2 Mbits/sec                  receiver\n";

        let parsed = parse_output(output).unwrap();
        assert_eq!(parsed.upload_mbps, 25.3);
        assert_eq!(parsed.download_mbps, 94.2);
    }

    #[test]
    fn test_parse_output_keeps_iperf_error_diagnostic() {
        let output = r#"{"error": "unable to connect to server: Connection refused"}"#;
        let err = parse_output(output).unwrap_err();
        assert!(err.to_string().contains("Connection refused"));
    }
}
