//! Console output surface for the monitoring run
//!
//! All operator-visible progress goes through [`Console`], which branches on
//! color support once instead of sprinkling escape codes through the loop.

use crate::models::{RunConfig, TestRecord};
use crate::stats::RunStats;
use colored::Colorize;
use std::time::Duration;

/// Console writer with optional color support
pub struct Console {
    use_colors: bool,
}

impl Console {
    /// Create a console writer
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Startup banner describing the configured run
    pub fn banner(&self, config: &RunConfig) {
        let title = "iperf3 Speed Test Monitor";
        if self.use_colors {
            println!("{}", title.cyan().bold());
        } else {
            println!("{}", title);
        }
        println!("{}", "=".repeat(50));
        println!("Testing against: {}", config.server_id());
        println!("Test interval:   {}s", config.interval_seconds);
        println!("Run duration:    {}", config.duration.describe());
        println!("Test length:     {}s (timeout {}s)", config.test_length_seconds, config.timeout_seconds);
        println!("Logging to:      {}", config.log_file);
        println!("Report file:     {}", config.report_file);
        println!("\nPress Ctrl+C to stop\n");
    }

    /// Per-tick result line
    pub fn tick_result(&self, tick: u64, record: &TestRecord) {
        let time = record.timestamp.format("%H:%M:%S");
        let summary = record.summary();

        if self.use_colors {
            if record.is_successful() {
                println!("{} #{:<4} {} | {}", "[OK]".green().bold(), tick, time, summary);
            } else {
                println!("{} #{:<4} {} | {}", "[!!]".red().bold(), tick, time, summary);
            }
        } else {
            let tag = if record.is_successful() { "[OK]" } else { "[!!]" };
            println!("{} #{:<4} {} | {}", tag, tick, time, summary);
        }
    }

    /// Running progress line computed from current statistics
    pub fn progress(&self, elapsed: Duration, remaining: Option<Duration>, stats: &RunStats) {
        let remaining_text = match remaining {
            Some(rem) => format!("{}s remaining", rem.as_secs()),
            None => "continuous".to_string(),
        };
        let line = format!(
            "     elapsed {}s | {} | {}/{} ok ({:.1}%)",
            elapsed.as_secs(),
            remaining_text,
            stats.success_count,
            stats.total_count,
            stats.success_rate,
        );

        if self.use_colors {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }

    /// Non-fatal operator warning
    pub fn warning(&self, message: &str) {
        if self.use_colors {
            eprintln!("{} {}", "[WARN]".yellow().bold(), message);
        } else {
            eprintln!("[WARN] {}", message);
        }
    }

    /// Operator-facing error
    pub fn error(&self, message: &str) {
        if self.use_colors {
            eprintln!("{} {}", "[ERROR]".red().bold(), message);
        } else {
            eprintln!("[ERROR] {}", message);
        }
    }

    /// Informational message
    pub fn info(&self, message: &str) {
        if self.use_colors {
            println!("{} {}", "[INFO]".cyan(), message);
        } else {
            println!("[INFO] {}", message);
        }
    }

    /// Final summary printed after the loop reaches Done
    pub fn final_summary(&self, stats: &RunStats, report_path: &str) {
        println!();
        let header = "Run complete";
        if self.use_colors {
            println!("{}", header.green().bold());
        } else {
            println!("{}", header);
        }
        println!(
            "  Tests: {} total, {} ok, {} failed, {} timed out ({:.1}% success)",
            stats.total_count,
            stats.success_count,
            stats.failure_count,
            stats.timeout_count,
            stats.success_rate,
        );
        match (&stats.upload, &stats.download) {
            (Some(up), Some(down)) => {
                println!(
                    "  Upload:   min {:.2} / mean {:.2} / max {:.2} Mbps",
                    up.min_mbps, up.mean_mbps, up.max_mbps
                );
                println!(
                    "  Download: min {:.2} / mean {:.2} / max {:.2} Mbps",
                    down.min_mbps, down.mean_mbps, down.max_mbps
                );
            }
            _ => println!("  No successful tests recorded"),
        }
        println!("  Report: {}", report_path);
    }

    /// Detect whether the terminal supports colored output
    pub fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && std::env::var("TERM").map(|t| t != "dumb").unwrap_or(false)
    }
}
