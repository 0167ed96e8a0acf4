//! iperf3 Speed Test Monitor
//!
//! Periodically invokes the external `iperf3` tool against a configured
//! server, records each test's throughput figures to an append-only log, and
//! regenerates a standalone HTML summary report as the run progresses.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod report;
pub mod runner;
pub mod scheduler;
pub mod stats;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{RunConfig, RunDuration, TestOutcome, TestRecord};
pub use report::Aggregator;
pub use runner::{IperfRunner, SpeedTest};
pub use scheduler::{LoopState, Scheduler};
pub use stats::{RateSummary, RunStats};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_SERVER: &str = "ams.speedtest.clouvider.net";
    pub const DEFAULT_PORT: u16 = 5201;
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(300);
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_TEST_LENGTH: Duration = Duration::from_secs(10);
    pub const DEFAULT_LOG_FILE: &str = "iperf_speed_test.log";
    pub const DEFAULT_REPORT_FILE: &str = "iperf_speed_report.html";
    pub const DEFAULT_REPORT_EVERY: u32 = 10;
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    /// Public iperf3 servers offered in the interactive menu
    pub const PRESET_SERVERS: &[(&str, u16, &str)] = &[
        ("ams.speedtest.clouvider.net", 5200, "Amsterdam - reliable"),
        ("speedtest.wtnet.de", 5200, "Germany - high speed"),
        ("speedtest.init7.net", 5201, "Switzerland - stable"),
        ("lon.speedtest.clouvider.net", 5200, "London - UK"),
        ("nyc.speedtest.clouvider.net", 5200, "New York - US"),
    ];
}
