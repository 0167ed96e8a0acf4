//! Command-line interface definition and validation

use clap::Parser;

/// iperf3 Speed Test Monitor - periodic throughput testing with logging and HTML reports
#[derive(Parser, Debug, Clone)]
#[command(name = "iperf-speed-monitor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// iperf3 server hostname or IP (prompts interactively when omitted)
    #[arg(short, long)]
    pub server: Option<String>,

    /// iperf3 server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Seconds between test ticks (prompts interactively when omitted)
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Total run duration in seconds
    #[arg(short, long)]
    pub duration: Option<u64>,

    /// Run continuously until interrupted
    #[arg(long)]
    pub continuous: bool,

    /// Per-test subprocess timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Measurement length passed to iperf3 -t, in seconds
    #[arg(long)]
    pub test_length: Option<u64>,

    /// Append-only result log path
    #[arg(long)]
    pub log_file: Option<String>,

    /// Generated HTML report path
    #[arg(long)]
    pub report_file: Option<String>,

    /// Render the HTML report every N ticks
    #[arg(long)]
    pub report_every: Option<u32>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Write an annotated .env.example file and exit
    #[arg(long)]
    pub create_env: bool,

    /// Skip the interactive start confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and obviously invalid values
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if self.duration.is_some() && self.continuous {
            return Err("Cannot specify both --duration and --continuous".to_string());
        }

        if self.port == Some(0) {
            return Err("Port must be between 1 and 65535".to_string());
        }

        if self.interval == Some(0) {
            return Err("Interval must be greater than 0 seconds".to_string());
        }

        if self.duration == Some(0) {
            return Err("Duration must be greater than 0 seconds".to_string());
        }

        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            crate::output::Console::supports_color()
        }
    }
}
