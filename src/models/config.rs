//! Run configuration data model and validation

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Total run duration policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunDuration {
    /// Run until interrupted
    Continuous,
    /// Run for a fixed wall-clock duration
    Fixed { secs: u64 },
}

impl RunDuration {
    /// Wall-clock limit, if any
    pub fn limit(&self) -> Option<Duration> {
        match self {
            RunDuration::Continuous => None,
            RunDuration::Fixed { secs } => Some(Duration::from_secs(*secs)),
        }
    }

    /// Human-readable description for banners and reports
    pub fn describe(&self) -> String {
        match self {
            RunDuration::Continuous => "continuous (until interrupted)".to_string(),
            RunDuration::Fixed { secs } => {
                if secs % 60 == 0 && *secs >= 60 {
                    format!("{} minute(s)", secs / 60)
                } else {
                    format!("{} second(s)", secs)
                }
            }
        }
    }
}

/// Immutable configuration for one monitoring run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// iperf3 server hostname or IP
    #[serde(default = "default_server")]
    pub server: String,

    /// iperf3 server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds between scheduled test ticks
    #[serde(default = "default_interval_secs")]
    pub interval_seconds: u64,

    /// Total run duration policy
    #[serde(default = "default_duration")]
    pub duration: RunDuration,

    /// Per-test subprocess timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: u64,

    /// Measurement length passed to `iperf3 -t`, in seconds
    #[serde(default = "default_test_length_secs")]
    pub test_length_seconds: u64,

    /// Append-only result log path
    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// Generated HTML report path
    #[serde(default = "default_report_file")]
    pub report_file: String,

    /// Render the HTML report every N ticks
    #[serde(default = "default_report_every")]
    pub report_every: u32,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            port: default_port(),
            interval_seconds: default_interval_secs(),
            duration: default_duration(),
            timeout_seconds: default_timeout_secs(),
            test_length_seconds: default_test_length_secs(),
            log_file: default_log_file(),
            report_file: default_report_file(),
            report_every: default_report_every(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl RunConfig {
    /// Interval between tick starts
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    /// Per-test subprocess timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Measurement length for one iperf3 test
    pub fn test_length(&self) -> Duration {
        Duration::from_secs(self.test_length_seconds)
    }

    /// Server identifier used in records, logs, and the report
    pub fn server_id(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }

    /// Merge supported environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(server) = std::env::var("ISM_SERVER") {
            if !server.trim().is_empty() {
                self.server = server.trim().to_string();
            }
        }

        if let Ok(port) = std::env::var("ISM_PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| AppError::config(format!("Invalid ISM_PORT value: {}", port)))?;
        }

        if let Ok(interval) = std::env::var("ISM_INTERVAL_SECONDS") {
            self.interval_seconds = interval.trim().parse().map_err(|_| {
                AppError::config(format!("Invalid ISM_INTERVAL_SECONDS value: {}", interval))
            })?;
        }

        if let Ok(timeout) = std::env::var("ISM_TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout.trim().parse().map_err(|_| {
                AppError::config(format!("Invalid ISM_TIMEOUT_SECONDS value: {}", timeout))
            })?;
        }

        if let Ok(log_file) = std::env::var("ISM_LOG_FILE") {
            if !log_file.trim().is_empty() {
                self.log_file = log_file.trim().to_string();
            }
        }

        if let Ok(report_file) = std::env::var("ISM_REPORT_FILE") {
            if !report_file.trim().is_empty() {
                self.report_file = report_file.trim().to_string();
            }
        }

        Ok(())
    }

    /// Validate the configuration; returns fatal errors only
    pub fn validate(&self) -> Result<()> {
        if self.server.trim().is_empty() {
            return Err(AppError::validation("Server address cannot be empty"));
        }

        if self.port == 0 {
            return Err(AppError::validation("Port must be between 1 and 65535"));
        }

        if self.interval_seconds == 0 {
            return Err(AppError::validation("Interval must be greater than 0 seconds"));
        }

        if self.timeout_seconds == 0 {
            return Err(AppError::validation("Timeout must be greater than 0 seconds"));
        }

        if self.test_length_seconds == 0 {
            return Err(AppError::validation("Test length must be greater than 0 seconds"));
        }

        if self.timeout_seconds <= self.test_length_seconds {
            return Err(AppError::validation(format!(
                "Timeout ({}s) must exceed the test length ({}s) or every test would time out",
                self.timeout_seconds, self.test_length_seconds
            )));
        }

        if self.report_every == 0 {
            return Err(AppError::validation("Report interval must be at least 1 tick"));
        }

        if let RunDuration::Fixed { secs } = self.duration {
            if secs == 0 {
                return Err(AppError::validation("Run duration must be greater than 0 seconds"));
            }
        }

        Ok(())
    }

    /// Non-fatal configuration warnings for operator display
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.interval_seconds < self.timeout_seconds {
            warnings.push(format!(
                "Interval ({}s) is shorter than the test timeout ({}s); a slow test delays subsequent ticks",
                self.interval_seconds, self.timeout_seconds
            ));
        }

        if let RunDuration::Fixed { secs } = self.duration {
            if secs < self.interval_seconds {
                warnings.push(format!(
                    "Run duration ({}s) is shorter than the interval ({}s); only one test will run",
                    secs, self.interval_seconds
                ));
            }
        }

        if self.interval_seconds < 60 {
            warnings.push(format!(
                "Interval of {}s is aggressive for a shared public server; consider 60s or more",
                self.interval_seconds
            ));
        }

        warnings
    }
}

fn default_server() -> String {
    crate::defaults::DEFAULT_SERVER.to_string()
}

fn default_port() -> u16 {
    crate::defaults::DEFAULT_PORT
}

fn default_interval_secs() -> u64 {
    crate::defaults::DEFAULT_INTERVAL.as_secs()
}

fn default_duration() -> RunDuration {
    RunDuration::Continuous
}

fn default_timeout_secs() -> u64 {
    crate::defaults::DEFAULT_TIMEOUT.as_secs()
}

fn default_test_length_secs() -> u64 {
    crate::defaults::DEFAULT_TEST_LENGTH.as_secs()
}

fn default_log_file() -> String {
    crate::defaults::DEFAULT_LOG_FILE.to_string()
}

fn default_report_file() -> String {
    crate::defaults::DEFAULT_REPORT_FILE.to_string()
}

fn default_report_every() -> u32 {
    crate::defaults::DEFAULT_REPORT_EVERY
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RunConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.duration, RunDuration::Continuous);
    }

    #[test]
    fn test_server_id_format() {
        let config = RunConfig {
            server: "speedtest.example.net".to_string(),
            port: 5201,
            ..RunConfig::default()
        };
        assert_eq!(config.server_id(), "speedtest.example.net:5201");
    }

    #[test]
    fn test_empty_server_rejected() {
        let config = RunConfig {
            server: "  ".to_string(),
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = RunConfig {
            interval_seconds: 0,
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_must_exceed_test_length() {
        let config = RunConfig {
            timeout_seconds: 10,
            test_length_seconds: 10,
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_fixed_duration_rejected() {
        let config = RunConfig {
            duration: RunDuration::Fixed { secs: 0 },
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_short_duration_warns() {
        let config = RunConfig {
            interval_seconds: 300,
            duration: RunDuration::Fixed { secs: 60 },
            ..RunConfig::default()
        };
        assert!(config.validate().is_ok());
        assert!(!config.warnings().is_empty());
    }

    #[test]
    fn test_duration_describe() {
        assert_eq!(RunDuration::Continuous.describe(), "continuous (until interrupted)");
        assert_eq!(RunDuration::Fixed { secs: 300 }.describe(), "5 minute(s)");
        assert_eq!(RunDuration::Fixed { secs: 90 }.describe(), "90 second(s)");
    }
}
