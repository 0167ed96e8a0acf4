//! Single speed test execution against the external iperf3 tool

pub mod parser;

pub use parser::{parse_output, ParsedThroughput};

use crate::{
    error::{AppError, Result},
    models::{RunConfig, TestRecord},
};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Name of the external measurement executable
pub const IPERF_BIN: &str = "iperf3";

/// Seam between the scheduler loop and the measurement subprocess.
///
/// Implementations never return an error: every invocation, however it ends,
/// is converted into exactly one [`TestRecord`]. Retry policy lives with the
/// caller.
#[async_trait]
pub trait SpeedTest: Send + Sync {
    /// Run one bounded speed test and report its record
    async fn run_test(&self) -> TestRecord;
}

/// iperf3-backed speed test runner
pub struct IperfRunner {
    server: String,
    port: u16,
    test_length: Duration,
    timeout: Duration,
}

impl IperfRunner {
    /// Create a runner from the run configuration
    pub fn new(config: &RunConfig) -> Self {
        Self {
            server: config.server.clone(),
            port: config.port,
            test_length: config.test_length(),
            timeout: config.timeout(),
        }
    }

    /// Server identifier stamped onto every record
    pub fn server_id(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }

    /// Client-mode arguments for one measurement. JSON output is always
    /// requested; the text fallback only matters if iperf3 misbehaves.
    pub fn command_args(&self) -> Vec<String> {
        vec![
            "-c".to_string(),
            self.server.clone(),
            "-p".to_string(),
            self.port.to_string(),
            "-J".to_string(),
            "-t".to_string(),
            self.test_length.as_secs().to_string(),
        ]
    }

    /// Verify that iperf3 is installed and executable.
    ///
    /// A missing binary is a fatal startup error carrying per-platform
    /// install instructions; it must be surfaced before the loop starts.
    pub async fn check_installed() -> Result<()> {
        let probe = Command::new(IPERF_BIN)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match probe {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(AppError::startup(format!(
                "'{} --version' exited with {}\n\n{}",
                IPERF_BIN,
                status,
                install_instructions()
            ))),
            Err(_) => Err(AppError::startup(format!(
                "{} is not installed or not on PATH\n\n{}",
                IPERF_BIN,
                install_instructions()
            ))),
        }
    }
}

#[async_trait]
impl SpeedTest for IperfRunner {
    async fn run_test(&self) -> TestRecord {
        let server_id = self.server_id();

        let child = Command::new(IPERF_BIN)
            .args(self.command_args())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the in-flight future on timeout or interrupt must
            // terminate the subprocess, not leave it measuring.
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) => {
                return TestRecord::failed(server_id, format!("Failed to spawn {}: {}", IPERF_BIN, e))
            }
        };

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return TestRecord::failed(server_id, format!("Failed to wait for {}: {}", IPERF_BIN, e))
            }
            Err(_) => return TestRecord::timeout(server_id, self.timeout),
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if output.status.success() {
            match parse_output(&stdout) {
                Ok(parsed) => TestRecord::success(
                    server_id,
                    parsed.upload_mbps,
                    parsed.download_mbps,
                    parsed.upload_bytes,
                    parsed.download_bytes,
                    parsed.duration_secs,
                ),
                Err(e) => TestRecord::failed(server_id, e.to_string()),
            }
        } else {
            // iperf3 -J reports its own errors as JSON on stdout; prefer that
            // diagnostic over raw stderr when it is available.
            let detail = match parser::parse_json(&stdout) {
                Err(e) if stdout.trim_start().starts_with('{') => e.to_string(),
                _ if !stderr.trim().is_empty() => stderr.trim().to_string(),
                _ => format!("{} exited with {}", IPERF_BIN, output.status),
            };
            TestRecord::failed(server_id, detail)
        }
    }
}

/// Per-platform install guidance shown when the binary is missing
pub fn install_instructions() -> String {
    [
        "iperf3 is required. Install it with:",
        "  macOS:               brew install iperf3",
        "  Ubuntu/Debian:       sudo apt update && sudo apt install iperf3",
        "  Red Hat/Fedora:      sudo dnf install iperf3",
        "  Windows:             https://iperf.fr/iperf-download.php",
    ]
    .join("\n")
}
