//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env from the current directory if it exists
    pub fn load_env_file(debug: bool) -> Result<()> {
        if Path::new(".env").exists() {
            dotenv::from_filename(".env")
                .map_err(|e| AppError::config(format!("Failed to load .env file: {}", e)))?;

            if debug {
                println!("Loaded configuration from .env file");
            }
        } else if debug {
            println!("No .env file found, using defaults and CLI arguments");
        }

        Ok(())
    }

    /// Create example .env file content
    pub fn create_example_env_content() -> String {
        r#"# iperf3 Speed Test Monitor Configuration
#
# Values here are defaults; command-line arguments override them.

# iperf3 server to test against
# ISM_SERVER=speedtest.example.net
# ISM_PORT=5201

# Seconds between scheduled tests
# ISM_INTERVAL_SECONDS=300

# Per-test subprocess timeout in seconds
# ISM_TIMEOUT_SECONDS=30

# Output files
# ISM_LOG_FILE=iperf_speed_test.log
# ISM_REPORT_FILE=iperf_speed_report.html
"#
        .to_string()
    }

    /// Save the example .env content to disk
    pub fn save_example_env_file(path: &Path) -> Result<()> {
        std::fs::write(path, Self::create_example_env_content()).map_err(|e| {
            AppError::config(format!("Failed to write example .env file: {}", e))
        })
    }
}
