//! Diagnostic logging for the monitor itself
//!
//! Distinct from the result log: this surfaces scheduler and persistence
//! events on stderr, tagged with a per-run correlation id so interleaved
//! output from several runs stays attributable.

use chrono::Utc;
use colored::Colorize;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AppError;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(AppError::parse(format!("Invalid log level: {}", s))),
        }
    }
}

/// Stderr diagnostic logger with level filtering
pub struct Logger {
    min_level: LogLevel,
    use_colors: bool,
    run_id: Uuid,
}

impl Logger {
    /// Create a logger. The default threshold is Warn; `verbose` lowers it to
    /// Info and `debug` to Debug.
    pub fn new(verbose: bool, debug: bool, use_colors: bool) -> Self {
        let min_level = if debug {
            LogLevel::Debug
        } else if verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };
        Self {
            min_level,
            use_colors,
            run_id: Uuid::new_v4(),
        }
    }

    /// Correlation id for this run
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Whether messages at this level pass the threshold
    pub fn level_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    fn log(&self, level: LogLevel, message: &str) {
        if !self.level_enabled(level) {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        let id = self.run_id.to_string();
        let short_id = &id[..8];

        if self.use_colors {
            let tag = match level {
                LogLevel::Debug => level.as_str().dimmed(),
                LogLevel::Info => level.as_str().green(),
                LogLevel::Warn => level.as_str().yellow().bold(),
                LogLevel::Error => level.as_str().red().bold(),
            };
            eprintln!("{} [{}] {} {}", timestamp, short_id, tag, message);
        } else {
            eprintln!("{} [{}] {} {}", timestamp, short_id, level.as_str(), message);
        }
    }
}
