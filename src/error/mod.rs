//! Error handling for the iperf speed monitor

use thiserror::Error;

/// Custom error types for the speed test monitor
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Startup errors (measurement tool missing, environment broken)
    #[error("Startup error: {0}")]
    Startup(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors (log file, report file)
    #[error("I/O error: {0}")]
    Io(String),

    /// Parsing errors (iperf3 output, durations)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Interactive prompt errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new startup error
    pub fn startup<S: Into<String>>(message: S) -> Self {
        Self::Startup(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new prompt error
    pub fn prompt<S: Into<String>>(message: S) -> Self {
        Self::Prompt(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Startup(_) => "STARTUP",
            Self::Validation(_) => "VALIDATION",
            Self::Io(_) => "IO",
            Self::Parse(_) => "PARSE",
            Self::Prompt(_) => "PROMPT",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Errors that must abort before the scheduler loop begins.
    ///
    /// Everything else is captured at the tick boundary and converted into a
    /// recorded result or a warning.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Startup(_) | Self::Validation(_) | Self::Prompt(_)
        )
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1,
            Self::Startup(_) => 2,
            Self::Io(_) => 4,
            Self::Prompt(_) => 5,
            Self::Internal(_) => 10,
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Config(msg) => {
                format!("Configuration problem: {}\n\nSuggestion: Check your .env file or command line arguments.", msg)
            }
            Self::Startup(msg) => {
                format!("Startup failed: {}\n\nSuggestion: Verify that iperf3 is installed and on your PATH.", msg)
            }
            Self::Validation(msg) => {
                format!("Invalid input: {}\n\nSuggestion: Check the server address, port, interval, and duration values.", msg)
            }
            Self::Io(msg) => {
                format!("File operation failed: {}\n\nSuggestion: Check file permissions and disk space.", msg)
            }
            Self::Parse(msg) => {
                format!("Failed to parse data: {}\n\nSuggestion: The iperf3 output format may have changed; try upgrading iperf3.", msg)
            }
            Self::Prompt(msg) => {
                format!("Interactive prompt failed: {}\n\nSuggestion: Supply --server and --interval on the command line instead.", msg)
            }
            Self::Internal(msg) => {
                format!("Internal error: {}\n\nThis is likely a bug. Please report this issue with the error details.", msg)
            }
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias using our custom error
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(AppError::config("bad").category(), "CONFIG");
        assert_eq!(AppError::startup("missing").category(), "STARTUP");
        assert_eq!(AppError::io("denied").category(), "IO");
        assert_eq!(AppError::prompt("eof").category(), "PROMPT");
    }

    #[test]
    fn test_user_friendly_messages_carry_suggestions() {
        let msg = AppError::validation("Port must be between 1 and 65535").user_friendly_message();
        assert!(msg.contains("Port must be between 1 and 65535"));
        assert!(msg.contains("Suggestion:"));

        let msg = AppError::startup("iperf3 is not installed").user_friendly_message();
        assert!(msg.contains("iperf3 is not installed"));
        assert!(msg.contains("PATH"));
    }

    #[test]
    fn test_fatal_classification() {
        assert!(AppError::startup("iperf3 not found").is_fatal());
        assert!(AppError::config("no server").is_fatal());
        assert!(!AppError::io("disk full").is_fatal());
        assert!(!AppError::parse("bad json").is_fatal());
    }

    #[test]
    fn test_exit_codes_nonzero() {
        let errors = [
            AppError::config("a"),
            AppError::startup("b"),
            AppError::io("c"),
            AppError::internal("d"),
        ];
        for err in &errors {
            assert!(err.exit_code() != 0);
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let app_err: AppError = io_err.into();
        assert_eq!(app_err.category(), "IO");
    }
}
