//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::Result,
    models::{RunConfig, RunDuration},
};

/// Which configuration pieces still need an interactive prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptPlan {
    /// Server host/port were neither given on the CLI nor via environment
    pub server: bool,
    /// Interval was neither given on the CLI nor via environment
    pub interval: bool,
    /// Neither --duration nor --continuous was given
    pub duration: bool,
    /// Start confirmation was not skipped with --yes
    pub confirm: bool,
}

impl PromptPlan {
    /// True when no prompt is required at all
    pub fn is_noninteractive(&self) -> bool {
        !self.server && !self.interval && !self.duration && !self.confirm
    }
}

/// Configuration parser combining defaults, environment, and CLI overrides.
///
/// Precedence, lowest to highest: built-in defaults, `.env` file /
/// environment variables, command-line arguments. Whatever remains
/// unspecified after that is collected interactively per the returned
/// [`PromptPlan`].
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the configuration plus the outstanding prompt plan
    pub fn parse(&self) -> Result<(RunConfig, PromptPlan)> {
        let mut config = RunConfig::default();

        EnvManager::load_env_file(self.cli.debug)?;
        config.merge_from_env()?;

        let env_server = std::env::var("ISM_SERVER").is_ok();
        let env_interval = std::env::var("ISM_INTERVAL_SECONDS").is_ok();

        self.apply_cli_overrides(&mut config);

        let plan = PromptPlan {
            server: self.cli.server.is_none() && !env_server,
            interval: self.cli.interval.is_none() && !env_interval,
            duration: self.cli.duration.is_none() && !self.cli.continuous,
            confirm: !self.cli.yes,
        };

        Ok((config, plan))
    }

    fn apply_cli_overrides(&self, config: &mut RunConfig) {
        if let Some(ref server) = self.cli.server {
            config.server = server.clone();
        }
        if let Some(port) = self.cli.port {
            config.port = port;
        }
        if let Some(interval) = self.cli.interval {
            config.interval_seconds = interval;
        }
        if let Some(duration) = self.cli.duration {
            config.duration = RunDuration::Fixed { secs: duration };
        }
        if self.cli.continuous {
            config.duration = RunDuration::Continuous;
        }
        if let Some(timeout) = self.cli.timeout {
            config.timeout_seconds = timeout;
        }
        if let Some(test_length) = self.cli.test_length {
            config.test_length_seconds = test_length;
        }
        if let Some(ref log_file) = self.cli.log_file {
            config.log_file = log_file.clone();
        }
        if let Some(ref report_file) = self.cli.report_file {
            config.report_file = report_file.clone();
        }
        if let Some(report_every) = self.cli.report_every {
            config.report_every = report_every;
        }

        config.enable_color = self.cli.use_colors();
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;

        if config.debug {
            println!(
                "Applied CLI overrides: server={}, interval={}s, duration={}",
                config.server_id(),
                config.interval_seconds,
                config.duration.describe()
            );
        }
    }
}

/// Convenience function to load configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<(RunConfig, PromptPlan)> {
    ConfigParser::new(cli).parse()
}
