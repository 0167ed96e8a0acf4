//! Interactive configuration prompts
//!
//! Collects whatever the CLI and environment left unspecified: server
//! selection from a preset list or custom host/port, interval and duration
//! presets, and the final start confirmation. Uses the dialoguer crate when
//! the feature is enabled, with a plain stdio fallback otherwise.

use crate::{
    defaults::PRESET_SERVERS,
    error::{AppError, Result},
    models::{RunConfig, RunDuration},
};
use colored::Colorize;
use std::io::{self, Write};

use super::parser::PromptPlan;

/// Interval menu presets, in seconds
const INTERVAL_PRESETS: [(u64, &str); 3] = [
    (60, "Every 1 minute"),
    (300, "Every 5 minutes (recommended)"),
    (600, "Every 10 minutes"),
];

/// Duration menu presets
const DURATION_PRESETS: [(RunDuration, &str); 3] = [
    (RunDuration::Fixed { secs: 1800 }, "30 minutes"),
    (RunDuration::Fixed { secs: 7200 }, "2 hours"),
    (RunDuration::Continuous, "Continuous (until Ctrl+C)"),
];

/// Interactive setup flow for one run
pub struct InteractiveSetup {
    use_colors: bool,
    use_enhanced: bool,
}

impl InteractiveSetup {
    /// Create the setup flow
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            use_enhanced: cfg!(feature = "dialoguer"),
        }
    }

    /// Fill the configuration per the prompt plan. Returns `false` when the
    /// operator declines the start confirmation.
    pub fn complete(&self, config: &mut RunConfig, plan: &PromptPlan) -> Result<bool> {
        if plan.server {
            let (server, port) = self.choose_server()?;
            config.server = server;
            config.port = port;
        }

        if plan.interval {
            config.interval_seconds = self.choose_interval()?;
        }

        if plan.duration {
            config.duration = self.choose_duration()?;
        }

        if plan.confirm {
            self.print_summary(config);
            return self.confirm_start();
        }

        Ok(true)
    }

    /// Server selection from presets or custom host/port
    pub fn choose_server(&self) -> Result<(String, u16)> {
        self.print_header("iperf3 Server Selection");
        let labels = server_menu_labels();
        let custom = labels.len();

        let choice = self.select("Choose option", &labels)?;
        if choice < custom {
            let (host, port, _) = PRESET_SERVERS[choice - 1];
            return Ok((host.to_string(), port));
        }

        let server = self.read_nonempty("Enter iperf3 server address")?;
        let port = loop {
            let input = self.read_line("Enter port (default 5201)")?;
            let trimmed = input.trim();
            if trimmed.is_empty() {
                break crate::defaults::DEFAULT_PORT;
            }
            match trimmed.parse::<u16>() {
                Ok(port) if port > 0 => break port,
                _ => self.print_error("Port must be between 1 and 65535"),
            }
        };

        Ok((server, port))
    }

    /// Interval selection from presets or a custom value in minutes
    pub fn choose_interval(&self) -> Result<u64> {
        self.print_header("Test Interval Selection");
        let labels = interval_menu_labels();
        let custom = labels.len();

        let choice = self.select("Choose option", &labels)?;
        if choice < custom {
            return Ok(INTERVAL_PRESETS[choice - 1].0);
        }

        loop {
            let input = self.read_line("Enter interval in minutes")?;
            match input.trim().parse::<f64>() {
                Ok(minutes) if minutes > 0.0 => return Ok((minutes * 60.0) as u64),
                _ => self.print_error("Interval must be a number greater than 0"),
            }
        }
    }

    /// Duration selection from presets, continuous, or a custom minute value
    pub fn choose_duration(&self) -> Result<RunDuration> {
        self.print_header("Run Duration Selection");
        let labels = duration_menu_labels();
        let custom = labels.len();

        let choice = self.select("Choose option", &labels)?;
        if choice < custom {
            return Ok(DURATION_PRESETS[choice - 1].0);
        }

        loop {
            let input = self.read_line("Enter duration in minutes")?;
            match input.trim().parse::<f64>() {
                Ok(minutes) if minutes > 0.0 => {
                    return Ok(RunDuration::Fixed {
                        secs: (minutes * 60.0) as u64,
                    })
                }
                _ => self.print_error("Duration must be a number greater than 0"),
            }
        }
    }

    /// Final yes/no confirmation before entering the run loop
    pub fn confirm_start(&self) -> Result<bool> {
        let input = self.read_line("Start testing? (y/N)")?;
        Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    fn print_summary(&self, config: &RunConfig) {
        println!();
        if self.use_colors {
            println!("{}", "Configuration:".bold());
        } else {
            println!("Configuration:");
        }
        println!("  Server:   {}", config.server_id());
        println!("  Interval: {}s", config.interval_seconds);
        println!("  Duration: {}", config.duration.describe());
        println!();
    }

    /// Get a 1-based menu selection using the appropriate input method.
    ///
    /// The numbered list is printed only on the stdio path; dialoguer renders
    /// the items itself.
    fn select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        if self.use_enhanced {
            self.select_enhanced(prompt, items)
        } else {
            for (i, item) in items.iter().enumerate() {
                println!("  {}) {}", i + 1, item);
            }
            self.select_basic(prompt, items.len())
        }
    }

    #[cfg(feature = "dialoguer")]
    fn select_enhanced(&self, prompt: &str, items: &[String]) -> Result<usize> {
        use dialoguer::Select;

        let selection = Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map_err(|e| AppError::prompt(format!("Selection failed: {}", e)))?;
        Ok(selection + 1)
    }

    #[cfg(not(feature = "dialoguer"))]
    fn select_enhanced(&self, prompt: &str, items: &[String]) -> Result<usize> {
        self.select_basic(prompt, items.len())
    }

    fn select_basic(&self, prompt: &str, max_options: usize) -> Result<usize> {
        loop {
            let input = self.read_line(&format!("{} (1-{})", prompt, max_options))?;
            if let Ok(choice) = input.trim().parse::<usize>() {
                if (1..=max_options).contains(&choice) {
                    return Ok(choice);
                }
            }
            self.print_error(&format!("Please enter a number between 1 and {}", max_options));
        }
    }

    fn read_nonempty(&self, prompt: &str) -> Result<String> {
        loop {
            let input = self.read_line(prompt)?;
            let trimmed = input.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
            self.print_error("Value cannot be empty");
        }
    }

    fn read_line(&self, prompt: &str) -> Result<String> {
        print!("{}: ", prompt);
        io::stdout()
            .flush()
            .map_err(|e| AppError::prompt(format!("Failed to flush stdout: {}", e)))?;

        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .map_err(|e| AppError::prompt(format!("Failed to read input: {}", e)))?;

        if input.is_empty() {
            // EOF on stdin; interactive setup cannot continue
            return Err(AppError::prompt(
                "Standard input closed; supply --server and --interval instead",
            ));
        }

        Ok(input)
    }

    fn print_header(&self, title: &str) {
        if self.use_colors {
            println!("\n{}", title.cyan().bold());
        } else {
            println!("\n{}", title);
        }
        println!("{}", "=".repeat(30));
    }

    fn print_error(&self, message: &str) {
        if self.use_colors {
            eprintln!("{} {}", "[ERROR]".red().bold(), message);
        } else {
            eprintln!("[ERROR] {}", message);
        }
    }
}

/// Server menu entries: one per preset, plus the custom-entry option last
fn server_menu_labels() -> Vec<String> {
    PRESET_SERVERS
        .iter()
        .map(|(host, port, label)| format!("{} ({}) - port {}", host, label, port))
        .chain(std::iter::once("Enter custom server".to_string()))
        .collect()
}

fn interval_menu_labels() -> Vec<String> {
    INTERVAL_PRESETS
        .iter()
        .map(|(_, label)| label.to_string())
        .chain(std::iter::once("Custom interval".to_string()))
        .collect()
}

fn duration_menu_labels() -> Vec<String> {
    DURATION_PRESETS
        .iter()
        .map(|(_, label)| label.to_string())
        .chain(std::iter::once("Custom duration".to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_tables_are_sane() {
        assert!(!PRESET_SERVERS.is_empty());
        for (host, port, _) in PRESET_SERVERS {
            assert!(!host.is_empty());
            assert!(*port > 0);
        }
        for (secs, _) in INTERVAL_PRESETS {
            assert!(secs > 0);
        }
    }

    #[test]
    fn test_duration_presets_include_continuous() {
        assert!(DURATION_PRESETS
            .iter()
            .any(|(d, _)| *d == RunDuration::Continuous));
    }

    #[test]
    fn test_menu_labels_end_with_custom_entry() {
        // Both input paths render from the same single label list
        let servers = server_menu_labels();
        assert_eq!(servers.len(), PRESET_SERVERS.len() + 1);
        assert_eq!(servers.last().unwrap(), "Enter custom server");
        assert!(servers[0].contains(PRESET_SERVERS[0].0));

        let intervals = interval_menu_labels();
        assert_eq!(intervals.len(), INTERVAL_PRESETS.len() + 1);
        assert_eq!(intervals.last().unwrap(), "Custom interval");

        let durations = duration_menu_labels();
        assert_eq!(durations.len(), DURATION_PRESETS.len() + 1);
        assert_eq!(durations.last().unwrap(), "Custom duration");
    }
}
