//! Main application orchestration

use crate::{
    cli::Cli,
    config::{load_config, EnvManager, InteractiveSetup},
    error::{AppError, Result},
    logging::Logger,
    output::Console,
    report::Aggregator,
    runner::IperfRunner,
    scheduler::Scheduler,
};

/// Application entry point coordinating all components
pub struct App {
    cli: Cli,
}

impl App {
    /// Create a new application instance with CLI configuration
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the application end to end
    pub async fn run(self) -> Result<()> {
        self.cli.validate().map_err(AppError::validation)?;

        if self.cli.create_env {
            let path = std::path::Path::new(".env.example");
            EnvManager::save_example_env_file(path)?;
            println!("Wrote {}", path.display());
            return Ok(());
        }

        let (mut config, plan) = load_config(self.cli)?;
        let console = Console::new(config.enable_color);

        if !plan.is_noninteractive() {
            let setup = InteractiveSetup::new(config.enable_color);
            if !setup.complete(&mut config, &plan)? {
                console.info("Cancelled.");
                return Ok(());
            }
        }

        config.validate()?;
        for warning in config.warnings() {
            console.warning(&warning);
        }

        // Fatal startup probe, before the loop ever enters Running
        IperfRunner::check_installed().await?;

        let logger = Logger::new(config.verbose, config.debug, config.enable_color);
        if config.debug {
            logger.debug(&format!("Run id {}", logger.run_id()));
        }

        console.banner(&config);

        let runner = IperfRunner::new(&config);
        let mut aggregator = Aggregator::new(&config);
        let report_path = config.report_file.clone();
        let mut scheduler = Scheduler::new(config, runner);

        let stats = scheduler.run(&mut aggregator, &console, &logger).await?;

        if scheduler.was_interrupted() {
            console.info("Stopped by operator.");
        }
        console.final_summary(&stats, &report_path);

        Ok(())
    }
}
