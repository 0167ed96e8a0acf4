//! Configuration management module

pub mod env;
pub mod interactive;
pub mod parser;

pub use env::EnvManager;
pub use interactive::InteractiveSetup;
pub use parser::{load_config, ConfigParser, PromptPlan};

// Re-export from models for convenience
pub use crate::models::{RunConfig, RunDuration};
