//! Data models for configuration and test records

pub mod config;
pub mod record;

pub use config::{RunConfig, RunDuration};
pub use record::{TestOutcome, TestRecord};
