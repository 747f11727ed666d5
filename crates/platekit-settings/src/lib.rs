//! # PlateKit Settings
//!
//! Configuration management for PlateKit. Loads and saves the machine
//! description and the user's queue behavior flags from JSON or TOML
//! files in a platform-specific directory, validating everything before
//! a placement engine is ever constructed from it.

pub mod config;
pub mod error;

pub use config::{
    AxisRange, Config, MachineSettings, MaterialCondition, QueueSettings, DEFAULT_PADDING,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
