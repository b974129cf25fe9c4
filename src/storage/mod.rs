//! # Storage Layer
//!
//! File access for yearcal: holiday rule files and configuration.
//!
//! ## File Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Holiday rules | Comma separated, one rule per line | any path, or `holidays` in config |
//! | Project config | TOML | `./yearcal.toml` or `--config` |
//! | Global config | TOML | `~/.config/yearcal/config.toml` |
//!
//! ## Key Types
//!
//! - [`HolidayFile`] - Reads rule files into tokenized records
//! - [`Config`] - Project and global configuration

mod config;
mod holidays;

pub use config::{
    CalendarConfig, Config, ConfigError, GlobalConfig, OutputFormat, PageConfig, ProjectConfig,
    WeekStart, PROJECT_CONFIG_FILE,
};
pub use holidays::{HolidayFile, HolidayFileError};
