//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose | Example |
//! |---------|---------|---------|
//! | `init` | Write a default `yearcal.toml` | `yearcal init` |
//! | `easter` | Easter date for one year | `yearcal easter 2025 --orthodox` |
//! | `holidays` | Resolved holidays in the window | `yearcal holidays be.txt -s 9` |
//! | `legend` | Legend lines and reserved rows | `yearcal legend be.txt` |
//! | `layout` | Full page layout | `yearcal layout --holidays be.txt` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! The default can be changed with `default_format` in the global config.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! yearcal --verbose layout
//! ```
//!
//! Skipped holiday rules are reported as `Warning: line N: ...` on stderr
//! and never change the exit code.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod settings;
mod holidays;
mod layout;

pub use app::{Cli, Commands, run};
pub use layout::render_text;
pub use output::{Output, OutputFormat};
pub use settings::{CalendarArgs, LoadedHolidays, Warning};
