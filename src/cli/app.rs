//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::settings::CalendarArgs;
use super::{holidays, layout};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "yearcal")]
#[command(author, version, about = "Twelve-month calendar layout with holiday overlays")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (default: global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project config file (default: ./yearcal.toml if present)
    #[arg(long, short = 'c', global = true, env = "YEARCAL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default yearcal.toml
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Print the Easter date for a year
    Easter {
        year: i32,

        /// Orthodox Easter (Julian computus, shown as a Gregorian date)
        #[arg(long)]
        orthodox: bool,
    },

    /// List the holidays that fall inside the calendar window
    Holidays {
        /// Holiday rule file (default: from config)
        file: Option<PathBuf>,

        #[command(flatten)]
        calendar: CalendarArgs,
    },

    /// Print the legend lines and the rows they reserve
    Legend {
        /// Holiday rule file (default: from config)
        file: Option<PathBuf>,

        #[command(flatten)]
        calendar: CalendarArgs,
    },

    /// Lay out the calendar page
    Layout {
        /// Holiday rule file (default: from config)
        #[arg(long)]
        holidays: Option<PathBuf>,

        #[command(flatten)]
        calendar: CalendarArgs,

        /// Leave out the holiday legend
        #[arg(long)]
        no_legend: bool,

        /// Add image placeholder frames in the offset areas
        #[arg(long)]
        image_frames: bool,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let format = cli
        .format
        .unwrap_or_else(|| config.global.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("yearcal starting");
    match &config.project_dir {
        Some(dir) => output.verbose_ctx("config", &format!("Project config in {}", dir.display())),
        None => output.verbose_ctx("config", "No project config, using defaults"),
    }

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing at: {}", path.display()));
            let (config_path, created) = Config::init_project(&path)?;
            if created {
                output.success(&format!("Created {}", config_path.display()));
            } else {
                output.success(&format!("{} already exists", config_path.display()));
            }
        }

        Commands::Easter { year, orthodox } => holidays::easter(&output, year, orthodox)?,

        Commands::Holidays { file, calendar } => {
            holidays::list(&output, &config, file.as_deref(), &calendar)?
        }

        Commands::Legend { file, calendar } => {
            holidays::legend(&output, &config, file.as_deref(), &calendar)?
        }

        Commands::Layout {
            holidays: file,
            calendar,
            no_legend,
            image_frames,
        } => {
            let options = layout::LayoutOptions {
                no_legend,
                image_frames,
            };
            layout::run(&output, &config, file.as_deref(), &calendar, options)?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}
