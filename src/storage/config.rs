//! Configuration handling for yearcal
//!
//! Configuration is stored in `yearcal.toml` (project, current directory or
//! `--config`) and `~/.config/yearcal/config.toml` (global).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{CalendarSpec, FirstWeekday, Margins, PageGeometry, PageOptions};

/// Project config file name, looked up in the current directory
pub const PROJECT_CONFIG_FILE: &str = "yearcal.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Week start as written in config files
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl From<WeekStart> for FirstWeekday {
    fn from(value: WeekStart) -> Self {
        match value {
            WeekStart::Monday => FirstWeekday::Monday,
            WeekStart::Sunday => FirstWeekday::Sunday,
        }
    }
}

impl From<FirstWeekday> for WeekStart {
    fn from(value: FirstWeekday) -> Self {
        match value {
            FirstWeekday::Monday => WeekStart::Monday,
            FirstWeekday::Sunday => WeekStart::Sunday,
        }
    }
}

/// Calendar settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CalendarConfig {
    /// Calendar year (defaults to the current year)
    pub year: Option<i32>,

    /// First displayed month, 1-12
    pub start_month: u32,

    /// Months side by side in one row of the grid
    pub months_per_row: u32,

    pub first_weekday: WeekStart,

    /// Show ISO week numbers in front of every week
    pub week_numbers: bool,

    /// Heading text above the week-number column
    pub week_number_heading: String,

    /// Add the holiday legend below the grid
    pub legend: bool,

    /// Add image placeholder frames in the offset areas
    pub image_frames: bool,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            year: None,
            start_month: 1,
            months_per_row: 3,
            first_weekday: WeekStart::Monday,
            week_numbers: true,
            week_number_heading: "Wk".to_string(),
            legend: true,
            image_frames: false,
        }
    }
}

impl CalendarConfig {
    /// Configured year, or the current one
    pub fn effective_year(&self) -> i32 {
        self.year.unwrap_or_else(|| Local::now().year())
    }

    /// Validates these settings into a calendar spec
    pub fn to_spec(&self) -> Result<CalendarSpec> {
        CalendarSpec::new(
            self.effective_year(),
            self.start_month,
            self.months_per_row,
            self.first_weekday.into(),
            self.week_numbers,
        )
        .map_err(|e| ConfigError::Invalid(e.to_string()).into())
    }

    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            legend: self.legend,
            image_frames: self.image_frames,
            week_number_heading: self.week_number_heading.clone(),
        }
    }
}

/// Page settings in points
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,

    /// Space reserved left of the grid
    pub offset_x: f64,

    /// Space reserved above the grid
    pub offset_y: f64,

    /// Gap between a left image frame and the grid
    pub inner_margin_x: f64,

    /// Gap between a top image frame and the grid
    pub inner_margin_y: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        // A4 portrait
        Self {
            width: 595.0,
            height: 842.0,
            margin_top: 40.0,
            margin_left: 40.0,
            margin_right: 40.0,
            margin_bottom: 40.0,
            offset_x: 0.0,
            offset_y: 0.0,
            inner_margin_x: 0.0,
            inner_margin_y: 0.0,
        }
    }
}

impl PageConfig {
    /// Validates these settings into a page geometry
    pub fn to_geometry(&self) -> Result<PageGeometry> {
        let margins = Margins {
            top: self.margin_top,
            left: self.margin_left,
            right: self.margin_right,
            bottom: self.margin_bottom,
        };
        PageGeometry::new(self.width, self.height, margins)
            .and_then(|page| {
                page.with_offsets(
                    self.offset_x,
                    self.offset_y,
                    self.inner_margin_x,
                    self.inner_margin_y,
                )
            })
            .map_err(|e| ConfigError::Invalid(e.to_string()).into())
    }
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Holiday rule file, relative to the config file
    pub holidays: Option<PathBuf>,

    pub calendar: CalendarConfig,

    pub page: PageConfig,
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    /// Directory of the project config file, if one was found
    pub project_dir: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from `path`, or from the default locations
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let global = Self::load_global()?;

        let project_path = match path {
            Some(p) => {
                if !p.is_file() {
                    anyhow::bail!("Config file not found: {}", p.display());
                }
                Some(p.to_path_buf())
            }
            None => std::env::current_dir()
                .ok()
                .map(|dir| dir.join(PROJECT_CONFIG_FILE))
                .filter(|p| p.is_file()),
        };

        let (project, project_dir) = match project_path {
            Some(p) => (
                Self::load_project_config(&p)?,
                p.parent().map(Path::to_path_buf),
            ),
            None => (ProjectConfig::default(), None),
        };

        Ok(Self {
            project,
            global,
            project_dir,
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "yearcal", "yearcal").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Loads a project configuration file
    fn load_project_config(config_path: &Path) -> Result<ProjectConfig> {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse project config: {}", config_path.display()))
    }

    /// The configured holiday file, resolved against the config directory
    pub fn holidays_path(&self) -> Option<PathBuf> {
        let path = self.project.holidays.as_ref()?;
        match &self.project_dir {
            Some(dir) if path.is_relative() => Some(dir.join(path)),
            _ => Some(path.clone()),
        }
    }

    /// Writes a default project config into `dir`
    ///
    /// Returns the path and whether a new file was written; an existing
    /// file is left untouched.
    pub fn init_project(dir: &Path) -> Result<(PathBuf, bool)> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

        let config_path = dir.join(PROJECT_CONFIG_FILE);
        if config_path.exists() {
            return Ok((config_path, false));
        }

        let content = toml::to_string_pretty(&ProjectConfig::default())
            .context("Failed to serialize project config")?;
        let content = format!(
            "# yearcal configuration\n\
             # Set `holidays = \"holidays.txt\"` to overlay a holiday rule file.\n\n{}",
            content
        );

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write project config: {}", config_path.display()))?;
        Ok((config_path, true))
    }
}
