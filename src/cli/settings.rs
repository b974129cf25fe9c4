//! Merging command-line flags over configuration, and loading holidays

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use super::output::Output;
use crate::domain::{resolve, FirstWeekday, HolidayInstance, ParseReport};
use crate::storage::{CalendarConfig, Config, HolidayFile};

/// Calendar flags shared by the layout-related commands
#[derive(Args, Debug, Clone, Default)]
pub struct CalendarArgs {
    /// Calendar year (default: config, then current year)
    #[arg(long, short = 'y')]
    pub year: Option<i32>,

    /// First displayed month, 1-12
    #[arg(long, short = 's')]
    pub start_month: Option<u32>,

    /// Months per grid row, 1-12
    #[arg(long, short = 'm')]
    pub months_per_row: Option<u32>,

    /// First day of the week (monday or sunday)
    #[arg(long)]
    pub first_weekday: Option<FirstWeekday>,

    /// Hide ISO week numbers
    #[arg(long)]
    pub no_week_numbers: bool,
}

impl CalendarArgs {
    /// Applies these flags over the configured calendar settings
    pub fn merge(&self, config: &CalendarConfig) -> CalendarConfig {
        let mut merged = config.clone();
        if let Some(year) = self.year {
            merged.year = Some(year);
        }
        if let Some(start_month) = self.start_month {
            merged.start_month = start_month;
        }
        if let Some(months_per_row) = self.months_per_row {
            merged.months_per_row = months_per_row;
        }
        if let Some(first_weekday) = self.first_weekday {
            merged.first_weekday = first_weekday.into();
        }
        if self.no_week_numbers {
            merged.week_numbers = false;
        }
        merged
    }
}

/// A warning about a rule that was skipped
#[derive(Debug, Clone, Serialize)]
pub struct Warning {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub message: String,
}

/// Resolved holidays plus every skip reported on the way
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadedHolidays {
    pub holidays: Vec<HolidayInstance>,
    pub warnings: Vec<Warning>,
}

/// Picks the holiday file from the flag, falling back to config
pub fn holidays_path(flag: Option<&Path>, config: &Config) -> Option<PathBuf> {
    flag.map(Path::to_path_buf).or_else(|| config.holidays_path())
}

/// Reads, parses and resolves a holiday file for the calendar window
///
/// Without a file the calendar simply has no holidays. Rejected records and
/// skipped instances become warnings, printed to stderr in text mode.
pub fn load_holidays(
    path: Option<&Path>,
    year: i32,
    start_month: u32,
    output: &Output,
) -> Result<LoadedHolidays> {
    let Some(path) = path else {
        output.verbose_ctx("holidays", "No holiday file configured");
        return Ok(LoadedHolidays::default());
    };

    output.verbose_ctx("holidays", &format!("Reading {}", path.display()));
    let records = HolidayFile::load(path)
        .with_context(|| format!("Failed to load holidays from {}", path.display()))?;
    output.verbose_ctx("holidays", &format!("Read {} records", records.len()));

    let report = ParseReport::from_records(&records);
    let resolution = resolve(&report.rules, year, start_month);
    output.verbose_ctx(
        "holidays",
        &format!(
            "Parsed {} rules into {} holidays for {}/{:02}",
            report.rules.len(),
            resolution.holidays.len(),
            year,
            start_month
        ),
    );

    let mut warnings: Vec<Warning> = report
        .rejected
        .iter()
        .map(|r| Warning {
            line: Some(r.line),
            message: r.reason.clone(),
        })
        .collect();
    warnings.extend(resolution.skipped.iter().map(|s| Warning {
        line: None,
        message: format!("'{}' skipped for {}: {}", s.label, s.year, s.reason),
    }));

    for warning in &warnings {
        match warning.line {
            Some(line) => output.warning(&format!("line {}: {}", line, warning.message)),
            None => output.warning(&warning.message),
        }
    }
    if !warnings.is_empty() {
        output.warning(&format!("{} rule(s) skipped", warnings.len()));
    }

    Ok(LoadedHolidays {
        holidays: resolution.holidays,
        warnings,
    })
}
