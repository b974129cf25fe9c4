//! Holiday commands (easter, holidays, legend)

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Datelike;

use super::output::Output;
use super::settings::{holidays_path, load_holidays, CalendarArgs};
use crate::domain::{
    easter as easter_date, easter_orthodox, labelled_count, CalendarPage, EasterBase, PageOptions,
};
use crate::storage::Config;

/// Print the Easter date for a year
pub fn easter(output: &Output, year: i32, orthodox: bool) -> Result<()> {
    let base = if orthodox {
        EasterBase::EasterJulian
    } else {
        EasterBase::Easter
    };
    output.verbose_ctx("easter", &format!("Computing {} for {}", base, year));

    let date = if orthodox {
        easter_orthodox(year)
    } else {
        easter_date(year)
    }
    .with_context(|| format!("Cannot compute {} for {}", base, year))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "year": year,
            "base": base.to_string(),
            "date": date,
        }));
    } else {
        println!("{} ({})", date.format("%Y-%m-%d"), date.weekday());
    }

    Ok(())
}

/// List resolved holidays in calendar order
pub fn list(
    output: &Output,
    config: &Config,
    file: Option<&Path>,
    args: &CalendarArgs,
) -> Result<()> {
    let spec = args.merge(&config.project.calendar).to_spec()?;
    let path = holidays_path(file, config);
    let loaded = load_holidays(path.as_deref(), spec.year(), spec.start_month(), output)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "year": spec.year(),
            "start_month": spec.start_month(),
            "holidays": loaded.holidays,
            "warnings": loaded.warnings,
        }));
        return Ok(());
    }

    if loaded.holidays.is_empty() {
        println!("No holidays in the calendar window.");
        return Ok(());
    }

    let (last_year, last_month) = spec.window().month_at(11);
    println!(
        "Holidays {}-{:02} to {}-{:02} ({}):",
        spec.year(),
        spec.start_month(),
        last_year,
        last_month,
        loaded.holidays.len()
    );
    println!("{:<12}{:<10}LABEL", "DATE", "CATEGORY");
    println!("{}", "-".repeat(50));
    for holiday in &loaded.holidays {
        println!(
            "{:<12}{:<10}{}",
            holiday.date.format("%Y-%m-%d").to_string(),
            holiday.category.as_str(),
            holiday.label
        );
    }

    Ok(())
}

/// Print the legend lines and where the legend frame lands on the page
pub fn legend(
    output: &Output,
    config: &Config,
    file: Option<&Path>,
    args: &CalendarArgs,
) -> Result<()> {
    let calendar = args.merge(&config.project.calendar);
    let spec = calendar.to_spec()?;
    let page = config.project.page.to_geometry()?;
    let path = holidays_path(file, config);
    let loaded = load_holidays(path.as_deref(), spec.year(), spec.start_month(), output)?;

    output.verbose_ctx(
        "legend",
        &format!(
            "{} labelled of {} holidays",
            labelled_count(&loaded.holidays),
            loaded.holidays.len()
        ),
    );
    let options = PageOptions {
        legend: true,
        image_frames: false,
        ..calendar.page_options()
    };
    let composed = CalendarPage::compose(&spec, &loaded.holidays, &page, &options);
    let Some(legend) = composed.legend else {
        anyhow::bail!("Legend was not laid out");
    };

    if output.is_json() {
        output.data(&serde_json::json!({
            "legend": legend,
            "warnings": loaded.warnings,
        }));
        return Ok(());
    }

    for line in &legend.lines {
        println!("{}", line);
    }
    if !legend.lines.is_empty() {
        println!();
    }
    println!(
        "{} line(s) in {} column(s), {:.1} extra rows",
        legend.lines.len(),
        legend.column_count,
        legend.extra_rows
    );
    println!(
        "Frame at {:.1},{:.1} size {:.1}x{:.1} pt, from row {}, line spacing {:.2} pt",
        legend.frame.x,
        legend.frame.y,
        legend.frame.width,
        legend.frame.height,
        legend.origin_row,
        legend.line_spacing
    );

    Ok(())
}
