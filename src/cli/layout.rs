//! Layout command: compose the page and print a preview or the frame list

use std::path::Path;

use anyhow::Result;
use chrono::Datelike;

use super::output::Output;
use super::settings::{holidays_path, load_holidays, CalendarArgs};
use crate::domain::{CalendarPage, Classification, DayCell, MonthCell};
use crate::storage::Config;

/// Width of one cell in the text preview
const CELL_WIDTH: usize = 3;

/// Flags that only apply to the layout command
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutOptions {
    pub no_legend: bool,
    pub image_frames: bool,
}

/// Lay out the calendar page
pub fn run(
    output: &Output,
    config: &Config,
    holidays: Option<&Path>,
    args: &CalendarArgs,
    options: LayoutOptions,
) -> Result<()> {
    let calendar = args.merge(&config.project.calendar);
    let spec = calendar.to_spec()?;
    let page = config.project.page.to_geometry()?;

    let mut page_options = calendar.page_options();
    if options.no_legend {
        page_options.legend = false;
    }
    if options.image_frames {
        page_options.image_frames = true;
    }

    let path = holidays_path(holidays, config);
    let loaded = load_holidays(path.as_deref(), spec.year(), spec.start_month(), output)?;

    let composed = CalendarPage::compose(&spec, &loaded.holidays, &page, &page_options);
    let frames = composed.frames();
    output.verbose_ctx(
        "layout",
        &format!(
            "{} columns x {:.1} rows, cell {:.2} x {:.2} pt, {} frames",
            composed.grid.cols(),
            composed.grid.rows(),
            composed.grid.metrics.cell_width,
            composed.grid.metrics.cell_height,
            frames.len()
        ),
    );

    if output.is_json() {
        output.data(&serde_json::json!({
            "spec": composed.grid.spec,
            "metrics": composed.grid.metrics,
            "months": composed.grid.months,
            "legend": composed.legend,
            "images": composed.images,
            "frames": frames,
            "warnings": loaded.warnings,
        }));
    } else {
        print!("{}", render_text(&composed));
    }

    Ok(())
}

/// Renders a plain-text preview of the page
///
/// Months are placed side by side as on the page. Holidays are marked `*`,
/// special dates `+` and vacation days `~`.
pub fn render_text(page: &CalendarPage) -> String {
    let spec = &page.grid.spec;
    let metrics = &page.grid.metrics;
    let mut out = String::new();

    out.push_str(&format!(
        "{} columns x {:.1} rows, cell {:.1} x {:.1} pt\n\n",
        metrics.cols, metrics.rows, metrics.cell_width, metrics.cell_height
    ));

    for band in page.grid.months.chunks(spec.months_per_row() as usize) {
        let blocks: Vec<Vec<String>> = band
            .iter()
            .map(|month| month_lines(page, month))
            .collect();
        let height = blocks.iter().map(Vec::len).max().unwrap_or(0);
        for line in 0..height {
            let row: Vec<&str> = blocks
                .iter()
                .map(|b| b.get(line).map(String::as_str).unwrap_or(""))
                .collect();
            let width = spec.month_columns() as usize * CELL_WIDTH;
            let joined = row
                .iter()
                .map(|cell| format!("{:<width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join("  ");
            out.push_str(joined.trim_end());
            out.push('\n');
        }
        out.push('\n');
    }

    if let Some(legend) = &page.legend {
        for line in &legend.lines {
            out.push_str(line);
            out.push('\n');
        }
    }

    for image in &page.images {
        out.push_str(&format!(
            "[image {:.0},{:.0} {:.0}x{:.0}]\n",
            image.x, image.y, image.width, image.height
        ));
    }

    out
}

fn month_lines(page: &CalendarPage, month: &MonthCell) -> Vec<String> {
    let spec = &page.grid.spec;
    let width = spec.month_columns() as usize * CELL_WIDTH;
    let mut lines = vec![format!("{:^width$}", month.heading, width = width)];

    let mut names = String::new();
    if spec.show_week_numbers() {
        names.push_str(&format!("{:<3}", page.week_number_heading()));
    }
    for letter in spec.first_weekday().letters() {
        names.push_str(&format!(" {} ", letter));
    }
    lines.push(names);

    for week in &month.weeks {
        let mut line = String::new();
        if week.week_number_col.is_some() {
            line.push_str(&format!("{:>2} ", week.iso_week));
        }
        for day in &week.days {
            line.push_str(&day_text(day));
        }
        lines.push(line);
    }

    lines
}

fn day_text(day: &DayCell) -> String {
    if !day.in_month {
        return " ".repeat(CELL_WIDTH);
    }
    let mark = match day.classification {
        Classification::Holiday => '*',
        Classification::SpecialDate => '+',
        Classification::Vacation => '~',
        _ => ' ',
    };
    format!("{:>2}{}", day.date.day(), mark)
}
