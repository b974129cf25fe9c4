//! Legend text block
//!
//! Lists every holiday that carries a label, one line each, in a
//! multi-column text frame below the month grid.

use serde::Serialize;

use super::holiday::HolidayInstance;
use super::layout::{GridResult, PageGeometry, Rect};
use super::resolver::CalendarWindow;

/// Legend rows are this fraction of a calendar row
pub const LEGEND_ROW_SCALE: f64 = 0.6;

/// Rows reserved on top of the legend lines themselves
pub const LEGEND_ROW_BUFFER: u32 = 2;

/// Geometry and content of the legend frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendLayout {
    /// Rows the legend adds to the grid total
    pub extra_rows: f64,
    pub column_count: u32,
    pub column_gap: f64,
    /// Horizontal indent applied to the frame
    pub indent: f64,
    /// Grid row the frame starts on
    pub origin_row: u32,
    pub line_spacing: f64,
    pub frame: Rect,
    pub lines: Vec<String>,
}

/// Number of holidays that produce a legend line
pub fn labelled_count(holidays: &[HolidayInstance]) -> usize {
    holidays.iter().filter(|h| h.has_label()).count()
}

/// Row budget the legend adds to the grid
///
/// `(ceil(labelled / months_per_row) + 2) * 0.6`; must be applied before the
/// cell height is computed.
pub fn extra_rows(holidays: &[HolidayInstance], months_per_row: u32) -> f64 {
    let per_column = labelled_count(holidays).div_ceil(months_per_row.max(1) as usize);
    (per_column as f64 + f64::from(LEGEND_ROW_BUFFER)) * LEGEND_ROW_SCALE
}

/// Formats one legend line: `DD/MM[/YYYY] label`
///
/// The year is only printed when the calendar window spans two years.
pub fn format_line(holiday: &HolidayInstance, window: CalendarWindow) -> String {
    let mut line = format!("{:02}/{:02}", holiday.day(), holiday.month());
    if window.spans_two_years() {
        line.push_str(&format!("/{}", holiday.year()));
    }
    line.push(' ');
    line.push_str(&holiday.label);
    line
}

/// Builds the legend for an already laid-out grid
///
/// The grid must have been computed with the legend budget included, so the
/// frame fits into the rows below the last month block.
pub fn build(grid: &GridResult, holidays: &[HolidayInstance], page: &PageGeometry) -> LegendLayout {
    let spec = &grid.spec;
    let metrics = &grid.metrics;

    // With week numbers and no year column, indent by the week-number column
    let indented = spec.show_week_numbers() && spec.start_month() == 1;
    let indent = if indented { metrics.cell_width } else { 0.0 };
    let column_gap = metrics.cell_width * if indented { 2.0 } else { 1.0 };

    let origin_row = grid.occupied_rows() + 1;
    let top = f64::from(origin_row) * metrics.cell_height;
    let frame = Rect::new(
        metrics.origin_x + indent,
        metrics.origin_y + top,
        page.grid_width() - indent,
        (page.grid_height() - top).max(0.0),
    );

    let lines = holidays
        .iter()
        .filter(|h| h.has_label())
        .map(|h| format_line(h, spec.window()))
        .collect();

    LegendLayout {
        extra_rows: extra_rows(holidays, spec.months_per_row()),
        column_count: spec.months_per_row(),
        column_gap,
        indent,
        origin_row,
        line_spacing: metrics.cell_height * LEGEND_ROW_SCALE,
        frame,
        lines,
    }
}
