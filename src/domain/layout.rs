//! Grid layout engine
//!
//! Maps the twelve months of a [`CalendarSpec`] onto a uniform cell grid.
//! Every month occupies a block of 8 rows (heading, weekday names, up to six
//! weeks) and 7 or 8 columns (the optional week-number column first). Blocks
//! are separated by one spacer row and one spacer column.
//!
//! All positions are computed directly from a month's index in the window;
//! nothing is carried from one month to the next.

use chrono::{Datelike, Duration, Month, NaiveDate, Weekday};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::holiday::{days_in_month, HolidayCategory, HolidayInstance};
use super::legend;
use super::resolver::CalendarWindow;
use super::style::Classification;

/// Rows in one month block: heading, weekday names, six weeks
pub const MONTH_BLOCK_ROWS: u32 = 8;

/// Row stride between vertically stacked month blocks (block + spacer)
pub const MONTH_BLOCK_STRIDE: u32 = MONTH_BLOCK_ROWS + 1;

/// Earliest calendar year: the first full Gregorian year
pub const MIN_YEAR: i32 = 1583;

/// Latest calendar year; years are written with four digits
pub const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SpecError {
    #[error("Year must be 1583-9999, got {0}")]
    Year(i32),

    #[error("Start month must be 1-12, got {0}")]
    StartMonth(u32),

    #[error("Months per row must be 1-12, got {0}")]
    MonthsPerRow(u32),

    #[error("Unknown first weekday '{0}' (expected monday or sunday)")]
    FirstWeekday(String),

    #[error("Page dimensions must be positive, got {width}x{height}")]
    PageSize { width: f64, height: f64 },

    #[error("Margins leave no usable area on a {width}x{height} page")]
    Margins { width: f64, height: f64 },

    #[error("Offset {axis} = {offset} must be non-negative and smaller than the usable {extent}")]
    Offset {
        axis: &'static str,
        offset: f64,
        extent: f64,
    },

    #[error("Inner margin {axis} = {margin} must lie between 0 and the offset {offset}")]
    InnerMargin {
        axis: &'static str,
        margin: f64,
        offset: f64,
    },
}

/// The day a week row starts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstWeekday {
    #[default]
    Monday,
    Sunday,
}

impl FirstWeekday {
    pub fn weekday(&self) -> Weekday {
        match self {
            FirstWeekday::Monday => Weekday::Mon,
            FirstWeekday::Sunday => Weekday::Sun,
        }
    }

    /// Weekday at `position` (0..7) in a week row
    pub fn weekday_at(&self, position: u32) -> Weekday {
        let mut day = self.weekday();
        for _ in 0..position % 7 {
            day = day.succ();
        }
        day
    }

    /// Position (0..7) of `weekday` in a week row
    pub fn position_of(&self, weekday: Weekday) -> u32 {
        (weekday.num_days_from_monday() + 7 - self.weekday().num_days_from_monday()) % 7
    }

    /// One-letter weekday names in row order
    pub fn letters(&self) -> [&'static str; 7] {
        match self {
            FirstWeekday::Monday => ["M", "T", "W", "T", "F", "S", "S"],
            FirstWeekday::Sunday => ["S", "M", "T", "W", "T", "F", "S"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FirstWeekday::Monday => "monday",
            FirstWeekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for FirstWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FirstWeekday {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" => Ok(FirstWeekday::Monday),
            "sunday" | "sun" => Ok(FirstWeekday::Sunday),
            other => Err(SpecError::FirstWeekday(other.to_string())),
        }
    }
}

/// Immutable description of the calendar to lay out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarSpec {
    year: i32,
    start_month: u32,
    months_per_row: u32,
    first_weekday: FirstWeekday,
    show_week_numbers: bool,
}

impl CalendarSpec {
    /// Validates and builds a spec
    pub fn new(
        year: i32,
        start_month: u32,
        months_per_row: u32,
        first_weekday: FirstWeekday,
        show_week_numbers: bool,
    ) -> Result<Self, SpecError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(SpecError::Year(year));
        }
        if !(1..=12).contains(&start_month) {
            return Err(SpecError::StartMonth(start_month));
        }
        if !(1..=12).contains(&months_per_row) {
            return Err(SpecError::MonthsPerRow(months_per_row));
        }
        Ok(Self {
            year,
            start_month,
            months_per_row,
            first_weekday,
            show_week_numbers,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn start_month(&self) -> u32 {
        self.start_month
    }

    pub fn months_per_row(&self) -> u32 {
        self.months_per_row
    }

    pub fn first_weekday(&self) -> FirstWeekday {
        self.first_weekday
    }

    pub fn show_week_numbers(&self) -> bool {
        self.show_week_numbers
    }

    pub fn window(&self) -> CalendarWindow {
        CalendarWindow::new(self.year, self.start_month)
    }

    /// Number of stacked month blocks
    pub fn vertical_month_count(&self) -> u32 {
        12_u32.div_ceil(self.months_per_row)
    }

    /// Columns in one month block
    pub fn month_columns(&self) -> u32 {
        if self.show_week_numbers {
            8
        } else {
            7
        }
    }

    /// Total grid columns, including spacer columns between months
    pub fn total_columns(&self) -> u32 {
        self.month_columns() * self.months_per_row + (self.months_per_row - 1)
    }

    /// Total grid rows before any legend is added
    pub fn base_rows(&self) -> u32 {
        let v = self.vertical_month_count();
        MONTH_BLOCK_ROWS * v + (v - 1)
    }
}

/// Page margins in points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Margins {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Page size, margins and the reserved offset areas
///
/// The offsets reserve space at the top (`offset_y`) and left (`offset_x`)
/// of the usable area; the inner margins separate an image placed in that
/// space from the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageGeometry {
    width: f64,
    height: f64,
    margins: Margins,
    offset_x: f64,
    offset_y: f64,
    inner_margin_x: f64,
    inner_margin_y: f64,
}

impl PageGeometry {
    pub fn new(width: f64, height: f64, margins: Margins) -> Result<Self, SpecError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(SpecError::PageSize { width, height });
        }
        let page = Self {
            width,
            height,
            margins,
            offset_x: 0.0,
            offset_y: 0.0,
            inner_margin_x: 0.0,
            inner_margin_y: 0.0,
        };
        if !(page.usable_width() > 0.0 && page.usable_height() > 0.0) {
            return Err(SpecError::Margins { width, height });
        }
        Ok(page)
    }

    /// Reserves the offset areas, with their inner margins
    pub fn with_offsets(
        mut self,
        offset_x: f64,
        offset_y: f64,
        inner_margin_x: f64,
        inner_margin_y: f64,
    ) -> Result<Self, SpecError> {
        check_offset("x", offset_x, self.usable_width())?;
        check_offset("y", offset_y, self.usable_height())?;
        check_inner_margin("x", inner_margin_x, offset_x)?;
        check_inner_margin("y", inner_margin_y, offset_y)?;
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self.inner_margin_x = inner_margin_x;
        self.inner_margin_y = inner_margin_y;
        Ok(self)
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    pub fn inner_margin_x(&self) -> f64 {
        self.inner_margin_x
    }

    pub fn inner_margin_y(&self) -> f64 {
        self.inner_margin_y
    }

    /// Width inside the page margins
    pub fn usable_width(&self) -> f64 {
        self.width - self.margins.left - self.margins.right
    }

    /// Height inside the page margins
    pub fn usable_height(&self) -> f64 {
        self.height - self.margins.top - self.margins.bottom
    }

    /// Top-left corner of the calendar grid
    pub fn grid_origin(&self) -> (f64, f64) {
        (
            self.margins.left + self.offset_x,
            self.margins.top + self.offset_y,
        )
    }

    /// Width available to the grid
    pub fn grid_width(&self) -> f64 {
        self.usable_width() - self.offset_x
    }

    /// Height available to the grid
    pub fn grid_height(&self) -> f64 {
        self.usable_height() - self.offset_y
    }
}

fn check_offset(axis: &'static str, offset: f64, extent: f64) -> Result<(), SpecError> {
    if offset >= 0.0 && offset < extent {
        Ok(())
    } else {
        Err(SpecError::Offset {
            axis,
            offset,
            extent,
        })
    }
}

fn check_inner_margin(axis: &'static str, margin: f64, offset: f64) -> Result<(), SpecError> {
    if margin >= 0.0 && margin <= offset {
        Ok(())
    } else {
        Err(SpecError::InnerMargin {
            axis,
            margin,
            offset,
        })
    }
}

/// Axis-aligned rectangle in page points
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Grid totals and cell size, fixed once computed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridMetrics {
    /// Total rows; fractional when a legend budget is included
    pub rows: f64,
    pub cols: u32,
    pub legend_rows: f64,
    pub cell_width: f64,
    pub cell_height: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl GridMetrics {
    /// Computes the metrics, adding `legend_rows` before dividing the height
    pub fn compute(spec: &CalendarSpec, page: &PageGeometry, legend_rows: f64) -> Self {
        let rows = f64::from(spec.base_rows()) + legend_rows;
        let cols = spec.total_columns();
        let (origin_x, origin_y) = page.grid_origin();
        Self {
            rows,
            cols,
            legend_rows,
            cell_width: page.grid_width() / f64::from(cols),
            cell_height: page.grid_height() / rows,
            origin_x,
            origin_y,
        }
    }

    /// Rectangle of the cell at (`row`, `col`), `span` columns wide
    pub fn cell_rect(&self, row: u32, col: u32, span: u32) -> Rect {
        Rect::new(
            self.origin_x + f64::from(col) * self.cell_width,
            self.origin_y + f64::from(row) * self.cell_height,
            f64::from(span) * self.cell_width,
            self.cell_height,
        )
    }
}

/// One day in a week row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub classification: Classification,
    pub row: u32,
    pub col: u32,
}

/// Seven consecutive days plus their ISO week number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekRow {
    pub iso_week: u32,
    pub row: u32,
    /// Column of the week-number cell, when week numbers are shown
    pub week_number_col: Option<u32>,
    pub days: Vec<DayCell>,
}

/// A month block placed on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCell {
    pub year: i32,
    pub month: u32,
    pub heading: String,
    pub row_origin: u32,
    pub col_origin: u32,
    pub weeks: Vec<WeekRow>,
}

impl MonthCell {
    /// First row below this month's last week
    pub fn end_row(&self) -> u32 {
        self.row_origin + 2 + self.weeks.len() as u32
    }
}

/// The complete grid: metrics plus every placed month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridResult {
    pub spec: CalendarSpec,
    pub metrics: GridMetrics,
    pub months: Vec<MonthCell>,
}

impl GridResult {
    pub fn rows(&self) -> f64 {
        self.metrics.rows
    }

    pub fn cols(&self) -> u32 {
        self.metrics.cols
    }

    pub fn cell_size(&self) -> (f64, f64) {
        (self.metrics.cell_width, self.metrics.cell_height)
    }

    /// First row below the lowest week of any month
    pub fn occupied_rows(&self) -> u32 {
        self.months.iter().map(MonthCell::end_row).max().unwrap_or(0)
    }

    /// Finds the cell for `date` inside its own month
    pub fn day(&self, date: NaiveDate) -> Option<&DayCell> {
        self.months
            .iter()
            .flat_map(|m| m.weeks.iter())
            .flat_map(|w| w.days.iter())
            .find(|d| d.in_month && d.date == date)
    }
}

/// Lays out `spec` on `page`
///
/// With `with_legend`, the legend's row budget is added to the row total
/// before the cell height is fixed, so every calendar row shrinks to make
/// room for it.
pub fn layout(
    spec: &CalendarSpec,
    holidays: &[HolidayInstance],
    page: &PageGeometry,
    with_legend: bool,
) -> GridResult {
    let legend_rows = if with_legend {
        legend::extra_rows(holidays, spec.months_per_row())
    } else {
        0.0
    };
    let metrics = GridMetrics::compute(spec, page, legend_rows);

    let months = (0..12)
        .map(|index| place_month(spec, holidays, index))
        .collect();

    GridResult {
        spec: *spec,
        metrics,
        months,
    }
}

/// Month heading, e.g. `SEPTEMBER 2024`
pub fn month_heading(year: i32, month: u32) -> String {
    let name = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or_default();
    format!("{} {}", name.to_uppercase(), year)
}

fn place_month(spec: &CalendarSpec, holidays: &[HolidayInstance], index: u32) -> MonthCell {
    let (year, month) = spec.window().month_at(index);
    let horizontal = index % spec.months_per_row();
    let vertical = index / spec.months_per_row();

    let row_origin = vertical * MONTH_BLOCK_STRIDE;
    let col_origin = horizontal * (spec.month_columns() + 1);
    let day_col_origin = col_origin + u32::from(spec.show_week_numbers());

    let weeks = month_weeks(year, month, spec.first_weekday())
        .into_iter()
        .enumerate()
        .map(|(k, dates)| {
            let row = row_origin + 2 + k as u32;
            let days = dates
                .iter()
                .zip(0u32..)
                .map(|(&date, pos)| {
                    let in_month = date.month() == month;
                    let weekend = is_weekend(spec.first_weekday().weekday_at(pos));
                    DayCell {
                        date,
                        in_month,
                        classification: classify(date, in_month, weekend, holidays),
                        row,
                        col: day_col_origin + pos,
                    }
                })
                .collect();
            WeekRow {
                iso_week: dates[0].iso_week().week(),
                row,
                week_number_col: spec.show_week_numbers().then_some(col_origin),
                days,
            }
        })
        .collect();

    MonthCell {
        year,
        month,
        heading: month_heading(year, month),
        row_origin,
        col_origin,
        weeks,
    }
}

/// The seven dates of every week that contains a day of `month`
///
/// Weeks running past the representable date range are left out.
fn month_weeks(year: i32, month: u32, first_weekday: FirstWeekday) -> Vec<[NaiveDate; 7]> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let Some(last) = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)) else {
        return Vec::new();
    };

    let lead = first_weekday.position_of(first.weekday());
    let Some(mut week_start) = first.checked_sub_signed(Duration::days(i64::from(lead))) else {
        return Vec::new();
    };
    let mut weeks = Vec::with_capacity(6);
    while week_start <= last {
        let dates: Vec<NaiveDate> = week_start.iter_days().take(7).collect();
        let Ok(week) = <[NaiveDate; 7]>::try_from(dates) else {
            break;
        };
        weeks.push(week);
        match week_start.checked_add_signed(Duration::days(7)) {
            Some(next) => week_start = next,
            None => break,
        }
    }
    weeks
}

fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Classifies one day cell
///
/// Bleed days only get weekend detection. For days of the displayed month a
/// holiday always wins, vacation and special dates never override a weekend,
/// and vacation wins over a special date.
pub fn classify(
    date: NaiveDate,
    in_month: bool,
    weekend: bool,
    holidays: &[HolidayInstance],
) -> Classification {
    if !in_month {
        return if weekend {
            Classification::OtherMonthWeekend
        } else {
            Classification::OtherMonth
        };
    }

    let mut holiday = false;
    let mut vacation = false;
    let mut special = false;
    for h in holidays.iter().filter(|h| h.date == date) {
        match h.category {
            HolidayCategory::Holiday => holiday = true,
            HolidayCategory::Vacation => vacation = true,
            HolidayCategory::SpecialDate => special = true,
        }
    }

    if holiday {
        Classification::Holiday
    } else if weekend {
        Classification::Weekend
    } else if vacation {
        Classification::Vacation
    } else if special {
        Classification::SpecialDate
    } else {
        Classification::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn a4() -> PageGeometry {
        PageGeometry::new(
            595.0,
            842.0,
            Margins {
                top: 40.0,
                left: 40.0,
                right: 40.0,
                bottom: 40.0,
            },
        )
        .unwrap()
    }

    fn spec(start_month: u32, months_per_row: u32, week_numbers: bool) -> CalendarSpec {
        CalendarSpec::new(
            2024,
            start_month,
            months_per_row,
            FirstWeekday::Monday,
            week_numbers,
        )
        .unwrap()
    }

    #[test]
    fn column_totals() {
        assert_eq!(spec(1, 3, true).total_columns(), 26);
        assert_eq!(spec(1, 3, false).total_columns(), 23);
        assert_eq!(spec(1, 1, false).total_columns(), 7);
        assert_eq!(spec(1, 12, true).total_columns(), 107);
    }

    #[test]
    fn row_totals() {
        assert_eq!(spec(1, 3, true).vertical_month_count(), 4);
        assert_eq!(spec(1, 3, true).base_rows(), 35);
        assert_eq!(spec(1, 5, true).vertical_month_count(), 3);
        assert_eq!(spec(1, 12, true).base_rows(), 8);
    }

    #[test]
    fn spec_rejects_out_of_range_input() {
        assert_eq!(
            CalendarSpec::new(2024, 0, 3, FirstWeekday::Monday, true),
            Err(SpecError::StartMonth(0))
        );
        assert_eq!(
            CalendarSpec::new(2024, 1, 13, FirstWeekday::Monday, true),
            Err(SpecError::MonthsPerRow(13))
        );
    }

    #[test]
    fn spec_accepts_four_digit_years_only() {
        assert!(CalendarSpec::new(MIN_YEAR, 1, 3, FirstWeekday::Monday, true).is_ok());
        assert!(CalendarSpec::new(MAX_YEAR, 12, 3, FirstWeekday::Monday, true).is_ok());
        assert_eq!(
            CalendarSpec::new(1582, 1, 3, FirstWeekday::Monday, true),
            Err(SpecError::Year(1582))
        );
        assert_eq!(
            CalendarSpec::new(99_999, 1, 3, FirstWeekday::Monday, true),
            Err(SpecError::Year(99_999))
        );
        assert_eq!(
            CalendarSpec::new(i32::MAX, 1, 3, FirstWeekday::Monday, true),
            Err(SpecError::Year(i32::MAX))
        );
    }

    #[test]
    fn weeks_stop_at_the_ends_of_the_date_range() {
        let last = month_weeks(NaiveDate::MAX.year(), 12, FirstWeekday::Monday);
        assert!(!last.is_empty());
        for week in &last {
            assert!(week.windows(2).all(|pair| pair[0].succ_opt() == Some(pair[1])));
        }

        let first = month_weeks(NaiveDate::MIN.year(), 1, FirstWeekday::Sunday);
        assert!(first.len() <= 6);

        let max_year = month_weeks(MAX_YEAR, 12, FirstWeekday::Monday);
        assert_eq!(max_year.len(), 5);
        assert_eq!(max_year[4][6], ymd(10000, 1, 2));
    }

    #[test]
    fn page_rejects_offsets_beyond_usable_area() {
        let page = a4();
        assert!(page.with_offsets(600.0, 0.0, 0.0, 0.0).is_err());
        assert!(page.with_offsets(0.0, -1.0, 0.0, 0.0).is_err());
        assert!(page.with_offsets(50.0, 0.0, 60.0, 0.0).is_err());
        assert!(page.with_offsets(50.0, 80.0, 10.0, 10.0).is_ok());
    }

    #[test]
    fn cell_size_is_uniform_division_of_grid_area() {
        let page = a4().with_offsets(0.0, 100.0, 0.0, 0.0).unwrap();
        let grid = layout(&spec(1, 3, true), &[], &page, false);
        let (w, h) = grid.cell_size();
        assert!((w - 515.0 / 26.0).abs() < 1e-9);
        assert!((h - (762.0 - 100.0) / 35.0).abs() < 1e-9);
    }

    #[test]
    fn legend_shrinks_cells() {
        let holidays = vec![HolidayInstance::new(
            ymd(2024, 12, 25),
            HolidayCategory::Holiday,
            "Christmas",
        )];
        let without = layout(&spec(1, 3, true), &holidays, &a4(), false);
        let with = layout(&spec(1, 3, true), &holidays, &a4(), true);
        // (ceil(1 / 3) + 2) * 0.6
        assert!((with.rows() - 36.8).abs() < 1e-9);
        assert!(with.cell_size().1 < without.cell_size().1);
        assert_eq!(with.cols(), without.cols());
    }

    #[test]
    fn months_are_placed_row_major() {
        let grid = layout(&spec(1, 3, true), &[], &a4(), false);
        let origins: Vec<_> = grid
            .months
            .iter()
            .map(|m| (m.row_origin, m.col_origin))
            .collect();
        assert_eq!(origins[0], (0, 0));
        assert_eq!(origins[1], (0, 9));
        assert_eq!(origins[2], (0, 18));
        assert_eq!(origins[3], (9, 0));
        assert_eq!(origins[11], (27, 18));
    }

    #[test]
    fn rollover_happens_once() {
        let grid = layout(&spec(4, 3, false), &[], &a4(), false);
        let months: Vec<_> = grid.months.iter().map(|m| (m.year, m.month)).collect();
        assert_eq!(months[0], (2024, 4));
        assert_eq!(months[8], (2024, 12));
        assert_eq!(months[9], (2025, 1));
        assert_eq!(months[11], (2025, 3));
        assert_eq!(grid.months[9].heading, "JANUARY 2025");
    }

    #[test]
    fn week_rows_follow_first_weekday() {
        let grid = layout(&spec(9, 3, true), &[], &a4(), false);
        let september = &grid.months[0];
        // 2024-09-01 is a Sunday: Monday-first rows start on 2024-08-26
        assert_eq!(september.weeks[0].days[0].date, ymd(2024, 8, 26));
        assert_eq!(september.weeks[0].days[6].date, ymd(2024, 9, 1));
        assert_eq!(september.weeks.len(), 6);
        assert_eq!(september.weeks[0].iso_week, 35);
        assert_eq!(september.weeks[0].week_number_col, Some(0));
        assert_eq!(september.weeks[0].days[0].col, 1);

        let sunday_first = CalendarSpec::new(2024, 9, 3, FirstWeekday::Sunday, false).unwrap();
        let grid = layout(&sunday_first, &[], &a4(), false);
        assert_eq!(grid.months[0].weeks[0].days[0].date, ymd(2024, 9, 1));
        assert_eq!(grid.months[0].weeks.len(), 5);
        assert_eq!(grid.months[0].weeks[0].week_number_col, None);
    }

    #[test]
    fn february_2021_fits_in_four_weeks() {
        let grid = layout(
            &CalendarSpec::new(2021, 2, 3, FirstWeekday::Monday, true).unwrap(),
            &[],
            &a4(),
            false,
        );
        assert_eq!(grid.months[0].weeks.len(), 4);
    }

    #[test]
    fn weekend_detection_under_both_week_starts() {
        for first_weekday in [FirstWeekday::Monday, FirstWeekday::Sunday] {
            let spec = CalendarSpec::new(2024, 1, 3, first_weekday, true).unwrap();
            let grid = layout(&spec, &[], &a4(), false);
            assert_eq!(
                grid.day(ymd(2024, 6, 15)).unwrap().classification,
                Classification::Weekend
            );
            assert_eq!(
                grid.day(ymd(2024, 6, 16)).unwrap().classification,
                Classification::Weekend
            );
            assert_eq!(
                grid.day(ymd(2024, 6, 17)).unwrap().classification,
                Classification::Normal
            );
        }
    }

    #[test]
    fn bleed_days_get_weekend_detection_only() {
        let holidays = vec![HolidayInstance::new(
            ymd(2024, 8, 26),
            HolidayCategory::Holiday,
            "Bank holiday",
        )];
        let grid = layout(&spec(9, 3, true), &holidays, &a4(), false);
        let first_week = &grid.months[0].weeks[0];
        assert_eq!(first_week.days[0].classification, Classification::OtherMonth);
        assert_eq!(
            first_week.days[5].classification,
            Classification::OtherMonthWeekend
        );
        assert_eq!(first_week.days[6].classification, Classification::Weekend);
    }

    #[test]
    fn holiday_beats_weekend() {
        let saturday = ymd(2024, 6, 15);
        let holidays = vec![HolidayInstance::new(saturday, HolidayCategory::Holiday, "")];
        assert_eq!(
            classify(saturday, true, true, &holidays),
            Classification::Holiday
        );
    }

    #[test]
    fn weekend_beats_vacation_and_special() {
        let saturday = ymd(2024, 6, 15);
        let vacation = vec![HolidayInstance::new(saturday, HolidayCategory::Vacation, "")];
        let special = vec![HolidayInstance::new(saturday, HolidayCategory::SpecialDate, "")];
        assert_eq!(
            classify(saturday, true, true, &vacation),
            Classification::Weekend
        );
        assert_eq!(
            classify(saturday, true, true, &special),
            Classification::Weekend
        );
    }

    #[test]
    fn precedence_is_order_independent() {
        let day = ymd(2024, 6, 12);
        let mut holidays = vec![
            HolidayInstance::new(day, HolidayCategory::SpecialDate, ""),
            HolidayInstance::new(day, HolidayCategory::Vacation, ""),
        ];
        assert_eq!(classify(day, true, false, &holidays), Classification::Vacation);
        holidays.reverse();
        assert_eq!(classify(day, true, false, &holidays), Classification::Vacation);

        holidays.push(HolidayInstance::new(day, HolidayCategory::Holiday, ""));
        assert_eq!(classify(day, true, false, &holidays), Classification::Holiday);
        assert_eq!(
            classify(day, true, false, &holidays[..1]),
            Classification::Vacation
        );
    }

    #[test]
    fn headings_are_upper_case_with_year() {
        assert_eq!(month_heading(2024, 9), "SEPTEMBER 2024");
        assert_eq!(month_heading(2025, 1), "JANUARY 2025");
    }

    #[test]
    fn first_weekday_parsing() {
        assert_eq!("Monday".parse::<FirstWeekday>(), Ok(FirstWeekday::Monday));
        assert_eq!("sun".parse::<FirstWeekday>(), Ok(FirstWeekday::Sunday));
        assert!("friday".parse::<FirstWeekday>().is_err());
    }

    proptest! {
        #[test]
        fn dates_are_unique_within_each_week(
            year in 1900i32..2100,
            start_month in 1u32..=12,
            months_per_row in 1u32..=12,
            sunday in any::<bool>(),
            week_numbers in any::<bool>(),
        ) {
            let first_weekday = if sunday { FirstWeekday::Sunday } else { FirstWeekday::Monday };
            let spec =
                CalendarSpec::new(year, start_month, months_per_row, first_weekday, week_numbers)
                    .unwrap();
            let grid = layout(&spec, &[], &a4(), false);
            prop_assert_eq!(grid.months.len(), 12);
            for month in &grid.months {
                prop_assert!(month.weeks.len() >= 4 && month.weeks.len() <= 6);
                for week in &month.weeks {
                    let unique: HashSet<_> = week.days.iter().map(|d| d.date).collect();
                    prop_assert_eq!(unique.len(), 7);
                    prop_assert_eq!(week.days[0].date.weekday(), first_weekday.weekday());
                }
                prop_assert!(month.end_row() <= spec.base_rows());
            }
            let right_edge = spec.total_columns();
            prop_assert!(grid
                .months
                .iter()
                .all(|m| m.col_origin + spec.month_columns() <= right_edge));
        }

        #[test]
        fn layout_is_deterministic(year in 1900i32..2100, start_month in 1u32..=12) {
            let spec = CalendarSpec::new(year, start_month, 4, FirstWeekday::Monday, true).unwrap();
            prop_assert_eq!(layout(&spec, &[], &a4(), true), layout(&spec, &[], &a4(), true));
        }
    }
}
