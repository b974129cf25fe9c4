//! Domain models for yearcal
//!
//! Holiday resolution, grid layout and legend sizing, without any I/O.
//! Data flows one way: rules → resolved holidays → grid → legend → frames.

mod holiday;
mod rule;
mod resolver;
mod style;
mod layout;
mod legend;
mod frames;

pub use holiday::{
    days_in_month, easter, easter_orthodox, nth_weekday_of_month, DateError, EasterBase,
    HolidayCategory, HolidayInstance, HolidayRule, RuleKind, MAX_FEAST_OFFSET,
};
pub use rule::{ParseReport, RejectedRecord, RuleError, RuleRecord};
pub use resolver::{resolve, CalendarWindow, Resolution, SkippedInstance};
pub use style::{style_for, CellKind, CellStyle, Classification, Cmyk};
pub use layout::{
    classify, layout, month_heading, CalendarSpec, DayCell, FirstWeekday, GridMetrics,
    GridResult, Margins, MonthCell, PageGeometry, Rect, SpecError, WeekRow, MAX_YEAR,
    MIN_YEAR, MONTH_BLOCK_ROWS, MONTH_BLOCK_STRIDE,
};
pub use legend::{
    extra_rows as legend_extra_rows, format_line as legend_line, labelled_count, LegendLayout,
    LEGEND_ROW_BUFFER, LEGEND_ROW_SCALE,
};
pub use frames::{image_frames, CalendarPage, Frame, PageOptions};
