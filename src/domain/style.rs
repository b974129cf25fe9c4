//! Cell classification and the style table
//!
//! Every cell the engine emits has a [`CellKind`]; day cells additionally
//! carry a [`Classification`]. The mapping to colours is a fixed table so a
//! missing style is a compile error rather than a lookup miss.

use serde::Serialize;

/// How a day cell is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Normal,
    Weekend,
    Holiday,
    SpecialDate,
    Vacation,
    /// Weekday bleeding in from the previous or next month
    OtherMonth,
    /// Weekend day bleeding in from the previous or next month
    OtherMonthWeekend,
}

impl Classification {
    /// Returns true for cells of the adjacent months
    pub fn is_bleed(&self) -> bool {
        matches!(
            self,
            Classification::OtherMonth | Classification::OtherMonthWeekend
        )
    }
}

/// Structural role of a frame on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "classification")]
pub enum CellKind {
    MonthHeading,
    WeekdayName,
    WeekNumberHeading,
    WeekNumber,
    Day(Classification),
    Legend,
    Image,
}

/// CMYK colour, each channel 0-255
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cmyk {
    pub c: u8,
    pub m: u8,
    pub y: u8,
    pub k: u8,
}

impl Cmyk {
    pub const fn new(c: u8, m: u8, y: u8, k: u8) -> Self {
        Self { c, m, y, k }
    }

    /// Grey level on the black channel only
    pub const fn grey(k: u8) -> Self {
        Self::new(0, 0, 0, k)
    }
}

pub const WHITE: Cmyk = Cmyk::grey(0);
pub const BLACK: Cmyk = Cmyk::grey(255);
pub const LIGHT_GREY: Cmyk = Cmyk::grey(25);
pub const MIDDLE_GREY: Cmyk = Cmyk::grey(128);
pub const DARK_GREY: Cmyk = Cmyk::grey(200);
pub const RED: Cmyk = Cmyk::new(0, 234, 246, 0);

/// Visual attributes handed to the drawing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellStyle {
    pub fill: Cmyk,
    pub text: Cmyk,
    pub grid: Option<Cmyk>,
}

impl CellStyle {
    const fn new(fill: Cmyk, text: Cmyk, grid: Option<Cmyk>) -> Self {
        Self { fill, text, grid }
    }
}

/// Style for a frame of the given kind
pub const fn style_for(kind: CellKind) -> CellStyle {
    match kind {
        CellKind::MonthHeading => CellStyle::new(WHITE, BLACK, Some(WHITE)),
        CellKind::WeekdayName => CellStyle::new(DARK_GREY, WHITE, Some(MIDDLE_GREY)),
        CellKind::WeekNumberHeading | CellKind::WeekNumber => {
            CellStyle::new(DARK_GREY, WHITE, Some(MIDDLE_GREY))
        }
        CellKind::Day(classification) => day_style(classification),
        CellKind::Legend => CellStyle::new(WHITE, BLACK, None),
        CellKind::Image => CellStyle::new(WHITE, BLACK, None),
    }
}

const fn day_style(classification: Classification) -> CellStyle {
    let grid = Some(MIDDLE_GREY);
    match classification {
        Classification::Normal => CellStyle::new(WHITE, BLACK, grid),
        Classification::Weekend => CellStyle::new(LIGHT_GREY, DARK_GREY, grid),
        Classification::Holiday => CellStyle::new(LIGHT_GREY, RED, grid),
        Classification::SpecialDate => CellStyle::new(WHITE, MIDDLE_GREY, grid),
        Classification::Vacation => CellStyle::new(LIGHT_GREY, BLACK, grid),
        Classification::OtherMonth => CellStyle::new(WHITE, BLACK, grid),
        Classification::OtherMonthWeekend => CellStyle::new(LIGHT_GREY, BLACK, grid),
    }
}
