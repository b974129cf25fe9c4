//! Holiday rules and the date arithmetic behind them
//!
//! A rule is one of three shapes:
//! - `Fixed`: the same month/day every year (`25/12`)
//! - `NthWeekday`: the nth weekday of a month, `n = 0` meaning the last one
//! - `Variable`: a signed day offset from Easter (Gregorian or Orthodox)
//!
//! Resolving a rule against a year yields a [`HolidayInstance`].

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Largest offset a movable feast may have from its Easter base
pub const MAX_FEAST_OFFSET: i64 = 366;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("Occurrence must be 0-5 (0 = last), got {0}")]
    OccurrenceOutOfRange(i64),

    #[error("Weekday must be 0-6 (Monday = 0), got {0}")]
    WeekdayOutOfRange(i64),

    #[error("Month must be 1-12, got {0}")]
    MonthOutOfRange(i64),

    #[error("Offset from Easter must be within 366 days, got {0}")]
    OffsetOutOfRange(i64),

    #[error("Day {day} does not exist in {year}-{month:02}")]
    DayOutOfRange { year: i32, month: u32, day: i64 },

    #[error("Year {0} is outside the supported date range")]
    YearOutOfRange(i64),

    #[error("{base} is only computable for years {min}-{max}, got {year}")]
    EasterYearOutOfRange {
        base: EasterBase,
        year: i32,
        min: i32,
        max: i32,
    },
}

/// How a holiday is shown on the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayCategory {
    /// Public holiday, always highlighted
    Holiday,
    /// Notable date that does not override weekend or vacation styling
    SpecialDate,
    /// School or company vacation
    Vacation,
}

impl HolidayCategory {
    /// Derives the category from the record's flag field
    ///
    /// Empty means vacation, `"0"` a special date, anything else a holiday.
    pub fn from_flag(flag: &str) -> Self {
        match flag.trim() {
            "" => HolidayCategory::Vacation,
            "0" => HolidayCategory::SpecialDate,
            _ => HolidayCategory::Holiday,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HolidayCategory::Holiday => "holiday",
            HolidayCategory::SpecialDate => "special",
            HolidayCategory::Vacation => "vacation",
        }
    }
}

impl fmt::Display for HolidayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The movable feast a variable holiday is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasterBase {
    /// Western Easter (Gregorian computus)
    Easter,
    /// Orthodox Easter (Julian computus, expressed as a Gregorian date)
    EasterJulian,
}

impl EasterBase {
    /// Parses the base name used in holiday files
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "easter" => Some(EasterBase::Easter),
            "easterO" => Some(EasterBase::EasterJulian),
            _ => None,
        }
    }

    /// Computes this base's date for `year`
    pub fn date(&self, year: i32) -> Result<NaiveDate, DateError> {
        match self {
            EasterBase::Easter => easter(year),
            EasterBase::EasterJulian => easter_orthodox(year),
        }
    }
}

impl fmt::Display for EasterBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EasterBase::Easter => f.write_str("easter"),
            EasterBase::EasterJulian => f.write_str("easterO"),
        }
    }
}

/// The date-producing part of a holiday rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleKind {
    Fixed {
        month: i64,
        day: i64,
    },
    /// `n` in 0..=5 (0 = last occurrence), `weekday` in 0..=6 (Monday = 0)
    NthWeekday {
        n: i64,
        weekday: i64,
        month: i64,
    },
    Variable {
        base: EasterBase,
        delta_days: i64,
    },
}

impl RuleKind {
    /// Computes the concrete date of this rule in `year`
    pub fn date_in(&self, year: i32) -> Result<NaiveDate, DateError> {
        match *self {
            RuleKind::Fixed { month, day } => {
                let month = check_month(month)?;
                let day_u = u32::try_from(day)
                    .map_err(|_| DateError::DayOutOfRange { year, month, day })?;
                NaiveDate::from_ymd_opt(year, month, day_u)
                    .ok_or(DateError::DayOutOfRange { year, month, day })
            }
            RuleKind::NthWeekday { n, weekday, month } => {
                nth_weekday_of_month(n, weekday, month, year)
            }
            RuleKind::Variable { base, delta_days } => {
                if delta_days.abs() > MAX_FEAST_OFFSET {
                    return Err(DateError::OffsetOutOfRange(delta_days));
                }
                base.date(year)?
                    .checked_add_signed(Duration::days(delta_days))
                    .ok_or(DateError::YearOutOfRange(year.into()))
            }
        }
    }
}

/// A parsed holiday rule; immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRule {
    #[serde(flatten)]
    pub kind: RuleKind,
    pub label: String,
    pub category: HolidayCategory,
}

impl HolidayRule {
    pub fn new(kind: RuleKind, category: HolidayCategory, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            category,
        }
    }

    /// Resolves this rule into a concrete instance for `year`
    pub fn instance_in(&self, year: i32) -> Result<HolidayInstance, DateError> {
        Ok(HolidayInstance {
            date: self.kind.date_in(year)?,
            label: self.label.clone(),
            category: self.category,
        })
    }
}

/// A holiday pinned to a concrete date
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolidayInstance {
    pub date: NaiveDate,
    pub label: String,
    pub category: HolidayCategory,
}

impl HolidayInstance {
    pub fn new(date: NaiveDate, category: HolidayCategory, label: impl Into<String>) -> Self {
        Self {
            date,
            label: label.into(),
            category,
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Returns true if this instance contributes a legend line
    pub fn has_label(&self) -> bool {
        !self.label.trim().is_empty()
    }
}

fn check_month(month: i64) -> Result<u32, DateError> {
    match u32::try_from(month) {
        Ok(m @ 1..=12) => Ok(m),
        _ => Err(DateError::MonthOutOfRange(month)),
    }
}

/// Number of days in `month` of `year`
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

/// Western Easter Sunday (anonymous Gregorian / Butcher algorithm)
///
/// Valid for every Gregorian year from 1583 on. All divisions are integer
/// divisions on non-negative operands.
pub fn easter(year: i32) -> Result<NaiveDate, DateError> {
    if year < 1583 {
        return Err(DateError::EasterYearOutOfRange {
            base: EasterBase::Easter,
            year,
            min: 1583,
            max: i32::MAX,
        });
    }

    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = (19 * a + b - b / 4 - ((b - (b + 8) / 25 + 1) / 3) + 15) % 30;
    let e = (32 + 2 * (b % 4) + 2 * (c / 4) - d - (c % 4)) % 7;
    let f = d + e - 7 * ((a + 11 * d + 22 * e) / 451) + 114;

    let month = (f / 31) as u32;
    let day = (f % 31 + 1) as u32;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateError::DayOutOfRange {
        year,
        month,
        day: day.into(),
    })
}

/// Orthodox Easter Sunday as a Gregorian date
///
/// Meeus' Julian computus, shifted by the 13-day Julian/Gregorian gap that
/// holds for 1900-2099.
pub fn easter_orthodox(year: i32) -> Result<NaiveDate, DateError> {
    if !(1900..=2099).contains(&year) {
        return Err(DateError::EasterYearOutOfRange {
            base: EasterBase::EasterJulian,
            year,
            min: 1900,
            max: 2099,
        });
    }

    let a = year % 4;
    let b = year % 7;
    let c = year % 19;
    let d = (19 * c + 15) % 30;
    let e = (2 * a + 4 * b - d + 34) % 7;
    let f = d + e + 114;

    let month = (f / 31) as u32;
    let day = (f % 31 + 1) as u32;
    let julian = NaiveDate::from_ymd_opt(year, month, day).ok_or(DateError::DayOutOfRange {
        year,
        month,
        day: day.into(),
    })?;
    Ok(julian + Duration::days(13))
}

/// The nth `weekday` of `month` in `year`
///
/// `n` runs 1..=5, with 0 meaning the last occurrence. `weekday` counts from
/// Monday = 0.
pub fn nth_weekday_of_month(
    n: i64,
    weekday: i64,
    month: i64,
    year: i32,
) -> Result<NaiveDate, DateError> {
    if !(0..=5).contains(&n) {
        return Err(DateError::OccurrenceOutOfRange(n));
    }
    if !(0..=6).contains(&weekday) {
        return Err(DateError::WeekdayOutOfRange(weekday));
    }
    let month = check_month(month)?;
    let weekday = weekday as u32;
    let last_day = days_in_month(year, month);

    let day = if n == 0 {
        last_weekday_of_month(weekday, month, year)
    } else {
        first_weekday_of_month(weekday, month, year) + (n as u32 - 1) * 7
    };

    if day > last_day {
        return Err(DateError::DayOutOfRange {
            year,
            month,
            day: day.into(),
        });
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateError::DayOutOfRange {
        year,
        month,
        day: day.into(),
    })
}

/// Day of the first `weekday` (Monday = 0) in a month whose 1st is valid
fn first_weekday_of_month(weekday: u32, month: u32, year: i32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.weekday().num_days_from_monday())
        .unwrap_or(0);
    (weekday + 7 - first) % 7 + 1
}

/// Day of the last `weekday` (Monday = 0) in the month
fn last_weekday_of_month(weekday: u32, month: u32, year: i32) -> u32 {
    let last_day = days_in_month(year, month);
    let last_weekday = NaiveDate::from_ymd_opt(year, month, last_day)
        .map(|d| d.weekday().num_days_from_monday())
        .unwrap_or(0);
    last_day - (last_weekday + 7 - weekday) % 7
}
