//! yearcal - twelve-month calendar layout with holiday overlays
//!
//! Holiday rules (fixed dates, nth weekday of a month, offsets from Western
//! or Orthodox Easter) are resolved against a twelve-month window, then the
//! months are placed on a uniform cell grid with a legend below. The result
//! is a list of positioned, styled frames for a drawing backend.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{CalendarPage, CalendarSpec, Frame, HolidayInstance, HolidayRule, PageGeometry};
