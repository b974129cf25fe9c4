//! Holiday resolution over a calendar's two-year window
//!
//! A calendar starting in any month other than January runs into the next
//! year, so every rule is resolved for both `year` and `year + 1`. The
//! resulting instances are then filtered to the twelve displayed months and
//! sorted by date.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::holiday::{DateError, HolidayInstance, HolidayRule};

/// The twelve consecutive months a calendar displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CalendarWindow {
    year: i32,
    start_month: u32,
}

impl CalendarWindow {
    /// Creates a window; `start_month` is clamped into 1..=12
    pub fn new(year: i32, start_month: u32) -> Self {
        Self {
            year,
            start_month: start_month.clamp(1, 12),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn start_month(&self) -> u32 {
        self.start_month
    }

    /// Returns true if the window spills into `year + 1`
    pub fn spans_two_years(&self) -> bool {
        self.start_month > 1
    }

    /// The `(year, month)` shown at position `index` (0..12)
    pub fn month_at(&self, index: u32) -> (i32, u32) {
        let offset = self.start_month - 1 + index;
        (self.year.saturating_add((offset / 12) as i32), offset % 12 + 1)
    }

    /// All twelve `(year, month)` pairs in display order
    pub fn months(&self) -> impl Iterator<Item = (i32, u32)> + '_ {
        (0..12).map(move |i| self.month_at(i))
    }

    /// Returns true if `date` falls inside one of the displayed months
    pub fn contains(&self, date: NaiveDate) -> bool {
        let years = i64::from(date.year()) - i64::from(self.year);
        let index = years * 12 + i64::from(date.month()) - i64::from(self.start_month);
        (0..12).contains(&index)
    }
}

/// A rule instance that could not be computed for one of the two years
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedInstance {
    pub label: String,
    pub year: i32,
    pub reason: String,
}

/// Resolved holidays plus everything that had to be skipped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub holidays: Vec<HolidayInstance>,
    pub skipped: Vec<SkippedInstance>,
}

impl Resolution {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Resolves `rules` into sorted, window-filtered instances
///
/// Each rule is evaluated for `year` and `year + 1`. An instance that cannot
/// be computed is recorded in [`Resolution::skipped`]; the rest of the batch
/// is unaffected.
pub fn resolve(rules: &[HolidayRule], year: i32, start_month: u32) -> Resolution {
    let window = CalendarWindow::new(year, start_month);
    let mut resolution = Resolution::default();

    let Some(next_year) = year.checked_add(1) else {
        resolution.skipped.extend(rules.iter().map(|rule| SkippedInstance {
            label: rule.label.clone(),
            year,
            reason: DateError::YearOutOfRange(i64::from(year) + 1).to_string(),
        }));
        return resolution;
    };

    for rule in rules {
        for y in [year, next_year] {
            match rule.instance_in(y) {
                Ok(instance) => {
                    if window.contains(instance.date) {
                        resolution.holidays.push(instance);
                    }
                }
                Err(e) => resolution.skipped.push(SkippedInstance {
                    label: rule.label.clone(),
                    year: y,
                    reason: e.to_string(),
                }),
            }
        }
    }

    // Stable, so same-day instances keep rule order
    resolution.holidays.sort_by_key(|h| h.date);
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::holiday::{EasterBase, HolidayCategory, RuleKind};
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixed(month: i64, day: i64, label: &str) -> HolidayRule {
        HolidayRule::new(RuleKind::Fixed { month, day }, HolidayCategory::Holiday, label)
    }

    #[test]
    fn window_months_wrap_into_next_year() {
        let window = CalendarWindow::new(2024, 4);
        let months: Vec<_> = window.months().collect();
        assert_eq!(months.first(), Some(&(2024, 4)));
        assert_eq!(months[8], (2024, 12));
        assert_eq!(months[9], (2025, 1));
        assert_eq!(months.last(), Some(&(2025, 3)));
        assert!(window.spans_two_years());
    }

    #[test]
    fn january_window_is_a_single_year() {
        let window = CalendarWindow::new(2024, 1);
        assert!(!window.spans_two_years());
        assert!(window.months().all(|(y, _)| y == 2024));
        assert!(window.contains(ymd(2024, 12, 31)));
        assert!(!window.contains(ymd(2025, 1, 1)));
        assert!(!window.contains(ymd(2023, 12, 31)));
    }

    #[test]
    fn april_start_keeps_each_holiday_once() {
        let rules = vec![fixed(2, 14, "Valentine"), fixed(12, 25, "Christmas")];
        let resolution = resolve(&rules, 2024, 4);

        let dates: Vec<_> = resolution.holidays.iter().map(|h| h.date).collect();
        assert_eq!(dates, vec![ymd(2024, 12, 25), ymd(2025, 2, 14)]);
        assert!(resolution.skipped.is_empty());
    }

    #[test]
    fn years_without_a_successor_are_skipped() {
        let rules = vec![fixed(1, 1, "New Year"), fixed(12, 25, "Christmas")];
        let resolution = resolve(&rules, i32::MAX, 1);

        assert!(resolution.holidays.is_empty());
        assert_eq!(resolution.skipped_count(), 2);
        assert!(resolution.skipped[0]
            .reason
            .contains("outside the supported date range"));
    }

    #[test]
    fn feasts_past_the_last_date_are_skipped() {
        let rules = vec![HolidayRule::new(
            RuleKind::Variable {
                base: EasterBase::Easter,
                delta_days: 300,
            },
            HolidayCategory::Holiday,
            "Late feast",
        )];
        let resolution = resolve(&rules, NaiveDate::MAX.year(), 1);

        assert!(resolution.holidays.is_empty());
        assert_eq!(resolution.skipped_count(), 2);
    }

    #[test]
    fn january_start_drops_next_year_instances() {
        let rules = vec![fixed(12, 25, "Christmas"), fixed(1, 1, "New Year")];
        let resolution = resolve(&rules, 2024, 1);

        let dates: Vec<_> = resolution.holidays.iter().map(|h| h.date).collect();
        assert_eq!(dates, vec![ymd(2024, 1, 1), ymd(2024, 12, 25)]);
    }

    #[test]
    fn variable_rules_resolve_for_both_years() {
        let rules = vec![HolidayRule::new(
            RuleKind::Variable {
                base: EasterBase::Easter,
                delta_days: 1,
            },
            HolidayCategory::Holiday,
            "Easter Monday",
        )];
        // September 2024 .. August 2025 only contains the 2025 Easter Monday
        let resolution = resolve(&rules, 2024, 9);
        assert_eq!(resolution.holidays.len(), 1);
        assert_eq!(resolution.holidays[0].date, ymd(2025, 4, 21));
    }

    #[test]
    fn bad_instance_is_skipped_not_fatal() {
        let rules = vec![
            fixed(2, 29, "Leap day"),
            HolidayRule::new(
                RuleKind::NthWeekday {
                    n: 7,
                    weekday: 0,
                    month: 1,
                },
                HolidayCategory::Holiday,
                "Broken",
            ),
            fixed(5, 1, "Labour Day"),
        ];
        let resolution = resolve(&rules, 2024, 1);

        // 2024-02-29 and 2024-05-01 survive; 2025-02-29 and both "Broken" fail
        assert_eq!(resolution.holidays.len(), 2);
        assert_eq!(resolution.skipped_count(), 3);
        assert!(resolution
            .skipped
            .iter()
            .any(|s| s.label == "Leap day" && s.year == 2025));
    }

    #[test]
    fn empty_rules_resolve_to_nothing() {
        let resolution = resolve(&[], 2024, 1);
        assert!(resolution.holidays.is_empty());
        assert!(resolution.skipped.is_empty());
    }

    fn arb_rule() -> impl Strategy<Value = HolidayRule> {
        let kind = prop_oneof![
            (1i64..=12, 1i64..=31).prop_map(|(month, day)| RuleKind::Fixed { month, day }),
            (0i64..=5, 0i64..=6, 1i64..=12)
                .prop_map(|(n, weekday, month)| RuleKind::NthWeekday { n, weekday, month }),
            (-60i64..=60).prop_map(|delta_days| RuleKind::Variable {
                base: EasterBase::Easter,
                delta_days
            }),
        ];
        let category = prop_oneof![
            Just(HolidayCategory::Holiday),
            Just(HolidayCategory::SpecialDate),
            Just(HolidayCategory::Vacation),
        ];
        (kind, category, "[a-z ]{0,8}")
            .prop_map(|(kind, category, label)| HolidayRule::new(kind, category, label))
    }

    proptest! {
        #[test]
        fn resolve_is_deterministic(
            rules in prop::collection::vec(arb_rule(), 0..20),
            year in 1990i32..2090,
            start_month in 1u32..=12,
        ) {
            let first = resolve(&rules, year, start_month);
            let second = resolve(&rules, year, start_month);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn resolved_holidays_are_sorted_and_in_window(
            rules in prop::collection::vec(arb_rule(), 0..20),
            year in 1990i32..2090,
            start_month in 1u32..=12,
        ) {
            let resolution = resolve(&rules, year, start_month);
            let window = CalendarWindow::new(year, start_month);
            prop_assert!(resolution.holidays.windows(2).all(|w| w[0].date <= w[1].date));
            prop_assert!(resolution.holidays.iter().all(|h| window.contains(h.date)));
            prop_assert_eq!(
                resolution.holidays.len() + resolution.skipped.len() <= rules.len() * 2,
                true
            );
        }
    }
}
