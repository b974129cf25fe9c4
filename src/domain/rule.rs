//! Holiday rule records and their parsing
//!
//! A record is one tokenized line of a holiday file:
//!
//! ```text
//! fixed,    month, day,      [reserved], flag, label
//! nWDOM,    month, weekday,  n,          flag, label
//! variable, base,  delta,    [reserved], flag, label
//! ```
//!
//! The flag and label are always the last two fields. Each record parses
//! on its own; a bad record is reported and never stops the others.

use serde::Serialize;
use thiserror::Error;

use super::holiday::{EasterBase, HolidayCategory, HolidayRule, RuleKind};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Unknown rule kind '{0}' (expected fixed, nWDOM or variable)")]
    UnknownKind(String),

    #[error("Missing field '{0}'")]
    MissingField(&'static str),

    #[error("Field '{field}' is not a number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Unknown Easter base '{0}' (expected easter or easterO)")]
    UnknownBase(String),

    #[error("Too many fields: expected at most {expected}, got {got}")]
    TooManyFields { expected: usize, got: usize },
}

/// One tokenized line from a holiday source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRecord {
    /// Source line number (1-indexed)
    pub line: usize,
    pub fields: Vec<String>,
}

impl RuleRecord {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// Builds a record from string slices
    pub fn from_fields<S: AsRef<str>>(line: usize, fields: &[S]) -> Self {
        Self {
            line,
            fields: fields.iter().map(|f| f.as_ref().to_string()).collect(),
        }
    }

    /// Parses this record into a rule
    pub fn parse(&self) -> Result<HolidayRule, RuleError> {
        let kind_name = self
            .fields
            .first()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or(RuleError::MissingField("kind"))?;

        let (param_names, reserved): (&[&'static str], bool) = match kind_name {
            "fixed" => (&["month", "day"][..], true),
            "nWDOM" => (&["month", "weekday", "n"][..], false),
            "variable" => (&["base", "delta"][..], true),
            other => return Err(RuleError::UnknownKind(other.to_string())),
        };

        // kind + params + flag + label, optionally one reserved column
        let minimum = 1 + param_names.len() + 2;
        let maximum = minimum + usize::from(reserved);
        if self.fields.len() > maximum {
            return Err(RuleError::TooManyFields {
                expected: maximum,
                got: self.fields.len(),
            });
        }
        if self.fields.len() < minimum {
            let missing = if self.fields.len() < 1 + param_names.len() {
                param_names[self.fields.len() - 1]
            } else if self.fields.len() == 1 + param_names.len() {
                "flag"
            } else {
                "label"
            };
            return Err(RuleError::MissingField(missing));
        }

        let params = &self.fields[1..=param_names.len()];
        let flag = &self.fields[self.fields.len() - 2];
        let label = self.fields[self.fields.len() - 1].trim();

        let kind = match kind_name {
            "fixed" => RuleKind::Fixed {
                month: number("month", &params[0])?,
                day: number("day", &params[1])?,
            },
            "nWDOM" => RuleKind::NthWeekday {
                month: number("month", &params[0])?,
                weekday: number("weekday", &params[1])?,
                n: number("n", &params[2])?,
            },
            _ => RuleKind::Variable {
                base: EasterBase::from_name(&params[0])
                    .ok_or_else(|| RuleError::UnknownBase(params[0].trim().to_string()))?,
                delta_days: number("delta", &params[1])?,
            },
        };

        Ok(HolidayRule::new(kind, HolidayCategory::from_flag(flag), label))
    }
}

fn number(field: &'static str, value: &str) -> Result<i64, RuleError> {
    value.trim().parse().map_err(|_| RuleError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// A record that could not be turned into a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRecord {
    pub line: usize,
    pub reason: String,
}

/// Outcome of parsing a batch of records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub rules: Vec<HolidayRule>,
    pub rejected: Vec<RejectedRecord>,
}

impl ParseReport {
    /// Parses every record, keeping the good ones and reporting the rest
    pub fn from_records(records: &[RuleRecord]) -> Self {
        let mut report = ParseReport::default();
        for record in records {
            match record.parse() {
                Ok(rule) => report.rules.push(rule),
                Err(e) => report.rejected.push(RejectedRecord {
                    line: record.line,
                    reason: e.to_string(),
                }),
            }
        }
        report
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(fields: &[&str]) -> Result<HolidayRule, RuleError> {
        RuleRecord::from_fields(1, fields).parse()
    }

    #[test]
    fn parses_fixed_rule() {
        let rule = parse(&["fixed", "12", "25", "1", "Christmas"]).unwrap();
        assert_eq!(rule.kind, RuleKind::Fixed { month: 12, day: 25 });
        assert_eq!(rule.category, HolidayCategory::Holiday);
        assert_eq!(rule.label, "Christmas");
    }

    #[test]
    fn reserved_column_is_ignored() {
        let five = parse(&["fixed", "12", "25", "1", "Christmas"]).unwrap();
        let six = parse(&["fixed", "12", "25", "", "1", "Christmas"]).unwrap();
        assert_eq!(five, six);

        let variable = parse(&["variable", "easter", "-2", "", "1", "Good Friday"]).unwrap();
        assert_eq!(
            variable.kind,
            RuleKind::Variable {
                base: EasterBase::Easter,
                delta_days: -2
            }
        );
    }

    #[test]
    fn parses_nth_weekday_rule() {
        let rule = parse(&["nWDOM", "9", "0", "0", "1", "Labor Day"]).unwrap();
        assert_eq!(
            rule.kind,
            RuleKind::NthWeekday {
                n: 0,
                weekday: 0,
                month: 9
            }
        );
    }

    #[test]
    fn parses_orthodox_base() {
        let rule = parse(&["variable", "easterO", "0", "1", "Orthodox Easter"]).unwrap();
        assert_eq!(
            rule.kind,
            RuleKind::Variable {
                base: EasterBase::EasterJulian,
                delta_days: 0
            }
        );
    }

    #[test]
    fn category_comes_from_flag_field() {
        let vacation = parse(&["fixed", "7", "1", "", "Summer break"]).unwrap();
        let special = parse(&["fixed", "2", "14", "0", "Valentine"]).unwrap();
        assert_eq!(vacation.category, HolidayCategory::Vacation);
        assert_eq!(special.category, HolidayCategory::SpecialDate);
    }

    #[test]
    fn empty_label_is_allowed() {
        let rule = parse(&["fixed", "7", "2", "", ""]).unwrap();
        assert!(rule.label.is_empty());
    }

    #[test]
    fn rejects_malformed_records() {
        assert_eq!(
            parse(&["yearly", "1", "1", "1", "x"]),
            Err(RuleError::UnknownKind("yearly".to_string()))
        );
        assert_eq!(parse(&[""]), Err(RuleError::MissingField("kind")));
        assert_eq!(parse(&["fixed", "12"]), Err(RuleError::MissingField("day")));
        assert_eq!(
            parse(&["fixed", "12", "25", "1"]),
            Err(RuleError::MissingField("label"))
        );
        assert_eq!(
            parse(&["fixed", "Dec", "25", "1", "Christmas"]),
            Err(RuleError::InvalidNumber {
                field: "month",
                value: "Dec".to_string()
            })
        );
        assert_eq!(
            parse(&["variable", "pentecost", "49", "1", "x"]),
            Err(RuleError::UnknownBase("pentecost".to_string()))
        );
        assert!(matches!(
            parse(&["nWDOM", "9", "0", "0", "extra", "1", "Labor Day"]),
            Err(RuleError::TooManyFields { expected: 6, got: 7 })
        ));
    }

    #[test]
    fn report_keeps_going_after_bad_records() {
        let records = vec![
            RuleRecord::from_fields(1, &["fixed", "1", "1", "1", "New Year"]),
            RuleRecord::from_fields(2, &["bogus"]),
            RuleRecord::from_fields(3, &["fixed", "x", "1", "1", "Broken"]),
            RuleRecord::from_fields(4, &["fixed", "12", "25", "1", "Christmas"]),
        ];

        let report = ParseReport::from_records(&records);
        assert_eq!(report.rules.len(), 2);
        assert_eq!(report.rejected_count(), 2);
        assert_eq!(report.rejected[0].line, 2);
        assert_eq!(report.rejected[1].line, 3);
    }

    #[test]
    fn empty_source_is_not_an_error() {
        let report = ParseReport::from_records(&[]);
        assert!(report.rules.is_empty());
        assert!(report.rejected.is_empty());
    }
}
