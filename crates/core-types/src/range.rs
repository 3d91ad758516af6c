use crate::enums::RangePreset;
use crate::error::CoreError;
use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive calendar-date range, as sent to the report endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one day.
    pub fn single_day(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    /// Resolves a quick-select preset relative to `today`. The range always ends today.
    pub fn from_preset(preset: RangePreset, today: NaiveDate) -> Self {
        let start = match preset {
            RangePreset::Last24Hours => today.checked_sub_days(Days::new(1)),
            RangePreset::Last7Days => today.checked_sub_days(Days::new(7)),
            RangePreset::Last30Days => today.checked_sub_days(Days::new(30)),
            RangePreset::YearToDate => NaiveDate::from_ymd_opt(today.year(), 1, 1),
            RangePreset::LastYear => today.checked_sub_months(Months::new(12)),
        };
        Self {
            start: start.unwrap_or(today),
            end: today,
        }
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.contains_date(at.date())
    }

    /// `(start_date, end_date)` in the `YYYY-MM-DD` form the endpoint expects.
    pub fn query_dates(&self) -> (String, String) {
        (
            self.start.format("%Y-%m-%d").to_string(),
            self.end.format("%Y-%m-%d").to_string(),
        )
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.start, self.end)
    }
}
