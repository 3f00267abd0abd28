//! Period calendars: ordered sequences of half-open calendar intervals for a
//! time unit, horizon, and offset, plus quick-select preset resolution.

pub mod quick_select;

pub use quick_select::{resolve_quick_select, QuickSelect, RangeSpec};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Bucketing unit for a projection window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Day,
    Week,
    Fortnight,
    Month,
    Bimonth,
    Quarter,
    HalfYear,
    Year,
}

impl TimeUnit {
    /// Months per period for the month-family units.
    fn months(self) -> Option<i32> {
        match self {
            TimeUnit::Month => Some(1),
            TimeUnit::Bimonth => Some(2),
            TimeUnit::Quarter => Some(3),
            TimeUnit::HalfYear => Some(6),
            TimeUnit::Year => Some(12),
            _ => None,
        }
    }
}

/// Half-open calendar interval `[start, end)` with a display label.
///
/// Periods produced by one `compute_periods` call are contiguous and
/// non-overlapping; a date equal to a shared boundary belongs to the later
/// period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
}

impl Period {
    /// Checked constructor for collaborator-supplied windows; the start must
    /// precede the end.
    pub fn new(start: NaiveDate, end: NaiveDate, label: impl Into<String>) -> Result<Self, CoreError> {
        if start >= end {
            return Err(CoreError::InvalidRange(format!(
                "period start {start} must precede end {end}"
            )));
        }
        Ok(Self {
            start,
            end,
            label: label.into(),
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

/// Computes `horizon_length` contiguous periods of `unit`, where period `i`
/// sits at calendar index `i + offset` relative to the aligned period
/// containing `today`.
pub fn compute_periods(
    unit: TimeUnit,
    horizon_length: u32,
    offset: i32,
    today: NaiveDate,
) -> Vec<Period> {
    let base = align(unit, today);
    let mut periods = Vec::with_capacity(horizon_length as usize);
    for i in 0..horizon_length as i32 {
        let start = advance(unit, base, i + offset);
        let end = advance(unit, base, i + offset + 1);
        periods.push(Period {
            start,
            end,
            label: label_for(unit, start),
        });
    }
    tracing::debug!(?unit, horizon_length, offset, "computed projection periods");
    periods
}

/// Start of the aligned period containing `date`. Daily periods start at the
/// date itself, weekly periods on Monday, fortnightly periods on the 1st or
/// 16th, and month-family periods on their calendar block boundary.
fn align(unit: TimeUnit, date: NaiveDate) -> NaiveDate {
    match unit {
        TimeUnit::Day => date,
        TimeUnit::Week => date - Duration::days(date.weekday().num_days_from_monday() as i64),
        TimeUnit::Fortnight => {
            let day = if date.day() >= 16 { 16 } else { 1 };
            NaiveDate::from_ymd_opt(date.year(), date.month(), day).unwrap_or(date)
        }
        _ => {
            let span = unit.months().unwrap_or(1) as u32;
            let month = (date.month0() / span) * span + 1;
            NaiveDate::from_ymd_opt(date.year(), month, 1).unwrap_or(date)
        }
    }
}

/// Moves an aligned period start by `steps` whole periods (negative allowed).
fn advance(unit: TimeUnit, base: NaiveDate, steps: i32) -> NaiveDate {
    match unit {
        TimeUnit::Day => base + Duration::days(steps as i64),
        TimeUnit::Week => base + Duration::weeks(steps as i64),
        TimeUnit::Fortnight => {
            let half = i64::from(base.day() >= 16);
            let index = (base.year() as i64 * 12 + base.month0() as i64) * 2 + half + steps as i64;
            let month_index = index.div_euclid(2);
            let year = month_index.div_euclid(12) as i32;
            let month = month_index.rem_euclid(12) as u32 + 1;
            let day = if index.rem_euclid(2) == 1 { 16 } else { 1 };
            NaiveDate::from_ymd_opt(year, month, day).unwrap_or(base)
        }
        _ => shift_months(base, steps * unit.months().unwrap_or(1)),
    }
}

fn label_for(unit: TimeUnit, start: NaiveDate) -> String {
    match unit {
        TimeUnit::Day | TimeUnit::Week | TimeUnit::Fortnight => {
            start.format("%Y-%m-%d").to_string()
        }
        TimeUnit::Month => start.format("%Y-%m").to_string(),
        TimeUnit::Bimonth => format!(
            "{}-{:02}/{:02}",
            start.year(),
            start.month(),
            start.month0() % 12 + 2
        ),
        TimeUnit::Quarter => format!("{}-Q{}", start.year(), start.month0() / 3 + 1),
        TimeUnit::HalfYear => format!("{}-H{}", start.year(), start.month0() / 6 + 1),
        TimeUnit::Year => start.year().to_string(),
    }
}

/// Shifts a date by whole months, clamping to the last valid day of the
/// target month.
pub(crate) fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let index = date.year() as i64 * 12 + date.month0() as i64 + months as i64;
    let year = index.div_euclid(12) as i32;
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    (first_next - Duration::days(1)).day()
}
