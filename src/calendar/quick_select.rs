use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::TimeUnit;
use crate::errors::CoreError;

/// Window parameters a quick-select preset resolves to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RangeSpec {
    pub unit: TimeUnit,
    pub horizon_length: u32,
    pub offset: i32,
}

/// Named window presets. Each resolves to a `(unit, horizon, offset)` triple
/// as a pure function of `today`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum QuickSelect {
    Today,
    ThisWeek,
    ThisMonth,
    ThisQuarter,
    ThisYear,
    TwoYears,
    ThreeYears,
    FiveYears,
}

impl QuickSelect {
    /// Resolves the preset against `today`.
    ///
    /// Sub-month presets bucket in fortnights, so when `today` falls in the
    /// second half of a month the offset must step back one extra bucket to
    /// land on the month boundary.
    pub fn resolve(self, today: NaiveDate) -> RangeSpec {
        let month0 = today.month0() as i32;
        let second_half = i32::from(today.day() >= 16);
        match self {
            QuickSelect::Today => RangeSpec {
                unit: TimeUnit::Day,
                horizon_length: 1,
                offset: 0,
            },
            QuickSelect::ThisWeek => RangeSpec {
                unit: TimeUnit::Day,
                horizon_length: 7,
                offset: -(today.weekday().num_days_from_monday() as i32),
            },
            QuickSelect::ThisMonth => RangeSpec {
                unit: TimeUnit::Fortnight,
                horizon_length: 2,
                offset: -second_half,
            },
            QuickSelect::ThisQuarter => RangeSpec {
                unit: TimeUnit::Fortnight,
                horizon_length: 6,
                offset: -((month0 % 3) * 2 + second_half),
            },
            QuickSelect::ThisYear => RangeSpec {
                unit: TimeUnit::Month,
                horizon_length: 12,
                offset: -month0,
            },
            QuickSelect::TwoYears => RangeSpec {
                unit: TimeUnit::Quarter,
                horizon_length: 8,
                offset: -(month0 / 3),
            },
            QuickSelect::ThreeYears => RangeSpec {
                unit: TimeUnit::Quarter,
                horizon_length: 12,
                offset: -(month0 / 3),
            },
            QuickSelect::FiveYears => RangeSpec {
                unit: TimeUnit::HalfYear,
                horizon_length: 10,
                offset: -(month0 / 6),
            },
        }
    }
}

impl FromStr for QuickSelect {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match key.as_str() {
            "today" => Ok(QuickSelect::Today),
            "this week" => Ok(QuickSelect::ThisWeek),
            "this month" => Ok(QuickSelect::ThisMonth),
            "this quarter" => Ok(QuickSelect::ThisQuarter),
            "this year" => Ok(QuickSelect::ThisYear),
            "two years" => Ok(QuickSelect::TwoYears),
            "three years" => Ok(QuickSelect::ThreeYears),
            "five years" => Ok(QuickSelect::FiveYears),
            _ => Err(CoreError::UnknownQuickSelect(s.trim().to_string())),
        }
    }
}

/// Resolves a preset by name, e.g. `"this quarter"`.
pub fn resolve_quick_select(name: &str, today: NaiveDate) -> Result<RangeSpec, CoreError> {
    Ok(QuickSelect::from_str(name)?.resolve(today))
}
