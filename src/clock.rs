use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Reference clock for one projection pass.
///
/// `today` is resolved exactly once from an instant plus the viewer's
/// timezone offset. Projection code takes the resolved date as a parameter
/// and never samples ambient wall-clock time, so a pass cannot straddle a
/// date change halfway through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReferenceClock {
    pub today: NaiveDate,
    pub utc_offset_minutes: i32,
}

impl ReferenceClock {
    /// Resolves the local calendar date for `now` under the given offset.
    pub fn resolve(now: DateTime<Utc>, utc_offset_minutes: i32) -> Self {
        let local = now + Duration::minutes(utc_offset_minutes as i64);
        Self {
            today: local.date_naive(),
            utc_offset_minutes,
        }
    }

    /// Clock pinned to a known date, for tests and replays.
    pub fn fixed(today: NaiveDate) -> Self {
        Self {
            today,
            utc_offset_minutes: 0,
        }
    }
}
