//! Boundary-aligned `[start, end)` windows in epoch seconds.
//!
//! Repeated scheduled invocations must see adjacent, non-overlapping windows,
//! so every window ends on a boundary derived from `now` rather than on `now`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DAY_SECONDS: i64 = 86_400;
pub const WEEK_SECONDS: i64 = 7 * DAY_SECONDS;
pub const FIFTEEN_MINUTE_SECONDS: i64 = 900;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    pub fn ending_at(end: i64, length_seconds: i64) -> Self {
        Self {
            start: end - length_seconds,
            end,
        }
    }

    pub fn len_seconds(&self) -> i64 {
        self.end - self.start
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.start && timestamp < self.end
    }
}

fn start_of_day(now: DateTime<Utc>) -> i64 {
    let timestamp = now.timestamp();
    timestamp - timestamp.rem_euclid(DAY_SECONDS)
}

/// The previous UTC calendar day.
pub fn yesterday(now: DateTime<Utc>) -> TimeWindow {
    TimeWindow::ending_at(start_of_day(now), DAY_SECONDS)
}

/// The seven UTC days ending at midnight today.
pub fn last_week(now: DateTime<Utc>) -> TimeWindow {
    TimeWindow::ending_at(start_of_day(now), WEEK_SECONDS)
}

/// The most recent completed quarter hour.
pub fn last_15_minutes(now: DateTime<Utc>) -> TimeWindow {
    let timestamp = now.timestamp();
    let end = timestamp - timestamp.rem_euclid(FIFTEEN_MINUTE_SECONDS);
    TimeWindow::ending_at(end, FIFTEEN_MINUTE_SECONDS)
}
