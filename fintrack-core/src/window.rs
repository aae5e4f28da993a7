//! Time windows: named presets and explicit [start, end] ranges.

use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::time::start_of_day;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// An inclusive [start, end] range. Both bounds are part of the window:
/// a transaction stamped exactly at `end` is inside.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Build an explicit window. Fails when `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            anyhow::bail!("window start {start} is after end {end}");
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts <= self.end
    }

    /// Number of days covered, for per-day averages.
    /// `max(1, round(span_millis / millis_per_day))`, so a single-instant
    /// window still counts as one day.
    pub fn num_days(&self) -> i64 {
        let span = (self.end - self.start).num_milliseconds() as f64;
        ((span / MILLIS_PER_DAY).round() as i64).max(1)
    }

    pub fn span(&self) -> Duration {
        self.end - self.start
    }
}

/// Named presets the UI layer offers. Resolved against an injected `now`
/// so every caller (and every test) controls the clock.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimePeriod {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "yesterday")]
    Yesterday,
    #[serde(rename = "this-week")]
    ThisWeek,
    #[serde(rename = "this-month")]
    ThisMonth,
    #[serde(rename = "this-year")]
    ThisYear,
    #[serde(rename = "last-7-days")]
    Last7Days,
    #[serde(rename = "last-30-days")]
    Last30Days,
    #[serde(rename = "last-90-days")]
    Last90Days,
    #[serde(rename = "all-time")]
    AllTime,
}

impl TimePeriod {
    /// Resolve the preset into a concrete window ending at `now`
    /// (or at the end of the named calendar unit for Yesterday).
    pub fn resolve(&self, now: DateTime<Utc>) -> TimeWindow {
        let today = start_of_day(now);
        let (start, end) = match self {
            TimePeriod::Today => (today, now),
            TimePeriod::Yesterday => {
                (today - Duration::days(1), today - Duration::milliseconds(1))
            }
            TimePeriod::ThisWeek => {
                let back = now.weekday().num_days_from_monday() as i64;
                (today - Duration::days(back), now)
            }
            TimePeriod::ThisMonth => {
                let first = Utc
                    .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
                    .unwrap();
                (first, now)
            }
            TimePeriod::ThisYear => {
                let first = Utc.with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0).unwrap();
                (first, now)
            }
            TimePeriod::Last7Days => (now - Duration::days(7), now),
            TimePeriod::Last30Days => (now - Duration::days(30), now),
            TimePeriod::Last90Days => (now - Duration::days(90), now),
            TimePeriod::AllTime => (Utc.timestamp_millis_opt(0).unwrap(), now),
        };
        TimeWindow { start, end }
    }
}
