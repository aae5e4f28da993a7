//! Trend bucketing: re-buckets a window's transactions into a labeled time
//! series, picking granularity from the window span.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use fintrack_core::time::{start_of_day, start_of_hour};
use fintrack_core::{Transaction, TimeWindow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a window is sliced into buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Hourly,
    Daily,
    Monthly,
}

/// One point of a spending series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    /// Bucket start (top of hour, midnight, or first of month)
    pub date: DateTime<Utc>,
    pub amount: f64,
    /// Chart axis label, formatted for the window span
    pub label: String,
}

/// One day's debit/credit split with a weekday label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySpendPoint {
    pub date: NaiveDate,
    pub spent: f64,
    pub received: f64,
    pub day_label: String,
}

/// Stateless series builder.
///
/// Buckets with no matching transactions are omitted, not zero-filled;
/// callers that need a continuous axis fill the gaps themselves.
pub struct TrendBucketer;

impl TrendBucketer {
    /// Debit totals bucketed by the window's natural granularity,
    /// ascending by bucket start. Duplicate keys merge by summation.
    pub fn spending_trend(txns: &[Transaction], window: TimeWindow) -> Vec<TrendPoint> {
        let granularity = Self::granularity(window);

        let mut buckets: BTreeMap<DateTime<Utc>, f64> = BTreeMap::new();
        for t in txns.iter().filter(|t| window.contains(t.timestamp)) {
            if !t.is_debit() {
                continue;
            }
            *buckets.entry(bucket_start(t.timestamp, granularity)).or_insert(0.0) += t.amount;
        }

        buckets
            .into_iter()
            .map(|(date, amount)| TrendPoint {
                date,
                amount,
                label: Self::label(date, window),
            })
            .collect()
    }

    /// Per-day debit/credit split, ascending, weekday-labeled. Always daily
    /// regardless of span.
    pub fn daily_spending(txns: &[Transaction], window: TimeWindow) -> Vec<DailySpendPoint> {
        let mut days: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
        for t in txns.iter().filter(|t| window.contains(t.timestamp)) {
            let entry = days.entry(t.timestamp.date_naive()).or_insert((0.0, 0.0));
            if t.is_debit() {
                entry.0 += t.amount;
            } else {
                entry.1 += t.amount;
            }
        }

        days.into_iter()
            .map(|(date, (spent, received))| DailySpendPoint {
                date,
                spent,
                received,
                day_label: date.format("%a").to_string(),
            })
            .collect()
    }

    /// Bucket granularity for a window span: a day or less is hourly,
    /// up to 90 days is daily, anything longer is monthly. Exact
    /// comparisons, so a 25-hour window is already daily.
    pub fn granularity(window: TimeWindow) -> Granularity {
        let span = window.span();
        if span <= Duration::days(1) {
            Granularity::Hourly
        } else if span <= Duration::days(90) {
            Granularity::Daily
        } else {
            Granularity::Monthly
        }
    }

    fn label(bucket: DateTime<Utc>, window: TimeWindow) -> String {
        let span = window.span();
        match Self::granularity(window) {
            Granularity::Hourly => bucket.format("%H:00").to_string(),
            Granularity::Daily => {
                if span <= Duration::days(7) {
                    bucket.format("%a").to_string()
                } else if span <= Duration::days(14) {
                    bucket.format("%d").to_string()
                } else {
                    bucket.format("%d %b").to_string()
                }
            }
            Granularity::Monthly => {
                if span > Duration::days(365) {
                    bucket.format("%b %y").to_string()
                } else {
                    bucket.format("%b").to_string()
                }
            }
        }
    }
}

fn bucket_start(ts: DateTime<Utc>, granularity: Granularity) -> DateTime<Utc> {
    match granularity {
        Granularity::Hourly => start_of_hour(ts),
        Granularity::Daily => start_of_day(ts),
        Granularity::Monthly => Utc
            .with_ymd_and_hms(ts.year(), ts.month(), 1, 0, 0, 0)
            .unwrap(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use fintrack_core::Direction;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn debit(id: &str, amount: f64, ts: DateTime<Utc>) -> Transaction {
        Transaction::new(id, amount, Direction::Debit, ts)
    }

    #[test]
    fn test_hourly_buckets_for_single_day_window() {
        let start = at(2026, 3, 4, 0, 0);
        let window = TimeWindow::new(start, at(2026, 3, 4, 23, 59)).unwrap();
        let txns = vec![
            debit("t1", 10.0, at(2026, 3, 4, 9, 15)),
            debit("t2", 5.0, at(2026, 3, 4, 9, 45)),
            debit("t3", 20.0, at(2026, 3, 4, 18, 5)),
        ];

        let trend = TrendBucketer::spending_trend(&txns, window);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].label, "09:00");
        assert_eq!(trend[0].amount, 15.0);
        assert_eq!(trend[1].label, "18:00");
    }

    #[test]
    fn test_just_over_one_day_switches_to_daily() {
        // 24h at the boundary stays hourly; one minute more is daily.
        let exact = TimeWindow::new(at(2026, 3, 4, 0, 0), at(2026, 3, 5, 0, 0)).unwrap();
        assert_eq!(TrendBucketer::granularity(exact), Granularity::Hourly);

        let over = TimeWindow::new(at(2026, 3, 4, 0, 0), at(2026, 3, 5, 0, 1)).unwrap();
        assert_eq!(TrendBucketer::granularity(over), Granularity::Daily);

        let txns = vec![
            debit("t1", 10.0, at(2026, 3, 4, 9, 15)),
            debit("t2", 5.0, at(2026, 3, 5, 0, 0)),
        ];
        let trend = TrendBucketer::spending_trend(&txns, over);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].label, "Wed");
        assert_eq!(trend[1].label, "Thu");
    }

    #[test]
    fn test_weekday_labels_for_week_window() {
        // Mon 2026-03-02 .. Sun 2026-03-08
        let window = TimeWindow::new(at(2026, 3, 2, 0, 0), at(2026, 3, 8, 23, 59)).unwrap();
        let txns = vec![
            debit("t1", 30.0, at(2026, 3, 3, 10, 0)),
            debit("t2", 12.0, at(2026, 3, 6, 20, 0)),
        ];

        let trend = TrendBucketer::spending_trend(&txns, window);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].label, "Tue");
        assert_eq!(trend[1].label, "Fri");
    }

    #[test]
    fn test_day_month_labels_beyond_two_weeks() {
        let window = TimeWindow::new(at(2026, 1, 1, 0, 0), at(2026, 2, 15, 0, 0)).unwrap();
        let txns = vec![debit("t1", 50.0, at(2026, 1, 20, 12, 0))];

        let trend = TrendBucketer::spending_trend(&txns, window);
        assert_eq!(trend[0].label, "20 Jan");
    }

    #[test]
    fn test_monthly_buckets_beyond_90_days() {
        let window = TimeWindow::new(at(2025, 10, 1, 0, 0), at(2026, 3, 1, 0, 0)).unwrap();
        let txns = vec![
            debit("t1", 100.0, at(2025, 11, 3, 9, 0)),
            debit("t2", 40.0, at(2025, 11, 28, 9, 0)),
            debit("t3", 75.0, at(2026, 2, 10, 9, 0)),
        ];

        let trend = TrendBucketer::spending_trend(&txns, window);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].label, "Nov");
        assert_eq!(trend[0].amount, 140.0);
        assert_eq!(trend[1].label, "Feb");
    }

    #[test]
    fn test_year_suffix_for_multi_year_window() {
        let window = TimeWindow::new(at(2024, 6, 1, 0, 0), at(2026, 3, 1, 0, 0)).unwrap();
        let txns = vec![debit("t1", 10.0, at(2025, 1, 15, 0, 0))];

        let trend = TrendBucketer::spending_trend(&txns, window);
        assert_eq!(trend[0].label, "Jan 25");
    }

    #[test]
    fn test_credits_excluded_from_spending_trend() {
        let window = TimeWindow::new(at(2026, 3, 2, 0, 0), at(2026, 3, 8, 0, 0)).unwrap();
        let txns = vec![
            debit("t1", 30.0, at(2026, 3, 3, 10, 0)),
            Transaction::new("t2", 900.0, Direction::Credit, at(2026, 3, 3, 11, 0)),
        ];

        let trend = TrendBucketer::spending_trend(&txns, window);
        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].amount, 30.0);
    }

    #[test]
    fn test_sparse_series_keeps_empty_days_out() {
        // Deliberate sparse-series semantics: quiet days produce no point.
        let window = TimeWindow::new(at(2026, 3, 2, 0, 0), at(2026, 3, 8, 0, 0)).unwrap();
        let txns = vec![
            debit("t1", 5.0, at(2026, 3, 2, 9, 0)),
            debit("t2", 5.0, at(2026, 3, 7, 9, 0)),
        ];

        let daily = TrendBucketer::daily_spending(&txns, window);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(daily[1].date, NaiveDate::from_ymd_opt(2026, 3, 7).unwrap());
    }

    #[test]
    fn test_daily_spending_splits_directions() {
        let window = TimeWindow::new(at(2026, 3, 2, 0, 0), at(2026, 3, 8, 0, 0)).unwrap();
        let ts = at(2026, 3, 4, 12, 0);
        let txns = vec![
            debit("t1", 45.0, ts),
            Transaction::new("t2", 250.0, Direction::Credit, ts + Duration::hours(1)),
        ];

        let daily = TrendBucketer::daily_spending(&txns, window);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].spent, 45.0);
        assert_eq!(daily[0].received, 250.0);
        assert_eq!(daily[0].day_label, "Wed");
    }
}
