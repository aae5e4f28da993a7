//! Period aggregation: totals, category breakdowns, daily buckets and
//! merchant rankings over a time window.

use chrono::NaiveDate;
use fintrack_core::{Category, Transaction, TimeWindow};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Fallback bucket for debits with no (or an unknown) category id.
const UNCATEGORIZED: &str = "Uncategorized";

/// Headline numbers for one window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodSummary {
    pub total_spent: f64,
    pub total_received: f64,
    pub transaction_count: usize,
    /// Spend divided by the number of days the window covers
    pub average_daily: f64,
    /// Category with the highest debit total, None when nothing was spent
    pub top_category: Option<String>,
}

/// Debit total for one category within a window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySpend {
    pub name: String,
    pub total: f64,
    pub count: usize,
    /// Share of the window's total spend, 0-100
    pub percentage: f64,
}

/// One calendar day's debit/credit totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub spent: f64,
    pub received: f64,
}

/// Spending total for one merchant within a window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MerchantTotal {
    pub merchant: String,
    pub total: f64,
    pub count: usize,
}

/// Stateless aggregation over transaction slices. Inclusion is always
/// inclusive on both window bounds.
pub struct PeriodAggregator;

impl PeriodAggregator {
    /// Totals, count, per-day average and top spending category for `window`.
    pub fn summarize(
        txns: &[Transaction],
        window: TimeWindow,
        categories: &[Category],
    ) -> PeriodSummary {
        let in_window: Vec<&Transaction> = Self::filter(txns, window);

        let total_spent: f64 = in_window
            .iter()
            .filter(|t| t.is_debit())
            .map(|t| t.amount)
            .sum();
        let total_received: f64 = in_window
            .iter()
            .filter(|t| t.is_credit())
            .map(|t| t.amount)
            .sum();

        let top_category = Self::top_category(&in_window, categories);

        PeriodSummary {
            total_spent,
            total_received,
            transaction_count: in_window.len(),
            average_daily: total_spent / window.num_days() as f64,
            top_category,
        }
    }

    /// Debit totals grouped by category, descending by total (ties broken by
    /// name ascending). Credits never count toward category spending.
    ///
    /// With `rollup` set, a subcategory's spend is attributed to its
    /// top-level parent.
    pub fn category_breakdown(
        txns: &[Transaction],
        window: TimeWindow,
        categories: &[Category],
        rollup: bool,
    ) -> Vec<CategorySpend> {
        let lookup: HashMap<i64, &Category> = categories.iter().map(|c| (c.id, c)).collect();

        let mut groups: HashMap<String, (f64, usize)> = HashMap::new();
        for t in txns.iter().filter(|t| window.contains(t.timestamp)) {
            if !t.is_debit() {
                continue;
            }
            let name = resolve_name(t.category_id, &lookup, rollup);
            let entry = groups.entry(name).or_insert((0.0, 0));
            entry.0 += t.amount;
            entry.1 += 1;
        }

        let grand_total: f64 = groups.values().map(|(total, _)| total).sum();

        let mut result: Vec<CategorySpend> = groups
            .into_iter()
            .map(|(name, (total, count))| CategorySpend {
                name,
                total,
                count,
                percentage: if grand_total > 0.0 {
                    total / grand_total * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        result.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        result
    }

    /// Per-day debit/credit totals, ascending by date. Days with no
    /// transactions are omitted.
    pub fn daily_buckets(txns: &[Transaction], window: TimeWindow) -> Vec<DailyBucket> {
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
            .map(|(date, (spent, received))| DailyBucket {
                date,
                spent,
                received,
            })
            .collect()
    }

    /// Top `n` merchants by debit total, descending; ties broken by merchant
    /// name ascending. Transactions without a merchant are skipped.
    pub fn top_merchants(
        txns: &[Transaction],
        window: TimeWindow,
        n: usize,
    ) -> Vec<MerchantTotal> {
        let mut groups: HashMap<&str, (f64, usize)> = HashMap::new();
        for t in txns.iter().filter(|t| window.contains(t.timestamp)) {
            if !t.is_debit() {
                continue;
            }
            let Some(merchant) = t.merchant.as_deref() else {
                continue;
            };
            let entry = groups.entry(merchant).or_insert((0.0, 0));
            entry.0 += t.amount;
            entry.1 += 1;
        }

        let mut result: Vec<MerchantTotal> = groups
            .into_iter()
            .map(|(merchant, (total, count))| MerchantTotal {
                merchant: merchant.to_string(),
                total,
                count,
            })
            .collect();

        result.sort_by(|a, b| {
            b.total
                .partial_cmp(&a.total)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.merchant.cmp(&b.merchant))
        });
        result.truncate(n);
        result
    }

    fn filter(txns: &[Transaction], window: TimeWindow) -> Vec<&Transaction> {
        txns.iter().filter(|t| window.contains(t.timestamp)).collect()
    }

    fn top_category(in_window: &[&Transaction], categories: &[Category]) -> Option<String> {
        let lookup: HashMap<i64, &Category> = categories.iter().map(|c| (c.id, c)).collect();

        let mut totals: HashMap<String, f64> = HashMap::new();
        for t in in_window.iter().filter(|t| t.is_debit()) {
            *totals
                .entry(resolve_name(t.category_id, &lookup, false))
                .or_insert(0.0) += t.amount;
        }

        totals
            .into_iter()
            .max_by(|(na, ta), (nb, tb)| {
                ta.partial_cmp(tb)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    // On equal totals prefer the alphabetically first name.
                    .then_with(|| nb.cmp(na))
            })
            .map(|(name, _)| name)
    }
}

fn resolve_name(
    category_id: Option<i64>,
    lookup: &HashMap<i64, &Category>,
    rollup: bool,
) -> String {
    let Some(cat) = category_id.and_then(|id| lookup.get(&id)) else {
        return UNCATEGORIZED.to_string();
    };
    if rollup {
        if let Some(parent) = cat.parent_id.and_then(|pid| lookup.get(&pid)) {
            return parent.name.clone();
        }
    }
    cat.name.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use fintrack_core::{Direction, TimePeriod};

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    fn debit(id: &str, amount: f64, ts: DateTime<Utc>) -> Transaction {
        Transaction::new(id, amount, Direction::Debit, ts)
    }

    fn credit(id: &str, amount: f64, ts: DateTime<Utc>) -> Transaction {
        Transaction::new(id, amount, Direction::Credit, ts)
    }

    #[test]
    fn test_summary_last_7_days_scenario() {
        let now = at(2026, 3, 10, 12);
        let txns = vec![
            debit("t1", 150.0, now),
            debit("t2", 50.0, now - Duration::days(1)),
            debit("t3", 200.0, now - Duration::days(2)),
            credit("t4", 1000.0, now - Duration::days(3)),
        ];
        let window = TimePeriod::Last7Days.resolve(now);

        let summary = PeriodAggregator::summarize(&txns, window, &[]);
        assert_eq!(summary.total_spent, 400.0);
        assert_eq!(summary.total_received, 1000.0);
        assert_eq!(summary.transaction_count, 4);
    }

    #[test]
    fn test_boundary_transaction_at_window_end_included() {
        let start = at(2026, 3, 1, 0);
        let end = at(2026, 3, 8, 0);
        let window = TimeWindow::new(start, end).unwrap();
        let txns = vec![debit("edge", 10.0, end), debit("out", 5.0, end + Duration::milliseconds(1))];

        let summary = PeriodAggregator::summarize(&txns, window, &[]);
        assert_eq!(summary.transaction_count, 1);
        assert_eq!(summary.total_spent, 10.0);
    }

    #[test]
    fn test_average_daily_single_instant_window() {
        let t = at(2026, 3, 1, 9);
        let window = TimeWindow::new(t, t).unwrap();
        let txns = vec![debit("t1", 75.0, t)];

        let summary = PeriodAggregator::summarize(&txns, window, &[]);
        assert_eq!(summary.average_daily, 75.0);
    }

    #[test]
    fn test_top_category_ignores_credits() {
        let now = at(2026, 3, 10, 12);
        let window = TimePeriod::Last30Days.resolve(now);
        let categories = vec![Category::new(1, "Food"), Category::new(2, "Salary")];
        let txns = vec![
            debit("t1", 80.0, now).with_category(1),
            credit("t2", 5000.0, now).with_category(2),
        ];

        let summary = PeriodAggregator::summarize(&txns, window, &categories);
        assert_eq!(summary.top_category.as_deref(), Some("Food"));
    }

    #[test]
    fn test_top_category_none_without_debits() {
        let now = at(2026, 3, 10, 12);
        let window = TimePeriod::Last30Days.resolve(now);
        let txns = vec![credit("t1", 100.0, now)];

        let summary = PeriodAggregator::summarize(&txns, window, &[]);
        assert_eq!(summary.top_category, None);
    }

    #[test]
    fn test_breakdown_sorted_and_percentages() {
        let now = at(2026, 3, 10, 12);
        let window = TimePeriod::Last30Days.resolve(now);
        let categories = vec![Category::new(1, "Food"), Category::new(2, "Transport")];
        let txns = vec![
            debit("t1", 30.0, now).with_category(2),
            debit("t2", 60.0, now).with_category(1),
            debit("t3", 10.0, now).with_category(1),
            debit("t4", 30.0, now), // no category
        ];

        let breakdown = PeriodAggregator::category_breakdown(&txns, window, &categories, false);
        assert_eq!(breakdown.len(), 3);
        assert_eq!(breakdown[0].name, "Food");
        assert_eq!(breakdown[0].total, 70.0);
        assert_eq!(breakdown[0].count, 2);
        // Transport and Uncategorized both at 30: name order breaks the tie
        assert_eq!(breakdown[1].name, "Transport");
        assert_eq!(breakdown[2].name, UNCATEGORIZED);
        assert!((breakdown[0].percentage - 53.846).abs() < 0.01);
    }

    #[test]
    fn test_breakdown_rollup_to_parent() {
        let now = at(2026, 3, 10, 12);
        let window = TimePeriod::Last30Days.resolve(now);
        let categories = vec![
            Category::new(1, "Food"),
            Category::new(2, "Groceries").with_parent(1),
            Category::new(3, "Restaurants").with_parent(1),
        ];
        let txns = vec![
            debit("t1", 40.0, now).with_category(2),
            debit("t2", 25.0, now).with_category(3),
        ];

        let rolled = PeriodAggregator::category_breakdown(&txns, window, &categories, true);
        assert_eq!(rolled.len(), 1);
        assert_eq!(rolled[0].name, "Food");
        assert_eq!(rolled[0].total, 65.0);

        let flat = PeriodAggregator::category_breakdown(&txns, window, &categories, false);
        assert_eq!(flat.len(), 2);
    }

    #[test]
    fn test_daily_buckets_sum_matches_summary() {
        let now = at(2026, 3, 10, 12);
        let window = TimePeriod::Last7Days.resolve(now);
        let txns = vec![
            debit("t1", 150.0, now),
            debit("t2", 50.0, now - Duration::days(1)),
            debit("t3", 200.0, now - Duration::days(2)),
            credit("t4", 1000.0, now - Duration::days(3)),
        ];

        let buckets = PeriodAggregator::daily_buckets(&txns, window);
        let summary = PeriodAggregator::summarize(&txns, window, &[]);

        let bucket_spent: f64 = buckets.iter().map(|b| b.spent).sum();
        let bucket_received: f64 = buckets.iter().map(|b| b.received).sum();
        assert_eq!(bucket_spent, summary.total_spent);
        assert_eq!(bucket_received, summary.total_received);

        // Ascending by date, empty days omitted
        assert_eq!(buckets.len(), 4);
        for w in buckets.windows(2) {
            assert!(w[0].date < w[1].date);
        }
    }

    #[test]
    fn test_top_merchants_ranking_and_ties() {
        let now = at(2026, 3, 10, 12);
        let window = TimePeriod::Last30Days.resolve(now);
        let txns = vec![
            debit("t1", 30.0, now).with_merchant("Cafe Uno"),
            debit("t2", 35.0, now).with_merchant("Bodega"),
            debit("t3", 15.0, now).with_merchant("Cafe Uno"),
            debit("t4", 35.0, now).with_merchant("Apteka"),
            debit("t5", 99.0, now), // merchant unknown, skipped
            credit("t6", 500.0, now).with_merchant("Employer"),
        ];

        let top = PeriodAggregator::top_merchants(&txns, window, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].merchant, "Cafe Uno");
        assert_eq!(top[0].total, 45.0);
        assert_eq!(top[0].count, 2);
        // 35.0 tie between Apteka and Bodega: alphabetical wins
        assert_eq!(top[1].merchant, "Apteka");
        assert_eq!(top[1].total, 35.0);
    }

    #[test]
    fn test_idempotent_summaries() {
        let now = at(2026, 3, 10, 12);
        let window = TimePeriod::Last7Days.resolve(now);
        let txns = vec![debit("t1", 12.5, now), credit("t2", 7.0, now)];

        let a = PeriodAggregator::summarize(&txns, window, &[]);
        let b = PeriodAggregator::summarize(&txns, window, &[]);
        assert_eq!(a, b);
    }
}
