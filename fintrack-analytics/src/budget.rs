//! Budget tracking: actual spend against monthly limits.

use fintrack_core::{Budget, Transaction};
use serde::{Deserialize, Serialize};

/// One budget's utilization for its calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub spent: f64,
    /// Negative when over the limit; the sign is the overspend signal
    pub remaining: f64,
    /// 0 when the limit is non-positive
    pub percent_used: f64,
    pub is_over_limit: bool,
}

/// Stateless check of budgets against transaction history.
pub struct BudgetTracker;

impl BudgetTracker {
    /// Utilization for every budget in `budgets`. Spend counts debit
    /// transactions inside the budget's calendar month; an overall budget
    /// (no category) counts every debit, a category budget only its own.
    pub fn status(budgets: &[Budget], txns: &[Transaction]) -> Vec<BudgetStatus> {
        budgets
            .iter()
            .map(|budget| {
                let spent: f64 = txns
                    .iter()
                    .filter(|t| t.is_debit() && budget.covers(t.timestamp))
                    .filter(|t| match budget.category_id {
                        None => true,
                        Some(id) => t.category_id == Some(id),
                    })
                    .map(|t| t.amount)
                    .sum();

                let percent_used = if budget.limit > 0.0 {
                    spent / budget.limit * 100.0
                } else {
                    0.0
                };

                BudgetStatus {
                    spent,
                    remaining: budget.limit - spent,
                    percent_used,
                    is_over_limit: spent > budget.limit,
                    budget: budget.clone(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use fintrack_core::Direction;

    fn at(y: i32, mo: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, 12, 0, 0).unwrap()
    }

    fn debit(id: &str, amount: f64, ts: DateTime<Utc>) -> Transaction {
        Transaction::new(id, amount, Direction::Debit, ts)
    }

    #[test]
    fn test_overall_budget_counts_all_debits() {
        let budgets = vec![Budget::overall(3, 2026, 1_000.0)];
        let txns = vec![
            debit("t1", 300.0, at(2026, 3, 5)).with_category(1),
            debit("t2", 200.0, at(2026, 3, 20)),
            debit("t3", 999.0, at(2026, 4, 1)), // next month
            Transaction::new("t4", 5_000.0, Direction::Credit, at(2026, 3, 10)),
        ];

        let status = &BudgetTracker::status(&budgets, &txns)[0];
        assert_eq!(status.spent, 500.0);
        assert_eq!(status.remaining, 500.0);
        assert_eq!(status.percent_used, 50.0);
        assert!(!status.is_over_limit);
    }

    #[test]
    fn test_category_budget_only_counts_its_category() {
        let budgets = vec![Budget::for_category(3, 2026, 7, 100.0)];
        let txns = vec![
            debit("t1", 80.0, at(2026, 3, 5)).with_category(7),
            debit("t2", 60.0, at(2026, 3, 6)).with_category(8),
            debit("t3", 40.0, at(2026, 3, 7)).with_category(7),
        ];

        let status = &BudgetTracker::status(&budgets, &txns)[0];
        assert_eq!(status.spent, 120.0);
        assert_eq!(status.remaining, -20.0);
        assert!(status.is_over_limit);
        assert!((status.percent_used - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_limit_reports_zero_percent() {
        let budgets = vec![Budget::overall(3, 2026, 0.0)];
        let txns = vec![debit("t1", 10.0, at(2026, 3, 5))];

        let status = &BudgetTracker::status(&budgets, &txns)[0];
        assert_eq!(status.percent_used, 0.0);
        assert!(status.is_over_limit);
    }
}
