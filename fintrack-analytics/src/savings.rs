//! Savings projection: income/expense analysis, tiered suggestions and
//! required-monthly-contribution planning.

use chrono::{DateTime, Utc};
use fintrack_core::time::months_between;
use fintrack_core::{TimePeriod, TimeWindow, Transaction};
use serde::{Deserialize, Serialize};

use crate::period::PeriodAggregator;

/// Daily-spend coefficient of variation above which the recommendation is
/// forced to Conservative regardless of savings rate. Tunable; calibrated
/// against the scenario fixtures, not an exact contract.
pub const HIGH_VARIANCE_CV: f64 = 1.0;

/// Risk tier for a savings suggestion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SavingsLevel {
    #[serde(rename = "conservative")]
    Conservative,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "aggressive")]
    Aggressive,
}

impl SavingsLevel {
    /// Share of net income this tier suggests putting aside.
    pub fn rate(&self) -> f64 {
        match self {
            SavingsLevel::Conservative => 0.20,
            SavingsLevel::Moderate => 0.35,
            SavingsLevel::Aggressive => 0.50,
        }
    }
}

/// Income/expense split over a window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeExpenseAnalysis {
    pub total_income: f64,
    pub total_expense: f64,
    pub net_income: f64,
    pub income_count: usize,
    pub expense_count: usize,
    pub avg_daily_income: f64,
    pub avg_daily_expense: f64,
    /// Net income as a share of income, 0 when there is no income
    pub savings_rate: f64,
}

/// Tiered suggestion amounts plus the recommended tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsSuggestion {
    pub conservative: f64,
    pub moderate: f64,
    pub aggressive: f64,
    pub recommended: SavingsLevel,
    pub analysis: String,
}

/// What it takes per month to hit a target by a deadline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyRecommendation {
    pub required_monthly: f64,
    pub months_remaining: i64,
    pub is_affordable: bool,
    pub target_amount: f64,
    pub current_savings: f64,
}

/// Stateless projection over transaction history.
pub struct SavingsProjector;

impl SavingsProjector {
    /// Split a window's transactions into income (credit) and expense
    /// (debit) totals with per-day averages.
    pub fn analyze_income_expense(
        txns: &[Transaction],
        window: TimeWindow,
    ) -> IncomeExpenseAnalysis {
        let mut total_income = 0.0;
        let mut total_expense = 0.0;
        let mut income_count = 0;
        let mut expense_count = 0;

        for t in txns.iter().filter(|t| window.contains(t.timestamp)) {
            if t.is_credit() {
                total_income += t.amount;
                income_count += 1;
            } else {
                total_expense += t.amount;
                expense_count += 1;
            }
        }

        let days = window.num_days() as f64;
        let net_income = total_income - total_expense;
        let savings_rate = if total_income > 0.0 {
            net_income / total_income * 100.0
        } else {
            0.0
        };

        IncomeExpenseAnalysis {
            total_income,
            total_expense,
            net_income,
            income_count,
            expense_count,
            avg_daily_income: total_income / days,
            avg_daily_expense: total_expense / days,
            savings_rate,
        }
    }

    /// Tiered savings amounts (20/35/50% of net income) and a recommended
    /// tier. When spending exceeds income all tiers are zero; day-to-day
    /// spending volatility can force Conservative over an otherwise high
    /// savings rate.
    pub fn suggest(txns: &[Transaction], window: TimeWindow) -> SavingsSuggestion {
        let analysis = Self::analyze_income_expense(txns, window);

        if analysis.net_income <= 0.0 {
            return SavingsSuggestion {
                conservative: 0.0,
                moderate: 0.0,
                aggressive: 0.0,
                recommended: SavingsLevel::Conservative,
                analysis: format!(
                    "Spending ({:.2}) exceeded income ({:.2}) this period; nothing left to save.",
                    analysis.total_expense, analysis.total_income
                ),
            };
        }

        let cv = Self::daily_spend_variation(txns, window);
        let recommended = if cv > HIGH_VARIANCE_CV {
            SavingsLevel::Conservative
        } else if analysis.savings_rate >= 50.0 {
            SavingsLevel::Aggressive
        } else if analysis.savings_rate >= 25.0 {
            SavingsLevel::Moderate
        } else {
            SavingsLevel::Conservative
        };

        SavingsSuggestion {
            conservative: analysis.net_income * SavingsLevel::Conservative.rate(),
            moderate: analysis.net_income * SavingsLevel::Moderate.rate(),
            aggressive: analysis.net_income * SavingsLevel::Aggressive.rate(),
            recommended,
            analysis: format!(
                "Net income {:.2} at a {:.1}% savings rate (daily spend variation {:.2}).",
                analysis.net_income, analysis.savings_rate, cv
            ),
        }
    }

    /// Required monthly contribution to reach `target_amount` by `deadline`.
    ///
    /// Past or near deadlines count as one month, treating the goal as due
    /// this month rather than dividing by zero. Without transaction history
    /// affordability defaults to optimistic; with history it compares the
    /// requirement against net income over the trailing 30 days.
    pub fn recommend_monthly(
        target_amount: f64,
        deadline: DateTime<Utc>,
        current_savings: f64,
        history: Option<&[Transaction]>,
        now: DateTime<Utc>,
    ) -> MonthlyRecommendation {
        let months_remaining = (months_between(now, deadline).round() as i64).max(1);
        let required_monthly =
            (target_amount - current_savings).max(0.0) / months_remaining as f64;

        let is_affordable = match history {
            None => true,
            Some(txns) => {
                let trailing = TimePeriod::Last30Days.resolve(now);
                let analysis = Self::analyze_income_expense(txns, trailing);
                required_monthly <= analysis.net_income
            }
        };

        MonthlyRecommendation {
            required_monthly,
            months_remaining,
            is_affordable,
            target_amount,
            current_savings,
        }
    }

    /// Coefficient of variation across daily debit totals. Days without
    /// spending carry no bucket, matching the sparse-series semantics of
    /// the daily aggregation. Zero when fewer than two spending days exist.
    fn daily_spend_variation(txns: &[Transaction], window: TimeWindow) -> f64 {
        let daily: Vec<f64> = PeriodAggregator::daily_buckets(txns, window)
            .into_iter()
            .filter(|b| b.spent > 0.0)
            .map(|b| b.spent)
            .collect();

        if daily.len() < 2 {
            return 0.0;
        }

        let mean = daily.iter().sum::<f64>() / daily.len() as f64;
        if mean <= 0.0 {
            return 0.0;
        }
        let variance =
            daily.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / daily.len() as f64;
        variance.sqrt() / mean
    }
}
