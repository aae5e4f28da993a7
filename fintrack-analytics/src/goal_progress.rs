//! Goal progress: completion metrics, pace requirements, milestone and
//! completion-date projection, and contribution trends.

use chrono::{DateTime, Duration, Utc};
use fintrack_core::{GoalContribution, SavingsGoal};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Everything the goal detail view needs for one goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressMetrics {
    /// 0-100, clamped; 0 for a non-positive target
    pub percentage_complete: f64,
    pub remaining_amount: f64,
    /// Floored at zero for overdue goals
    pub days_remaining: i64,
    /// Amount saved per day, estimated from the contribution history
    pub progress_rate: f64,
    pub required_daily: f64,
    pub required_weekly: f64,
    pub required_monthly: f64,
    pub is_on_track: bool,
    /// None when there is no forward momentum to project from
    pub projected_completion: Option<DateTime<Utc>>,
}

/// Rollup across a goal collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregateStats {
    pub total_goals: usize,
    pub active_count: usize,
    pub completed_count: usize,
    pub overdue_count: usize,
    pub total_saved: f64,
    pub total_target: f64,
    /// Amount-weighted: sum(current) / sum(target)
    pub overall_progress: f64,
    /// Equal-weighted: mean of each goal's own percentage
    pub average_progress: f64,
}

/// When a given milestone amount will be reached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MilestoneProjection {
    pub is_reached: bool,
    pub milestone_amount: f64,
    pub days_to_milestone: Option<i64>,
    pub estimated_date: Option<DateTime<Utc>>,
}

/// Contribution behavior over a recent period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContributionTrend {
    pub average_amount: f64,
    pub total_amount: f64,
    pub count: usize,
    /// Mean days between contributions; needs at least two
    pub average_frequency_days: Option<f64>,
    /// Strict: equal recent and overall averages is not increasing
    pub is_increasing: bool,
    /// Mean of the most recent two contributions
    pub recent_average: f64,
}

/// Stateless calculator over one goal (or a collection) and its
/// append-only contribution history.
pub struct GoalProgressEngine;

impl GoalProgressEngine {
    pub fn metrics(
        goal: &SavingsGoal,
        contributions: &[GoalContribution],
        now: DateTime<Utc>,
    ) -> ProgressMetrics {
        let percentage_complete = percentage(goal.current_amount, goal.target_amount);
        let remaining_amount = goal.remaining_amount();
        let days_remaining = (goal.deadline - now).num_days().max(0);

        let progress_rate = Self::progress_rate(goal, contributions, now);

        let required_daily = if days_remaining > 0 {
            remaining_amount / days_remaining as f64
        } else {
            0.0
        };

        let is_on_track = if goal.is_completed {
            true
        } else if goal.is_overdue(now) {
            false
        } else {
            percentage_complete >= Self::time_elapsed_percentage(goal, now)
        };

        let projected_completion = project_forward(remaining_amount, progress_rate, now);

        ProgressMetrics {
            percentage_complete,
            remaining_amount,
            days_remaining,
            progress_rate,
            required_daily,
            required_weekly: required_daily * 7.0,
            required_monthly: required_daily * 30.0,
            is_on_track,
            projected_completion,
        }
    }

    /// Rollup over a goal collection. Classification is mutually exclusive:
    /// completed takes precedence over overdue, which takes precedence over
    /// active.
    pub fn aggregate(goals: &[SavingsGoal], now: DateTime<Utc>) -> AggregateStats {
        let mut completed_count = 0;
        let mut overdue_count = 0;
        let mut active_count = 0;
        let mut total_saved = 0.0;
        let mut total_target = 0.0;
        let mut percentage_sum = 0.0;

        for goal in goals {
            if goal.is_completed {
                completed_count += 1;
            } else if goal.is_overdue(now) {
                overdue_count += 1;
            } else {
                active_count += 1;
            }
            total_saved += goal.current_amount;
            total_target += goal.target_amount;
            percentage_sum += percentage(goal.current_amount, goal.target_amount);
        }

        // Unlike a single goal's percentage this is not clamped: an
        // overfunded portfolio legitimately reports more than 100.
        let overall_progress = if total_target > 0.0 {
            total_saved / total_target * 100.0
        } else {
            0.0
        };
        let average_progress = if goals.is_empty() {
            0.0
        } else {
            percentage_sum / goals.len() as f64
        };

        AggregateStats {
            total_goals: goals.len(),
            active_count,
            completed_count,
            overdue_count,
            total_saved,
            total_target,
            overall_progress,
            average_progress,
        }
    }

    /// Projects when `milestone_amount` will be reached at the goal's
    /// historical saving rate. An already-reached milestone reports zero
    /// days; zero momentum reports no estimate at all.
    pub fn milestone_projection(
        goal: &SavingsGoal,
        milestone_amount: f64,
        contributions: &[GoalContribution],
        now: DateTime<Utc>,
    ) -> MilestoneProjection {
        if goal.current_amount >= milestone_amount {
            return MilestoneProjection {
                is_reached: true,
                milestone_amount,
                days_to_milestone: Some(0),
                estimated_date: None,
            };
        }

        let rate = Self::progress_rate(goal, contributions, now);
        if rate <= 0.0 {
            return MilestoneProjection {
                is_reached: false,
                milestone_amount,
                days_to_milestone: None,
                estimated_date: None,
            };
        }

        let days = ((milestone_amount - goal.current_amount) / rate).ceil() as i64;
        MilestoneProjection {
            is_reached: false,
            milestone_amount,
            days_to_milestone: Some(days),
            estimated_date: Some(now + Duration::days(days)),
        }
    }

    /// Contribution stats over the trailing `period_days`.
    pub fn contribution_trend(
        contributions: &[GoalContribution],
        period_days: i64,
        now: DateTime<Utc>,
    ) -> ContributionTrend {
        let cutoff = now - Duration::days(period_days);
        let mut recent: Vec<&GoalContribution> = contributions
            .iter()
            .filter(|c| c.date >= cutoff && c.date <= now)
            .collect();
        recent.sort_by_key(|c| c.date);

        let count = recent.len();
        let total_amount: f64 = recent.iter().map(|c| c.amount).sum();
        let average_amount = if count > 0 {
            total_amount / count as f64
        } else {
            0.0
        };

        let average_frequency_days = if count >= 2 {
            let span = recent[count - 1].date - recent[0].date;
            Some(span.num_seconds() as f64 / SECONDS_PER_DAY / (count - 1) as f64)
        } else {
            None
        };

        let last_two = &recent[count.saturating_sub(2)..];
        let recent_average = if last_two.is_empty() {
            0.0
        } else {
            last_two.iter().map(|c| c.amount).sum::<f64>() / last_two.len() as f64
        };

        ContributionTrend {
            average_amount,
            total_amount,
            count,
            average_frequency_days,
            is_increasing: recent_average > average_amount,
            recent_average,
        }
    }

    /// Saved amount per day. With contributions the denominator is the
    /// earliest-to-latest contribution span (minimum one day, so same-day
    /// contributions never divide by zero); without any, the goal's age.
    fn progress_rate(
        goal: &SavingsGoal,
        contributions: &[GoalContribution],
        now: DateTime<Utc>,
    ) -> f64 {
        let dates: Vec<DateTime<Utc>> = contributions
            .iter()
            .filter(|c| c.goal_id == goal.id)
            .map(|c| c.date)
            .collect();

        let days = match (dates.iter().min(), dates.iter().max()) {
            (Some(first), Some(last)) => (*last - *first).num_days().max(1),
            _ => (now - goal.created_at).num_days().max(1),
        };
        goal.current_amount / days as f64
    }

    fn time_elapsed_percentage(goal: &SavingsGoal, now: DateTime<Utc>) -> f64 {
        let total = (goal.deadline - goal.created_at).num_seconds();
        if total <= 0 {
            return 100.0;
        }
        let elapsed = (now - goal.created_at).num_seconds();
        (elapsed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }
}

fn percentage(current: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (current / target * 100.0).clamp(0.0, 100.0)
}

fn project_forward(remaining: f64, rate: f64, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if rate <= 0.0 {
        return None;
    }
    let days = remaining / rate;
    Some(now + Duration::seconds((days * SECONDS_PER_DAY) as i64))
}
