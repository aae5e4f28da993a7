//! Savings goals and their append-only contribution history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A savings goal with a target amount and deadline.
///
/// `current_amount` is the running sum of contributions; the write path keeps
/// that invariant, the calculators only read it. It may exceed the target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsGoal {
    pub id: String,
    pub name: String,
    /// Target amount, strictly positive for a well-formed goal
    pub target_amount: f64,
    /// Saved so far, never negative
    pub current_amount: f64,
    pub deadline: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl SavingsGoal {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        target_amount: f64,
        deadline: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            target_amount,
            current_amount: 0.0,
            deadline,
            created_at,
            is_completed: false,
            completed_at: None,
            icon: None,
            color: None,
        }
    }

    pub fn with_current(mut self, current_amount: f64) -> Self {
        self.current_amount = current_amount;
        self
    }

    /// Amount still needed, floored at zero once the target is passed.
    pub fn remaining_amount(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed && now > self.deadline
    }

    /// Record a contribution against the running total.
    pub fn apply_contribution(&mut self, amount: f64) {
        self.current_amount += amount;
    }

    pub fn mark_completed(&mut self, now: DateTime<Utc>) {
        self.is_completed = true;
        self.completed_at = Some(now);
    }
}

/// One deposit toward a goal. Append-only; date ordering matters for the
/// rate and trend calculations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalContribution {
    pub id: String,
    pub goal_id: String,
    /// Strictly positive
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub note: Option<String>,
}

impl GoalContribution {
    pub fn new(
        id: impl Into<String>,
        goal_id: impl Into<String>,
        amount: f64,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            goal_id: goal_id.into(),
            amount,
            date,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_remaining_amount_floors_at_zero() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let goal = SavingsGoal::new("g1", "Laptop", 1000.0, now + Duration::days(60), now)
            .with_current(1200.0);
        assert_eq!(goal.remaining_amount(), 0.0);
    }

    #[test]
    fn test_overdue_only_when_incomplete() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let mut goal =
            SavingsGoal::new("g1", "Trip", 500.0, now - Duration::days(5), now - Duration::days(90));
        assert!(goal.is_overdue(now));

        goal.mark_completed(now);
        assert!(!goal.is_overdue(now));
        assert_eq!(goal.completed_at, Some(now));
    }

    #[test]
    fn test_apply_contribution_accumulates() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let mut goal = SavingsGoal::new("g1", "Fund", 300.0, now + Duration::days(30), now);
        goal.apply_contribution(100.0);
        goal.apply_contribution(50.0);
        assert_eq!(goal.current_amount, 150.0);
    }
}
