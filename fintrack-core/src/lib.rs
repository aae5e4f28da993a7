//! fintrack-core: domain value types and time utilities for the
//! fintrack analytics engine.

pub mod budget;
pub mod goal;
pub mod time;
pub mod transaction;
pub mod window;

pub use budget::Budget;
pub use goal::{GoalContribution, SavingsGoal};
pub use transaction::{Category, Direction, Transaction};
pub use window::{TimePeriod, TimeWindow};
