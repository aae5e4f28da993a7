//! fintrack-analytics: pure, synchronous calculators over transaction and
//! goal collections. No I/O, no shared state; every relative-time
//! calculation takes `now` as an explicit parameter.

pub mod budget;
pub mod goal_progress;
pub mod period;
pub mod savings;
pub mod trend;

pub use budget::{BudgetStatus, BudgetTracker};
pub use goal_progress::{
    AggregateStats, ContributionTrend, GoalProgressEngine, MilestoneProjection, ProgressMetrics,
};
pub use period::{CategorySpend, DailyBucket, MerchantTotal, PeriodAggregator, PeriodSummary};
pub use savings::{
    IncomeExpenseAnalysis, MonthlyRecommendation, SavingsLevel, SavingsProjector,
    SavingsSuggestion,
};
pub use trend::{DailySpendPoint, Granularity, TrendBucketer, TrendPoint};
