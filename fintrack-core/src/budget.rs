//! Monthly budget limits, overall or per category.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// A spending limit for one calendar month. `category_id` of `None` means
/// the overall budget; uniqueness per (month, year, category) is the
/// storage layer's job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    /// 1-12
    pub month: u32,
    pub year: i32,
    pub category_id: Option<i64>,
    pub limit: f64,
}

impl Budget {
    pub fn overall(month: u32, year: i32, limit: f64) -> Self {
        Self {
            month,
            year,
            category_id: None,
            limit,
        }
    }

    pub fn for_category(month: u32, year: i32, category_id: i64, limit: f64) -> Self {
        Self {
            month,
            year,
            category_id: Some(category_id),
            limit,
        }
    }

    /// True when `ts` falls inside this budget's calendar month.
    pub fn covers(&self, ts: DateTime<Utc>) -> bool {
        ts.year() == self.year && ts.month() == self.month
    }
}
