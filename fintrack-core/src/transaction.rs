//! Transaction and category types shared by every calculator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether money left or entered the account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    #[serde(rename = "debit")]
    Debit,
    #[serde(rename = "credit")]
    Credit,
}

/// A single immutable money movement.
///
/// `amount` is always non-negative; `direction` carries the sign. Records are
/// never mutated after creation, so the calculators can treat slices of them
/// as plain value inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Unique identifier for this record
    pub id: String,
    /// Non-negative amount in the account currency
    pub amount: f64,
    /// Debit (spend) or credit (receive)
    pub direction: Direction,
    /// Merchant or counterparty, when known
    pub merchant: Option<String>,
    /// Category assignment, by id
    pub category_id: Option<i64>,
    /// When the transaction happened
    pub timestamp: DateTime<Utc>,
    /// Source account label (Chase, AMEX, cash, ...)
    pub account: Option<String>,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        amount: f64,
        direction: Direction,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            direction,
            merchant: None,
            category_id: None,
            timestamp,
            account: None,
        }
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = Some(merchant.into());
        self
    }

    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn is_debit(&self) -> bool {
        self.direction == Direction::Debit
    }

    pub fn is_credit(&self) -> bool {
        self.direction == Direction::Credit
    }
}

/// A spending category. One level of nesting: a category either has no
/// parent (top-level) or points at a top-level parent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Icon glyph shown next to the name
    pub icon: String,
    /// Display color, e.g. "#e74c3c"
    pub color: String,
    pub parent_id: Option<i64>,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            icon: String::new(),
            color: String::new(),
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn is_subcategory(&self) -> bool {
        self.parent_id.is_some()
    }
}
