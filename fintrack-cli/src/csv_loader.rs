//! Parse generic bank-export CSVs into typed transactions.
//!
//! Expected columns: Date,Description,Amount,Account,Category
//! Negative amounts are debits, positive amounts credits. Unparseable rows
//! are skipped rather than failing the whole file.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use fintrack_core::{Category, Direction, Transaction};
use std::collections::HashMap;
use std::path::Path;

/// A CSV parsed into transactions plus the category list interned from the
/// free-text category column (ids assigned in first-seen order).
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
}

pub fn load_transactions_csv(path: impl AsRef<Path>) -> Result<LoadedData> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;

    let mut transactions = Vec::new();
    let mut categories: Vec<Category> = Vec::new();
    let mut category_ids: HashMap<String, i64> = HashMap::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result?;

        let Some(timestamp) = record.get(0).and_then(|s| parse_timestamp(s.trim())) else {
            continue;
        };
        let Ok(amount) = record.get(2).unwrap_or("").trim().parse::<f64>() else {
            continue;
        };

        let direction = if amount < 0.0 {
            Direction::Debit
        } else {
            Direction::Credit
        };

        let mut txn = Transaction::new(format!("csv-{i:04}"), amount.abs(), direction, timestamp);

        let description = record.get(1).unwrap_or("").trim();
        if !description.is_empty() {
            txn = txn.with_merchant(description);
        }
        let account = record.get(3).unwrap_or("").trim();
        if !account.is_empty() {
            txn = txn.with_account(account);
        }

        let category = record.get(4).unwrap_or("").trim();
        if !category.is_empty() {
            let next_id = categories.len() as i64 + 1;
            let id = *category_ids.entry(category.to_string()).or_insert_with(|| {
                categories.push(Category::new(next_id, category));
                next_id
            });
            txn = txn.with_category(id);
        }

        transactions.push(txn);
    }

    Ok(LoadedData {
        transactions,
        categories,
    })
}

/// Accepts "2026-03-04 18:30" or a bare "2026-03-04" (midnight UTC).
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Some(Utc.from_utc_datetime(&ndt));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| Utc.from_utc_datetime(&d.and_hms_opt(0, 0, 0).unwrap()))
}
