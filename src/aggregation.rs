//! Summing transaction amounts, overall and grouped by key or by month.
//!
//! Malformed amounts never poison a sum: a transaction whose amount does not
//! parse contributes zero and a warning is logged.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Transaction, date_range::month_abbrev};

/// Which form of the category to group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryKey {
    /// The full display label, emoji included, e.g. "🛒 Groceries".
    Label,
    /// The label with the leading emoji stripped, e.g. "Groceries".
    #[default]
    Name,
}

impl CategoryKey {
    /// Get the grouping key for `transaction`.
    pub fn extract(self, transaction: &Transaction) -> &str {
        match self {
            Self::Label => transaction.category().label(),
            Self::Name => transaction.category().key(),
        }
    }
}

/// Key combining the emoji-stripped category and the direction of the money,
/// e.g. "Groceries:expense".
pub fn direction_key(transaction: &Transaction) -> String {
    let direction = if transaction.is_income() {
        "income"
    } else {
        "expense"
    };

    format!("{}:{direction}", transaction.category().key())
}

/// Summed amounts per key.
///
/// Keys iterate in the order they were first seen, never in hash order, so
/// the same input always produces the same sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedTotals {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl GroupedTotals {
    /// Create an empty set of totals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the total for `key`, creating it at the end if new.
    pub fn add(&mut self, key: &str, amount: f64) {
        match self.index.get(key) {
            Some(&position) => self.entries[position].1 += amount,
            None => {
                self.index.insert(key.to_owned(), self.entries.len());
                self.entries.push((key.to_owned(), amount));
            }
        }
    }

    /// The total for `key`, if any transaction had that key.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1)
    }

    /// Whether any transaction had `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Iterate over `(key, total)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(key, total)| (key.as_str(), *total))
    }

    /// Iterate over the keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// The number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The sum over all keys.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, total)| total).sum()
    }

    /// Consume the totals, returning `(key, total)` pairs in first-seen order.
    pub fn into_entries(self) -> Vec<(String, f64)> {
        self.entries
    }
}

/// Sum the parsed amounts of `transactions` from left to right.
///
/// Transactions with malformed amounts contribute zero.
pub fn sum_amounts(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(contribution).sum()
}

/// Sum the parsed amounts of `transactions` grouped by `key_fn`.
///
/// Transactions with malformed amounts still create their key, with a zero
/// contribution.
pub fn sum_by_key<'a, F, K>(transactions: &'a [Transaction], mut key_fn: F) -> GroupedTotals
where
    F: FnMut(&'a Transaction) -> K,
    K: AsRef<str>,
{
    let mut totals = GroupedTotals::new();

    for transaction in transactions {
        totals.add(key_fn(transaction).as_ref(), contribution(transaction));
    }

    tracing::debug!(
        "Grouped {} transactions into {} keys",
        transactions.len(),
        totals.len()
    );

    totals
}

/// The amount a transaction adds to a sum: its parsed amount, or zero if the
/// amount is malformed.
pub(crate) fn contribution(transaction: &Transaction) -> f64 {
    let amount = transaction.amount();

    if amount.is_nan() {
        tracing::warn!(
            "Transaction {} has malformed amount {:?}, counting it as zero",
            transaction.id(),
            transaction.raw_amount()
        );
        0.0
    } else {
        amount
    }
}

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlySummary {
    /// The first day of the month.
    #[serde(with = "iso_date")]
    pub month: Date,
    /// Total income for the month.
    pub income: f64,
    /// Total expenses for the month.
    pub expense: f64,
    /// Income minus expenses.
    pub net: f64,
}

impl MonthlySummary {
    fn new(month: Date) -> Self {
        Self {
            month,
            income: 0.0,
            expense: 0.0,
            net: 0.0,
        }
    }

    /// A short label for the month, e.g. "Jan 2024".
    pub fn label(&self) -> String {
        format!("{} {}", month_abbrev(self.month.month()), self.month.year())
    }
}

/// Aggregates transactions by the calendar month they were created in.
///
/// Months are taken in each transaction's own UTC offset. Only months with at
/// least one transaction are returned, in chronological order.
pub fn aggregate_by_month(transactions: &[Transaction]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<Date, MonthlySummary> = BTreeMap::new();

    for transaction in transactions {
        let month = first_of_month(transaction.created_at().date());
        let summary = months
            .entry(month)
            .or_insert_with(|| MonthlySummary::new(month));
        let amount = contribution(transaction);

        if transaction.is_income() {
            summary.income += amount;
        } else {
            summary.expense += amount;
        }
    }

    months
        .into_values()
        .map(|summary| MonthlySummary {
            net: summary.income - summary.expense,
            ..summary
        })
        .collect()
}

fn first_of_month(date: Date) -> Date {
    // Day 1 exists in every month.
    date.replace_day(1).unwrap_or(date)
}
