//! Transaction fixtures shared by the unit tests.

use time::{OffsetDateTime, macros::datetime};

use crate::Transaction;

const DEFAULT_CREATED_AT: OffsetDateTime = datetime!(2024-01-15 12:00 UTC);

/// An expense on a fixed date in the middle of January 2024.
pub(crate) fn expense(category: &str, amount: &str) -> Transaction {
    transaction(category, amount, false, DEFAULT_CREATED_AT)
}

/// An income on a fixed date in the middle of January 2024.
pub(crate) fn income(category: &str, amount: &str) -> Transaction {
    transaction(category, amount, true, DEFAULT_CREATED_AT)
}

/// A transaction whose ID is derived from its contents.
pub(crate) fn transaction(
    category: &str,
    amount: &str,
    is_income: bool,
    created_at: OffsetDateTime,
) -> Transaction {
    let id = format!("{category}/{amount}/{is_income}/{created_at}");
    Transaction::new(id, category, amount, is_income, created_at)
}
