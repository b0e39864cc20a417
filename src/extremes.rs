//! Finding the earliest and latest transactions, used to bound date pickers.

use time::UtcOffset;

use crate::{DateRange, Transaction};

/// The earliest and latest transactions in a collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extremes {
    /// The transaction with the smallest creation time, if any.
    pub earliest: Option<Transaction>,
    /// The transaction with the largest creation time, if any.
    pub latest: Option<Transaction>,
}

impl Extremes {
    /// The calendar days spanned by the earliest and latest transactions, as
    /// observed at `offset`. `None` when there are no transactions.
    pub fn date_bounds(&self, offset: UtcOffset) -> Option<DateRange> {
        match (&self.earliest, &self.latest) {
            (Some(earliest), Some(latest)) => Some(DateRange {
                start: earliest.created_at().to_offset(offset).date(),
                end: latest.created_at().to_offset(offset).date(),
            }),
            _ => None,
        }
    }
}

/// Find the earliest and latest transaction by creation time in one pass.
///
/// On equal timestamps the transaction encountered first wins, for both the
/// earliest and the latest slot.
pub fn find_extremes(transactions: &[Transaction]) -> Extremes {
    let mut earliest: Option<&Transaction> = None;
    let mut latest: Option<&Transaction> = None;

    for transaction in transactions {
        if earliest.is_none_or(|current| transaction.created_at() < current.created_at()) {
            earliest = Some(transaction);
        }

        if latest.is_none_or(|current| transaction.created_at() > current.created_at()) {
            latest = Some(transaction);
        }
    }

    Extremes {
        earliest: earliest.cloned(),
        latest: latest.cloned(),
    }
}
