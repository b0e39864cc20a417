//! Monthly spending limits per category.

use serde::{Deserialize, Serialize};
use time::UtcOffset;

use crate::{
    CategoryKey, DateRange, Transaction, date_range::filter_by_period, partition, strip_emoji,
    sum_by_key,
};

/// How spending compares to a limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitStatus {
    /// The limit minus the spend. Negative when over the limit.
    pub difference: f64,
    /// Whether the spend exceeds the limit. Spending exactly the limit is not over.
    pub is_over: bool,
}

/// Compare `current_spend` against `limit_amount`.
pub fn evaluate_limit(current_spend: f64, limit_amount: f64) -> LimitStatus {
    let difference = limit_amount - current_spend;

    LimitStatus {
        difference,
        is_over: difference < 0.0,
    }
}

/// A spending ceiling for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryLimit {
    /// The category the limit applies to. Any leading emoji is ignored when
    /// matching transactions.
    pub category: String,
    /// The most that should be spent in the category per period.
    pub amount: f64,
}

/// Spending against one [CategoryLimit] over a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitProgress {
    /// The category key the limit applies to, emoji stripped.
    pub category: String,
    /// The configured limit.
    pub limit: f64,
    /// The amount spent in the category during the period.
    pub spent: f64,
    /// How the spend compares to the limit.
    pub status: LimitStatus,
    /// The spend as a percentage of the limit, zero when the limit is zero.
    pub percent_used: f64,
}

/// Evaluate each of `limits` against the expenses made during `period`.
///
/// Days are taken at `offset`. Income is ignored. Results follow the order
/// of `limits`; categories without expenses report zero spend.
pub fn evaluate_category_limits(
    transactions: &[Transaction],
    limits: &[CategoryLimit],
    period: DateRange,
    offset: UtcOffset,
) -> Vec<LimitProgress> {
    let in_period = filter_by_period(transactions, period, offset);
    let expenses = partition(&in_period).expense;
    let spent_by_category = sum_by_key(&expenses, |t| CategoryKey::Name.extract(t));

    limits
        .iter()
        .map(|limit| {
            let category = strip_emoji(&limit.category).to_owned();
            let spent = spent_by_category.get(&category).unwrap_or(0.0);
            let status = evaluate_limit(spent, limit.amount);

            if status.is_over {
                tracing::debug!(
                    "Spending on {category} is {} over its limit",
                    -status.difference
                );
            }

            LimitProgress {
                percent_used: if limit.amount == 0.0 {
                    0.0
                } else {
                    spent / limit.amount * 100.0
                },
                category,
                limit: limit.amount,
                spent,
                status,
            }
        })
        .collect()
}
