//! Ranked per-category breakdowns with percentage shares.

use std::cmp::Ordering;

use serde::Serialize;

use crate::{CategoryKey, Transaction, partition, sum_amounts, sum_by_key};

/// One row of a category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReportEntry {
    /// The category key the row was grouped under.
    pub category: String,
    /// The summed amount for the category.
    pub amount: f64,
    /// The share of the report total, see [format_percentage].
    pub percentage: String,
}

/// Build a breakdown of `transactions` per category, largest amount first.
///
/// Categories with equal amounts keep the order they were first seen in.
/// Percentages are relative to `total_for_percentage`, which callers
/// normally set to the sum of the same transactions. A zero total is not
/// guarded against here: the percentages then come out as `"NaN"` or
/// `"Infinity"`.
///
/// Pass income-only or expense-only transactions; the direction is not
/// checked.
pub fn build_category_report(
    transactions: &[Transaction],
    total_for_percentage: f64,
    category_key: CategoryKey,
) -> Vec<CategoryReportEntry> {
    let mut totals = sum_by_key(transactions, |t| category_key.extract(t)).into_entries();

    // Stable, so ties keep first-seen order.
    totals.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    totals
        .into_iter()
        .map(|(category, amount)| CategoryReportEntry {
            percentage: format_percentage(amount / total_for_percentage * 100.0),
            category,
            amount,
        })
        .collect()
}

/// Format a percentage with two decimals, dropping a trailing ".00".
///
/// `50.0` becomes `"50"` while `33.333` becomes `"33.33"`. Halfway cases
/// round away from zero, matching JavaScript's `toFixed(2)`. NaN and
/// infinities are rendered as `"NaN"`, `"Infinity"` and `"-Infinity"`.
pub fn format_percentage(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }

    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_owned();
    }

    let formatted = to_fixed_2(value);

    match formatted.strip_suffix(".00") {
        Some(whole) => whole.to_owned(),
        None => formatted,
    }
}

fn to_fixed_2(value: f64) -> String {
    // Normalise negative zero, which would otherwise print as "-0.00".
    let value = if value == 0.0 { 0.0 } else { value };

    // `{:.2}` rounds exact ties to even. The only fractions that can tie at
    // the third decimal are odd multiples of 1/8 (.125, .375, .625, .875),
    // and for those the scaled value is exact so `round` can be used.
    let eighths = value.abs().fract() * 8.0;
    let is_tie = eighths.fract() == 0.0 && (eighths as u8) % 2 == 1;

    if is_tie {
        let rounded = (value.abs() * 100.0).round() / 100.0;
        format!("{:.2}", rounded.copysign(value))
    } else {
        format!("{value:.2}")
    }
}

/// Income and expense totals with a category breakdown for each direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Sum of all income.
    pub total_income: f64,
    /// Sum of all expenses.
    pub total_expense: f64,
    /// Income minus expenses.
    pub balance: f64,
    /// Income per category, percentages relative to `total_income`.
    pub income_report: Vec<CategoryReportEntry>,
    /// Expenses per category, percentages relative to `total_expense`.
    pub expense_report: Vec<CategoryReportEntry>,
}

/// Compute totals and per-category breakdowns for both directions.
///
/// A direction without transactions gets an empty breakdown.
pub fn summarize(transactions: &[Transaction], category_key: CategoryKey) -> Summary {
    let split = partition(transactions);
    let total_income = sum_amounts(&split.income);
    let total_expense = sum_amounts(&split.expense);

    let summary = Summary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        income_report: report_for(&split.income, total_income, category_key, "income"),
        expense_report: report_for(&split.expense, total_expense, category_key, "expense"),
    };

    tracing::debug!(
        "Summarized {} transactions: income {}, expenses {}",
        transactions.len(),
        summary.total_income,
        summary.total_expense
    );

    summary
}

fn report_for(
    transactions: &[Transaction],
    total: f64,
    category_key: CategoryKey,
    direction: &str,
) -> Vec<CategoryReportEntry> {
    if transactions.is_empty() {
        return Vec::new();
    }

    if total == 0.0 {
        tracing::warn!(
            "The {direction} total of {} transactions is zero, percentages will be NaN",
            transactions.len()
        );
    }

    build_category_report(transactions, total, category_key)
}

#[cfg(test)]
mod tests {
    use crate::{
        CategoryKey,
        test_utils::{expense, income},
    };

    use super::{CategoryReportEntry, build_category_report, format_percentage, summarize};

    fn entry(category: &str, amount: f64, percentage: &str) -> CategoryReportEntry {
        CategoryReportEntry {
            category: category.to_owned(),
            amount,
            percentage: percentage.to_owned(),
        }
    }

    #[test]
    fn ranks_categories_by_amount() {
        let expenses = vec![
            expense("Groceries", "200"),
            expense("Transport", "100"),
            expense("Groceries", "150"),
        ];

        let report = build_category_report(&expenses, 450.0, CategoryKey::Name);

        assert_eq!(
            report,
            vec![
                entry("Groceries", 350.0, "77.78"),
                entry("Transport", 100.0, "22.22"),
            ]
        );
    }

    #[test]
    fn round_percentages_drop_trailing_zeros() {
        let expenses = vec![expense("Rent", "50"), expense("Food", "50")];

        let report = build_category_report(&expenses, 100.0, CategoryKey::Name);

        assert_eq!(report[0].percentage, "50");
        assert_eq!(report[1].percentage, "50");
    }

    #[test]
    fn thirds_keep_two_decimals() {
        let expenses = vec![
            expense("A", "1"),
            expense("B", "1"),
            expense("C", "1"),
        ];

        let report = build_category_report(&expenses, 3.0, CategoryKey::Name);

        assert!(report.iter().all(|entry| entry.percentage == "33.33"));
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let expenses = vec![
            expense("Zebra", "10"),
            expense("Apple", "10"),
            expense("Big", "30"),
            expense("Mango", "10"),
        ];

        let report = build_category_report(&expenses, 60.0, CategoryKey::Name);

        let order: Vec<_> = report.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(order, vec!["Big", "Zebra", "Apple", "Mango"]);
    }

    #[test]
    fn strips_emoji_only_when_asked() {
        let expenses = vec![expense("🛒 Groceries", "10")];

        let by_name = build_category_report(&expenses, 10.0, CategoryKey::Name);
        let by_label = build_category_report(&expenses, 10.0, CategoryKey::Label);

        assert_eq!(by_name[0].category, "Groceries");
        assert_eq!(by_label[0].category, "🛒 Groceries");
        assert_eq!(by_label[0].percentage, "100");
    }

    #[test]
    fn keycap_emoji_variants_group_together() {
        let expenses = vec![expense("1️⃣ Bills", "10"), expense("2️⃣ Bills", "10")];

        let report = build_category_report(&expenses, 20.0, CategoryKey::Name);

        assert_eq!(report, vec![entry("Bills", 20.0, "100")]);
    }

    #[test]
    fn zero_total_propagates_nan_and_infinity() {
        let zero = vec![expense("Free", "0")];
        let positive = vec![expense("Food", "5")];

        let nan_report = build_category_report(&zero, 0.0, CategoryKey::Name);
        let inf_report = build_category_report(&positive, 0.0, CategoryKey::Name);

        assert_eq!(nan_report[0].percentage, "NaN");
        assert_eq!(inf_report[0].percentage, "Infinity");
    }

    #[test]
    fn empty_input_gives_empty_report() {
        assert!(build_category_report(&[], 0.0, CategoryKey::Name).is_empty());
    }

    #[test]
    fn rounded_percentages_are_not_corrected_to_one_hundred() {
        let expenses = vec![
            expense("A", "1"),
            expense("B", "1"),
            expense("C", "1"),
        ];

        let report = build_category_report(&expenses, 3.0, CategoryKey::Name);
        let total: f64 = report
            .iter()
            .map(|entry| entry.percentage.parse::<f64>().unwrap())
            .sum();

        assert!((total - 99.99).abs() < 1e-9, "total was {total}");
    }

    #[test]
    fn format_percentage_matches_to_fixed() {
        assert_eq!(format_percentage(50.0), "50");
        assert_eq!(format_percentage(100.0), "100");
        assert_eq!(format_percentage(0.0), "0");
        assert_eq!(format_percentage(-0.0), "0");
        assert_eq!(format_percentage(33.333_333), "33.33");
        assert_eq!(format_percentage(12.5), "12.50");
        assert_eq!(format_percentage(99.999), "100");
    }

    #[test]
    fn format_percentage_rounds_halfway_away_from_zero() {
        assert_eq!(format_percentage(12.125), "12.13");
        assert_eq!(format_percentage(0.375), "0.38");
        assert_eq!(format_percentage(-12.125), "-12.13");
        assert_eq!(format_percentage(2.5), "2.50");
    }

    #[test]
    fn format_percentage_non_finite() {
        assert_eq!(format_percentage(f64::NAN), "NaN");
        assert_eq!(format_percentage(f64::INFINITY), "Infinity");
        assert_eq!(format_percentage(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn summary_with_income_only() {
        let transactions = vec![income("Salary", "1000")];

        let summary = summarize(&transactions, CategoryKey::Name);

        assert_eq!(summary.total_income, 1000.0);
        assert_eq!(summary.total_expense, 0.0);
        assert_eq!(summary.balance, 1000.0);
        assert!(summary.expense_report.is_empty());
        assert_eq!(summary.income_report, vec![entry("Salary", 1000.0, "100")]);
    }

    #[test]
    fn summary_keeps_directions_apart() {
        let transactions = vec![
            income("💼 Work", "300"),
            expense("💼 Work", "100"),
            expense("🍕 Food", "100"),
        ];

        let summary = summarize(&transactions, CategoryKey::Name);

        assert_eq!(summary.balance, 100.0);
        assert_eq!(summary.income_report, vec![entry("Work", 300.0, "100")]);
        assert_eq!(
            summary.expense_report,
            vec![entry("Work", 100.0, "50"), entry("Food", 100.0, "50")]
        );
    }

    #[test]
    fn summary_of_nothing_is_empty() {
        let summary = summarize(&[], CategoryKey::Label);

        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expense, 0.0);
        assert!(summary.income_report.is_empty());
        assert!(summary.expense_report.is_empty());
    }

    #[test]
    fn summary_is_idempotent() {
        let transactions = vec![
            income("Salary", "1000"),
            expense("Rent", "333.33"),
            expense("Food", "0.1"),
        ];

        let first = summarize(&transactions, CategoryKey::Name);
        let second = summarize(&transactions, CategoryKey::Name);

        assert_eq!(first, second);
        assert_eq!(first.balance.to_bits(), second.balance.to_bits());
    }
}
