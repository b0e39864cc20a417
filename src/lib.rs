//! Pocketbook turns a flat list of income and expense transactions into the
//! derived views a personal finance app renders: totals, per-category
//! breakdowns with percentage shares, date-range filtering, monthly
//! summaries, category limit progress and chart-ready series.
//!
//! Every function in the aggregation core is pure. Callers hand in a slice
//! of [Transaction]s (however they were fetched) and get back freshly
//! allocated results that share nothing with the input.
//!
//! ```
//! use pocketbook::{CategoryKey, Transaction, summarize};
//! use time::macros::datetime;
//!
//! let transactions = vec![
//!     Transaction::new("1", "🛒 Groceries", "200", false, datetime!(2024-01-02 10:00 UTC)),
//!     Transaction::new("2", "🚌 Transport", "100", false, datetime!(2024-01-03 10:00 UTC)),
//!     Transaction::new("3", "🛒 Groceries", "150", false, datetime!(2024-01-04 10:00 UTC)),
//! ];
//!
//! let summary = summarize(&transactions, CategoryKey::Name);
//!
//! assert_eq!(summary.total_expense, 450.0);
//! assert_eq!(summary.expense_report[0].category, "Groceries");
//! assert_eq!(summary.expense_report[0].percentage, "77.78");
//! ```

#![warn(missing_docs)]

mod aggregation;
mod amount;
mod category;
mod chart;
mod config;
mod currency;
mod date_range;
mod export;
mod extremes;
mod limit;
mod logging;
mod partition;
mod report;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use aggregation::{
    CategoryKey, GroupedTotals, MonthlySummary, aggregate_by_month, direction_key, sum_amounts,
    sum_by_key,
};
pub use amount::{format_money, parse_amount};
pub use category::{Category, strip_emoji};
pub use chart::{ChartOrder, ChartPoint, build_chart_series, build_chart_series_ordered, category_chart};
pub use config::{DEFAULT_TIMEZONE, ReportConfig};
pub use currency::Currency;
pub use date_range::{
    DateRange, RangePreset, compute_range, end_of_day, filter_by_date_range, filter_by_period,
    parse_date, range_label,
};
pub use export::{
    read_transactions_csv, read_transactions_json, write_report_csv, write_report_json,
};
pub use extremes::{Extremes, find_extremes};
pub use limit::{CategoryLimit, LimitProgress, LimitStatus, evaluate_category_limits, evaluate_limit};
pub use logging::setup_logging;
pub use partition::{Partition, partition};
pub use report::{CategoryReportEntry, Summary, build_category_report, format_percentage, summarize};
pub use timezone::{get_local_offset, local_offset_or_utc};
pub use transaction::{Transaction, TransactionId};

/// The errors that may occur when loading, configuring or exporting reports.
///
/// The aggregation functions themselves never fail; only the surfaces that
/// touch files, text formats or configuration return this error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON input could not be parsed, or output could not be serialized.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV input could not be parsed, or output could not be written.
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The currency code does not match any supported currency.
    #[error("\"{0}\" is not a supported currency code")]
    UnknownCurrency(String),

    /// A date string could not be parsed.
    ///
    /// Callers should pass in the offending string along with the reason.
    #[error("could not parse date \"{0}\": {1}")]
    InvalidDate(String, String),

    /// The configuration is internally inconsistent, e.g. a negative limit.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
