//! The transaction record every report is computed from.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Category, Currency, parse_amount};

/// Opaque identifier assigned to a transaction when it is recorded.
pub type TransactionId = String;

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are immutable inputs to the reporting functions: nothing in
/// this crate creates, edits or deletes them on behalf of the caller.
///
/// The amount is kept exactly as it was entered. It is never negative, the
/// direction of the money is given by [Transaction::is_income] alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    id: TransactionId,
    category: Category,
    amount: String,
    is_income: bool,
    #[serde(default)]
    currency: Currency,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    /// The user's category list when the transaction was recorded. Only used
    /// for display, never for aggregation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    categories: Vec<String>,
}

impl Transaction {
    /// Create a new transaction in the default currency.
    pub fn new(
        id: impl Into<TransactionId>,
        category: impl Into<Category>,
        amount: impl Into<String>,
        is_income: bool,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            amount: amount.into(),
            is_income,
            currency: Currency::default(),
            created_at,
            categories: Vec::new(),
        }
    }

    /// Set the currency the amount is denominated in.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Set the user's category list at the time of the transaction.
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// The ID of the transaction.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The category the transaction was filed under.
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// The amount exactly as it was entered, e.g. "1 234,56".
    pub fn raw_amount(&self) -> &str {
        &self.amount
    }

    /// The parsed amount, or NaN if the stored string is malformed.
    pub fn amount(&self) -> f64 {
        parse_amount(&self.amount)
    }

    /// Whether the transaction is income (`true`) or an expense (`false`).
    pub fn is_income(&self) -> bool {
        self.is_income
    }

    /// The currency the amount is denominated in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// When the transaction was recorded.
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// The user's category list at the time of the transaction.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{Currency, Transaction};

    #[test]
    fn deserializes_camel_case_record() {
        let json = r#"{
            "id": "abc",
            "category": "🛒 Groceries",
            "amount": "1 234,56",
            "isIncome": false,
            "currency": {"name": "US Dollar", "code": "USD", "sign": "$"},
            "createdAt": "2024-03-01T09:30:00Z",
            "categories": ["🛒 Groceries", "🚌 Transport"]
        }"#;

        let transaction: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(transaction.id(), "abc");
        assert_eq!(transaction.category().key(), "Groceries");
        assert_eq!(transaction.amount(), 1234.56);
        assert!(!transaction.is_income());
        assert_eq!(transaction.currency(), Currency::Usd);
        assert_eq!(transaction.created_at(), datetime!(2024-03-01 09:30 UTC));
        assert_eq!(transaction.categories().len(), 2);
    }

    #[test]
    fn currency_and_categories_are_optional() {
        let json = r#"{
            "id": "abc",
            "category": "Salary",
            "amount": "1000",
            "isIncome": true,
            "createdAt": "2024-03-01T09:30:00+13:00"
        }"#;

        let transaction: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(transaction.currency(), Currency::default());
        assert!(transaction.categories().is_empty());
    }

    #[test]
    fn malformed_amount_parses_to_nan() {
        let transaction = Transaction::new(
            "1",
            "Food",
            "abc",
            false,
            datetime!(2024-03-01 09:30 UTC),
        );

        assert_eq!(transaction.raw_amount(), "abc");
        assert!(transaction.amount().is_nan());
    }
}
