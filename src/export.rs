//! Reading transactions from and writing reports to JSON and CSV.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{Currency, Error, Transaction};

/// Read a JSON array of transactions.
///
/// # Errors
///
/// Returns [Error::Json] if the input is not a valid array of transactions.
pub fn read_transactions_json<R: Read>(reader: R) -> Result<Vec<Transaction>, Error> {
    let transactions: Vec<Transaction> = serde_json::from_reader(reader)?;
    tracing::debug!("Read {} transactions from JSON", transactions.len());

    Ok(transactions)
}

/// One line of a transactions CSV file.
///
/// The header is `id,category,amount,isIncome,currency,createdAt` where
/// `currency` is an ISO code (empty for the default) and `createdAt` is an
/// RFC 3339 timestamp.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow {
    id: String,
    category: String,
    amount: String,
    is_income: bool,
    #[serde(default)]
    currency: String,
    created_at: String,
}

impl TryFrom<CsvRow> for Transaction {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self, Self::Error> {
        let created_at = OffsetDateTime::parse(row.created_at.trim(), &Rfc3339)
            .map_err(|error| Error::InvalidDate(row.created_at.clone(), error.to_string()))?;

        let currency = if row.currency.trim().is_empty() {
            Currency::default()
        } else {
            row.currency.parse()?
        };

        Ok(
            Transaction::new(row.id, row.category, row.amount, row.is_income, created_at)
                .with_currency(currency),
        )
    }
}

/// Read transactions from CSV with a header row.
///
/// # Errors
///
/// Returns [Error::Csv] for malformed rows, [Error::InvalidDate] for bad
/// timestamps and [Error::UnknownCurrency] for unsupported currency codes.
pub fn read_transactions_csv<R: Read>(reader: R) -> Result<Vec<Transaction>, Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);

    let transactions = reader
        .deserialize::<CsvRow>()
        .map(|row| Transaction::try_from(row?))
        .collect::<Result<Vec<_>, Error>>()?;

    tracing::debug!("Read {} transactions from CSV", transactions.len());

    Ok(transactions)
}

/// Write `records` as CSV with a header row taken from the field names.
///
/// # Errors
///
/// Returns [Error::Csv] if a record cannot be serialized, or [Error::Io] if
/// the output cannot be flushed.
pub fn write_report_csv<W: Write, T: Serialize>(writer: W, records: &[T]) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);

    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;

    Ok(())
}

/// Write `value` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [Error::Json] if the value cannot be serialized or written.
pub fn write_report_json<W: Write, T: Serialize + ?Sized>(writer: W, value: &T) -> Result<(), Error> {
    serde_json::to_writer_pretty(writer, value)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        CategoryKey, Currency, Error, aggregate_by_month, build_category_report,
        test_utils::expense,
    };

    use super::{read_transactions_csv, read_transactions_json, write_report_csv, write_report_json};

    #[test]
    fn reads_json_transactions() {
        let json = r#"[
            {"id": "1", "category": "🛒 Food", "amount": "12,50", "isIncome": false,
             "currency": "EUR", "createdAt": "2024-01-02T10:00:00Z"},
            {"id": "2", "category": "💼 Work", "amount": "1 000", "isIncome": true,
             "createdAt": "2024-01-03T10:00:00+13:00"}
        ]"#;

        let transactions = read_transactions_json(json.as_bytes()).unwrap();

        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].amount(), 12.5);
        assert_eq!(transactions[0].currency(), Currency::Eur);
        assert!(transactions[1].is_income());
        assert_eq!(transactions[1].amount(), 1000.0);
    }

    #[test]
    fn rejects_invalid_json() {
        let result = read_transactions_json("not json".as_bytes());

        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn reads_csv_transactions() {
        let csv = "id,category,amount,isIncome,currency,createdAt\n\
                   1,🛒 Food,\"1 234,56\",false,USD,2024-01-02T10:00:00Z\n\
                   2,💼 Work,100,true,,2024-01-03T10:00:00+13:00\n";

        let transactions = read_transactions_csv(csv.as_bytes()).unwrap();

        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].amount(), 1234.56);
        assert_eq!(transactions[0].currency(), Currency::Usd);
        assert_eq!(transactions[0].created_at(), datetime!(2024-01-02 10:00 UTC));
        assert_eq!(transactions[1].currency(), Currency::default());
        assert!(transactions[1].is_income());
    }

    #[test]
    fn csv_with_bad_timestamp_is_an_error() {
        let csv = "id,category,amount,isIncome,currency,createdAt\n\
                   1,Food,10,false,,yesterday\n";

        let result = read_transactions_csv(csv.as_bytes());

        assert!(matches!(result, Err(Error::InvalidDate(text, _)) if text == "yesterday"));
    }

    #[test]
    fn csv_with_unknown_currency_is_an_error() {
        let csv = "id,category,amount,isIncome,currency,createdAt\n\
                   1,Food,10,false,ABC,2024-01-02T10:00:00Z\n";

        let result = read_transactions_csv(csv.as_bytes());

        assert!(matches!(result, Err(Error::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn csv_with_bad_direction_is_an_error() {
        let csv = "id,category,amount,isIncome,currency,createdAt\n\
                   1,Food,10,maybe,,2024-01-02T10:00:00Z\n";

        let result = read_transactions_csv(csv.as_bytes());

        assert!(matches!(result, Err(Error::Csv(_))));
    }

    #[test]
    fn writes_report_entries_as_csv() {
        let expenses = vec![expense("Rent", "75"), expense("Food", "25")];
        let report = build_category_report(&expenses, 100.0, CategoryKey::Name);
        let mut output = Vec::new();

        write_report_csv(&mut output, &report).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "category,amount,percentage\nRent,75.0,75\nFood,25.0,25\n");
    }

    #[test]
    fn writes_monthly_summaries_as_csv() {
        let expenses = vec![expense("Rent", "75")];
        let months = aggregate_by_month(&expenses);
        let mut output = Vec::new();

        write_report_csv(&mut output, &months).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "month,income,expense,net\n2024-01-01,0.0,75.0,-75.0\n");
    }

    #[test]
    fn writes_report_as_json() {
        let expenses = vec![expense("Rent", "75")];
        let report = build_category_report(&expenses, 75.0, CategoryKey::Name);
        let mut output = Vec::new();

        write_report_json(&mut output, &report).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value[0]["category"], "Rent");
        assert_eq!(value[0]["percentage"], "100");
    }
}
