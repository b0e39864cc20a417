//! Parsing of string-encoded amounts and formatting of money for display.

use numfmt::{Formatter, Precision};

use crate::Currency;

/// Parse a string-encoded amount into a number.
///
/// All whitespace is removed (users type thousands separators as spaces) and
/// the first comma is treated as a decimal mark, so `"1 234,56"` parses to
/// `1234.56`.
///
/// This function never fails. Anything that does not parse to a finite
/// number, including the empty string, yields [f64::NAN] and it is up to
/// the caller to decide how to treat it.
pub fn parse_amount(raw: &str) -> f64 {
    let normalized: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let normalized = normalized.replacen(',', ".", 1);

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => f64::NAN,
    }
}

/// Format `amount` as money in `currency`, e.g. `$1,234.50` or `-€12.00`.
///
/// The amount is rounded to cents first, so float residue such as
/// `-5.55e-17` is shown as zero. Amounts that are not finite are rendered
/// as `"-"`.
pub fn format_money(amount: f64, currency: Currency) -> String {
    if !amount.is_finite() {
        return "-".to_owned();
    }

    let amount = (amount * 100.0).round() / 100.0;
    let sign = currency.sign();

    if amount == 0.0 {
        // Zero is hardcoded as "0" by numfmt
        return format!("{sign}0.00");
    }

    let prefix = if amount < 0.0 {
        format!("-{sign}")
    } else {
        sign.to_owned()
    };

    let formatted = match Formatter::currency(&prefix) {
        Ok(formatter) => formatter
            .precision(Precision::Decimals(2))
            .fmt_string(amount.abs()),
        Err(error) => {
            tracing::debug!("Falling back to plain formatting for prefix {prefix:?}: {error:?}");
            return format!("{prefix}{}", group_thousands(amount.abs()));
        }
    };

    // numfmt switches to scientific notation for very large magnitudes.
    if formatted.strip_prefix(&prefix).unwrap_or(&formatted).contains('e') {
        return format!("{prefix}{}", group_thousands(amount.abs()));
    }

    pad_decimals(formatted)
}

/// Format a non-negative amount with two decimals and comma thousands
/// separators, e.g. "1,234,567.80".
fn group_thousands(amount: f64) -> String {
    let fixed = format!("{amount:.2}");
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{grouped}.{fraction}")
}

/// numfmt drops trailing zeros, e.g. "12.30" is rendered as "12.3" and
/// "12.00" as "12", so pad the fraction back out to two digits.
fn pad_decimals(mut formatted: String) -> String {
    match formatted.rfind('.') {
        Some(dot) => {
            let decimals = formatted.len() - dot - 1;
            for _ in decimals..2 {
                formatted.push('0');
            }
        }
        None => formatted.push_str(".00"),
    }

    formatted
}
