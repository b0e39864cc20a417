//! Date-range filtering and calendar period presets.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{
    Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset,
    format_description::BorrowedFormatItem,
    macros::{format_description, time},
};

use crate::{Error, Transaction};

const END_OF_DAY: Time = time!(23:59:59.999);
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Extend `end` to the last millisecond of its calendar day, keeping its offset.
pub fn end_of_day(end: OffsetDateTime) -> OffsetDateTime {
    end.replace_time(END_OF_DAY)
}

/// Select the transactions created between `start` and the end of the day of `end`.
///
/// `start` is used as given, while `end` is extended with [end_of_day] so
/// anything on the final day is included. Both bounds are inclusive. If
/// `start` falls after the extended end the result is empty. Input order is
/// kept.
pub fn filter_by_date_range(
    transactions: &[Transaction],
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> Vec<Transaction> {
    let end = end_of_day(end);

    let selected: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| {
            let created_at = transaction.created_at();
            start <= created_at && created_at <= end
        })
        .cloned()
        .collect();

    tracing::debug!(
        "Selected {} of {} transactions between {start} and {end}",
        selected.len(),
        transactions.len()
    );

    selected
}

/// Select the transactions created on the days of `range`, as observed at `offset`.
pub fn filter_by_period(
    transactions: &[Transaction],
    range: DateRange,
    offset: UtcOffset,
) -> Vec<Transaction> {
    let start = PrimitiveDateTime::new(range.start, Time::MIDNIGHT).assume_offset(offset);
    let end = PrimitiveDateTime::new(range.end, Time::MIDNIGHT).assume_offset(offset);

    filter_by_date_range(transactions, start, end)
}

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// An inclusive range of calendar days, serialized as `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// The first day in the range.
    #[serde(with = "iso_date")]
    pub start: Date,
    /// The last day in the range.
    #[serde(with = "iso_date")]
    pub end: Date,
}

impl DateRange {
    /// Parse a range from two `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidDate] if either string is not a valid date.
    pub fn parse(start: &str, end: &str) -> Result<Self, Error> {
        Ok(Self {
            start: parse_date(start)?,
            end: parse_date(end)?,
        })
    }

    /// Whether `date` falls within the range.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [Error::InvalidDate] if `text` is not a valid date.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), DATE_FORMAT)
        .map_err(|error| Error::InvalidDate(text.to_owned(), error.to_string()))
}

/// Calendar periods that reports can be viewed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangePreset {
    /// Monday to Sunday.
    Week,
    /// The 1st to the 14th, or the 15th to the end of the month.
    Fortnight,
    /// A calendar month.
    #[default]
    Month,
    /// A calendar quarter.
    Quarter,
    /// January to June, or July to December.
    HalfYear,
    /// A calendar year.
    Year,
}

impl RangePreset {
    /// The preset as written on the command line, e.g. "half-year".
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Fortnight => "fortnight",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::HalfYear => "half-year",
            Self::Year => "year",
        }
    }
}

impl FromStr for RangePreset {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "fortnight" => Ok(Self::Fortnight),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "half-year" => Ok(Self::HalfYear),
            "year" => Ok(Self::Year),
            other => Err(Error::InvalidConfig(format!(
                "unknown period \"{other}\", expected one of week, fortnight, month, quarter, half-year or year"
            ))),
        }
    }
}

/// Get the period of type `preset` that contains `anchor_date`.
pub fn compute_range(preset: RangePreset, anchor_date: Date) -> DateRange {
    match preset {
        RangePreset::Week => week_bounds(anchor_date),
        RangePreset::Fortnight => fortnight_bounds(anchor_date),
        RangePreset::Month => month_bounds(anchor_date.year(), anchor_date.month()),
        RangePreset::Quarter => quarter_bounds(anchor_date.year(), anchor_date.month()),
        RangePreset::HalfYear => half_year_bounds(anchor_date.year(), anchor_date.month()),
        RangePreset::Year => year_bounds(anchor_date.year()),
    }
}

/// A human readable label for `range`, e.g. "1 Jan 2024 - 31 Jan 2024".
pub fn range_label(range: DateRange) -> String {
    let start = format_date_label(range.start);
    let end = format_date_label(range.end);

    format!("{start} - {end}")
}

fn week_bounds(anchor_date: Date) -> DateRange {
    let weekday_number = anchor_date.weekday().number_from_monday() as i64;
    let start = anchor_date - Duration::days(weekday_number - 1);
    let end = start + Duration::days(6);

    DateRange { start, end }
}

fn fortnight_bounds(anchor_date: Date) -> DateRange {
    let year = anchor_date.year();
    let month = anchor_date.month();
    let (start_day, end_day) = if anchor_date.day() <= 14 {
        (1, 14)
    } else {
        (15, month.length(year))
    };

    DateRange {
        start: calendar_date(year, month, start_day),
        end: calendar_date(year, month, end_day),
    }
}

fn month_bounds(year: i32, month: Month) -> DateRange {
    DateRange {
        start: calendar_date(year, month, 1),
        end: calendar_date(year, month, month.length(year)),
    }
}

fn quarter_bounds(year: i32, month: Month) -> DateRange {
    let quarter_start = ((u8::from(month) - 1) / 3) * 3 + 1;

    span_months(year, quarter_start, quarter_start + 2)
}

fn half_year_bounds(year: i32, month: Month) -> DateRange {
    if u8::from(month) <= 6 {
        span_months(year, 1, 6)
    } else {
        span_months(year, 7, 12)
    }
}

fn year_bounds(year: i32) -> DateRange {
    span_months(year, 1, 12)
}

/// The range from the first day of `start_month` to the last day of `end_month`.
///
/// Month numbers are always in 1..=12 here.
fn span_months(year: i32, start_month: u8, end_month: u8) -> DateRange {
    let start_month = Month::try_from(start_month).unwrap_or(Month::January);
    let end_month = Month::try_from(end_month).unwrap_or(Month::December);

    DateRange {
        start: month_bounds(year, start_month).start,
        end: month_bounds(year, end_month).end,
    }
}

fn calendar_date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("day should be within the month")
}

fn format_date_label(date: Date) -> String {
    format!(
        "{} {} {}",
        date.day(),
        month_abbrev(date.month()),
        date.year()
    )
}

pub(crate) fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}
