use std::{
    error::Error,
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
    process::exit,
};

use clap::{Parser, ValueEnum};
use serde::Serialize;
use time::{Date, OffsetDateTime, UtcOffset};

use pocketbook::{
    CategoryReportEntry, ChartPoint, Currency, DateRange, LimitProgress, MonthlySummary,
    RangePreset, ReportConfig, Summary, Transaction, aggregate_by_month, build_chart_series,
    category_chart, compute_range, evaluate_category_limits, filter_by_period, find_extremes,
    format_money, local_offset_or_utc, parse_date, partition, range_label, read_transactions_csv,
    read_transactions_json, setup_logging, summarize, write_report_csv, write_report_json,
};

/// Summarise a file of income and expense transactions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the transactions, either a JSON array or a CSV file.
    #[arg(long, short)]
    input: PathBuf,

    /// File path to a JSON report config.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// The first day to include, as YYYY-MM-DD.
    #[arg(long, requires = "end", conflicts_with = "period")]
    start: Option<String>,

    /// The last day to include, as YYYY-MM-DD.
    #[arg(long, requires = "start")]
    end: Option<String>,

    /// Only include the period of this kind that contains the anchor date.
    #[arg(long)]
    period: Option<RangePreset>,

    /// The date the period is taken around, as YYYY-MM-DD. Defaults to today.
    #[arg(long, requires = "period")]
    anchor: Option<String>,

    /// How to print the report.
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Also print the ECharts options for an income and expenses chart.
    #[arg(long)]
    chart: bool,

    /// Overrides the currency in the config file.
    #[arg(long)]
    currency: Option<Currency>,

    /// Overrides the timezone in the config file, e.g. "Pacific/Auckland".
    #[arg(long)]
    timezone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Everything printed by `--format json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    range: Option<DateRange>,
    summary: &'a Summary,
    months: &'a [MonthlySummary],
    limits: &'a [LimitProgress],
    #[serde(skip_serializing_if = "Option::is_none")]
    chart: Option<serde_json::Value>,
}

/// One line of `--format csv`.
#[derive(Serialize)]
struct CsvLine<'a> {
    direction: &'static str,
    category: &'a str,
    amount: f64,
    percentage: &'a str,
}

fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ReportConfig::from_json_file(path)?,
        None => ReportConfig::default(),
    };

    if let Some(currency) = args.currency {
        config.currency = currency;
    }

    if let Some(timezone) = &args.timezone {
        config.timezone = timezone.clone();
    }

    let offset = local_offset_or_utc(&config.timezone);
    let today = OffsetDateTime::now_utc().to_offset(offset).date();

    let Some(input_format) = input_format(&args.input) else {
        eprintln!(
            "Input path must end in '.json' or '.csv', got {:#?}.",
            args.input
        );
        exit(1);
    };

    let all_transactions = load_transactions(&args.input, input_format)?;
    let range = selected_range(&args, today)?;

    let transactions = match range {
        Some(range) => filter_by_period(&all_transactions, range, offset),
        None => all_transactions.clone(),
    };

    tracing::info!(
        "Reporting on {} of {} transactions",
        transactions.len(),
        all_transactions.len()
    );

    let summary = summarize(&transactions, config.category_key);
    let months = aggregate_by_month(&transactions);
    let limits = evaluate_category_limits(
        &all_transactions,
        &config.limits,
        compute_range(RangePreset::Month, today),
        offset,
    );
    let chart_points = if args.chart {
        let split = partition(&transactions);
        Some(build_chart_series(&split.income, &split.expense))
    } else {
        None
    };

    match args.format {
        OutputFormat::Table => {
            let heading = match range {
                Some(range) => range_label(range),
                None => data_span_label(&transactions, offset),
            };

            print_table(&heading, &summary, &months, &limits, config.currency);

            if let Some(points) = &chart_points {
                println!();
                println!("{}", category_chart(points));
            }
        }
        OutputFormat::Json => {
            let chart = chart_points
                .as_deref()
                .map(chart_options)
                .transpose()?;
            let report = Report {
                range,
                summary: &summary,
                months: &months,
                limits: &limits,
                chart,
            };

            write_report_json(io::stdout().lock(), &report)?;
            println!();
        }
        OutputFormat::Csv => {
            let lines = csv_lines(&summary);
            write_report_csv(io::stdout().lock(), &lines)?;
        }
    }

    Ok(())
}

fn input_format(path: &Path) -> Option<InputFormat> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();

    match extension.as_str() {
        "json" => Some(InputFormat::Json),
        "csv" => Some(InputFormat::Csv),
        _ => None,
    }
}

fn load_transactions(
    path: &Path,
    format: InputFormat,
) -> Result<Vec<Transaction>, pocketbook::Error> {
    let reader = BufReader::new(File::open(path)?);

    match format {
        InputFormat::Json => read_transactions_json(reader),
        InputFormat::Csv => read_transactions_csv(reader),
    }
}

fn selected_range(args: &Args, today: Date) -> Result<Option<DateRange>, pocketbook::Error> {
    if let (Some(start), Some(end)) = (&args.start, &args.end) {
        return DateRange::parse(start, end).map(Some);
    }

    let Some(preset) = args.period else {
        return Ok(None);
    };

    let anchor = match &args.anchor {
        Some(anchor) => parse_date(anchor)?,
        None => today,
    };

    Ok(Some(compute_range(preset, anchor)))
}

fn data_span_label(transactions: &[Transaction], offset: UtcOffset) -> String {
    match find_extremes(transactions).date_bounds(offset) {
        Some(bounds) => range_label(bounds),
        None => "No transactions".to_owned(),
    }
}

fn chart_options(points: &[ChartPoint]) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::from_str(&category_chart(points).to_string())
}

fn csv_lines(summary: &Summary) -> Vec<CsvLine<'_>> {
    let mut lines = direction_lines("income", &summary.income_report);
    lines.extend(direction_lines("expense", &summary.expense_report));
    lines
}

fn direction_lines<'a>(
    direction: &'static str,
    report: &'a [CategoryReportEntry],
) -> Vec<CsvLine<'a>> {
    report
        .iter()
        .map(|entry| CsvLine {
            direction,
            category: &entry.category,
            amount: entry.amount,
            percentage: &entry.percentage,
        })
        .collect()
}

fn print_table(
    heading: &str,
    summary: &Summary,
    months: &[MonthlySummary],
    limits: &[LimitProgress],
    currency: Currency,
) {
    println!("{heading}");
    println!();
    println!("{:<12}{:>16}", "Income", format_money(summary.total_income, currency));
    println!("{:<12}{:>16}", "Expenses", format_money(summary.total_expense, currency));
    println!("{:<12}{:>16}", "Balance", format_money(summary.balance, currency));

    print_category_report("Income by category", &summary.income_report, currency);
    print_category_report("Expenses by category", &summary.expense_report, currency);

    if !months.is_empty() {
        println!();
        println!("Monthly");
        for month in months {
            println!(
                "  {:<10}{:>16}{:>16}{:>16}",
                month.label(),
                format_money(month.income, currency),
                format_money(month.expense, currency),
                format_money(month.net, currency)
            );
        }
    }

    if !limits.is_empty() {
        println!();
        println!("Limits this month");
        for progress in limits {
            let marker = if progress.status.is_over { " over" } else { "" };
            println!(
                "  {:<24}{:>16} of {:<16}{:>6.0}%{marker}",
                progress.category,
                format_money(progress.spent, currency),
                format_money(progress.limit, currency),
                progress.percent_used
            );
        }
    }
}

fn print_category_report(title: &str, report: &[CategoryReportEntry], currency: Currency) {
    if report.is_empty() {
        return;
    }

    println!();
    println!("{title}");
    for entry in report {
        println!(
            "  {:<24}{:>16}{:>8}%",
            entry.category,
            format_money(entry.amount, currency),
            entry.percentage
        );
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{InputFormat, input_format};

    #[test]
    fn input_format_comes_from_extension() {
        assert_eq!(input_format(Path::new("data.json")), Some(InputFormat::Json));
        assert_eq!(input_format(Path::new("data.CSV")), Some(InputFormat::Csv));
    }

    #[test]
    fn unknown_or_missing_extension_has_no_format() {
        assert_eq!(input_format(Path::new("data.txt")), None);
        assert_eq!(input_format(Path::new("data")), None);
    }
}
