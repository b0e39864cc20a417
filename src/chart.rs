//! Chart-ready series comparing income and expenses per category.
//!
//! [build_chart_series] produces plain data points. [category_chart] turns
//! them into an ECharts configuration; call `to_string()` on the result to
//! get the JSON options.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::bar,
};
use serde::{Deserialize, Serialize};

use crate::{CategoryKey, Transaction, sum_by_key};

/// Income and expense totals for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// The full category label, emoji included.
    pub category: String,
    /// Total income for the category, zero if it had none.
    pub income: f64,
    /// Total expenses for the category, zero if it had none.
    pub expense: f64,
}

/// The order chart points are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartOrder {
    /// Income categories in first-seen order, followed by categories that
    /// only have expenses, also in first-seen order.
    #[default]
    FirstSeen,
    /// Sorted by category label.
    Alphabetical,
}

/// Merge per-category income and expense totals into one series.
///
/// Every category seen in either input gets exactly one point, ordered by
/// [ChartOrder::FirstSeen].
pub fn build_chart_series(income: &[Transaction], expense: &[Transaction]) -> Vec<ChartPoint> {
    build_chart_series_ordered(income, expense, ChartOrder::FirstSeen)
}

/// Like [build_chart_series] with an explicit ordering.
pub fn build_chart_series_ordered(
    income: &[Transaction],
    expense: &[Transaction],
    order: ChartOrder,
) -> Vec<ChartPoint> {
    let income_totals = sum_by_key(income, |t| CategoryKey::Label.extract(t));
    let expense_totals = sum_by_key(expense, |t| CategoryKey::Label.extract(t));

    let expense_only = expense_totals
        .keys()
        .filter(|category| !income_totals.contains_key(category));

    let mut points: Vec<ChartPoint> = income_totals
        .keys()
        .chain(expense_only)
        .map(|category| ChartPoint {
            category: category.to_owned(),
            income: income_totals.get(category).unwrap_or(0.0),
            expense: expense_totals.get(category).unwrap_or(0.0),
        })
        .collect();

    if order == ChartOrder::Alphabetical {
        points.sort_by(|a, b| a.category.cmp(&b.category));
    }

    points
}

/// Build a grouped bar chart with an income and an expense bar per category.
pub fn category_chart(points: &[ChartPoint]) -> Chart {
    let labels: Vec<String> = points.iter().map(|point| point.category.clone()).collect();
    let income: Vec<f64> = points.iter().map(|point| point.income).collect();
    let expense: Vec<f64> = points.iter().map(|point| point.expense).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Income and expenses")
                .subtext("Grouped by category"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .legend(Legend::new().top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(amount_formatter())),
        )
        .series(bar::Bar::new().name("Income").data(income))
        .series(bar::Bar::new().name("Expenses").data(expense))
}

fn amount_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "return (number) ? number.toLocaleString(undefined, { maximumFractionDigits: 2 }) : \"-\";",
    )
}
