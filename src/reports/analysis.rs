// 📊 Reporting and Analysis - headline metrics and monthly trends
//
// The dashboard headline is a subset of these key metrics.

use crate::chart::{Figure, Trace, BLUE, GREEN, RED};
use crate::record::NumericField;
use crate::report::{percentage, round2, Metric, Report, ReportKind, ReportLink, Section, Value};
use crate::table::{Granularity, LedgerTable, Period};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub total_revenue: f64,
    /// Expenditure plus operating expenses
    pub total_expenses: f64,
    pub net_profit: f64,
    pub profit_margin: f64,
    pub debt_to_equity: f64,
    pub success_rate: f64,
    pub total_transactions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    pub period: Period,
    pub revenue: f64,
    pub expenses: f64,
    pub net_income: f64,
    pub transactions: usize,
}

pub fn key_metrics(table: &LedgerTable) -> KeyMetrics {
    let total_revenue = table.sum(NumericField::Revenue);
    let total_expenses =
        table.sum(NumericField::Expenditure) + table.sum(NumericField::OperatingExpenses);
    let net_profit = table.sum(NumericField::NetIncome);

    let profit_margin = if total_revenue > 0.0 {
        net_profit / total_revenue * 100.0
    } else {
        0.0
    };

    KeyMetrics {
        total_revenue: round2(total_revenue),
        total_expenses: round2(total_expenses),
        net_profit: round2(net_profit),
        profit_margin: round2(profit_margin),
        debt_to_equity: round2(table.mean(NumericField::DebtToEquityRatio)),
        success_rate: round2(percentage(
            table.successful().count() as f64,
            table.len() as f64,
        )),
        total_transactions: table.len(),
    }
}

/// Per-month sums, oldest month first. Expenses here is Expenditure alone.
pub fn monthly_trends(table: &LedgerTable) -> Vec<MonthlyTrend> {
    table
        .group_by(Granularity::Month)
        .into_iter()
        .map(|(period, rows)| MonthlyTrend {
            period,
            revenue: round2(rows.sum(NumericField::Revenue)),
            expenses: round2(rows.sum(NumericField::Expenditure)),
            net_income: round2(rows.sum(NumericField::NetIncome)),
            transactions: rows.count(),
        })
        .collect()
}

pub fn chart(trends: &[MonthlyTrend]) -> Figure {
    let periods: Vec<String> = trends.iter().map(|t| t.period.to_string()).collect();
    let series = |pick: fn(&MonthlyTrend) -> f64| trends.iter().map(pick).collect::<Vec<_>>();

    Figure::new("Monthly Financial Trends")
        .x_title("Period")
        .y_title("Amount")
        .trace(Trace::lines_with_markers("Revenue", periods.clone(), series(|t| t.revenue), GREEN))
        .trace(Trace::lines_with_markers("Expenses", periods.clone(), series(|t| t.expenses), RED))
        .trace(Trace::lines_with_markers("Net Income", periods, series(|t| t.net_income), BLUE))
}

pub fn report(table: &LedgerTable) -> Report {
    let metrics = key_metrics(table);
    let trends = monthly_trends(table);

    let rows = trends
        .iter()
        .map(|t| {
            vec![
                Value::Text(t.period.to_string()),
                Value::Money(t.revenue),
                Value::Money(t.expenses),
                Value::Money(t.net_income),
                Value::Count(t.transactions),
            ]
        })
        .collect();

    Report::new(ReportKind::ReportingAnalysis)
        .section(Section::metrics(
            "Key Financial Metrics",
            vec![
                Metric::money("Total Revenue", metrics.total_revenue),
                Metric::money("Total Expenses", metrics.total_expenses),
                Metric::money("Net Profit", metrics.net_profit),
                Metric::percent("Profit Margin", metrics.profit_margin),
                Metric::ratio("Debt-to-Equity Ratio", metrics.debt_to_equity),
                Metric::percent("Success Rate", metrics.success_rate),
                Metric::count("Total Transactions", metrics.total_transactions),
            ],
        ))
        .section(Section::table(
            "Monthly Trends",
            &["Period", "Revenue", "Expenses", "Net Income", "Transactions"],
            rows,
        ))
        .chart(chart(&trends))
}

// ============================================================================
// DASHBOARD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub source: String,
    pub headline: Vec<Metric>,
    pub reports: Vec<ReportLink>,
}

pub fn dashboard(table: &LedgerTable) -> Dashboard {
    let metrics = key_metrics(table);

    Dashboard {
        source: table.source_name().to_string(),
        headline: vec![
            Metric::money("Total Revenue", metrics.total_revenue),
            Metric::money("Net Profit", metrics.net_profit),
            Metric::percent("Profit Margin", metrics.profit_margin),
            Metric::percent("Success Rate", metrics.success_rate),
        ],
        reports: ReportKind::ALL.iter().map(ReportKind::link).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures::{empty_table, sample_table};

    #[test]
    fn test_key_metrics() {
        let metrics = key_metrics(&sample_table());

        assert_eq!(metrics.total_revenue, 2000.0);
        assert_eq!(metrics.total_expenses, 1150.0);
        assert_eq!(metrics.net_profit, 500.0);
        assert_eq!(metrics.profit_margin, 25.0);
        assert_eq!(metrics.debt_to_equity, 1.25);
        assert_eq!(metrics.success_rate, 75.0);
        assert_eq!(metrics.total_transactions, 4);
    }

    #[test]
    fn test_monthly_trends() {
        let trends = monthly_trends(&sample_table());
        let periods: Vec<String> = trends.iter().map(|t| t.period.to_string()).collect();
        assert_eq!(periods, vec!["2024-01", "2024-02", "2024-04"]);

        assert_eq!(trends[0].revenue, 1200.0);
        assert_eq!(trends[0].expenses, 500.0);
        assert_eq!(trends[0].net_income, 300.0);
        assert_eq!(trends[0].transactions, 2);
        assert_eq!(trends[2].transactions, 1);

        let figure = chart(&trends);
        assert_eq!(figure.data.len(), 3);
    }

    #[test]
    fn test_empty_table_guards() {
        let metrics = key_metrics(&empty_table());
        assert_eq!(metrics.profit_margin, 0.0);
        assert_eq!(metrics.success_rate, 0.0);
        assert_eq!(metrics.debt_to_equity, 0.0);
        assert!(monthly_trends(&empty_table()).is_empty());
    }

    #[test]
    fn test_dashboard() {
        let dashboard = dashboard(&sample_table());
        let labels: Vec<&str> = dashboard.headline.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["Total Revenue", "Net Profit", "Profit Margin", "Success Rate"]);
        assert_eq!(dashboard.headline[3].display, "75.00%");
        assert_eq!(dashboard.reports.len(), 8);
        assert_eq!(dashboard.reports[0].slug, "transaction-recording");
    }
}
