// 📝 Transaction Recording - volume, totals, and the split by account type

use crate::chart::{Figure, Trace, BLUE};
use crate::record::{AccountType, NumericField};
use crate::report::{average, round2, Metric, Report, ReportKind, Section, Value};
use crate::table::{Granularity, LedgerTable};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionSummary {
    pub total_transactions: usize,
    pub total_amount: f64,
    pub average_amount: f64,
    /// None for an empty table
    pub date_range: Option<DateRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountTypeSummary {
    pub account_type: AccountType,
    pub count: usize,
    pub total_amount: f64,
    pub average_amount: f64,
}

pub fn summary(table: &LedgerTable) -> TransactionSummary {
    let total = table.sum(NumericField::TransactionAmount);

    TransactionSummary {
        total_transactions: table.len(),
        total_amount: round2(total),
        average_amount: round2(average(total, table.len())),
        date_range: table.date_range().map(|(start, end)| DateRange {
            start: start.format("%Y-%m-%d").to_string(),
            end: end.format("%Y-%m-%d").to_string(),
        }),
    }
}

/// Count / total / mean per account type, labels ascending.
/// Rows with a blank account type are left out, as they have no group.
pub fn by_account_type(table: &LedgerTable) -> Vec<AccountTypeSummary> {
    table
        .select_all()
        .group_by_account_type()
        .into_iter()
        .filter(|(account_type, _)| !account_type.label().is_empty())
        .map(|(account_type, rows)| AccountTypeSummary {
            account_type,
            count: rows.count(),
            total_amount: round2(rows.sum(NumericField::TransactionAmount)),
            average_amount: round2(rows.mean(NumericField::TransactionAmount)),
        })
        .collect()
}

/// Number of transactions per calendar day
pub fn daily_volume(table: &LedgerTable) -> Vec<(String, usize)> {
    table
        .group_by(Granularity::Day)
        .into_iter()
        .map(|(day, rows)| (day.to_string(), rows.count()))
        .collect()
}

pub fn chart(table: &LedgerTable) -> Figure {
    let (days, counts): (Vec<String>, Vec<f64>) = daily_volume(table)
        .into_iter()
        .map(|(day, count)| (day, count as f64))
        .unzip();

    Figure::new("Daily Transaction Volume")
        .x_title("Date")
        .y_title("Number of Transactions")
        .trace(Trace::lines_with_markers("Daily Transactions", days, counts, BLUE))
}

pub fn report(table: &LedgerTable) -> Report {
    let summary = summary(table);
    let date_range = match &summary.date_range {
        Some(range) => format!("{} to {}", range.start, range.end),
        None => "n/a".to_string(),
    };

    let rows = by_account_type(table)
        .into_iter()
        .map(|s| {
            vec![
                Value::Text(s.account_type.to_string()),
                Value::Count(s.count),
                Value::Money(s.total_amount),
                Value::Money(s.average_amount),
            ]
        })
        .collect();

    Report::new(ReportKind::TransactionRecording)
        .section(Section::metrics(
            "Transaction Summary",
            vec![
                Metric::count("Total Transactions", summary.total_transactions),
                Metric::money("Total Amount", summary.total_amount),
                Metric::money("Average Amount", summary.average_amount),
                Metric::text("Date Range", &date_range),
            ],
        ))
        .section(Section::table(
            "Transactions by Account Type",
            &["Account Type", "Count", "Total Amount", "Average Amount"],
            rows,
        ))
        .chart(chart(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures::{empty_table, sample_table};

    #[test]
    fn test_summary() {
        let summary = summary(&sample_table());

        assert_eq!(summary.total_transactions, 4);
        assert_eq!(summary.total_amount, 2200.0);
        assert_eq!(summary.average_amount, 550.0);
        assert_eq!(
            summary.date_range,
            Some(DateRange {
                start: "2024-01-10".to_string(),
                end: "2024-04-15".to_string(),
            })
        );
    }

    #[test]
    fn test_by_account_type() {
        let groups = by_account_type(&sample_table());
        let labels: Vec<_> = groups.iter().map(|g| g.account_type.label()).collect();
        assert_eq!(labels, vec!["Asset", "Equity", "Liability"]);

        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[0].total_amount, 1600.0);
        assert_eq!(groups[0].average_amount, 800.0);

        // Partition: group totals add back up to the table total
        let total: f64 = groups.iter().map(|g| g.total_amount).sum();
        assert_eq!(total, 2200.0);
    }

    #[test]
    fn test_daily_volume_and_chart() {
        let volume = daily_volume(&sample_table());
        assert_eq!(volume.len(), 4);
        assert_eq!(volume[0], ("2024-01-10".to_string(), 1));

        let figure = chart(&sample_table());
        assert_eq!(figure.title(), "Daily Transaction Volume");
        assert_eq!(figure.data.len(), 1);
    }

    #[test]
    fn test_empty_table() {
        let summary = summary(&empty_table());
        assert_eq!(summary.total_transactions, 0);
        assert_eq!(summary.total_amount, 0.0);
        assert_eq!(summary.average_amount, 0.0);
        assert_eq!(summary.date_range, None);
        assert!(by_account_type(&empty_table()).is_empty());

        let report = report(&empty_table());
        assert_eq!(report.metric("Date Range").unwrap().display, "n/a");
    }
}
