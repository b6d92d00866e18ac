// 🏦 Bank and Cash Management - cash position and bank reconciliation
//
// Reconciliation formula:
//   adjusted_balance = book_balance - outstanding_checks + deposits_in_transit
// Failed transactions stand in for checks that have not cleared.

use crate::chart::{Figure, Trace, GREEN};
use crate::config::Assumptions;
use crate::record::NumericField;
use crate::report::{round2, Metric, Report, ReportKind, Section};
use crate::table::{Granularity, LedgerTable};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashSummary {
    pub total_cash_flow: f64,
    pub cash_inflow: f64,
    /// Reported as a positive number
    pub cash_outflow: f64,
    pub net_cash: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankReconciliation {
    pub book_balance: f64,
    pub outstanding_checks: f64,
    pub deposits_in_transit: f64,
    pub adjusted_balance: f64,
}

pub fn cash_summary(table: &LedgerTable) -> CashSummary {
    let total = table.sum(NumericField::CashFlow);
    let inflow = table
        .filter(|r| r.cash_flow > 0.0)
        .sum(NumericField::CashFlow);
    let outflow = table
        .filter(|r| r.cash_flow < 0.0)
        .sum(NumericField::CashFlow);

    CashSummary {
        total_cash_flow: round2(total),
        cash_inflow: round2(inflow),
        cash_outflow: round2(outflow.abs()),
        net_cash: round2(total),
    }
}

pub fn bank_reconciliation(table: &LedgerTable, assumptions: &Assumptions) -> BankReconciliation {
    let book_balance = table.sum(NumericField::CashFlow);
    let outstanding_checks = table.failed().sum(NumericField::TransactionAmount);
    let deposits_in_transit =
        table.sum(NumericField::TransactionAmount) * assumptions.deposits_in_transit_ratio;

    BankReconciliation {
        book_balance: round2(book_balance),
        outstanding_checks: round2(outstanding_checks),
        deposits_in_transit: round2(deposits_in_transit),
        adjusted_balance: round2(book_balance - outstanding_checks + deposits_in_transit),
    }
}

/// Running total of cash flow, one point per calendar day
pub fn cumulative_daily_cash(table: &LedgerTable) -> Vec<(String, f64)> {
    let mut running = 0.0;
    table
        .group_by(Granularity::Day)
        .into_iter()
        .map(|(day, rows)| {
            running += rows.sum(NumericField::CashFlow);
            (day.to_string(), running)
        })
        .collect()
}

pub fn chart(table: &LedgerTable) -> Figure {
    let (days, totals) = cumulative_daily_cash(table).into_iter().unzip();

    Figure::new("Cumulative Cash Flow Over Time")
        .x_title("Date")
        .y_title("Cash Flow")
        .trace(Trace::area("Cumulative Cash Flow", days, totals, GREEN))
}

pub fn report(table: &LedgerTable, assumptions: &Assumptions) -> Report {
    let summary = cash_summary(table);
    let reconciliation = bank_reconciliation(table, assumptions);

    Report::new(ReportKind::BankCashManagement)
        .section(Section::metrics(
            "Cash Summary",
            vec![
                Metric::money("Total Cash Flow", summary.total_cash_flow),
                Metric::money("Cash Inflow", summary.cash_inflow),
                Metric::money("Cash Outflow", summary.cash_outflow),
                Metric::money("Net Cash", summary.net_cash),
            ],
        ))
        .section(Section::metrics(
            "Bank Reconciliation",
            vec![
                Metric::money("Book Balance", reconciliation.book_balance),
                Metric::money("Outstanding Checks", reconciliation.outstanding_checks),
                Metric::money("Deposits in Transit", reconciliation.deposits_in_transit),
                Metric::money("Adjusted Balance", reconciliation.adjusted_balance),
            ],
        ))
        .chart(chart(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures::{day, empty_table, record, sample_table};

    #[test]
    fn test_cash_summary() {
        let summary = cash_summary(&sample_table());

        assert_eq!(summary.total_cash_flow, 500.0);
        assert_eq!(summary.cash_inflow, 750.0);
        assert_eq!(summary.cash_outflow, 250.0);
        assert_eq!(summary.net_cash, 500.0);
    }

    #[test]
    fn test_bank_reconciliation() {
        let rec = bank_reconciliation(&sample_table(), &Assumptions::default());

        assert_eq!(rec.book_balance, 500.0);
        assert_eq!(rec.outstanding_checks, 400.0);
        assert_eq!(rec.deposits_in_transit, 44.0);
        assert_eq!(rec.adjusted_balance, 144.0);
    }

    #[test]
    fn test_cumulative_cash_groups_same_day() {
        let table = LedgerTable::from_records(vec![
            record("A", day(2024, 3, 1), "Asset", 0.0, 100.0, "Success"),
            record("B", day(2024, 3, 1), "Asset", 0.0, -30.0, "Success"),
            record("C", day(2024, 3, 2), "Asset", 0.0, 10.0, "Success"),
        ]);

        assert_eq!(
            cumulative_daily_cash(&table),
            vec![("2024-03-01".to_string(), 70.0), ("2024-03-02".to_string(), 80.0)]
        );
    }

    #[test]
    fn test_empty_table() {
        let summary = cash_summary(&empty_table());
        assert_eq!(summary.cash_inflow, 0.0);
        assert_eq!(summary.cash_outflow, 0.0);
        assert!(cumulative_daily_cash(&empty_table()).is_empty());

        let rec = bank_reconciliation(&empty_table(), &Assumptions::default());
        assert_eq!(rec.adjusted_balance, 0.0);
    }
}
