// 📚 Subsidiary Ledgers - receivables, payables, fixed assets

use crate::chart::{Figure, Trace, BLUE, GREEN, RED};
use crate::config::Assumptions;
use crate::record::{AccountType, NumericField};
use crate::report::{average, round2, Metric, Report, ReportKind, Section};
use crate::table::LedgerTable;
use serde::Serialize;

/// One ledger's balance with the transactions behind it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerBalance {
    pub total: f64,
    pub transactions: usize,
    /// total / transactions, 0 for an empty ledger
    pub average: f64,
}

impl LedgerBalance {
    fn new(total: f64, transactions: usize) -> Self {
        LedgerBalance {
            total: round2(total),
            transactions,
            average: round2(average(total, transactions)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubsidiaryLedgers {
    pub accounts_receivable: LedgerBalance,
    pub accounts_payable: LedgerBalance,
    pub fixed_assets: LedgerBalance,
}

/// Receivables: the configured share of Asset amounts
pub fn accounts_receivable(table: &LedgerTable, assumptions: &Assumptions) -> LedgerBalance {
    let assets = table.by_account_type(&AccountType::Asset);
    LedgerBalance::new(
        assets.sum(NumericField::TransactionAmount) * assumptions.receivable_ratio,
        assets.count(),
    )
}

pub fn accounts_payable(table: &LedgerTable) -> LedgerBalance {
    let liabilities = table.by_account_type(&AccountType::Liability);
    LedgerBalance::new(
        liabilities.sum(NumericField::TransactionAmount),
        liabilities.count(),
    )
}

pub fn fixed_assets(table: &LedgerTable) -> LedgerBalance {
    let assets = table.by_account_type(&AccountType::Asset);
    LedgerBalance::new(assets.sum(NumericField::TransactionAmount), assets.count())
}

pub fn ledgers(table: &LedgerTable, assumptions: &Assumptions) -> SubsidiaryLedgers {
    SubsidiaryLedgers {
        accounts_receivable: accounts_receivable(table, assumptions),
        accounts_payable: accounts_payable(table),
        fixed_assets: fixed_assets(table),
    }
}

pub fn chart(ledgers: &SubsidiaryLedgers) -> Figure {
    Figure::new("Subsidiary Ledgers Overview")
        .y_title("Amount")
        .trace(Trace::bars(&[
            ("Accounts Receivable", ledgers.accounts_receivable.total, BLUE),
            ("Accounts Payable", ledgers.accounts_payable.total, RED),
            ("Fixed Assets", ledgers.fixed_assets.total, GREEN),
        ]))
}

pub fn report(table: &LedgerTable, assumptions: &Assumptions) -> Report {
    let ledgers = ledgers(table, assumptions);

    let section = |heading: &str, total_label: &str, count_label: &str, avg_label: &str, balance: &LedgerBalance| {
        Section::metrics(
            heading,
            vec![
                Metric::money(total_label, balance.total),
                Metric::count(count_label, balance.transactions),
                Metric::money(avg_label, balance.average),
            ],
        )
    };

    Report::new(ReportKind::SubsidiaryLedgers)
        .section(section(
            "Accounts Receivable",
            "Total Receivable",
            "Receivable Transactions",
            "Average Receivable",
            &ledgers.accounts_receivable,
        ))
        .section(section(
            "Accounts Payable",
            "Total Payable",
            "Payable Transactions",
            "Average Payable",
            &ledgers.accounts_payable,
        ))
        .section(section(
            "Fixed Assets",
            "Total Fixed Assets",
            "Number of Assets",
            "Average Asset Value",
            &ledgers.fixed_assets,
        ))
        .chart(chart(&ledgers))
}
