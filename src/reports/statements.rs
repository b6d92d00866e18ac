// 📈 Core Financial Statements - balance sheet, P&L, cash flow
//
// The source rows are transactions, not postings, so the statements are
// estimates: Asset rows feed cash/receivables, Liability rows feed payables,
// and the remaining lines are shares taken from `Assumptions`.

use crate::chart::{Figure, Trace, BLUE, GREEN, RED};
use crate::config::Assumptions;
use crate::record::{AccountType, NumericField};
use crate::report::{round2, Metric, Report, ReportKind, Section};
use crate::table::LedgerTable;
use serde::Serialize;

// ============================================================================
// BALANCE SHEET
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assets {
    pub cash: f64,
    pub accounts_receivable: f64,
    pub total_assets: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Liabilities {
    pub accounts_payable: f64,
    pub total_liabilities: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Equity {
    pub retained_earnings: f64,
    pub total_equity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSheet {
    pub assets: Assets,
    pub liabilities: Liabilities,
    pub equity: Equity,
}

pub fn balance_sheet(table: &LedgerTable, assumptions: &Assumptions) -> BalanceSheet {
    let asset_rows = table.by_account_type(&AccountType::Asset);
    let cash = asset_rows.sum(NumericField::CashFlow);
    let accounts_receivable =
        asset_rows.sum(NumericField::TransactionAmount) * assumptions.receivable_ratio;

    let accounts_payable = table
        .by_account_type(&AccountType::Liability)
        .sum(NumericField::TransactionAmount);

    let retained_earnings = table.sum(NumericField::NetIncome);

    BalanceSheet {
        assets: Assets {
            cash: round2(cash),
            accounts_receivable: round2(accounts_receivable),
            total_assets: round2(cash + accounts_receivable),
        },
        liabilities: Liabilities {
            accounts_payable: round2(accounts_payable),
            total_liabilities: round2(accounts_payable),
        },
        equity: Equity {
            retained_earnings: round2(retained_earnings),
            total_equity: round2(retained_earnings),
        },
    }
}

// ============================================================================
// PROFIT & LOSS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitAndLoss {
    pub revenue: f64,
    pub operating_expenses: f64,
    pub other_expenses: f64,
    pub total_expenses: f64,
    pub gross_profit: f64,
    pub net_income: f64,
    /// Net income as a share of revenue; 0 unless revenue is positive
    pub profit_margin: f64,
}

pub fn profit_and_loss(table: &LedgerTable) -> ProfitAndLoss {
    let revenue = table.sum(NumericField::Revenue);
    let operating_expenses = table.sum(NumericField::OperatingExpenses);
    let other_expenses = table.sum(NumericField::Expenditure);
    let total_expenses = operating_expenses + other_expenses;
    let net_income = revenue - total_expenses;

    let profit_margin = if revenue > 0.0 {
        net_income / revenue * 100.0
    } else {
        0.0
    };

    ProfitAndLoss {
        revenue: round2(revenue),
        operating_expenses: round2(operating_expenses),
        other_expenses: round2(other_expenses),
        total_expenses: round2(total_expenses),
        gross_profit: round2(table.sum(NumericField::GrossProfit)),
        net_income: round2(net_income),
        profit_margin: round2(profit_margin),
    }
}

// ============================================================================
// CASH FLOW
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowStatement {
    pub operating_activities: f64,
    pub investing_activities: f64,
    pub financing_activities: f64,
    pub net_change: f64,
    pub beginning_balance: f64,
    pub ending_balance: f64,
}

pub fn cash_flow_statement(table: &LedgerTable, assumptions: &Assumptions) -> CashFlowStatement {
    let working_capital_change = table.sum(NumericField::CashFlow) * assumptions.working_capital_ratio;
    let operating = table.sum(NumericField::NetIncome) + working_capital_change;

    let asset_purchases = table
        .by_account_type(&AccountType::Asset)
        .sum(NumericField::TransactionAmount);
    // Capex is always an outflow
    let investing = -(asset_purchases * assumptions.capex_ratio).abs();

    let financing = table
        .by_account_type(&AccountType::Liability)
        .sum(NumericField::TransactionAmount)
        * assumptions.debt_proceeds_ratio;

    let net_change = operating + investing + financing;
    let beginning = assumptions.opening_cash;

    CashFlowStatement {
        operating_activities: round2(operating),
        investing_activities: round2(investing),
        financing_activities: round2(financing),
        net_change: round2(net_change),
        beginning_balance: round2(beginning),
        ending_balance: round2(beginning + net_change),
    }
}

// ============================================================================
// PAGE
// ============================================================================

pub fn chart(pl: &ProfitAndLoss) -> Figure {
    let category = "Financial Performance";
    Figure::new("Revenue, Expenses, and Net Income")
        .y_title("Amount")
        .grouped()
        .trace(Trace::bar("Revenue", category, pl.revenue, GREEN))
        .trace(Trace::bar("Expenses", category, pl.total_expenses, RED))
        .trace(Trace::bar("Net Income", category, pl.net_income, BLUE))
}

pub fn report(table: &LedgerTable, assumptions: &Assumptions) -> Report {
    let bs = balance_sheet(table, assumptions);
    let pl = profit_and_loss(table);
    let cf = cash_flow_statement(table, assumptions);

    Report::new(ReportKind::FinancialStatements)
        .section(Section::metrics(
            "Balance Sheet",
            vec![
                Metric::money("Cash", bs.assets.cash),
                Metric::money("Accounts Receivable", bs.assets.accounts_receivable),
                Metric::money("Total Assets", bs.assets.total_assets),
                Metric::money("Accounts Payable", bs.liabilities.accounts_payable),
                Metric::money("Total Liabilities", bs.liabilities.total_liabilities),
                Metric::money("Retained Earnings", bs.equity.retained_earnings),
                Metric::money("Total Equity", bs.equity.total_equity),
            ],
        ))
        .section(Section::metrics(
            "Profit & Loss Statement",
            vec![
                Metric::money("Revenue", pl.revenue),
                Metric::money("Operating Expenses", pl.operating_expenses),
                Metric::money("Other Expenses", pl.other_expenses),
                Metric::money("Total Expenses", pl.total_expenses),
                Metric::money("Gross Profit", pl.gross_profit),
                Metric::money("Net Income", pl.net_income),
                Metric::percent("Profit Margin", pl.profit_margin),
            ],
        ))
        .section(Section::metrics(
            "Cash Flow Statement",
            vec![
                Metric::money("Operating Activities", cf.operating_activities),
                Metric::money("Investing Activities", cf.investing_activities),
                Metric::money("Financing Activities", cf.financing_activities),
                Metric::money("Net Change", cf.net_change),
                Metric::money("Beginning Balance", cf.beginning_balance),
                Metric::money("Ending Balance", cf.ending_balance),
            ],
        ))
        .chart(chart(&pl))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LedgerRecord;
    use crate::reports::fixtures::{day, empty_table, sample_table};

    #[test]
    fn test_balance_sheet() {
        let bs = balance_sheet(&sample_table(), &Assumptions::default());

        assert_eq!(bs.assets.cash, 750.0);
        assert_eq!(bs.assets.accounts_receivable, 240.0);
        assert_eq!(bs.assets.total_assets, 990.0);
        assert_eq!(bs.liabilities.accounts_payable, 400.0);
        assert_eq!(bs.liabilities.total_liabilities, 400.0);
        assert_eq!(bs.equity.retained_earnings, 500.0);
        assert_eq!(bs.equity.total_equity, 500.0);
    }

    #[test]
    fn test_profit_and_loss() {
        let pl = profit_and_loss(&sample_table());

        assert_eq!(pl.revenue, 2000.0);
        assert_eq!(pl.operating_expenses, 300.0);
        assert_eq!(pl.other_expenses, 850.0);
        assert_eq!(pl.total_expenses, 1150.0);
        assert_eq!(pl.gross_profit, 1150.0);
        assert_eq!(pl.net_income, 850.0);
        assert_eq!(pl.profit_margin, 42.5);
    }

    #[test]
    fn test_profit_margin_zero_without_revenue() {
        let table = LedgerTable::from_records(vec![LedgerRecord::new(
            "T1",
            day(2024, 1, 1),
            AccountType::Asset,
        )
        .with_value(NumericField::Expenditure, 100.0)]);

        let pl = profit_and_loss(&table);
        assert_eq!(pl.revenue, 0.0);
        assert_eq!(pl.net_income, -100.0);
        assert_eq!(pl.profit_margin, 0.0);
    }

    #[test]
    fn test_cash_flow_statement() {
        let cf = cash_flow_statement(&sample_table(), &Assumptions::default());

        assert_eq!(cf.operating_activities, 550.0);
        assert_eq!(cf.investing_activities, -320.0);
        assert_eq!(cf.financing_activities, 40.0);
        assert_eq!(cf.net_change, 270.0);
        assert_eq!(cf.beginning_balance, 50_000.0);
        assert_eq!(cf.ending_balance, 50_270.0);
    }

    #[test]
    fn test_assumptions_flow_through() {
        let assumptions = Assumptions {
            receivable_ratio: 0.5,
            opening_cash: 0.0,
            ..Assumptions::default()
        };

        let bs = balance_sheet(&sample_table(), &assumptions);
        assert_eq!(bs.assets.accounts_receivable, 800.0);

        let cf = cash_flow_statement(&sample_table(), &assumptions);
        assert_eq!(cf.ending_balance, cf.net_change);
    }

    #[test]
    fn test_empty_table_statements() {
        let assumptions = Assumptions::default();
        let report = report(&empty_table(), &assumptions);

        assert_eq!(report.metric("Total Assets").unwrap().display, "$0.00");
        assert_eq!(report.metric("Profit Margin").unwrap().display, "0.00%");
        assert_eq!(report.metric("Ending Balance").unwrap().display, "$50000.00");
        assert_eq!(report.chart.as_ref().unwrap().data.len(), 3);
    }
}
