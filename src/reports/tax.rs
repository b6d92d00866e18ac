// 🧾 Tax Management - income tax and VAT estimates

use crate::chart::{Figure, Trace, BLUE, RED};
use crate::config::Assumptions;
use crate::record::NumericField;
use crate::report::{round2, Metric, Report, ReportKind, Section, Value};
use crate::table::{Granularity, LedgerTable, Period};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxLiability {
    pub taxable_income: f64,
    pub income_tax: f64,
    pub vat_collected: f64,
    pub vat_paid: f64,
    pub vat_payable: f64,
    pub total_tax_liability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuarterlyTax {
    pub period: Period,
    pub income_tax: f64,
    pub vat_payable: f64,
    pub total_tax: f64,
}

pub fn tax_liability(table: &LedgerTable, assumptions: &Assumptions) -> TaxLiability {
    let taxable_income = table.sum(NumericField::NetIncome);
    let income_tax = taxable_income * assumptions.income_tax_rate;
    let vat_collected = table.sum(NumericField::Revenue) * assumptions.vat_rate;
    let vat_paid = table.sum(NumericField::Expenditure) * assumptions.vat_rate;
    let vat_payable = vat_collected - vat_paid;

    TaxLiability {
        taxable_income: round2(taxable_income),
        income_tax: round2(income_tax),
        vat_collected: round2(vat_collected),
        vat_paid: round2(vat_paid),
        vat_payable: round2(vat_payable),
        total_tax_liability: round2(income_tax + vat_payable),
    }
}

pub fn quarterly_summary(table: &LedgerTable, assumptions: &Assumptions) -> Vec<QuarterlyTax> {
    table
        .group_by(Granularity::Quarter)
        .into_iter()
        .map(|(period, rows)| {
            let income_tax = rows.sum(NumericField::NetIncome) * assumptions.income_tax_rate;
            let vat_payable = (rows.sum(NumericField::Revenue)
                - rows.sum(NumericField::Expenditure))
                * assumptions.vat_rate;

            QuarterlyTax {
                period,
                income_tax: round2(income_tax),
                vat_payable: round2(vat_payable),
                total_tax: round2(income_tax + vat_payable),
            }
        })
        .collect()
}

pub fn chart(liability: &TaxLiability) -> Figure {
    Figure::new("Tax Liability Breakdown").trace(Trace::pie(&[
        ("Income Tax", liability.income_tax, BLUE),
        ("VAT Payable", liability.vat_payable, RED),
    ]))
}

pub fn report(table: &LedgerTable, assumptions: &Assumptions) -> Report {
    let liability = tax_liability(table, assumptions);

    let rows = quarterly_summary(table, assumptions)
        .into_iter()
        .map(|q| {
            vec![
                Value::Text(q.period.to_string()),
                Value::Money(q.income_tax),
                Value::Money(q.vat_payable),
                Value::Money(q.total_tax),
            ]
        })
        .collect();

    Report::new(ReportKind::TaxManagement)
        .section(Section::metrics(
            "Tax Liability",
            vec![
                Metric::money("Taxable Income", liability.taxable_income),
                Metric::money("Income Tax", liability.income_tax),
                Metric::money("VAT Collected", liability.vat_collected),
                Metric::money("VAT Paid", liability.vat_paid),
                Metric::money("VAT Payable", liability.vat_payable),
                Metric::money("Total Tax Liability", liability.total_tax_liability),
            ],
        ))
        .section(Section::table(
            "Quarterly Tax Summary",
            &["Period", "Income Tax", "VAT Payable", "Total Tax"],
            rows,
        ))
        .chart(chart(&liability))
}
