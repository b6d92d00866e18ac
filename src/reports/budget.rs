// 🎯 Budgeting and Forecasting - budget vs actual, next-quarter projection
//
// There is no budget input: budget figures are the actuals scaled by the
// configured factors. The forecast averages monthly totals and projects
// them over `forecast_months` with the configured growth.

use crate::chart::{Figure, Trace, BLUE, GREEN, RED};
use crate::config::Assumptions;
use crate::record::NumericField;
use crate::report::{percentage, round2, Metric, Report, ReportKind, Section};
use crate::table::{Granularity, LedgerTable};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetAnalysis {
    pub budget_revenue: f64,
    pub actual_revenue: f64,
    pub revenue_variance: f64,
    pub revenue_variance_pct: f64,
    pub budget_expenses: f64,
    pub actual_expenses: f64,
    pub expense_variance: f64,
    pub expense_variance_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub forecast_revenue: f64,
    pub forecast_expenses: f64,
    pub forecast_profit: f64,
    pub forecast_margin: f64,
}

pub fn budget_analysis(table: &LedgerTable, assumptions: &Assumptions) -> BudgetAnalysis {
    let actual_revenue = table.sum(NumericField::Revenue);
    let actual_expenses =
        table.sum(NumericField::Expenditure) + table.sum(NumericField::OperatingExpenses);

    let budget_revenue = actual_revenue * assumptions.budget_revenue_factor;
    let budget_expenses = actual_expenses * assumptions.budget_expense_factor;

    let revenue_variance = actual_revenue - budget_revenue;
    let expense_variance = actual_expenses - budget_expenses;

    BudgetAnalysis {
        budget_revenue: round2(budget_revenue),
        actual_revenue: round2(actual_revenue),
        revenue_variance: round2(revenue_variance),
        revenue_variance_pct: round2(percentage(revenue_variance, budget_revenue)),
        budget_expenses: round2(budget_expenses),
        actual_expenses: round2(actual_expenses),
        expense_variance: round2(expense_variance),
        expense_variance_pct: round2(percentage(expense_variance, budget_expenses)),
    }
}

pub fn forecast(table: &LedgerTable, assumptions: &Assumptions) -> Forecast {
    let months = table.group_by(Granularity::Month);

    let monthly_mean = |field: NumericField| {
        if months.is_empty() {
            0.0
        } else {
            months.iter().map(|(_, rows)| rows.sum(field)).sum::<f64>() / months.len() as f64
        }
    };

    let horizon = f64::from(assumptions.forecast_months);
    let revenue = monthly_mean(NumericField::Revenue) * horizon * assumptions.forecast_revenue_growth;
    let expenses =
        monthly_mean(NumericField::Expenditure) * horizon * assumptions.forecast_expense_growth;
    let profit = revenue - expenses;

    Forecast {
        forecast_revenue: round2(revenue),
        forecast_expenses: round2(expenses),
        forecast_profit: round2(profit),
        forecast_margin: round2(percentage(profit, revenue)),
    }
}

pub fn chart(forecast: &Forecast) -> Figure {
    Figure::new("Next Quarter Forecast")
        .y_title("Amount")
        .trace(Trace::bars(&[
            ("Forecasted Revenue", forecast.forecast_revenue, GREEN),
            ("Forecasted Expenses", forecast.forecast_expenses, RED),
            ("Forecasted Profit", forecast.forecast_profit, BLUE),
        ]))
}

pub fn report(table: &LedgerTable, assumptions: &Assumptions) -> Report {
    let budget = budget_analysis(table, assumptions);
    let forecast = forecast(table, assumptions);

    Report::new(ReportKind::BudgetingForecasting)
        .section(Section::metrics(
            "Budget vs Actual",
            vec![
                Metric::money("Budget Revenue", budget.budget_revenue),
                Metric::money("Actual Revenue", budget.actual_revenue),
                Metric::money("Revenue Variance", budget.revenue_variance),
                Metric::percent("Revenue Variance %", budget.revenue_variance_pct),
                Metric::money("Budget Expenses", budget.budget_expenses),
                Metric::money("Actual Expenses", budget.actual_expenses),
                Metric::money("Expense Variance", budget.expense_variance),
                Metric::percent("Expense Variance %", budget.expense_variance_pct),
            ],
        ))
        .section(Section::metrics(
            "Next Quarter Forecast",
            vec![
                Metric::money("Forecast Revenue", forecast.forecast_revenue),
                Metric::money("Forecast Expenses", forecast.forecast_expenses),
                Metric::money("Forecast Profit", forecast.forecast_profit),
                Metric::percent("Forecast Margin", forecast.forecast_margin),
            ],
        ))
        .chart(chart(&forecast))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures::{empty_table, sample_table};

    #[test]
    fn test_budget_analysis() {
        let budget = budget_analysis(&sample_table(), &Assumptions::default());

        assert_eq!(budget.actual_revenue, 2000.0);
        assert_eq!(budget.budget_revenue, 2200.0);
        assert_eq!(budget.revenue_variance, -200.0);
        assert_eq!(budget.revenue_variance_pct, -9.09);

        assert_eq!(budget.actual_expenses, 1150.0);
        assert_eq!(budget.budget_expenses, 1035.0);
        assert_eq!(budget.expense_variance, 115.0);
        assert_eq!(budget.expense_variance_pct, 11.11);
    }

    #[test]
    fn test_forecast_uses_monthly_means() {
        // Months 2024-01, 2024-02, 2024-04: revenue 1200/600/200, expenditure 500/250/100
        let forecast = forecast(&sample_table(), &Assumptions::default());

        assert_eq!(forecast.forecast_revenue, 2100.0);
        assert_eq!(forecast.forecast_expenses, 875.5);
        assert_eq!(forecast.forecast_profit, 1224.5);
        assert_eq!(forecast.forecast_margin, 58.31);
    }

    #[test]
    fn test_empty_table_guards() {
        let assumptions = Assumptions::default();

        let budget = budget_analysis(&empty_table(), &assumptions);
        assert_eq!(budget.revenue_variance_pct, 0.0);
        assert_eq!(budget.expense_variance_pct, 0.0);

        let forecast = forecast(&empty_table(), &assumptions);
        assert_eq!(forecast.forecast_revenue, 0.0);
        assert_eq!(forecast.forecast_margin, 0.0);
    }

    #[test]
    fn test_report_chart() {
        let report = report(&sample_table(), &Assumptions::default());
        assert_eq!(report.chart.as_ref().unwrap().title(), "Next Quarter Forecast");
        assert_eq!(report.metric("Forecast Margin").unwrap().display, "58.31%");
    }
}
