// Report modules - one per page of the accounting suite
//
// Each module is a set of pure functions over `&LedgerTable`:
// - typed results (Serialize) that callers can use directly
// - `report(...)` that lays the results out as a `Report` page with a chart
//
// None of them hold state; the table is the only input besides `Assumptions`.

pub mod transactions;
pub mod statements;
pub mod ledgers;
pub mod cash;
pub mod analysis;
pub mod tax;
pub mod budget;
pub mod compliance;

pub use transactions::{AccountTypeSummary, DateRange, TransactionSummary};
pub use statements::{BalanceSheet, CashFlowStatement, ProfitAndLoss};
pub use ledgers::{LedgerBalance, SubsidiaryLedgers};
pub use cash::{BankReconciliation, CashSummary};
pub use analysis::{Dashboard, KeyMetrics, MonthlyTrend};
pub use tax::{QuarterlyTax, TaxLiability};
pub use budget::{BudgetAnalysis, Forecast};
pub use compliance::{DataQuality, TransactionAudit};
