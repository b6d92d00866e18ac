// 🧾 Ledger Records - raw CSV rows and their validated, typed form
//
// A RawRecord is what the CSV says. A LedgerRecord is what the reports read:
// named typed fields, a real timestamp, and numbers that are always finite.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// NUMERIC FIELDS
// ============================================================================

/// The designated numeric columns. Each one is coerced to a finite f64 on
/// ingestion (unparsable → 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericField {
    TransactionAmount,
    CashFlow,
    NetIncome,
    Revenue,
    Expenditure,
    ProfitMargin,
    DebtToEquityRatio,
    OperatingExpenses,
    GrossProfit,
    AccuracyScore,
}

impl NumericField {
    pub const ALL: [NumericField; 10] = [
        NumericField::TransactionAmount,
        NumericField::CashFlow,
        NumericField::NetIncome,
        NumericField::Revenue,
        NumericField::Expenditure,
        NumericField::ProfitMargin,
        NumericField::DebtToEquityRatio,
        NumericField::OperatingExpenses,
        NumericField::GrossProfit,
        NumericField::AccuracyScore,
    ];

    /// Column name as it appears in the CSV header
    pub fn header(&self) -> &'static str {
        match self {
            NumericField::TransactionAmount => "Transaction Amount",
            NumericField::CashFlow => "Cash Flow",
            NumericField::NetIncome => "Net Income",
            NumericField::Revenue => "Revenue",
            NumericField::Expenditure => "Expenditure",
            NumericField::ProfitMargin => "Profit Margin",
            NumericField::DebtToEquityRatio => "Debt-to-Equity Ratio",
            NumericField::OperatingExpenses => "Operating Expenses",
            NumericField::GrossProfit => "Gross Profit",
            NumericField::AccuracyScore => "Accuracy Score",
        }
    }

    pub fn from_header(name: &str) -> Option<NumericField> {
        NumericField::ALL.into_iter().find(|f| f.header() == name)
    }

    fn bit(&self) -> u16 {
        1 << (*self as u16)
    }
}

/// Set of numeric fields, packed into a bitmask.
///
/// Used both for "which designated columns exist in the header" and for
/// "which values on this row were substituted with 0".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSet(u16);

impl FieldSet {
    pub fn empty() -> Self {
        FieldSet(0)
    }

    pub fn all() -> Self {
        NumericField::ALL
            .into_iter()
            .fold(FieldSet::empty(), |set, f| set.with(f))
    }

    pub fn with(mut self, field: NumericField) -> Self {
        self.insert(field);
        self
    }

    pub fn insert(&mut self, field: NumericField) {
        self.0 |= field.bit();
    }

    pub fn contains(&self, field: NumericField) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = NumericField> + '_ {
        NumericField::ALL.into_iter().filter(|f| self.contains(*f))
    }
}

// ============================================================================
// CATEGORICAL FIELDS
// ============================================================================

/// Serialized as its plain label ("Asset", "Liability", or the raw text)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountType {
    Asset,
    Liability,
    /// Any other label, kept verbatim (empty when the cell was blank)
    Other(String),
}

impl AccountType {
    pub fn parse(label: &str) -> Self {
        match label {
            "Asset" => AccountType::Asset,
            "Liability" => AccountType::Liability,
            other => AccountType::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            AccountType::Asset => "Asset",
            AccountType::Liability => "Liability",
            AccountType::Other(label) => label,
        }
    }
}

impl From<String> for AccountType {
    fn from(label: String) -> Self {
        AccountType::parse(&label)
    }
}

impl From<AccountType> for String {
    fn from(account_type: AccountType) -> Self {
        account_type.label().to_string()
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionOutcome {
    Success,
    Failed,
    Other(String),
}

impl TransactionOutcome {
    pub fn parse(label: &str) -> Self {
        match label {
            "Success" => TransactionOutcome::Success,
            "Failed" => TransactionOutcome::Failed,
            other => TransactionOutcome::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TransactionOutcome::Success => "Success",
            TransactionOutcome::Failed => "Failed",
            TransactionOutcome::Other(label) => label,
        }
    }
}

impl From<String> for TransactionOutcome {
    fn from(label: String) -> Self {
        TransactionOutcome::parse(&label)
    }
}

impl From<TransactionOutcome> for String {
    fn from(outcome: TransactionOutcome) -> Self {
        outcome.label().to_string()
    }
}

// ============================================================================
// RAW RECORD (one CSV row, as written)
// ============================================================================

/// One CSV row before validation. Every column is optional: absent columns
/// and blank cells both come through as None.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Transaction ID", default)]
    pub transaction_id: Option<String>,

    #[serde(rename = "Date", default)]
    pub date: Option<String>,

    #[serde(rename = "Account Type", default)]
    pub account_type: Option<String>,

    #[serde(rename = "Transaction Amount", default)]
    pub transaction_amount: Option<String>,

    #[serde(rename = "Cash Flow", default)]
    pub cash_flow: Option<String>,

    #[serde(rename = "Net Income", default)]
    pub net_income: Option<String>,

    #[serde(rename = "Revenue", default)]
    pub revenue: Option<String>,

    #[serde(rename = "Expenditure", default)]
    pub expenditure: Option<String>,

    #[serde(rename = "Profit Margin", default)]
    pub profit_margin: Option<String>,

    #[serde(rename = "Debt-to-Equity Ratio", default)]
    pub debt_to_equity_ratio: Option<String>,

    #[serde(rename = "Operating Expenses", default)]
    pub operating_expenses: Option<String>,

    #[serde(rename = "Gross Profit", default)]
    pub gross_profit: Option<String>,

    #[serde(rename = "Accuracy Score", default)]
    pub accuracy_score: Option<String>,

    #[serde(rename = "Transaction Outcome", default)]
    pub transaction_outcome: Option<String>,
}

impl RawRecord {
    pub fn numeric(&self, field: NumericField) -> Option<&str> {
        let value = match field {
            NumericField::TransactionAmount => &self.transaction_amount,
            NumericField::CashFlow => &self.cash_flow,
            NumericField::NetIncome => &self.net_income,
            NumericField::Revenue => &self.revenue,
            NumericField::Expenditure => &self.expenditure,
            NumericField::ProfitMargin => &self.profit_margin,
            NumericField::DebtToEquityRatio => &self.debt_to_equity_ratio,
            NumericField::OperatingExpenses => &self.operating_expenses,
            NumericField::GrossProfit => &self.gross_profit,
            NumericField::AccuracyScore => &self.accuracy_score,
        };
        value.as_deref()
    }
}

// ============================================================================
// LEDGER RECORD (validated)
// ============================================================================

/// A validated row of the canonical table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerRecord {
    pub transaction_id: String,
    pub date: NaiveDateTime,
    pub account_type: AccountType,
    pub transaction_amount: f64,
    pub cash_flow: f64,
    pub net_income: f64,
    pub revenue: f64,
    pub expenditure: f64,
    pub profit_margin: f64,
    pub debt_to_equity_ratio: f64,
    pub operating_expenses: f64,
    pub gross_profit: f64,
    pub accuracy_score: f64,
    pub outcome: TransactionOutcome,

    // Ingest bookkeeping
    /// 1-based line in the source file (header is line 1)
    pub line_number: usize,
    /// Numeric values that were present but unparsable, stored as 0
    pub coerced: FieldSet,
    /// Blank cells outside the designated numeric columns
    pub missing_cells: usize,
}

impl LedgerRecord {
    /// A record dated `date` with every numeric field at 0
    pub fn new(transaction_id: &str, date: NaiveDateTime, account_type: AccountType) -> Self {
        LedgerRecord {
            transaction_id: transaction_id.to_string(),
            date,
            account_type,
            transaction_amount: 0.0,
            cash_flow: 0.0,
            net_income: 0.0,
            revenue: 0.0,
            expenditure: 0.0,
            profit_margin: 0.0,
            debt_to_equity_ratio: 0.0,
            operating_expenses: 0.0,
            gross_profit: 0.0,
            accuracy_score: 0.0,
            outcome: TransactionOutcome::Other(String::new()),
            line_number: 0,
            coerced: FieldSet::empty(),
            missing_cells: 0,
        }
    }

    pub fn value(&self, field: NumericField) -> f64 {
        match field {
            NumericField::TransactionAmount => self.transaction_amount,
            NumericField::CashFlow => self.cash_flow,
            NumericField::NetIncome => self.net_income,
            NumericField::Revenue => self.revenue,
            NumericField::Expenditure => self.expenditure,
            NumericField::ProfitMargin => self.profit_margin,
            NumericField::DebtToEquityRatio => self.debt_to_equity_ratio,
            NumericField::OperatingExpenses => self.operating_expenses,
            NumericField::GrossProfit => self.gross_profit,
            NumericField::AccuracyScore => self.accuracy_score,
        }
    }

    pub fn set_value(&mut self, field: NumericField, value: f64) {
        let slot = match field {
            NumericField::TransactionAmount => &mut self.transaction_amount,
            NumericField::CashFlow => &mut self.cash_flow,
            NumericField::NetIncome => &mut self.net_income,
            NumericField::Revenue => &mut self.revenue,
            NumericField::Expenditure => &mut self.expenditure,
            NumericField::ProfitMargin => &mut self.profit_margin,
            NumericField::DebtToEquityRatio => &mut self.debt_to_equity_ratio,
            NumericField::OperatingExpenses => &mut self.operating_expenses,
            NumericField::GrossProfit => &mut self.gross_profit,
            NumericField::AccuracyScore => &mut self.accuracy_score,
        };
        *slot = value;
    }

    /// Builder pattern: set one numeric field
    pub fn with_value(mut self, field: NumericField, value: f64) -> Self {
        self.set_value(field, value);
        self
    }

    /// Builder pattern: set the outcome
    pub fn with_outcome(mut self, outcome: TransactionOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn is_success(&self) -> bool {
        self.outcome == TransactionOutcome::Success
    }

    pub fn is_failed(&self) -> bool {
        self.outcome == TransactionOutcome::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_numeric_field_headers_round_trip() {
        for field in NumericField::ALL {
            assert_eq!(NumericField::from_header(field.header()), Some(field));
        }
        assert_eq!(NumericField::from_header("Transaction ID"), None);
    }

    #[test]
    fn test_field_set() {
        let set = FieldSet::empty()
            .with(NumericField::Revenue)
            .with(NumericField::AccuracyScore);

        assert!(set.contains(NumericField::Revenue));
        assert!(!set.contains(NumericField::CashFlow));
        assert_eq!(set.len(), 2);
        assert_eq!(FieldSet::all().len(), 10);
        assert!(FieldSet::empty().is_empty());

        let fields: Vec<_> = set.iter().collect();
        assert_eq!(fields, vec![NumericField::Revenue, NumericField::AccuracyScore]);
    }

    #[test]
    fn test_account_type_parse() {
        assert_eq!(AccountType::parse("Asset"), AccountType::Asset);
        assert_eq!(AccountType::parse("Liability"), AccountType::Liability);
        assert_eq!(
            AccountType::parse("Equity"),
            AccountType::Other("Equity".to_string())
        );
        assert_eq!(AccountType::parse("Equity").label(), "Equity");
        // Matching is exact, like the source data's labels
        assert_eq!(
            AccountType::parse("asset"),
            AccountType::Other("asset".to_string())
        );
    }

    #[test]
    fn test_record_value_accessors() {
        let mut record = LedgerRecord::new("T1", midnight(2024, 1, 1), AccountType::Asset)
            .with_value(NumericField::Revenue, 120.0)
            .with_outcome(TransactionOutcome::Failed);
        record.set_value(NumericField::CashFlow, -5.5);

        assert_eq!(record.value(NumericField::Revenue), 120.0);
        assert_eq!(record.value(NumericField::CashFlow), -5.5);
        assert_eq!(record.value(NumericField::NetIncome), 0.0);
        assert!(record.is_failed());
        assert!(!record.is_success());
    }

    #[test]
    fn test_categories_serialize_as_labels() {
        let json = serde_json::to_value(AccountType::Other("Equity".to_string())).unwrap();
        assert_eq!(json, serde_json::json!("Equity"));

        let back: AccountType = serde_json::from_value(serde_json::json!("Liability")).unwrap();
        assert_eq!(back, AccountType::Liability);

        let outcome = serde_json::to_value(TransactionOutcome::Failed).unwrap();
        assert_eq!(outcome, serde_json::json!("Failed"));
    }
}
