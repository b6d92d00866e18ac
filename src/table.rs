// 📚 Canonical Table - immutable, date-sorted, read-only
//
// Built once by `ingest::build`, then shared by reference with every report.
// There is no mutation API: reports filter into a `Selection` and aggregate.

use crate::record::{AccountType, FieldSet, LedgerRecord, NumericField};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// LEDGER TABLE
// ============================================================================

#[derive(Debug, Clone)]
pub struct LedgerTable {
    source_name: String,
    records: Vec<LedgerRecord>,
    columns: FieldSet,
    column_count: usize,
    dropped_rows: usize,
}

impl LedgerTable {
    /// Assemble a table from already-validated records.
    ///
    /// Records are re-sorted (stably) by date so the ordering invariant holds
    /// no matter how the caller built them.
    pub fn from_parts(
        source_name: &str,
        mut records: Vec<LedgerRecord>,
        columns: FieldSet,
        column_count: usize,
        dropped_rows: usize,
    ) -> Self {
        records.sort_by_key(|r| r.date);
        LedgerTable {
            source_name: source_name.to_string(),
            records,
            columns,
            column_count,
            dropped_rows,
        }
    }

    /// Table over in-memory records with every designated column present
    pub fn from_records(records: Vec<LedgerRecord>) -> Self {
        // Transaction ID, Date, Account Type, Transaction Outcome + numerics
        let column_count = NumericField::ALL.len() + 4;
        LedgerTable::from_parts("memory", records, FieldSet::all(), column_count, 0)
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn records(&self) -> &[LedgerRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LedgerRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows removed during ingestion because their date did not parse
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Number of columns in the source header
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn has_column(&self, field: NumericField) -> bool {
        self.columns.contains(field)
    }

    // ========================================================================
    // SELECTIONS
    // ========================================================================

    pub fn select_all(&self) -> Selection<'_> {
        Selection {
            rows: self.records.iter().collect(),
        }
    }

    pub fn filter<P>(&self, predicate: P) -> Selection<'_>
    where
        P: Fn(&LedgerRecord) -> bool,
    {
        Selection {
            rows: self.records.iter().filter(|r| predicate(r)).collect(),
        }
    }

    pub fn by_account_type(&self, account_type: &AccountType) -> Selection<'_> {
        self.filter(|r| &r.account_type == account_type)
    }

    pub fn successful(&self) -> Selection<'_> {
        self.filter(|r| r.is_success())
    }

    pub fn failed(&self) -> Selection<'_> {
        self.filter(|r| r.is_failed())
    }

    // Whole-table shorthands

    pub fn sum(&self, field: NumericField) -> f64 {
        self.records.iter().map(|r| r.value(field)).sum()
    }

    pub fn mean(&self, field: NumericField) -> f64 {
        self.select_all().mean(field)
    }

    pub fn std_dev(&self, field: NumericField) -> f64 {
        self.select_all().std_dev(field)
    }

    pub fn group_by(&self, granularity: Granularity) -> Vec<(Period, Selection<'_>)> {
        self.select_all().group_by(granularity)
    }

    /// First and last transaction timestamps
    pub fn date_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        // Sorted, so the ends are the extremes
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }
}

// ============================================================================
// SELECTION (a filtered, still date-ordered view)
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct Selection<'a> {
    rows: Vec<&'a LedgerRecord>,
}

impl<'a> Selection<'a> {
    pub fn rows(&self) -> &[&'a LedgerRecord] {
        &self.rows
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Narrow further
    pub fn filter<P>(&self, predicate: P) -> Selection<'a>
    where
        P: Fn(&LedgerRecord) -> bool,
    {
        Selection {
            rows: self.rows.iter().copied().filter(|r| predicate(r)).collect(),
        }
    }

    pub fn values(&self, field: NumericField) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |r| r.value(field))
    }

    pub fn sum(&self, field: NumericField) -> f64 {
        self.values(field).sum()
    }

    /// Arithmetic mean; 0 for an empty selection
    pub fn mean(&self, field: NumericField) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        self.sum(field) / self.rows.len() as f64
    }

    /// Sample standard deviation (n − 1); 0 with fewer than two rows
    pub fn std_dev(&self, field: NumericField) -> f64 {
        let n = self.rows.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.mean(field);
        let squares: f64 = self.values(field).map(|v| (v - mean).powi(2)).sum();
        (squares / (n - 1) as f64).sqrt()
    }

    /// Group by a date-derived key, keys ascending. Each group keeps the
    /// date order of its rows.
    pub fn group_by(&self, granularity: Granularity) -> Vec<(Period, Selection<'a>)> {
        let mut groups: BTreeMap<Period, Vec<&'a LedgerRecord>> = BTreeMap::new();
        for row in self.rows.iter().copied() {
            groups
                .entry(Period::of(row.date, granularity))
                .or_default()
                .push(row);
        }

        groups
            .into_iter()
            .map(|(period, rows)| (period, Selection { rows }))
            .collect()
    }

    /// Group by account type label, labels ascending
    pub fn group_by_account_type(&self) -> Vec<(AccountType, Selection<'a>)> {
        let mut groups: BTreeMap<&'a str, Vec<&'a LedgerRecord>> = BTreeMap::new();
        for row in self.rows.iter().copied() {
            groups.entry(row.account_type.label()).or_default().push(row);
        }

        groups
            .into_iter()
            .map(|(label, rows)| (AccountType::parse(label), Selection { rows }))
            .collect()
    }
}

// ============================================================================
// PERIODS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    Day,
    Month,
    Quarter,
}

/// Calendar bucket a transaction falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Period {
    Day(NaiveDate),
    Month { year: i32, month: u32 },
    Quarter { year: i32, quarter: u32 },
}

impl Period {
    pub fn of(date: NaiveDateTime, granularity: Granularity) -> Self {
        match granularity {
            Granularity::Day => Period::Day(date.date()),
            Granularity::Month => Period::Month {
                year: date.year(),
                month: date.month(),
            },
            Granularity::Quarter => Period::Quarter {
                year: date.year(),
                quarter: (date.month() - 1) / 3 + 1,
            },
        }
    }
}

/// `2024-01-05`, `2024-01`, `2024Q1`
impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Period::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            Period::Quarter { year, quarter } => write!(f, "{:04}Q{}", year, quarter),
        }
    }
}

impl Serialize for Period {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// NAMED FILTERS
// ============================================================================

/// The fixed subsets offered by the server and the terminal viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionFilter {
    All,
    Asset,
    Liability,
    Success,
    Failed,
}

impl TransactionFilter {
    pub const ALL: [TransactionFilter; 5] = [
        TransactionFilter::All,
        TransactionFilter::Asset,
        TransactionFilter::Liability,
        TransactionFilter::Success,
        TransactionFilter::Failed,
    ];

    /// Case-insensitive: `all`, `asset`, `liability`, `success`, `failed`
    pub fn parse(kind: &str) -> Option<Self> {
        match kind.to_lowercase().as_str() {
            "all" => Some(TransactionFilter::All),
            "asset" => Some(TransactionFilter::Asset),
            "liability" => Some(TransactionFilter::Liability),
            "success" => Some(TransactionFilter::Success),
            "failed" => Some(TransactionFilter::Failed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionFilter::All => "All Transactions",
            TransactionFilter::Asset => "Asset",
            TransactionFilter::Liability => "Liability",
            TransactionFilter::Success => "Successful",
            TransactionFilter::Failed => "Failed",
        }
    }

    pub fn matches(&self, record: &LedgerRecord) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::Asset => record.account_type == AccountType::Asset,
            TransactionFilter::Liability => record.account_type == AccountType::Liability,
            TransactionFilter::Success => record.is_success(),
            TransactionFilter::Failed => record.is_failed(),
        }
    }

    pub fn apply<'a>(&self, table: &'a LedgerTable) -> Selection<'a> {
        table.filter(|r| self.matches(r))
    }
}
