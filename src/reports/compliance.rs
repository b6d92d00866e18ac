// ✅ Compliance and Controls - data quality and transaction audit
//
// Quality counts come from ingest bookkeeping on each record:
// - missing data points: blank cells outside the numeric columns
// - coerced values: numeric cells that held junk and now read 0
// - duplicates: repeats of an already seen Transaction ID

use crate::chart::{Figure, Trace, GREEN, RED};
use crate::config::Assumptions;
use crate::record::NumericField;
use crate::report::{percentage, round2, Metric, Report, ReportKind, Section};
use crate::table::LedgerTable;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataQuality {
    pub total_records: usize,
    /// Rows left out at ingest because their date did not parse
    pub dropped_rows: usize,
    pub missing_data_points: usize,
    pub duplicate_transactions: usize,
    pub coerced_values: usize,
    /// Mean accuracy score × 100
    pub average_accuracy: f64,
    pub low_accuracy_count: usize,
    pub data_quality_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionAudit {
    pub total_transactions: usize,
    pub failed_transactions: usize,
    pub success_rate: f64,
    pub unusual_transactions: usize,
    pub compliance_score: f64,
}

/// Occurrences of a Transaction ID after its first
pub fn duplicate_transactions(table: &LedgerTable) -> usize {
    let mut seen = HashSet::new();
    table
        .iter()
        .filter(|r| !seen.insert(r.transaction_id.as_str()))
        .count()
}

pub fn data_quality(table: &LedgerTable, assumptions: &Assumptions) -> DataQuality {
    let total_records = table.len();
    let missing: usize = table.iter().map(|r| r.missing_cells).sum();
    let duplicates = duplicate_transactions(table);
    let coerced: usize = table.iter().map(|r| r.coerced.len()).sum();

    let low_accuracy_count = table
        .filter(|r| r.accuracy_score < assumptions.low_accuracy_threshold)
        .count();

    let cells = total_records * table.column_count();
    let data_quality_score = if cells == 0 {
        100.0
    } else {
        (1.0 - (missing + duplicates) as f64 / cells as f64) * 100.0
    };

    DataQuality {
        total_records,
        dropped_rows: table.dropped_rows(),
        missing_data_points: missing,
        duplicate_transactions: duplicates,
        coerced_values: coerced,
        average_accuracy: round2(table.mean(NumericField::AccuracyScore) * 100.0),
        low_accuracy_count,
        data_quality_score: round2(data_quality_score),
    }
}

/// Transactions whose amount lies outside mean ± k·σ (sample σ).
/// With fewer than two rows σ is 0 and nothing is flagged.
pub fn unusual_transactions(table: &LedgerTable, sigma: f64) -> usize {
    if table.len() < 2 {
        return 0;
    }

    let mean = table.mean(NumericField::TransactionAmount);
    let band = sigma * table.std_dev(NumericField::TransactionAmount);

    table
        .filter(|r| r.transaction_amount > mean + band || r.transaction_amount < mean - band)
        .count()
}

pub fn transaction_audit(table: &LedgerTable, assumptions: &Assumptions) -> TransactionAudit {
    let total = table.len();
    let success_rate = round2(percentage(table.successful().count() as f64, total as f64));

    TransactionAudit {
        total_transactions: total,
        failed_transactions: table.failed().count(),
        success_rate,
        unusual_transactions: unusual_transactions(table, assumptions.outlier_sigma),
        compliance_score: success_rate,
    }
}

pub fn chart(audit: &TransactionAudit) -> Figure {
    let failed = audit.failed_transactions as f64;
    let successful = audit.total_transactions as f64 - failed;

    Figure::new("Transaction Success Rate").trace(Trace::pie(&[
        ("Successful", successful, GREEN),
        ("Failed", failed, RED),
    ]))
}

pub fn report(table: &LedgerTable, assumptions: &Assumptions) -> Report {
    let quality = data_quality(table, assumptions);
    let audit = transaction_audit(table, assumptions);

    Report::new(ReportKind::ComplianceControls)
        .section(Section::metrics(
            "Data Quality",
            vec![
                Metric::count("Total Records", quality.total_records),
                Metric::count("Dropped Rows", quality.dropped_rows),
                Metric::count("Missing Data Points", quality.missing_data_points),
                Metric::count("Duplicate Transactions", quality.duplicate_transactions),
                Metric::count("Coerced Values", quality.coerced_values),
                Metric::percent("Average Accuracy", quality.average_accuracy),
                Metric::count("Low Accuracy Count", quality.low_accuracy_count),
                Metric::percent("Data Quality Score", quality.data_quality_score),
            ],
        ))
        .section(Section::metrics(
            "Transaction Audit",
            vec![
                Metric::count("Total Transactions", audit.total_transactions),
                Metric::count("Failed Transactions", audit.failed_transactions),
                Metric::percent("Success Rate", audit.success_rate),
                Metric::count("Unusual Transactions", audit.unusual_transactions),
                Metric::percent("Compliance Score", audit.compliance_score),
            ],
        ))
        .chart(chart(&audit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::build_from_reader;
    use crate::reports::fixtures::{day, empty_table, record, sample_table};

    #[test]
    fn test_data_quality_clean_table() {
        let quality = data_quality(&sample_table(), &Assumptions::default());

        assert_eq!(quality.total_records, 4);
        assert_eq!(quality.missing_data_points, 0);
        assert_eq!(quality.duplicate_transactions, 0);
        assert_eq!(quality.coerced_values, 0);
        assert_eq!(quality.average_accuracy, 85.0);
        assert_eq!(quality.low_accuracy_count, 1);
        assert_eq!(quality.data_quality_score, 100.0);
    }

    #[test]
    fn test_data_quality_from_messy_csv() {
        let csv = "\
Transaction ID,Date,Account Type,Transaction Amount,Accuracy Score,Transaction Outcome
T1,2024-01-01,Asset,100,0.9,Success
T1,2024-01-02,,abc,0.5,Failed
T2,not a date,Asset,50,0.9,Success
T3,2024-01-03,Liability,25,0.95,
";
        let table = build_from_reader(csv.as_bytes(), "messy.csv").unwrap();
        let quality = data_quality(&table, &Assumptions::default());

        assert_eq!(quality.total_records, 3);
        assert_eq!(quality.dropped_rows, 1);
        assert_eq!(quality.duplicate_transactions, 1);
        assert_eq!(quality.missing_data_points, 2);
        assert_eq!(quality.coerced_values, 1);
        assert_eq!(quality.low_accuracy_count, 1);

        // 3 records × 6 columns, 3 defects
        assert_eq!(quality.data_quality_score, 83.33);
        println!("✅ Quality score: {}", quality.data_quality_score);
    }

    #[test]
    fn test_transaction_audit() {
        let audit = transaction_audit(&sample_table(), &Assumptions::default());

        assert_eq!(audit.total_transactions, 4);
        assert_eq!(audit.failed_transactions, 1);
        assert_eq!(audit.success_rate, 75.0);
        assert_eq!(audit.unusual_transactions, 0);
        assert_eq!(audit.compliance_score, 75.0);
    }

    #[test]
    fn test_unusual_transaction_flagged() {
        let mut records: Vec<_> = (1..=20)
            .map(|i| record(&format!("T{}", i), day(2024, 1, i), "Asset", 10.0, 0.0, "Success"))
            .collect();
        records.push(record("BIG", day(2024, 1, 21), "Asset", 1000.0, 0.0, "Success"));
        let table = LedgerTable::from_records(records);

        assert_eq!(unusual_transactions(&table, 3.0), 1);
    }

    #[test]
    fn test_single_row_never_unusual() {
        let table = LedgerTable::from_records(vec![record(
            "T1",
            day(2024, 1, 1),
            "Asset",
            1_000_000.0,
            0.0,
            "Success",
        )]);
        assert_eq!(unusual_transactions(&table, 3.0), 0);
    }

    #[test]
    fn test_empty_table() {
        let assumptions = Assumptions::default();
        let quality = data_quality(&empty_table(), &assumptions);
        assert_eq!(quality.data_quality_score, 100.0);
        assert_eq!(quality.average_accuracy, 0.0);

        let audit = transaction_audit(&empty_table(), &assumptions);
        assert_eq!(audit.success_rate, 0.0);
        assert_eq!(audit.compliance_score, 0.0);

        let report = report(&empty_table(), &assumptions);
        assert_eq!(report.sections.len(), 2);
    }
}
