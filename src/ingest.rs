// 📥 Ledger Table Builder
// CSV → validated, date-sorted LedgerTable
//
// Row policy:
//   - Date does not parse        → row dropped (logged at debug, counted)
//   - designated number is junk  → stored as 0 (position remembered in `coerced`)
//   - designated column missing  → skipped, every row reads 0
//   - row shorter than header    → trailing cells read as blank
// Only a source that cannot be read as a table at all is an error.

use crate::error::IngestError;
use crate::record::{AccountType, FieldSet, LedgerRecord, NumericField, RawRecord, TransactionOutcome};
use crate::table::LedgerTable;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Header the table cannot be built without
pub const DATE_COLUMN: &str = "Date";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

// Month-first wins for ambiguous slash dates
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%d-%b-%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%Y.%m.%d",
];

/// Cell values that count as "no value" (the usual spreadsheet null markers)
const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ============================================================================
// PUBLIC API
// ============================================================================

/// Build the canonical table from a CSV file on disk.
pub fn build(path: &Path) -> Result<LedgerTable, IngestError> {
    let source_name = path.display().to_string();
    let file = File::open(path).map_err(|err| IngestError::Io {
        source_name: source_name.clone(),
        err,
    })?;

    build_from_reader(file, &source_name)
}

/// Build the canonical table from any CSV byte stream.
pub fn build_from_reader<R: Read>(reader: R, source_name: &str) -> Result<LedgerTable, IngestError> {
    let csv_error = |err: csv::Error| IngestError::Csv {
        source_name: source_name.to_string(),
        err,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_error)?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(IngestError::EmptySource(source_name.to_string()));
    }
    if !headers.iter().any(|h| h == DATE_COLUMN) {
        return Err(IngestError::MissingColumn {
            source_name: source_name.to_string(),
            column: DATE_COLUMN.to_string(),
        });
    }

    let columns = designated_columns(&headers);
    for field in NumericField::ALL {
        if !columns.contains(field) {
            warn!(column = field.header(), "Numeric column absent from source, skipping");
        }
    }

    // Non-numeric, non-date columns: blank cells there are "missing data"
    let text_columns: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| *h != DATE_COLUMN && NumericField::from_header(h).is_none())
        .map(|(i, _)| i)
        .collect();

    let mut records = Vec::new();
    let mut dropped = 0;

    for (row_index, result) in reader.records().enumerate() {
        let mut row = result.map_err(csv_error)?;
        let line_number = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(row_index + 2); // +2: 1-indexed + header row

        // Extra cells have no column to land in
        if row.len() > headers.len() {
            return Err(IngestError::ExtraFields {
                source_name: source_name.to_string(),
                line: line_number,
                found: row.len(),
                expected: headers.len(),
            });
        }
        while row.len() < headers.len() {
            row.push_field("");
        }

        let raw: RawRecord = row.deserialize(Some(&headers)).map_err(csv_error)?;

        match validate(&raw, line_number, &columns) {
            Some(mut record) => {
                record.missing_cells = count_missing(&row, &text_columns);
                records.push(record);
            }
            None => {
                debug!(
                    line = line_number,
                    date = raw.date.as_deref().unwrap_or(""),
                    "Dropping row with unparsable date"
                );
                dropped += 1;
            }
        }
    }

    // Stable: equal dates keep file order
    records.sort_by_key(|r| r.date);

    info!(
        source = source_name,
        rows = records.len(),
        dropped,
        "Loaded {} valid transactions",
        records.len()
    );

    Ok(LedgerTable::from_parts(
        source_name,
        records,
        columns,
        headers.len(),
        dropped,
    ))
}

// ============================================================================
// ROW VALIDATION
// ============================================================================

/// Turn one raw row into a ledger record, or None if its date is unusable.
pub fn validate(raw: &RawRecord, line_number: usize, columns: &FieldSet) -> Option<LedgerRecord> {
    let date = parse_date(raw.date.as_deref()?)?;

    let mut record = LedgerRecord::new(
        text_or_empty(&raw.transaction_id),
        date,
        AccountType::parse(text_or_empty(&raw.account_type)),
    )
    .with_outcome(TransactionOutcome::parse(text_or_empty(&raw.transaction_outcome)));
    record.line_number = line_number;

    for field in columns.iter() {
        let (value, was_coerced) = coerce_number(raw.numeric(field));
        record.set_value(field, value);
        if was_coerced {
            record.coerced.insert(field);
        }
    }

    Some(record)
}

/// Flexible date parser: date-times, RFC 3339, plain dates in the common
/// layouts, and compact `YYYYMMDD`. Plain dates land at midnight.
pub fn parse_date(input: &str) -> Option<NaiveDateTime> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    let date = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .or_else(|| parse_compact_date(s))?;

    Some(date.and_time(NaiveTime::MIN))
}

/// Numeric parse for designated columns. Returns the stored value and whether
/// it was substituted. Blank cells and null markers read as 0 and are not
/// counted; any other text that fails to parse is.
pub fn coerce_number(cell: Option<&str>) -> (f64, bool) {
    let Some(text) = cell else {
        return (0.0, false);
    };
    if is_null_marker(text) {
        return (0.0, false);
    }

    match parse_number(text) {
        Some(value) => (value, false),
        None => (0.0, true),
    }
}

/// Finite f64 or nothing
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

pub fn is_null_marker(cell: &str) -> bool {
    NULL_MARKERS.contains(&cell.trim())
}

// ============================================================================
// HELPERS
// ============================================================================

fn designated_columns(headers: &StringRecord) -> FieldSet {
    headers
        .iter()
        .filter_map(NumericField::from_header)
        .fold(FieldSet::empty(), |set, field| set.with(field))
}

fn count_missing(row: &StringRecord, text_columns: &[usize]) -> usize {
    text_columns
        .iter()
        .filter(|&&i| row.get(i).map_or(true, is_null_marker))
        .count()
}

fn text_or_empty(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(text) if !is_null_marker(text) => text.trim(),
        _ => "",
    }
}

fn parse_compact_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = s[0..4].parse().ok()?;
    let month = s[4..6].parse().ok()?;
    let day = s[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Transaction ID,Date,Account Type,Transaction Amount,Cash Flow,Net Income,Revenue,Expenditure,Profit Margin,Debt-to-Equity Ratio,Operating Expenses,Gross Profit,Accuracy Score,Transaction Outcome";

    fn csv_with(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.push('\n');
        text
    }

    fn load(text: &str) -> LedgerTable {
        build_from_reader(text.as_bytes(), "test.csv").unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    #[test]
    fn test_drops_unparsable_dates() {
        let table = load(&csv_with(&[
            "T1,2024-01-03,Asset,100,10,5,50,20,10,1.2,5,30,0.9,Success",
            "T2,not-a-date,Asset,200,10,5,50,20,10,1.2,5,30,0.9,Success",
            "T3,2024-01-01,Liability,300,10,5,50,20,10,1.2,5,30,0.9,Failed",
        ]));

        assert_eq!(table.len(), 2, "bad-date row must be dropped");
        assert_eq!(table.dropped_rows(), 1);
        assert_eq!(table.records()[0].date, ymd(2024, 1, 1));
        assert_eq!(table.records()[0].transaction_id, "T3");
        assert_eq!(table.records()[1].transaction_id, "T1");

        println!("✅ {} rows kept, {} dropped", table.len(), table.dropped_rows());
    }

    #[test]
    fn test_non_numeric_amount_becomes_zero() {
        let table = load(&csv_with(&[
            "T1,2024-02-01,Asset,abc,10.5,5,50,20,10,1.2,5,30,0.9,Success",
        ]));

        let record = &table.records()[0];
        assert_eq!(record.transaction_amount, 0.0);
        assert!(record.coerced.contains(NumericField::TransactionAmount));
        assert_eq!(record.coerced.len(), 1);

        // Every other field keeps its parsed value
        assert_eq!(record.cash_flow, 10.5);
        assert_eq!(record.net_income, 5.0);
        assert_eq!(record.revenue, 50.0);
        assert_eq!(record.expenditure, 20.0);
        assert_eq!(record.profit_margin, 10.0);
        assert_eq!(record.debt_to_equity_ratio, 1.2);
        assert_eq!(record.operating_expenses, 5.0);
        assert_eq!(record.gross_profit, 30.0);
        assert_eq!(record.accuracy_score, 0.9);
        assert_eq!(record.account_type, AccountType::Asset);
        assert!(record.is_success());
    }

    #[test]
    fn test_stable_sort_on_equal_dates() {
        let table = load(&csv_with(&[
            "B,2024-03-02,Asset,1,0,0,0,0,0,0,0,0,0,Success",
            "A1,2024-03-01,Asset,2,0,0,0,0,0,0,0,0,0,Success",
            "A2,2024-03-01,Asset,3,0,0,0,0,0,0,0,0,0,Success",
            "A3,03/01/2024,Asset,4,0,0,0,0,0,0,0,0,0,Success",
        ]));

        let ids: Vec<&str> = table
            .records()
            .iter()
            .map(|r| r.transaction_id.as_str())
            .collect();
        assert_eq!(ids, vec!["A1", "A2", "A3", "B"]);
        assert!(table.records().windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let table = load(&format!("{}\n", HEADER));
        assert!(table.is_empty());
        assert_eq!(table.dropped_rows(), 0);
    }

    #[test]
    fn test_absent_numeric_column_is_skipped() {
        let table = load("Transaction ID,Date,Revenue\nT1,2024-01-01,99.5\nT2,2024-01-02,oops\n");

        assert!(table.has_column(NumericField::Revenue));
        assert!(!table.has_column(NumericField::CashFlow));
        assert_eq!(table.records()[0].revenue, 99.5);
        assert_eq!(table.records()[0].cash_flow, 0.0);
        // Absent columns are not "coerced"; only the junk revenue is
        assert!(table.records()[0].coerced.is_empty());
        assert!(table.records()[1].coerced.contains(NumericField::Revenue));
    }

    #[test]
    fn test_missing_date_column_is_fatal() {
        let err = build_from_reader("Transaction ID,Revenue\nT1,5\n".as_bytes(), "nodate.csv")
            .unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { .. }));
    }

    #[test]
    fn test_empty_source_is_fatal() {
        let err = build_from_reader("".as_bytes(), "empty.csv").unwrap_err();
        assert!(matches!(err, IngestError::EmptySource(_)));
    }

    #[test]
    fn test_rows_with_extra_fields_are_fatal() {
        let err = build_from_reader("Date,Revenue\n2024-01-01,1,extra\n".as_bytes(), "ragged.csv")
            .unwrap_err();
        assert!(matches!(
            err,
            IngestError::ExtraFields { line: 2, found: 3, expected: 2, .. }
        ));
        println!("✅ {}", err);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let text = "\
Transaction ID,Date,Account Type,Revenue,Transaction Outcome
T1,2024-01-01,Asset,100,Success
T2,2024-01-02,Asset
T3,2024-01-03,Liability,25,Failed
T4
";
        let table = load(text);

        assert_eq!(table.len(), 3, "short row with a date is kept");
        assert_eq!(table.dropped_rows(), 1, "short row without a date is dropped");

        let short = &table.records()[1];
        assert_eq!(short.transaction_id, "T2");
        assert_eq!(short.revenue, 0.0);
        assert!(short.coerced.is_empty());
        // Outcome cell never arrived
        assert_eq!(short.missing_cells, 1);
        assert_eq!(short.outcome, TransactionOutcome::Other(String::new()));

        assert_eq!(table.records()[2].revenue, 25.0);
        println!("✅ {} rows kept from a truncated file", table.len());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = build(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
        println!("✅ {}", err);
    }

    #[test]
    fn test_build_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            csv_with(&["T1,2024-05-05,Asset,12.5,1,1,1,1,1,1,1,1,1,Success"])
        )
        .unwrap();

        let table = build(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].line_number, 2);
    }

    #[test]
    fn test_missing_cells_counted_in_text_columns() {
        let table = load(&csv_with(&[
            "T1,2024-01-01,,5,0,0,0,0,0,0,0,0,0,NA",
            ",2024-01-02,Asset,,0,0,0,0,0,0,0,0,0,Success",
        ]));

        // Row 1: blank Account Type + NA outcome; the blank amount on row 2
        // is numeric and therefore not "missing"
        assert_eq!(table.records()[0].missing_cells, 2);
        assert_eq!(table.records()[1].missing_cells, 1);
        assert_eq!(table.records()[1].transaction_amount, 0.0);
        assert_eq!(
            table.records()[0].account_type,
            AccountType::Other(String::new())
        );
    }

    #[test]
    fn test_parse_date_shapes() {
        let jan3 = ymd(2024, 1, 3);
        assert_eq!(parse_date("2024-01-03"), Some(jan3));
        assert_eq!(parse_date(" 2024-01-03 "), Some(jan3));
        assert_eq!(parse_date("01/03/2024"), Some(jan3));
        assert_eq!(parse_date("2024/01/03"), Some(jan3));
        assert_eq!(parse_date("Jan 3, 2024"), Some(jan3));
        assert_eq!(parse_date("3 January 2024"), Some(jan3));
        assert_eq!(parse_date("03-Jan-2024"), Some(jan3));
        assert_eq!(parse_date("20240103"), Some(jan3));

        let with_time = parse_date("2024-01-03 10:15:00").unwrap();
        assert_eq!(with_time.date(), jan3.date());
        assert_eq!(parse_date("2024-01-03T10:15:00"), Some(with_time));
        assert!(parse_date("2024-01-03T10:15:00+02:00").is_some());

        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-13-45"), None);
        assert_eq!(parse_date("99999999"), None);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(Some(" 12.5 ")), (12.5, false));
        assert_eq!(coerce_number(Some("-3e2")), (-300.0, false));
        assert_eq!(coerce_number(Some("abc")), (0.0, true));
        assert_eq!(coerce_number(Some("inf")), (0.0, true));
        assert_eq!(coerce_number(None), (0.0, false));
    }

    #[test]
    fn test_null_markers_are_blank_not_coerced() {
        for cell in ["", "   ", "NA", "null", "NaN", "N/A", "#N/A"] {
            assert_eq!(coerce_number(Some(cell)), (0.0, false), "cell {:?}", cell);
        }

        let table = load(&csv_with(&[
            "T1,2024-01-01,Asset,NA,   ,null,abc,0,0,0,0,0,0,Success",
        ]));
        let record = &table.records()[0];
        assert_eq!(record.coerced.len(), 1);
        assert!(record.coerced.contains(NumericField::Revenue));
    }
}
