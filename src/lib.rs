// Ledger Reports - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod error;
pub mod record;   // Raw and validated transaction rows
pub mod ingest;   // CSV → LedgerTable
pub mod table;    // Read contract: filter, group, aggregate
pub mod config;   // Settings + report assumptions
pub mod chart;    // Plotly figure JSON
pub mod report;   // Page model shared by web and terminal
pub mod reports;  // The eight report modules

#[cfg(feature = "server")]
pub mod api;      // JSON API + static pages (axum)

// Re-export commonly used types
pub use error::{ConfigError, IngestError};
pub use record::{AccountType, FieldSet, LedgerRecord, NumericField, RawRecord, TransactionOutcome};
pub use ingest::{build, build_from_reader};
pub use table::{Granularity, LedgerTable, Period, Selection, TransactionFilter};
pub use config::{Assumptions, ServerSettings, Settings};
pub use chart::{Figure, Trace};
pub use report::{build_all, Metric, Report, ReportKind, ReportLink, Section, SectionBody, Value};
pub use reports::Dashboard;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
