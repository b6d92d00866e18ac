use thiserror::Error;

/// Fatal ingestion failures. Row-level defects never show up here: bad dates
/// drop the row and bad numbers become 0.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to read {source_name}: {err}")]
    Io {
        source_name: String,
        #[source]
        err: std::io::Error,
    },

    #[error("{source_name} is not a readable table: {err}")]
    Csv {
        source_name: String,
        #[source]
        err: csv::Error,
    },

    #[error("{0} has no header row")]
    EmptySource(String),

    #[error("{source_name} has no '{column}' column")]
    MissingColumn { source_name: String, column: String },

    #[error("{source_name} line {line}: {found} fields, header has {expected}")]
    ExtraFields {
        source_name: String,
        line: usize,
        found: usize,
        expected: usize,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid setting {key}: {reason}")]
    Invalid { key: String, reason: String },
}
