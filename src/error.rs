use thiserror::Error;

/// Reasons a log load can fail as a whole.
///
/// Row-level problems never end up here; they are logged and skipped by the parser.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Log file is empty or has no header row")]
    MissingHeader,

    #[error("Could not find {kind} column (tried {candidates:?})")]
    MissingColumn {
        kind: &'static str,
        candidates: Vec<String>,
    },

    #[error("Line {line}: expected at most {expected} fields, found {found}")]
    ColumnMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Malformed CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid log format file: {0}")]
    Format(#[from] serde_json::Error),
}

/// Why a single row was skipped during a load
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowWarning {
    #[error("invalid timestamp {0:?}")]
    InvalidTimestamp(String),

    #[error("invalid CAN ID {0:?}")]
    InvalidId(String),

    #[error("no action number in {0:?}")]
    MissingLabel(String),
}

/// A row left out of a load, with its 1-based line number in the source text
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: RowWarning,
}
