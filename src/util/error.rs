// LogGrid - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every error keeps its causal chain
// for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogGrid operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LogGridError {
    /// A table command was rejected.
    Table(TableError),

    /// Export operation failed.
    Export(ExportError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for LogGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table(e) => write!(f, "Table error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for LogGridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Table(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Table errors
// ---------------------------------------------------------------------------

/// Faults reported by table state commands.
///
/// Every variant is fail-safe: the command that produced it left the table
/// state unchanged.
#[derive(Debug, PartialEq, Eq)]
pub enum TableError {
    /// A command named a column that is not in the current column set.
    UnknownColumn { column: String },

    /// A replacement column order is not a permutation of the current set.
    NotAPermutation {
        provided: Vec<String>,
        expected: Vec<String>,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownColumn { column } => {
                write!(f, "Unknown column '{column}'")
            }
            Self::NotAPermutation { provided, expected } => write!(
                f,
                "Column order {provided:?} is not a permutation of the current columns {expected:?}"
            ),
        }
    }
}

impl std::error::Error for TableError {}

impl From<TableError> for LogGridError {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
///
/// Export writes to a caller-owned `Write`, so there is no path context
/// here; the caller attaches it when reporting the failure.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing to the output stream.
    Io { source: io::Error },

    /// CSV serialisation error.
    Csv { source: csv::Error },

    /// JSON serialisation error.
    Json { source: serde_json::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { source } => write!(f, "I/O error writing output: {source}"),
            Self::Csv { source } => write!(f, "CSV write error: {source}"),
            Self::Json { source } => write!(f, "JSON write error: {source}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source } => Some(source),
            Self::Csv { source } => Some(source),
            Self::Json { source } => Some(source),
        }
    }
}

impl From<ExportError> for LogGridError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for LogGrid results.
pub type Result<T> = std::result::Result<T, LogGridError>;
