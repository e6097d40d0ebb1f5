//! Error types for table decoding.

use std::path::PathBuf;

use csvtab_model::TypeKind;
use thiserror::Error;

/// Error type returned by row handlers passed to the raw binder.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while decoding a table.
#[derive(Debug, Error)]
pub enum TableError {
    // === File System Errors ===
    /// Table file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the table file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read from an in-memory or streamed source.
    #[error("failed to read table source: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    // === Decode Errors ===
    /// Source bytes are not valid in the selected encoding.
    #[error("source is not valid {encoding} text: {detail}")]
    Decode {
        encoding: &'static str,
        detail: String,
    },

    /// The CSV layer rejected the text.
    #[error("malformed CSV near line {line}: {message}")]
    Csv { line: u64, message: String },

    // === Schema Errors ===
    /// Fewer rows than the title, name and kind header rows.
    #[error("table has fewer than 3 header/data rows (found {rows})")]
    TooFewRows { rows: usize },

    /// Kind row does not cover every named column.
    #[error("kind row has {kinds} cells but name row has {names} columns")]
    HeaderShape { names: usize, kinds: usize },

    /// Data row cell count differs from the column count.
    #[error("line {line} has {found} cells, expected {expected}")]
    RowShape {
        line: u64,
        expected: usize,
        found: usize,
    },

    // === Binding Errors ===
    /// The destination shape cannot receive rows.
    #[error("invalid decode target: {reason}")]
    InvalidTarget { reason: String },

    /// Keyed decode found a row without the key field.
    #[error("primary key not found: line {line} has no field named \"{key}\"")]
    KeyFieldMissing { key: String, line: u64 },

    /// A column's coerced value does not fit the slot it matched.
    #[error("cannot store {column} column value in {target} slot \"{slot}\"")]
    Binding {
        slot: String,
        column: TypeKind,
        target: TypeKind,
    },

    // === Handler Errors ===
    /// A row handler stopped decoding.
    #[error(transparent)]
    HandlerAbort(HandlerError),
}

impl TableError {
    /// Returns true for errors raised by the table layout rather than I/O or binding.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::TooFewRows { .. } | Self::HeaderShape { .. } | Self::RowShape { .. }
        )
    }
}

/// Result type for table decoding operations.
pub type Result<T> = std::result::Result<T, TableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TableError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/file.csv");

        let err = TableError::TooFewRows { rows: 2 };
        assert_eq!(
            err.to_string(),
            "table has fewer than 3 header/data rows (found 2)"
        );
    }

    #[test]
    fn test_handler_abort_is_transparent() {
        let err = TableError::HandlerAbort("quota exceeded".into());
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[test]
    fn test_schema_error_classification() {
        assert!(TableError::TooFewRows { rows: 0 }.is_schema_error());
        assert!(
            TableError::RowShape {
                line: 4,
                expected: 3,
                found: 2
            }
            .is_schema_error()
        );
        assert!(
            !TableError::KeyFieldMissing {
                key: "id".into(),
                line: 4
            }
            .is_schema_error()
        );
    }
}
