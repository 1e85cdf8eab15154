use std::fmt;
use theme_types::RecordId;

/// Result type for theme-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the storage layer
#[derive(Debug)]
pub enum Error {
    /// Required columns are absent from a table header
    Schema {
        missing: Vec<String>,
        available: Vec<String>,
    },

    /// An identifier cell is empty, so ids are not uniformly strings
    IdType { row: usize, column: String },

    /// The same identifier appears on more than one row
    DuplicateId(RecordId),

    /// No record (or undo entry) exists for the identifier
    NotFound(RecordId),

    /// CSV parsing or writing failed
    Csv(csv::Error),

    /// Cache or metadata (de)serialization failed
    Json(serde_json::Error),

    /// IO operation failed
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Schema { missing, available } => write!(
                f,
                "Schema error: {:?} not in the table columns: {:?}",
                missing, available
            ),
            Error::IdType { row, column } => write!(
                f,
                "Type error: row {} has an empty '{}' value; identifiers must all be non-empty strings",
                row, column
            ),
            Error::DuplicateId(id) => write!(f, "Schema error: identifier '{}' is not unique", id),
            Error::NotFound(id) => write!(f, "Not found: {}", id),
            Error::Csv(err) => write!(f, "CSV error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Csv(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Schema { .. } | Error::IdType { .. } | Error::DuplicateId(_) | Error::NotFound(_) => {
                None
            }
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl<W> From<csv::IntoInnerError<W>> for Error {
    fn from(err: csv::IntoInnerError<W>) -> Self {
        Error::Io(err.into_error())
    }
}
