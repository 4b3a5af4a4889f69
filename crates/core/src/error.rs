use crate::filters::FilterField;
use crate::mapper::MovieColumn;

/// A malformed escape sequence in a raw request value.
///
/// `position` is the byte offset of the offending `%` in the raw input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("truncated escape at byte {position}: expected two hex digits after '%'")]
    Truncated { position: usize },

    #[error("invalid escape '%{digits}' at byte {position}: not a hex pair")]
    InvalidHex { position: usize, digits: String },

    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,
}

/// A store row that does not satisfy the movie column contract.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MappingError {
    #[error("expected {expected} columns, row has {actual}")]
    ColumnCount { expected: usize, actual: usize },

    #[error("column {index} is named '{actual}', expected '{expected}'")]
    ColumnName {
        index: usize,
        expected: &'static str,
        actual: String,
    },

    #[error("column '{}' is NULL", .column.name())]
    Null { column: MovieColumn },

    #[error("column '{}' holds non-numeric value '{value}'", .column.name())]
    NotNumeric { column: MovieColumn, value: String },

    #[error("column '{}' value {value} is out of range", .column.name())]
    OutOfRange { column: MovieColumn, value: String },

    #[error("column '{}' has unexpected type {found}", .column.name())]
    UnexpectedType {
        column: MovieColumn,
        found: &'static str,
    },
}

/// The store executor failed to run a planned statement.
///
/// Wraps whatever the backing store reported (connectivity, syntax, constraint).
#[derive(Debug, thiserror::Error)]
#[error("store execution failed: {source}")]
pub struct StoreError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl StoreError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Raw request did not have the expected `name=value&...` shape.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Cannot decode '{}': {source}", .field.param_name())]
    Decode {
        field: FilterField,
        #[source]
        source: DecodeError,
    },

    #[error("'{}' must be a base-10 integer, got '{value}'", .field.param_name())]
    FilterParse { field: FilterField, value: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Row {row} cannot be mapped to a movie: {source}")]
    Mapping {
        row: usize,
        #[source]
        source: MappingError,
    },
}

impl CoreError {
    /// Whether the failure was caused by the request itself rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoreError::Validation(_) | CoreError::Decode { .. } | CoreError::FilterParse { .. }
        )
    }
}
