//! Unified error type for the point-of-sale manager.
//!
//! Every core operation returns [`Result`]. The presentation layer uses
//! [`Error::kind`] to decide how to surface a failure to the operator.

use std::fmt;
use thiserror::Error;

/// All failures a core operation can report.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field is missing or a value is out of range.
    #[error("{message}")]
    Validation { message: String },

    /// A field that must be numeric could not be parsed.
    #[error("{field} must be {expected} (got '{value}')")]
    Format {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A delete/operate action was invoked without a selected row.
    #[error("No {entity} selected")]
    Selection { entity: &'static str },

    /// A foreign-key reference points at a row that does not exist.
    #[error("{entity} ID {id} does not exist")]
    Reference { entity: &'static str, id: i64 },

    /// A row cannot be removed while orders still point at it.
    #[error("{entity} ID {id} is still referenced by {dependents} order(s)")]
    InUse {
        entity: &'static str,
        id: i64,
        dependents: u64,
    },

    /// One staged order line failed during placement; nothing was committed.
    #[error("Failed to place order line {line}: {source}")]
    OrderLine {
        line: usize,
        #[source]
        source: Box<Error>,
    },

    /// The underlying storage failed for infrastructural reasons.
    #[error("Storage error: {0}")]
    Storage(#[from] sea_orm::DbErr),

    /// Password hashing or verification failed.
    #[error("Credential error: {message}")]
    Credential { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`], used for display and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or out-of-range input
    Validation,
    /// Unparseable numeric input
    Format,
    /// No row selected
    Selection,
    /// Dangling or blocking reference
    Reference,
    /// Persistence failure
    Storage,
    /// Configuration or environment failure
    Config,
}

impl Error {
    /// Classifies this error, looking through order-line wrappers.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Format { .. } => ErrorKind::Format,
            Self::Selection { .. } => ErrorKind::Selection,
            Self::Reference { .. } | Self::InUse { .. } => ErrorKind::Reference,
            Self::OrderLine { source, .. } => source.kind(),
            Self::Storage(_) | Self::Credential { .. } | Self::Io(_) => ErrorKind::Storage,
            Self::Config { .. } => ErrorKind::Config,
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Validation => "validation",
            Self::Format => "format",
            Self::Selection => "selection",
            Self::Reference => "reference",
            Self::Storage => "storage",
            Self::Config => "config",
        };
        f.write_str(label)
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_line_kind_follows_source() {
        let err = Error::OrderLine {
            line: 2,
            source: Box::new(Error::Reference {
                entity: "Product",
                id: 42,
            }),
        };
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert_eq!(
            err.to_string(),
            "Failed to place order line 2: Product ID 42 does not exist"
        );
    }

    #[test]
    fn test_storage_kind_is_separate_from_reference() {
        let err = Error::from(sea_orm::DbErr::Custom("disk full".to_string()));
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert_ne!(err.kind(), ErrorKind::Reference);
    }

    #[test]
    fn test_format_message_names_field() {
        let err = Error::Format {
            field: "Price",
            value: "abc".to_string(),
            expected: "a number",
        };
        assert_eq!(err.to_string(), "Price must be a number (got 'abc')");
        assert_eq!(err.kind().to_string(), "format");
    }
}
