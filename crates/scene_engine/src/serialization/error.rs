//! Serialization errors

use thiserror::Error;

/// Errors produced while reading, writing or persisting property tables
#[derive(Debug, Error)]
pub enum SerializationError {
    /// A key held a value of the wrong shape; the field fell back to its default
    #[error("Property '{key}' expected {expected}, found {found}")]
    TypeMismatch {
        /// Dotted path of the offending key
        key: String,
        /// Type the field declared
        expected: &'static str,
        /// Kind of value found in the document
        found: &'static str,
    },

    /// Document text could not be parsed
    #[error("Document parse error: {0}")]
    Parse(String),

    /// Table could not be rendered to document text
    #[error("Document format error: {0}")]
    Format(String),

    /// IO error while reading or writing a document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
