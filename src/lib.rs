pub mod config;
pub mod dump;

use chaintable::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DumpError {
    /// Derived IO error
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),

    /// The table refused an operation, e.g. a zero bucket count
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// The command line could not be understood
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// An input line was not of the form `key=value`
    #[error("Malformed line {line}: {text:?}, expected key=value")]
    MalformedLine { line: usize, text: String },
}
