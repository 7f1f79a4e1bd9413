//! Error types for the CSV adapter with line context

use thiserror::Error;

/// Errors that can occur when reading or writing catalog CSV
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsvError {
    /// CSV read error with context
    #[error("CSV read error at line {line}: {message}")]
    Read { line: u64, message: String },

    /// CSV write error
    #[error("CSV write error: {0}")]
    Write(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(String),

    /// The input has no header row to name its columns
    #[error("CSV input has no header row")]
    MissingHeader,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CsvError {
    /// Create a read error at a specific line
    pub fn read_at(line: u64, message: impl Into<String>) -> Self {
        Self::Read {
            line,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a write error
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write(message.into())
    }

    /// Get the line number if available
    pub fn line_number(&self) -> Option<u64> {
        match self {
            Self::Read { line, .. } if *line > 0 => Some(*line),
            _ => None,
        }
    }

    /// Convert a csv crate read error, keeping its line when known
    pub(crate) fn from_read(error: &csv::Error) -> Self {
        if let csv::ErrorKind::Io(io) = error.kind() {
            return Self::Io(io.to_string());
        }
        let line = error.position().map_or(0, csv::Position::line);
        Self::read_at(line, error.to_string())
    }
}

impl From<std::io::Error> for CsvError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Result type alias for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;
