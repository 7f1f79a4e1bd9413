//! CSV dialect options

use catalog_mapping::MappingConfiguration;

use crate::{CsvError, CsvResult};

/// Configuration for reading and writing catalog CSV files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvConfig {
    /// Field delimiter character (default: comma)
    pub delimiter: char,
    /// Quote character for fields containing special characters (default: double quote)
    pub quote_char: char,
    /// Escape character for escaping quotes (default: doubling the quote)
    pub escape_char: Option<char>,
    /// Whether the first row names the columns (default: true)
    pub has_header: bool,
    /// Column names to use when the file has no header row
    pub headers: Option<Vec<String>>,
    /// Trim surrounding whitespace from headers and values (default: true)
    pub trim: bool,
    /// Accept rows shorter or longer than the header (default: true)
    pub flexible: bool,
    /// Record terminator used when writing (default: CRLF)
    pub record_terminator: RecordTerminator,
}

/// Record terminator for writing CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordTerminator {
    /// CRLF (Windows-style, RFC 4180)
    CRLF,
    /// LF (Unix-style)
    LF,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote_char: '"',
            escape_char: None,
            has_header: true,
            headers: None,
            trim: true,
            flexible: true,
            record_terminator: RecordTerminator::CRLF,
        }
    }
}

impl CsvConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration using the mapping's delimiter
    pub fn for_mapping(mapping: &MappingConfiguration) -> Self {
        Self::default().delimiter(mapping.delimiter)
    }

    /// Set the delimiter character
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the quote character
    pub fn quote_char(mut self, quote_char: char) -> Self {
        self.quote_char = quote_char;
        self
    }

    /// Set the escape character
    pub fn escape_char(mut self, escape_char: char) -> Self {
        self.escape_char = Some(escape_char);
        self
    }

    /// Read a file without a header row, naming its columns explicitly
    pub fn without_header<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.has_header = false;
        self.headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    /// Toggle whitespace trimming
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Toggle acceptance of ragged rows
    pub fn flexible(mut self, flexible: bool) -> Self {
        self.flexible = flexible;
        self
    }

    /// Set record terminator
    pub fn record_terminator(mut self, terminator: RecordTerminator) -> Self {
        self.record_terminator = terminator;
        self
    }

    /// Delimiter as a byte for the csv crate
    ///
    /// # Errors
    ///
    /// Returns a configuration error for non-ASCII delimiters.
    pub fn delimiter_u8(&self) -> CsvResult<u8> {
        ascii_byte("delimiter", self.delimiter)
    }

    /// Quote char as a byte for the csv crate
    ///
    /// # Errors
    ///
    /// Returns a configuration error for non-ASCII quote characters.
    pub fn quote_char_u8(&self) -> CsvResult<u8> {
        ascii_byte("quote character", self.quote_char)
    }

    /// Escape char as a byte, if one is set
    ///
    /// # Errors
    ///
    /// Returns a configuration error for non-ASCII escape characters.
    pub fn escape_char_u8(&self) -> CsvResult<Option<u8>> {
        self.escape_char
            .map(|c| ascii_byte("escape character", c))
            .transpose()
    }

    pub(crate) fn terminator(&self) -> csv::Terminator {
        match self.record_terminator {
            RecordTerminator::CRLF => csv::Terminator::CRLF,
            RecordTerminator::LF => csv::Terminator::Any(b'\n'),
        }
    }
}

fn ascii_byte(what: &str, c: char) -> CsvResult<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(CsvError::config(format!("{what} '{c}' must be a single ASCII character")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CsvConfig::default();
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.quote_char, '"');
        assert_eq!(config.escape_char, None);
        assert!(config.has_header);
        assert!(config.headers.is_none());
        assert!(config.trim);
        assert!(config.flexible);
        assert_eq!(config.record_terminator, RecordTerminator::CRLF);
    }

    #[test]
    fn test_config_builder() {
        let config = CsvConfig::new()
            .delimiter(';')
            .quote_char('\'')
            .escape_char('\\')
            .without_header(["Sku", "Name"])
            .trim(false)
            .flexible(false)
            .record_terminator(RecordTerminator::LF);

        assert_eq!(config.delimiter, ';');
        assert_eq!(config.quote_char, '\'');
        assert_eq!(config.escape_char, Some('\\'));
        assert!(!config.has_header);
        assert_eq!(config.headers, Some(vec!["Sku".to_string(), "Name".to_string()]));
        assert!(!config.trim);
        assert!(!config.flexible);
        assert_eq!(config.record_terminator, RecordTerminator::LF);
    }

    #[test]
    fn test_for_mapping_uses_mapping_delimiter() {
        let mapping = MappingConfiguration::default_configuration().with_delimiter('|');
        assert_eq!(CsvConfig::for_mapping(&mapping).delimiter, '|');
    }

    #[test]
    fn test_byte_conversions() {
        let config = CsvConfig::new().delimiter('\t').escape_char('\\');
        assert_eq!(config.delimiter_u8().unwrap(), b'\t');
        assert_eq!(config.quote_char_u8().unwrap(), b'"');
        assert_eq!(config.escape_char_u8().unwrap(), Some(b'\\'));
        assert_eq!(CsvConfig::new().escape_char_u8().unwrap(), None);
    }

    #[test]
    fn test_non_ascii_delimiter_is_rejected() {
        let err = CsvConfig::new().delimiter('§').delimiter_u8().unwrap_err();
        assert!(matches!(err, CsvError::Config(_)));
    }
}
