//! CSV record source
//!
//! [`CsvRecordReader`] streams a delimited file one record at a time. Each
//! [`CsvRecord`] answers column-name lookups through the header row, which
//! makes it a [`RecordSource`] for the product mapper.

use catalog_mapping::RecordSource;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::config::CsvConfig;
use crate::{CsvError, CsvResult};

/// Column names of a CSV source and their positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderIndex {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    /// Index a header row; the first occurrence of a repeated name wins
    pub fn new(names: Vec<String>) -> Self {
        let mut positions = HashMap::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            positions.entry(name.clone()).or_insert(index);
        }
        Self { names, positions }
    }

    /// Column names in file order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of a column
    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }
}

/// One data row of a CSV file
#[derive(Debug, Clone)]
pub struct CsvRecord {
    headers: Arc<HeaderIndex>,
    fields: csv::StringRecord,
    line: u64,
}

impl CsvRecord {
    /// Line the record starts on (1-indexed)
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Number of values in this row
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row holds no values
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// (column, value) pairs present in this row, in header order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.fields.iter())
    }
}

impl RecordSource for CsvRecord {
    fn value(&self, column: &str) -> Option<&str> {
        self.headers
            .position(column)
            .and_then(|index| self.fields.get(index))
    }
}

/// Streaming reader producing [`CsvRecord`]s
pub struct CsvRecordReader<R: Read> {
    inner: csv::Reader<R>,
    headers: Arc<HeaderIndex>,
    records_read: usize,
}

impl CsvRecordReader<File> {
    /// Open a CSV file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or has no usable header.
    pub fn from_path(path: impl AsRef<Path>, config: &CsvConfig) -> CsvResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), delimiter = %config.delimiter, "Opening CSV file");
        let file = File::open(path)
            .map_err(|e| CsvError::Io(format!("{}: {e}", path.display())))?;
        Self::from_reader(file, config)
    }
}

impl<R: Read> CsvRecordReader<R> {
    /// Wrap any reader, consuming the header row up front
    ///
    /// # Errors
    ///
    /// Returns an error if the dialect is invalid or the header row cannot be read.
    pub fn from_reader(reader: R, config: &CsvConfig) -> CsvResult<Self> {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(config.delimiter_u8()?)
            .quote(config.quote_char_u8()?)
            .has_headers(config.has_header)
            .flexible(config.flexible)
            .trim(if config.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            });
        if let Some(escape) = config.escape_char_u8()? {
            builder.escape(Some(escape)).double_quote(false);
        }
        let mut inner = builder.from_reader(reader);

        let names = if config.has_header {
            let row = inner.headers().map_err(|e| CsvError::from_read(&e))?;
            if row.iter().all(str::is_empty) {
                return Err(CsvError::MissingHeader);
            }
            row.iter().map(str::to_string).collect()
        } else {
            config.headers.clone().ok_or_else(|| {
                CsvError::config("no header row and no column names configured")
            })?
        };
        debug!(columns = ?names, "Read CSV header");

        Ok(Self {
            inner,
            headers: Arc::new(HeaderIndex::new(names)),
            records_read: 0,
        })
    }

    /// Column names in file order
    pub fn headers(&self) -> &[String] {
        self.headers.names()
    }

    /// Number of records read so far
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Read the next record, `Ok(None)` at end of input
    ///
    /// # Errors
    ///
    /// Returns the underlying read error with its line number.
    pub fn read_record(&mut self) -> CsvResult<Option<CsvRecord>> {
        let mut fields = csv::StringRecord::new();
        let more = self
            .inner
            .read_record(&mut fields)
            .map_err(|e| CsvError::from_read(&e))?;
        if !more {
            return Ok(None);
        }
        self.records_read += 1;
        let line = fields.position().map_or(0, csv::Position::line);
        trace!(line, values = fields.len(), "Read CSV record");
        Ok(Some(CsvRecord {
            headers: Arc::clone(&self.headers),
            fields,
            line,
        }))
    }

    /// Read every remaining record
    ///
    /// # Errors
    ///
    /// Stops at the first read error.
    pub fn read_all(mut self) -> CsvResult<Vec<CsvRecord>> {
        let mut records = Vec::new();
        while let Some(record) = self.read_record()? {
            records.push(record);
        }
        Ok(records)
    }
}

impl<R: Read> Iterator for CsvRecordReader<R> {
    type Item = CsvResult<CsvRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}
