#![deny(rust_2018_idioms)]
#![warn(clippy::all)]

//! # catalog-csv
//!
//! CSV adapter for catalog import and export.
//!
//! Tokenization is delegated to the `csv` crate. This crate turns its rows
//! into [`CsvRecord`]s addressable by column name, which the product mapper
//! consumes as a [`catalog_mapping::RecordSource`], and writes products back
//! out with [`ProductCsvWriter`].
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_csv::{CsvConfig, CsvRecordReader};
//! use catalog_mapping::{MappingConfiguration, ProductMapper};
//!
//! let data = "Sku,Name,ListPrice\nX1,First,9.5\n";
//! let mapping = MappingConfiguration::default_configuration();
//! let reader = CsvRecordReader::from_reader(data.as_bytes(), &CsvConfig::for_mapping(&mapping))
//!     .unwrap();
//!
//! let mapper = ProductMapper::new(&mapping);
//! let products: Vec<_> = reader
//!     .map(|record| record.map(|r| mapper.map_record(&r)))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(products[0].name, "First");
//! ```

pub mod config;
pub mod errors;
pub mod reader;
pub mod writer;

pub use config::{CsvConfig, RecordTerminator};
pub use errors::{CsvError, CsvResult};
pub use reader::{CsvRecord, CsvRecordReader, HeaderIndex};
pub use writer::ProductCsvWriter;
