//! Product CSV export
//!
//! Writes products back out using the same [`MappingConfiguration`] that
//! imports them: one column per bound fixed field, then one column per
//! property column. A file written this way maps back to the same flat
//! fields and properties.

use catalog_mapping::MappingConfiguration;
use catalog_model::{Product, ProductField};
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, trace, warn};

use crate::config::CsvConfig;
use crate::{CsvError, CsvResult};

/// Source of one output column
#[derive(Debug, Clone, PartialEq, Eq)]
enum ExportColumn {
    Field(ProductField),
    Property(String),
}

/// Writer exporting products as CSV
pub struct ProductCsvWriter<'a> {
    mapping: &'a MappingConfiguration,
    config: CsvConfig,
}

impl<'a> ProductCsvWriter<'a> {
    /// Create a writer for a mapping, using the mapping's delimiter
    pub fn new(mapping: &'a MappingConfiguration) -> Self {
        Self {
            mapping,
            config: CsvConfig::for_mapping(mapping),
        }
    }

    /// Override the CSV dialect
    pub fn with_config(mut self, config: CsvConfig) -> Self {
        self.config = config;
        self
    }

    /// Header row this writer produces
    pub fn headers(&self) -> Vec<String> {
        self.columns().into_iter().map(|(name, _)| name).collect()
    }

    fn columns(&self) -> Vec<(String, ExportColumn)> {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();

        for map in &self.mapping.property_maps {
            let (Some(field), Some(column)) = (map.field(), map.csv_column_name.as_deref()) else {
                continue;
            };
            if seen.insert(column.to_string()) {
                columns.push((column.to_string(), ExportColumn::Field(field)));
            } else {
                warn!(column, "Skipping repeated export column");
            }
        }
        for column in &self.mapping.property_csv_columns {
            if seen.insert(column.clone()) {
                columns.push((column.clone(), ExportColumn::Property(column.clone())));
            } else {
                warn!(column = %column, "Skipping repeated export column");
            }
        }
        columns
    }

    /// Write products, header first
    ///
    /// # Errors
    ///
    /// Returns an error if the dialect is invalid or writing fails.
    pub fn write<W: Write>(&self, writer: W, products: &[Product]) -> CsvResult<()> {
        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(self.config.delimiter_u8()?)
            .quote(self.config.quote_char_u8()?)
            .terminator(self.config.terminator());
        if let Some(escape) = self.config.escape_char_u8()? {
            builder.escape(escape).double_quote(false);
        }
        let mut csv_writer = builder.from_writer(writer);

        let columns = self.columns();
        csv_writer
            .write_record(columns.iter().map(|(name, _)| name.as_str()))
            .map_err(|e| CsvError::write(e.to_string()))?;

        for product in products {
            let row: Vec<String> = columns
                .iter()
                .map(|(_, source)| match source {
                    ExportColumn::Field(field) => product.field_text(*field),
                    ExportColumn::Property(name) => product
                        .property(name)
                        .map(|value| value.value.clone())
                        .unwrap_or_default(),
                })
                .collect();
            csv_writer
                .write_record(&row)
                .map_err(|e| CsvError::write(e.to_string()))?;
            trace!(sku = %product.sku, "Wrote product row");
        }

        csv_writer
            .flush()
            .map_err(|e| CsvError::write(e.to_string()))?;
        debug!(
            product_count = products.len(),
            column_count = columns.len(),
            "Finished writing products"
        );
        Ok(())
    }

    /// Write products to a file, replacing it if it exists
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    pub fn write_path(&self, path: impl AsRef<Path>, products: &[Product]) -> CsvResult<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| CsvError::Io(format!("{}: {e}", path.display())))?;
        self.write(file, products)
    }
}
