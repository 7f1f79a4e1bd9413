//! Sequential import pipeline
//!
//! Records are pulled one at a time from the source, mapped, and handed to
//! the caller before the next record is read, so memory use does not grow
//! with the file unless the caller keeps the products.

use catalog_csv::{CsvConfig, CsvRecordReader, CsvResult};
use catalog_mapping::{MappingConfiguration, ProductMapper, RecordSource};
use catalog_model::Product;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::{Error, Result};

/// Statistics of one import run
#[derive(Debug, Clone, Serialize)]
pub struct ImportStats {
    /// Records pulled from the source
    pub records_read: usize,
    /// Products accepted by the handler
    pub products_emitted: usize,
    /// Products missing a value for a required field
    pub incomplete_products: usize,
    /// Property values collected across all products
    pub properties_collected: usize,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished, if it did
    pub finished_at: Option<DateTime<Utc>>,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl ImportStats {
    fn start() -> Self {
        Self {
            records_read: 0,
            products_emitted: 0,
            incomplete_products: 0,
            properties_collected: 0,
            started_at: Utc::now(),
            finished_at: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        format!(
            "Imported: {} products from {} records ({} incomplete, {} property values)",
            self.products_emitted,
            self.records_read,
            self.incomplete_products,
            self.properties_collected
        )
    }
}

impl fmt::Display for ImportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Products and statistics of a completed import
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub products: Vec<Product>,
    pub stats: ImportStats,
}

/// Import pipeline bound to one mapping configuration
#[derive(Debug, Clone)]
pub struct ImportPipeline {
    config: MappingConfiguration,
}

impl ImportPipeline {
    /// Create a pipeline; the configuration is used as given
    pub fn new(config: MappingConfiguration) -> Self {
        Self { config }
    }

    /// Create a pipeline after checking the configuration
    ///
    /// # Errors
    ///
    /// Returns the first configuration problem found.
    pub fn validated(config: MappingConfiguration) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// The mapping configuration in use
    pub fn config(&self) -> &MappingConfiguration {
        &self.config
    }

    /// Map every record from `records`, passing each product to `handler`.
    ///
    /// Records are processed in source order. The first source error stops
    /// the run and is returned unchanged; a handler error stops the run
    /// with the failing record's number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Source`] or [`Error::Sink`].
    pub fn run<I, R, F, E>(&self, records: I, mut handler: F) -> Result<ImportStats>
    where
        I: IntoIterator<Item = CsvResult<R>>,
        R: RecordSource,
        F: FnMut(Product) -> std::result::Result<(), E>,
        E: fmt::Display,
    {
        let mapper = ProductMapper::new(&self.config);
        let started = Instant::now();
        let mut stats = ImportStats::start();

        for record in records {
            let record = match record {
                Ok(record) => record,
                Err(error) => {
                    warn!(
                        records_read = stats.records_read,
                        error = %error,
                        "Record source failed, stopping import"
                    );
                    return Err(error.into());
                }
            };
            stats.records_read += 1;

            let product = mapper.map_record(&record);
            if self.is_incomplete(&product) {
                stats.incomplete_products += 1;
                debug!(record = stats.records_read, sku = %product.sku, "Product misses a required field");
            }
            stats.properties_collected += product.property_values.len();

            handler(product).map_err(|e| Error::sink(stats.records_read, e.to_string()))?;
            stats.products_emitted += 1;
        }

        stats.elapsed = started.elapsed();
        stats.finished_at = Some(Utc::now());
        info!(
            records = stats.records_read,
            products = stats.products_emitted,
            incomplete = stats.incomplete_products,
            elapsed_ms = u64::try_from(stats.elapsed.as_millis()).unwrap_or(u64::MAX),
            "Import finished"
        );
        Ok(stats)
    }

    /// Import from any reader, collecting the products
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV cannot be read.
    pub fn import_reader<R: Read>(&self, reader: R, csv: &CsvConfig) -> Result<ImportOutcome> {
        let records = CsvRecordReader::from_reader(reader, csv)?;
        self.collect(records)
    }

    /// Import a CSV file using the configuration's delimiter
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn import_file(&self, path: impl AsRef<Path>) -> Result<ImportOutcome> {
        let path = path.as_ref();
        info!(path = %path.display(), "Importing products");
        let records = CsvRecordReader::from_path(path, &CsvConfig::for_mapping(&self.config))?;
        self.collect(records)
    }

    fn collect<I, R>(&self, records: I) -> Result<ImportOutcome>
    where
        I: IntoIterator<Item = CsvResult<R>>,
        R: RecordSource,
    {
        let mut products = Vec::new();
        let stats = self.run(records, |product| {
            products.push(product);
            Ok::<(), std::convert::Infallible>(())
        })?;
        Ok(ImportOutcome { products, stats })
    }

    /// Whether a product lacks a value for any field marked required
    pub fn is_incomplete(&self, product: &Product) -> bool {
        self.config
            .property_maps
            .iter()
            .filter(|map| map.required)
            .filter_map(|map| map.field())
            .any(|field| product.field_text(field).is_empty())
    }
}
