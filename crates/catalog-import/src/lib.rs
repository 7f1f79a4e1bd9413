#![deny(rust_2018_idioms)]
#![warn(clippy::all)]

//! # catalog-import
//!
//! Import orchestration for catalog CSV files.
//!
//! [`ImportPipeline`] reads records sequentially from a record stream, maps
//! each one with a shared [`catalog_mapping::MappingConfiguration`] and hands
//! the products to the caller. [`map_concurrently`] maps an already collected
//! set of records across blocking worker tasks while keeping source order.

pub mod batch;
pub mod pipeline;

pub use batch::{BatchConfig, map_concurrently};
pub use pipeline::{ImportOutcome, ImportPipeline, ImportStats};

use catalog_csv::CsvError;
use catalog_mapping::ConfigError;
use thiserror::Error;

/// Errors that can occur during an import
#[derive(Error, Debug)]
pub enum Error {
    /// The record source failed; passed through unchanged
    #[error(transparent)]
    Source(#[from] CsvError),

    /// The mapping configuration was rejected before the run started
    #[error("Invalid mapping configuration: {0}")]
    Config(#[from] ConfigError),

    /// The caller's product handler refused a product
    #[error("Product handler failed at record {record}: {message}")]
    Sink { record: usize, message: String },

    /// A mapping worker task failed
    #[error("Mapping task failed: {0}")]
    Task(String),
}

impl Error {
    /// Build a sink error for the given record number (1-indexed)
    pub fn sink(record: usize, message: impl Into<String>) -> Self {
        Self::Sink {
            record,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
