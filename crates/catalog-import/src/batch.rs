//! Concurrent batch mapping
//!
//! Mapping a record touches no shared mutable state, so batches of records
//! can be mapped on blocking worker threads. Results are reassembled in
//! source order.

use catalog_mapping::{MappingConfiguration, ProductMapper, RecordSource};
use catalog_model::Product;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::{Error, Result};

/// Batch mapping configuration
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Records per worker task
    pub batch_size: usize,
    /// Maximum number of worker tasks mapping at once
    pub max_concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 500,
            max_concurrency: 4,
        }
    }
}

impl BatchConfig {
    /// Create a batch config
    pub fn new(batch_size: usize, max_concurrency: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            max_concurrency: max_concurrency.max(1),
        }
    }
}

/// Map `records` concurrently, returning products in the order of the input.
///
/// # Errors
///
/// Returns [`Error::Task`] if a worker task panics or is cancelled.
pub async fn map_concurrently<R>(
    config: Arc<MappingConfiguration>,
    records: Vec<R>,
    batch: &BatchConfig,
) -> Result<Vec<Product>>
where
    R: RecordSource + Send + 'static,
{
    let total = records.len();
    let batch_size = batch.batch_size.max(1);
    let semaphore = Arc::new(Semaphore::new(batch.max_concurrency.max(1)));

    let mut handles = Vec::with_capacity(total.div_ceil(batch_size));
    let mut remaining = records.into_iter();
    loop {
        let chunk: Vec<R> = remaining.by_ref().take(batch_size).collect();
        if chunk.is_empty() {
            break;
        }

        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .map_err(|e| Error::Task(format!("Semaphore error: {e}")))?;
        let config = Arc::clone(&config);
        let index = handles.len();
        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let mapper = ProductMapper::new(&config);
            debug!(batch = index, records = chunk.len(), "Mapping batch");
            chunk
                .iter()
                .map(|record| mapper.map_record(record))
                .collect::<Vec<_>>()
        }));
    }

    let mut products = Vec::with_capacity(total);
    for handle in handles {
        let mapped = handle.await.map_err(|e| Error::Task(e.to_string()))?;
        products.extend(mapped);
    }
    Ok(products)
}
