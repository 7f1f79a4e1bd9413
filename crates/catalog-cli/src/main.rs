//! # catalog-cli
//!
//! Command-line interface for catalog CSV import and export.
//!
//! Products are read from CSV through a mapping configuration and written as
//! JSON, exported back to CSV, or a mapping template is generated.

use anyhow::{Context, bail};
use catalog_csv::{CsvConfig, CsvRecordReader, ProductCsvWriter};
use catalog_import::{BatchConfig, ImportPipeline, map_concurrently};
use catalog_mapping::MappingConfiguration;
use catalog_model::Product;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Catalog CSV import CLI")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Import products from a CSV file and print them as JSON
    Import {
        /// Input CSV file path
        input: PathBuf,

        /// Mapping configuration file (YAML)
        #[arg(short, long)]
        mapping: Option<PathBuf>,

        /// Field delimiter, overriding the mapping's
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Bind columns to fields by matching the input's header row
        #[arg(long)]
        auto_map: bool,

        /// Output JSON file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Map records on this many worker tasks
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Export products from a JSON file to CSV
    Export {
        /// Input JSON file holding an array of products
        input: PathBuf,

        /// Output CSV file path
        output: PathBuf,

        /// Mapping configuration file (YAML)
        #[arg(short, long)]
        mapping: Option<PathBuf>,

        /// Field delimiter, overriding the mapping's
        #[arg(short, long)]
        delimiter: Option<char>,
    },

    /// Write a mapping configuration template as YAML
    Mapping {
        /// Output YAML file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Bind the template to the header row of this CSV file
        #[arg(long)]
        from_csv: Option<PathBuf>,

        /// Field delimiter of the template
        #[arg(short, long)]
        delimiter: Option<char>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Import {
            input,
            mapping,
            delimiter,
            auto_map,
            output,
            pretty,
            jobs,
        } => {
            let mapping = load_mapping(mapping.as_deref(), delimiter)?;
            let products = import(&input, mapping, auto_map, jobs).await?;
            write_json(output.as_deref(), &products, pretty)
        }
        Commands::Export {
            input,
            output,
            mapping,
            delimiter,
        } => {
            let mapping = load_mapping(mapping.as_deref(), delimiter)?;
            let file = File::open(&input)
                .with_context(|| format!("Failed to open {}", input.display()))?;
            let products: Vec<Product> = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse products from {}", input.display()))?;

            ProductCsvWriter::new(&mapping)
                .write_path(&output, &products)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!(
                products = products.len(),
                output = %output.display(),
                "Exported products"
            );
            Ok(())
        }
        Commands::Mapping {
            output,
            from_csv,
            delimiter,
        } => {
            let mut mapping = load_mapping(None, delimiter)?;
            if let Some(path) = from_csv {
                let reader = CsvRecordReader::from_path(&path, &CsvConfig::for_mapping(&mapping))
                    .with_context(|| format!("Failed to read headers of {}", path.display()))?;
                mapping.auto_map(reader.headers());
            }
            let yaml = mapping.to_yaml()?;
            match output {
                Some(path) => std::fs::write(&path, yaml)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => io::stdout().write_all(yaml.as_bytes())?,
            }
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_mapping(path: Option<&Path>, delimiter: Option<char>) -> anyhow::Result<MappingConfiguration> {
    let mut mapping = match path {
        Some(path) => MappingConfiguration::from_file(path)
            .with_context(|| format!("Failed to load mapping {}", path.display()))?,
        None => MappingConfiguration::default_configuration(),
    };
    if let Some(delimiter) = delimiter {
        mapping.delimiter = delimiter;
    }
    Ok(mapping)
}

async fn import(
    input: &Path,
    mut mapping: MappingConfiguration,
    auto_map: bool,
    jobs: Option<usize>,
) -> anyhow::Result<Vec<Product>> {
    let reader = CsvRecordReader::from_path(input, &CsvConfig::for_mapping(&mapping))
        .with_context(|| format!("Failed to open {}", input.display()))?;
    if auto_map {
        mapping.auto_map(reader.headers());
    }
    for problem in mapping.validation_errors() {
        tracing::warn!(%problem, "Mapping configuration problem");
    }

    match jobs {
        Some(jobs) if jobs > 1 => {
            let records = reader
                .read_all()
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let batch = BatchConfig {
                max_concurrency: jobs,
                ..BatchConfig::default()
            };
            let pipeline = ImportPipeline::new(mapping);
            let records_read = records.len();
            let products =
                map_concurrently(Arc::new(pipeline.config().clone()), records, &batch).await?;
            let incomplete = products
                .iter()
                .filter(|product| pipeline.is_incomplete(product))
                .count();
            let properties: usize = products.iter().map(|p| p.property_values.len()).sum();
            tracing::info!(
                "Imported: {} products from {} records ({} incomplete, {} property values) on {} jobs",
                products.len(),
                records_read,
                incomplete,
                properties,
                jobs
            );
            Ok(products)
        }
        Some(0) => bail!("--jobs must be at least 1"),
        _ => {
            let pipeline = ImportPipeline::new(mapping);
            let mut products = Vec::new();
            let stats = pipeline
                .run(reader, |product| {
                    products.push(product);
                    Ok::<(), std::convert::Infallible>(())
                })
                .with_context(|| format!("Failed to import {}", input.display()))?;
            tracing::info!("{}", stats.summary());
            Ok(products)
        }
    }
}

fn write_json(output: Option<&Path>, products: &[Product], pretty: bool) -> anyhow::Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    if pretty {
        serde_json::to_writer_pretty(&mut writer, products)?;
    } else {
        serde_json::to_writer(&mut writer, products)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
