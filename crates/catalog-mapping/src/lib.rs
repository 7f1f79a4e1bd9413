#![deny(rust_2018_idioms)]
#![warn(clippy::all)]

//! # catalog-mapping
//!
//! Mapping configuration and record mapper for catalog CSV import.
//!
//! A [`MappingConfiguration`] describes which source column feeds each fixed
//! product field, which fallback literal to use when that column is missing,
//! and which extra columns to collect as named properties. The
//! [`ProductMapper`] applies one configuration to any [`RecordSource`] and
//! returns a fully populated [`catalog_model::Product`].
//!
//! ```rust
//! use catalog_mapping::{MappingConfiguration, ProductMapper};
//! use std::collections::HashMap;
//!
//! let config = MappingConfiguration::default_configuration()
//!     .with_property_columns(["Color"]);
//! let mapper = ProductMapper::new(&config);
//!
//! let record: HashMap<String, String> = [
//!     ("Sku".to_string(), "X1".to_string()),
//!     ("ListPrice".to_string(), "9.90".to_string()),
//!     ("Color".to_string(), "red".to_string()),
//! ]
//! .into_iter()
//! .collect();
//!
//! let product = mapper.map_record(&record);
//! assert_eq!(product.sku, "X1");
//! assert_eq!(product.price.list.to_string(), "9.90");
//! assert_eq!(product.property_values[0].value, "red");
//! ```

pub mod coerce;
pub mod config;
pub mod mapper;
pub mod record;

pub use config::{MappingConfiguration, PropertyMap};
pub use mapper::ProductMapper;
pub use record::RecordSource;

use thiserror::Error;

/// Errors raised while loading or checking a mapping configuration.
///
/// Mapping a record never produces one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Mapping configuration has no property maps")]
    Empty,

    #[error("Unknown entity column '{name}'")]
    UnknownField { name: String },

    #[error("Entity column '{name}' is mapped more than once")]
    DuplicateField { name: String },

    #[error("Required entity column '{name}' has neither a CSV column nor a custom value")]
    Unresolvable { name: String },

    #[error("Property column '{column}' is already bound to entity column '{field}'")]
    PropertyColumnBound { column: String, field: String },

    #[error("Failed to parse mapping configuration: {message}")]
    Parse {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },

    #[error("Failed to serialize mapping configuration: {0}")]
    Serialize(String),

    #[error("IO error for '{path}': {message}")]
    Io { path: String, message: String },
}

impl ConfigError {
    /// Build an unknown-field error.
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField { name: name.into() }
    }

    /// Build a duplicate-field error.
    pub fn duplicate_field(name: impl Into<String>) -> Self {
        Self::DuplicateField { name: name.into() }
    }

    /// Build an unresolvable-required-field error.
    pub fn unresolvable(name: impl Into<String>) -> Self {
        Self::Unresolvable { name: name.into() }
    }

    /// Build an I/O error with path context.
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_column() {
        let err = ConfigError::unresolvable("CategoryPath");
        assert!(err.to_string().contains("CategoryPath"));

        let err = ConfigError::PropertyColumnBound {
            column: "Sku".into(),
            field: "Sku".into(),
        };
        assert!(err.to_string().contains("already bound"));
    }

    #[test]
    fn test_io_error_keeps_path() {
        let err = ConfigError::io("/tmp/mapping.yaml", "not found");
        assert_eq!(
            err.to_string(),
            "IO error for '/tmp/mapping.yaml': not found"
        );
    }
}
