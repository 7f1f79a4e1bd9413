//! Mapping configuration
//!
//! A [`MappingConfiguration`] is a plain table describing where each fixed
//! product field comes from and which extra columns are collected as named
//! properties. It is built (usually from [`MappingConfiguration::default_configuration`]),
//! adjusted by the caller, and then only read while records are mapped.

use catalog_model::ProductField;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::{ConfigError, Result};

/// Binding of one fixed product field to its source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMap {
    /// Destination field identifier (canonical entity column name)
    pub entity_column_name: String,

    /// Source column to read
    #[serde(default)]
    pub csv_column_name: Option<String>,

    /// Literal used when the source column is absent or empty
    #[serde(default)]
    pub custom_value: Option<String>,

    /// Whether a product is incomplete without this field
    #[serde(default)]
    pub required: bool,
}

/// Declarative description of how CSV columns become product fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfiguration {
    /// Field delimiter, also used to join multivalue property content
    pub delimiter: char,

    /// Standalone columns expected in the source
    pub csv_columns: Vec<String>,

    /// Columns collected into the product's property list, in output order
    pub property_csv_columns: Vec<String>,

    /// One entry per fixed product field
    pub property_maps: Vec<PropertyMap>,
}

impl PropertyMap {
    /// Entry reading `field` from the column of the same name
    pub fn for_field(field: ProductField) -> Self {
        Self {
            entity_column_name: field.as_str().to_string(),
            csv_column_name: Some(field.as_str().to_string()),
            custom_value: None,
            required: field.is_required(),
        }
    }

    /// Set the source column
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.csv_column_name = Some(column.into());
        self
    }

    /// Set the fallback literal
    pub fn with_custom_value(mut self, value: impl Into<String>) -> Self {
        self.custom_value = Some(value.into());
        self
    }

    /// The fixed field this entry targets, if the name is known
    pub fn field(&self) -> Option<ProductField> {
        self.entity_column_name.parse().ok()
    }

    /// Whether either a column or a custom value can supply this field
    pub fn is_resolvable(&self) -> bool {
        let has_column = self
            .csv_column_name
            .as_deref()
            .is_some_and(|column| !column.trim().is_empty());
        has_column || self.custom_value.is_some()
    }
}

impl Default for MappingConfiguration {
    fn default() -> Self {
        Self::default_configuration()
    }
}

impl MappingConfiguration {
    /// Configuration with one entry per fixed field, each bound to the column
    /// named like the field, no property columns and a comma delimiter.
    pub fn default_configuration() -> Self {
        Self {
            delimiter: ',',
            csv_columns: Vec::new(),
            property_csv_columns: Vec::new(),
            property_maps: ProductField::ALL
                .iter()
                .copied()
                .map(PropertyMap::for_field)
                .collect(),
        }
    }

    /// Configuration with no entries at all
    pub fn empty() -> Self {
        Self {
            delimiter: ',',
            csv_columns: Vec::new(),
            property_csv_columns: Vec::new(),
            property_maps: Vec::new(),
        }
    }

    /// Set the delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Replace the expected standalone columns
    pub fn with_csv_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.csv_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the property columns
    pub fn with_property_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.property_csv_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Bind `field` to `column`, adding an entry if none exists
    pub fn map_column(mut self, field: ProductField, column: impl Into<String>) -> Self {
        self.entry_for(field).csv_column_name = Some(column.into());
        self
    }

    /// Give `field` a custom value, adding an entry if none exists
    pub fn map_custom_value(mut self, field: ProductField, value: impl Into<String>) -> Self {
        self.entry_for(field).custom_value = Some(value.into());
        self
    }

    /// Entry for `field`
    pub fn property_map(&self, field: ProductField) -> Option<&PropertyMap> {
        self.property_maps
            .iter()
            .find(|map| map.entity_column_name == field.as_str())
    }

    /// Mutable entry for `field`
    pub fn property_map_mut(&mut self, field: ProductField) -> Option<&mut PropertyMap> {
        self.property_maps
            .iter_mut()
            .find(|map| map.entity_column_name == field.as_str())
    }

    fn entry_for(&mut self, field: ProductField) -> &mut PropertyMap {
        let index = match self
            .property_maps
            .iter()
            .position(|map| map.entity_column_name == field.as_str())
        {
            Some(index) => index,
            None => {
                let mut map = PropertyMap::for_field(field);
                map.csv_column_name = None;
                self.property_maps.push(map);
                self.property_maps.len() - 1
            }
        };
        &mut self.property_maps[index]
    }

    /// Bind entries to the given header row.
    ///
    /// Every entry whose entity column name equals a header is bound to that
    /// header; entries without a matching header lose their column (custom
    /// values are kept). Headers not bound to any entry become property
    /// columns, in header order.
    pub fn auto_map<S: AsRef<str>>(&mut self, headers: &[S]) {
        let headers: Vec<&str> = headers.iter().map(AsRef::as_ref).collect();
        self.csv_columns = headers.iter().map(|h| (*h).to_string()).collect();

        for map in &mut self.property_maps {
            map.csv_column_name = headers
                .iter()
                .find(|header| **header == map.entity_column_name)
                .map(|header| (*header).to_string());
        }

        let bound: HashSet<&str> = self
            .property_maps
            .iter()
            .filter_map(|map| map.csv_column_name.as_deref())
            .collect();
        self.property_csv_columns = headers
            .iter()
            .filter(|header| !bound.contains(**header))
            .map(|header| (*header).to_string())
            .collect();
    }

    /// Column names bound to fixed fields, in entry order
    pub fn bound_columns(&self) -> Vec<&str> {
        self.property_maps
            .iter()
            .filter_map(|map| map.csv_column_name.as_deref())
            .collect()
    }

    /// Check the configuration, returning the first problem found.
    ///
    /// The mapper never calls this; it exists for callers that want to fail
    /// fast before an import starts.
    pub fn validate(&self) -> Result<()> {
        match self.validation_errors().into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Every problem found in the configuration
    pub fn validation_errors(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.property_maps.is_empty() {
            errors.push(ConfigError::Empty);
            return errors;
        }

        let mut seen = HashSet::new();
        for map in &self.property_maps {
            if map.field().is_none() {
                errors.push(ConfigError::unknown_field(&map.entity_column_name));
            }
            if !seen.insert(map.entity_column_name.as_str()) {
                errors.push(ConfigError::duplicate_field(&map.entity_column_name));
            }
            if map.required && !map.is_resolvable() {
                errors.push(ConfigError::unresolvable(&map.entity_column_name));
            }
        }

        for column in &self.property_csv_columns {
            if let Some(map) = self
                .property_maps
                .iter()
                .find(|map| map.csv_column_name.as_deref() == Some(column.as_str()))
            {
                errors.push(ConfigError::PropertyColumnBound {
                    column: column.clone(),
                    field: map.entity_column_name.clone(),
                });
            }
        }

        errors
    }

    /// Parse a configuration from YAML
    ///
    /// # Errors
    ///
    /// Returns an error when the YAML is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
        })
    }

    /// Load a configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::io(path.display().to_string(), e.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Serialize the configuration to YAML
    ///
    /// # Errors
    ///
    /// Returns an error when serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}
