//! Open-ended product properties

use serde::{Deserialize, Serialize};

/// Suffix marking a property column whose value is a delimiter-joined list
pub const MULTIVALUE_MARKER: &str = "_Multivalue";

/// Whether a property column name carries the multivalue marker
pub fn is_multivalue_column(column: &str) -> bool {
    column.ends_with(MULTIVALUE_MARKER)
}

/// A named property value collected from a property column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValue {
    /// Property name (the source column name)
    pub property_name: String,

    /// Raw value, kept verbatim (joined form for multivalue columns)
    pub value: String,

    /// Whether the source column carried the multivalue marker
    #[serde(default)]
    pub multivalue: bool,
}

impl PropertyValue {
    /// Create a property value; multivalue-ness follows the column name
    pub fn new(property_name: impl Into<String>, value: impl Into<String>) -> Self {
        let property_name = property_name.into();
        let multivalue = is_multivalue_column(&property_name);
        Self {
            property_name,
            value: value.into(),
            multivalue,
        }
    }

    /// Individual values of this property.
    ///
    /// Single-valued properties yield their value unchanged. Multivalue
    /// properties are split on `delimiter` and each token is trimmed; empty
    /// tokens are dropped.
    pub fn values(&self, delimiter: char) -> Vec<&str> {
        if !self.multivalue {
            return vec![self.value.as_str()];
        }
        self.value
            .split(delimiter)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect()
    }
}
