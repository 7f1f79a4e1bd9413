//! Raw record access
//!
//! The mapper never sees how a record was tokenized. It only asks a
//! [`RecordSource`] for the raw text of a named column.

use std::collections::{BTreeMap, HashMap};

/// A single source record addressed by column name
pub trait RecordSource {
    /// Raw value of `column`, or `None` when the record has no such column
    fn value(&self, column: &str) -> Option<&str>;

    /// Trimmed value of `column`, with empty values treated as absent
    fn provided(&self, column: &str) -> Option<&str> {
        self.value(column)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

impl<T: RecordSource + ?Sized> RecordSource for &T {
    fn value(&self, column: &str) -> Option<&str> {
        (**self).value(column)
    }
}

impl RecordSource for HashMap<String, String> {
    fn value(&self, column: &str) -> Option<&str> {
        self.get(column).map(String::as_str)
    }
}

impl RecordSource for BTreeMap<String, String> {
    fn value(&self, column: &str) -> Option<&str> {
        self.get(column).map(String::as_str)
    }
}

/// Ordered (column, value) pairs; the first matching column wins
impl RecordSource for Vec<(String, String)> {
    fn value(&self, column: &str) -> Option<&str> {
        self.iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_empty_are_not_provided() {
        let record: HashMap<String, String> = [
            ("Sku".to_string(), "X1".to_string()),
            ("Name".to_string(), "   ".to_string()),
            ("Gtin".to_string(), String::new()),
        ]
        .into_iter()
        .collect();

        assert_eq!(record.provided("Sku"), Some("X1"));
        assert_eq!(record.provided("Name"), None);
        assert_eq!(record.provided("Gtin"), None);
        assert_eq!(record.provided("Vendor"), None);
        assert_eq!(record.value("Gtin"), Some(""));
    }

    #[test]
    fn test_provided_trims_surrounding_whitespace() {
        let record = vec![("Sku".to_string(), "  X1 ".to_string())];
        assert_eq!(record.provided("Sku"), Some("X1"));
    }

    #[test]
    fn test_pairs_first_match_wins() {
        let record = vec![
            ("Sku".to_string(), "first".to_string()),
            ("Sku".to_string(), "second".to_string()),
        ];
        assert_eq!(record.value("Sku"), Some("first"));
    }

    #[test]
    fn test_column_lookup_is_case_sensitive() {
        let record: BTreeMap<String, String> =
            [("Sku".to_string(), "X1".to_string())].into_iter().collect();
        assert_eq!(record.value("sku"), None);
    }
}
