//! Record mapper
//!
//! Turns one raw record into one [`Product`] in three passes:
//!
//! 1. resolve every fixed field from its source column or custom value,
//! 2. derive the nested sub-objects from the resolved flat fields,
//! 3. collect the configured property columns into `property_values`.
//!
//! The mapper is a pure function of configuration and record. It keeps no
//! state between records and never fails: missing or unparseable input
//! leaves the affected value at its zero value.

use catalog_model::{
    Category, EditorialReview, FieldKind, Inventory, Price, Product, ProductField, PropertyValue,
};
use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::coerce::{parse_decimal, parse_flag, parse_integer};
use crate::config::{MappingConfiguration, PropertyMap};
use crate::record::RecordSource;

/// Applies a [`MappingConfiguration`] to records
#[derive(Debug, Clone)]
pub struct ProductMapper<'a> {
    config: &'a MappingConfiguration,
    bindings: Vec<(ProductField, &'a PropertyMap)>,
}

impl<'a> ProductMapper<'a> {
    /// Create a mapper over a configuration.
    ///
    /// Entries naming an unknown entity column are ignored.
    pub fn new(config: &'a MappingConfiguration) -> Self {
        let bindings = config
            .property_maps
            .iter()
            .filter_map(|map| match map.field() {
                Some(field) => Some((field, map)),
                None => {
                    debug!(
                        entity_column = %map.entity_column_name,
                        "Ignoring mapping entry for unknown entity column"
                    );
                    None
                }
            })
            .collect();
        Self { config, bindings }
    }

    /// The configuration this mapper applies
    pub fn config(&self) -> &'a MappingConfiguration {
        self.config
    }

    /// Map one record into a product
    pub fn map_record<R: RecordSource + ?Sized>(&self, record: &R) -> Product {
        let mut product = Product::new();
        self.resolve_fixed_fields(record, &mut product);
        Self::derive_nested(&mut product);
        self.collect_properties(record, &mut product);
        trace!(sku = %product.sku, properties = product.property_values.len(), "Mapped record");
        product
    }

    /// Map records lazily, in source order
    pub fn map_all<I>(&self, records: I) -> impl Iterator<Item = Product>
    where
        I: IntoIterator,
        I::Item: RecordSource,
    {
        records.into_iter().map(move |record| self.map_record(&record))
    }

    fn resolve_fixed_fields<R: RecordSource + ?Sized>(&self, record: &R, product: &mut Product) {
        for (field, map) in &self.bindings {
            let Some(raw) = resolve(map, record) else {
                continue;
            };
            match field.kind() {
                FieldKind::Text => {
                    if let Some(slot) = product.text_field_mut(*field) {
                        *slot = raw.to_string();
                    }
                }
                FieldKind::Flag => {
                    let flag = parse_flag(raw).unwrap_or_else(|| {
                        debug!(field = %field, raw, "Unrecognized boolean, using false");
                        false
                    });
                    if let Some(slot) = product.flag_field_mut(*field) {
                        *slot = flag;
                    }
                }
            }
        }
    }

    /// Rebuild the nested sub-objects from the product's flat fields.
    ///
    /// Only already resolved flat fields are read, so custom values flow into
    /// the nested objects exactly like column values do.
    pub fn derive_nested(product: &mut Product) {
        product.price = Price {
            list: decimal_or_zero(ProductField::ListPrice, &product.list_price),
            sale: decimal_or_zero(ProductField::SalePrice, &product.sale_price),
            currency: product.currency.clone(),
        };
        product.inventory = Inventory {
            in_stock_quantity: integer_or_zero(ProductField::Quantity, &product.quantity),
        };
        product.seo_info.semantic_url.clone_from(&product.seo_url);
        product.seo_info.page_title.clone_from(&product.seo_title);
        product
            .seo_info
            .meta_description
            .clone_from(&product.seo_description);
        product.editorial_review = EditorialReview {
            content: product.review.clone(),
            review_type: product.review_type.clone(),
        };
        product.category = Category {
            path: product.category_path.clone(),
        };
    }

    fn collect_properties<R: RecordSource + ?Sized>(&self, record: &R, product: &mut Product) {
        product.property_values = self
            .config
            .property_csv_columns
            .iter()
            .filter_map(|column| {
                record
                    .provided(column)
                    .map(|value| PropertyValue::new(column.as_str(), value))
            })
            .collect();
    }
}

/// Source value first, then the custom value, then nothing
fn resolve<'r, R: RecordSource + ?Sized>(map: &'r PropertyMap, record: &'r R) -> Option<&'r str> {
    map.csv_column_name
        .as_deref()
        .and_then(|column| record.provided(column))
        .or(map.custom_value.as_deref())
}

fn decimal_or_zero(field: ProductField, raw: &str) -> Decimal {
    if raw.trim().is_empty() {
        return Decimal::ZERO;
    }
    parse_decimal(raw).unwrap_or_else(|| {
        debug!(field = %field, raw, "Unparseable decimal, using zero");
        Decimal::ZERO
    })
}

fn integer_or_zero(field: ProductField, raw: &str) -> i64 {
    if raw.trim().is_empty() {
        return 0;
    }
    parse_integer(raw).unwrap_or_else(|| {
        debug!(field = %field, raw, "Unparseable integer, using zero");
        0
    })
}
