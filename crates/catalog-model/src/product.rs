//! Product entity and its nested sub-objects

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::field::ProductField;
use crate::property::PropertyValue;

/// Catalog product produced from one source record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub category_id: String,
    pub gtin: String,
    pub main_product_id: String,
    pub vendor: String,
    pub product_type: String,
    pub shipping_type: String,
    pub download_type: String,
    pub has_user_agreement: bool,
    pub is_buyable: bool,
    pub track_inventory: bool,

    // Flat inputs of the nested sub-objects below
    pub list_price: String,
    pub sale_price: String,
    pub currency: String,
    pub quantity: String,
    pub seo_url: String,
    pub seo_title: String,
    pub seo_description: String,
    pub review: String,
    pub review_type: String,
    pub category_path: String,

    pub price: Price,
    pub inventory: Inventory,
    pub seo_info: SeoInfo,
    pub editorial_review: EditorialReview,
    pub category: Category,

    /// Named custom properties in property-column order
    pub property_values: Vec<PropertyValue>,
}

/// Pricing derived from `list_price`, `sale_price` and `currency`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Price {
    pub list: Decimal,
    pub sale: Decimal,
    pub currency: String,
}

/// Stock level derived from `quantity`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inventory {
    pub in_stock_quantity: i64,
}

/// SEO metadata derived from `seo_url`, `seo_title` and `seo_description`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoInfo {
    pub semantic_url: String,
    pub page_title: String,
    pub meta_description: String,
}

/// Editorial review derived from `review` and `review_type`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorialReview {
    pub content: String,
    pub review_type: String,
}

/// Category reference derived from `category_path`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub path: String,
}

impl Product {
    /// Create an empty product with every field at its zero value
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable access to a text field; `None` for flag fields
    pub fn text_field_mut(&mut self, field: ProductField) -> Option<&mut String> {
        let slot = match field {
            ProductField::Name => &mut self.name,
            ProductField::Sku => &mut self.sku,
            ProductField::CategoryPath => &mut self.category_path,
            ProductField::Id => &mut self.id,
            ProductField::MainProductId => &mut self.main_product_id,
            ProductField::CategoryId => &mut self.category_id,
            ProductField::Gtin => &mut self.gtin,
            ProductField::Vendor => &mut self.vendor,
            ProductField::ProductType => &mut self.product_type,
            ProductField::ShippingType => &mut self.shipping_type,
            ProductField::DownloadType => &mut self.download_type,
            ProductField::ListPrice => &mut self.list_price,
            ProductField::SalePrice => &mut self.sale_price,
            ProductField::Currency => &mut self.currency,
            ProductField::Quantity => &mut self.quantity,
            ProductField::SeoUrl => &mut self.seo_url,
            ProductField::SeoTitle => &mut self.seo_title,
            ProductField::SeoDescription => &mut self.seo_description,
            ProductField::Review => &mut self.review,
            ProductField::ReviewType => &mut self.review_type,
            ProductField::HasUserAgreement | ProductField::IsBuyable | ProductField::TrackInventory => {
                return None;
            }
        };
        Some(slot)
    }

    /// Mutable access to a flag field; `None` for text fields
    pub fn flag_field_mut(&mut self, field: ProductField) -> Option<&mut bool> {
        match field {
            ProductField::HasUserAgreement => Some(&mut self.has_user_agreement),
            ProductField::IsBuyable => Some(&mut self.is_buyable),
            ProductField::TrackInventory => Some(&mut self.track_inventory),
            _ => None,
        }
    }

    /// Textual form of a flat field, as it would appear in a source column
    pub fn field_text(&self, field: ProductField) -> String {
        let text = match field {
            ProductField::Name => &self.name,
            ProductField::Sku => &self.sku,
            ProductField::CategoryPath => &self.category_path,
            ProductField::Id => &self.id,
            ProductField::MainProductId => &self.main_product_id,
            ProductField::CategoryId => &self.category_id,
            ProductField::Gtin => &self.gtin,
            ProductField::Vendor => &self.vendor,
            ProductField::ProductType => &self.product_type,
            ProductField::ShippingType => &self.shipping_type,
            ProductField::DownloadType => &self.download_type,
            ProductField::ListPrice => &self.list_price,
            ProductField::SalePrice => &self.sale_price,
            ProductField::Currency => &self.currency,
            ProductField::Quantity => &self.quantity,
            ProductField::SeoUrl => &self.seo_url,
            ProductField::SeoTitle => &self.seo_title,
            ProductField::SeoDescription => &self.seo_description,
            ProductField::Review => &self.review,
            ProductField::ReviewType => &self.review_type,
            ProductField::HasUserAgreement => return self.has_user_agreement.to_string(),
            ProductField::IsBuyable => return self.is_buyable.to_string(),
            ProductField::TrackInventory => return self.track_inventory.to_string(),
        };
        text.clone()
    }

    /// Look up a collected property by name
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.property_values
            .iter()
            .find(|value| value.property_name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_has_zero_valued_nested_objects() {
        let product = Product::new();
        assert_eq!(product.price.list, Decimal::ZERO);
        assert_eq!(product.price.sale, Decimal::ZERO);
        assert_eq!(product.inventory.in_stock_quantity, 0);
        assert!(product.seo_info.semantic_url.is_empty());
        assert!(product.category.path.is_empty());
        assert!(product.property_values.is_empty());
    }

    #[test]
    fn test_text_and_flag_slots_are_disjoint() {
        let mut product = Product::new();
        for field in ProductField::ALL {
            let text = product.text_field_mut(field).is_some();
            let flag = product.flag_field_mut(field).is_some();
            assert!(text ^ flag, "{field} must be exactly one of text or flag");
        }
    }

    #[test]
    fn test_field_text_reflects_writes() {
        let mut product = Product::new();
        *product.text_field_mut(ProductField::Sku).unwrap() = "CBLK21113".to_string();
        *product.flag_field_mut(ProductField::IsBuyable).unwrap() = true;

        assert_eq!(product.sku, "CBLK21113");
        assert_eq!(product.field_text(ProductField::Sku), "CBLK21113");
        assert_eq!(product.field_text(ProductField::IsBuyable), "true");
        assert_eq!(product.field_text(ProductField::TrackInventory), "false");
    }

    #[test]
    fn test_slot_of_the_other_kind_is_none() {
        let mut product = Product::new();
        assert!(product.text_field_mut(ProductField::HasUserAgreement).is_none());
        assert!(product.flag_field_mut(ProductField::ListPrice).is_none());

        *product.text_field_mut(ProductField::ListPrice).unwrap() = "123.4".to_string();
        assert_eq!(product.field_text(ProductField::ListPrice), "123.4");
        assert_eq!(product.price.list, Decimal::ZERO);
    }

    #[test]
    fn test_property_lookup() {
        let mut product = Product::new();
        product
            .property_values
            .push(PropertyValue::new("Color_Multivalue", "red, blue"));

        assert_eq!(product.property("Color_Multivalue").unwrap().value, "red, blue");
        assert!(product.property("Color").is_none());
    }

    #[test]
    fn test_json_serialization_keeps_price_precision() {
        let mut product = Product::new();
        product.price.list = Decimal::new(1234, 1);
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price"]["list"], "123.4");
        assert_eq!(json["category"]["path"], "");
    }
}
