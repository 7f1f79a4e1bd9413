//! Fixed product fields
//!
//! Every destination slot the product entity always carries is named by a
//! [`ProductField`]. The string form is the canonical entity column name used
//! by mapping configurations (`"Sku"`, `"CategoryPath"`, `"ListPrice"`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Identifier of a fixed product field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductField {
    Name,
    Sku,
    CategoryPath,
    Id,
    MainProductId,
    CategoryId,
    Gtin,
    Vendor,
    ProductType,
    ShippingType,
    DownloadType,
    HasUserAgreement,
    IsBuyable,
    TrackInventory,
    ListPrice,
    SalePrice,
    Currency,
    Quantity,
    SeoUrl,
    SeoTitle,
    SeoDescription,
    Review,
    ReviewType,
}

/// How a field's resolved text is stored on the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Stored verbatim as a string
    Text,
    /// Coerced to a boolean flag
    Flag,
}

impl ProductField {
    /// All fixed fields in canonical order (required fields first)
    pub const ALL: [ProductField; 23] = [
        ProductField::Name,
        ProductField::Sku,
        ProductField::CategoryPath,
        ProductField::Id,
        ProductField::MainProductId,
        ProductField::CategoryId,
        ProductField::Gtin,
        ProductField::Vendor,
        ProductField::ProductType,
        ProductField::ShippingType,
        ProductField::DownloadType,
        ProductField::HasUserAgreement,
        ProductField::IsBuyable,
        ProductField::TrackInventory,
        ProductField::ListPrice,
        ProductField::SalePrice,
        ProductField::Currency,
        ProductField::Quantity,
        ProductField::SeoUrl,
        ProductField::SeoTitle,
        ProductField::SeoDescription,
        ProductField::Review,
        ProductField::ReviewType,
    ];

    /// Canonical entity column name
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductField::Name => "Name",
            ProductField::Sku => "Sku",
            ProductField::CategoryPath => "CategoryPath",
            ProductField::Id => "Id",
            ProductField::MainProductId => "MainProductId",
            ProductField::CategoryId => "CategoryId",
            ProductField::Gtin => "Gtin",
            ProductField::Vendor => "Vendor",
            ProductField::ProductType => "ProductType",
            ProductField::ShippingType => "ShippingType",
            ProductField::DownloadType => "DownloadType",
            ProductField::HasUserAgreement => "HasUserAgreement",
            ProductField::IsBuyable => "IsBuyable",
            ProductField::TrackInventory => "TrackInventory",
            ProductField::ListPrice => "ListPrice",
            ProductField::SalePrice => "SalePrice",
            ProductField::Currency => "Currency",
            ProductField::Quantity => "Quantity",
            ProductField::SeoUrl => "SeoUrl",
            ProductField::SeoTitle => "SeoTitle",
            ProductField::SeoDescription => "SeoDescription",
            ProductField::Review => "Review",
            ProductField::ReviewType => "ReviewType",
        }
    }

    /// Storage kind of the field
    pub fn kind(&self) -> FieldKind {
        match self {
            ProductField::HasUserAgreement | ProductField::IsBuyable | ProductField::TrackInventory => {
                FieldKind::Flag
            }
            _ => FieldKind::Text,
        }
    }

    /// Whether an import row is incomplete without this field
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            ProductField::Name | ProductField::Sku | ProductField::CategoryPath
        )
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ProductField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| Error::unknown_field(s))
    }
}
