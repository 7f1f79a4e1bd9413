#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

//! # catalog-model
//!
//! Product entity produced by catalog CSV import.
//!
//! A [`Product`] carries flat scalar fields, the nested sub-objects derived
//! from them ([`Price`], [`Inventory`], [`SeoInfo`], [`EditorialReview`],
//! [`Category`]) and an ordered list of named [`PropertyValue`]s.

/// Fixed field identifiers and their canonical column names.
pub mod field;
/// Product entity and nested sub-objects.
pub mod product;
/// Named custom properties and the multivalue marker.
pub mod property;

pub use field::{FieldKind, ProductField};
pub use product::{Category, EditorialReview, Inventory, Price, Product, SeoInfo};
pub use property::{MULTIVALUE_MARKER, PropertyValue, is_multivalue_column};

/// Re-exported so consumers can name price components without another dependency.
pub use rust_decimal::Decimal;

use thiserror::Error;

/// Errors that can occur when working with the product model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown product field: '{name}'")]
    UnknownField { name: String },
}

impl Error {
    /// Build an unknown-field error for an entity column name.
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField { name: name.into() }
    }
}

/// Crate-local result type for model operations.
pub type Result<T> = std::result::Result<T, Error>;
