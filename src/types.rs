//! Common types used throughout Solidafy Ledger
//!
//! This module contains the product entity, the update operator enum,
//! and shared type aliases.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Raw `key::value` pairs from one change log block
pub type FieldMap = HashMap<String, String>;

// ============================================================================
// Product
// ============================================================================

/// A product row, keyed by its unique `name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique natural key
    pub name: String,

    /// Unit price, never negative after an update
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,

    /// Units in stock
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: i64,

    /// Product category (null forms its own report group)
    #[serde(default)]
    pub category: Option<String>,

    /// City the product ships from
    #[serde(default, alias = "fromCity", alias = "from_city")]
    pub origin: Option<String>,

    /// Whether the product can be ordered
    #[serde(default, alias = "isAvailable", deserialize_with = "null_as_default")]
    pub is_available: bool,

    /// Page views, written once at load
    #[serde(default, deserialize_with = "null_as_default")]
    pub views: i64,

    /// Number of change records applied to this product
    #[serde(default, deserialize_with = "null_as_default")]
    pub update_count: i64,
}

/// Read an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Product {
    /// Create a product with the given key and price/quantity, other fields defaulted
    pub fn new(name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
            category: None,
            origin: None,
            is_available: false,
            views: 0,
            update_count: 0,
        }
    }

    /// Set the category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the origin city
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Set availability
    #[must_use]
    pub fn with_available(mut self, available: bool) -> Self {
        self.is_available = available;
        self
    }

    /// Set view count
    #[must_use]
    pub fn with_views(mut self, views: i64) -> Self {
        self.views = views;
        self
    }
}

// ============================================================================
// Update Method
// ============================================================================

/// Operator named by a change record's `method` key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpdateMethod {
    /// Add an absolute delta to the price
    PriceAbs,
    /// Scale the price by `1 + param`
    PricePercent,
    /// Add units to the quantity
    QuantityAdd,
    /// Subtract units from the quantity
    QuantitySub,
    /// Delete the product
    Remove,
    /// Set availability from a `true`/`false` param
    Available,
    /// Any other tag; applied as a no-op
    Unknown(String),
}

impl UpdateMethod {
    /// Parse a method tag. Matching is exact and case-sensitive.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "price_abs" => Self::PriceAbs,
            "price_percent" => Self::PricePercent,
            "quantity_add" => Self::QuantityAdd,
            "quantity_sub" => Self::QuantitySub,
            "remove" => Self::Remove,
            "available" => Self::Available,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The tag as written in the change log
    pub fn as_str(&self) -> &str {
        match self {
            Self::PriceAbs => "price_abs",
            Self::PricePercent => "price_percent",
            Self::QuantityAdd => "quantity_add",
            Self::QuantitySub => "quantity_sub",
            Self::Remove => "remove",
            Self::Available => "available",
            Self::Unknown(tag) => tag,
        }
    }

    /// Whether the tag names a supported operator
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<&str> for UpdateMethod {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

impl fmt::Display for UpdateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for UpdateMethod {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_method_parse() {
        assert_eq!(UpdateMethod::parse("price_abs"), UpdateMethod::PriceAbs);
        assert_eq!(UpdateMethod::parse("available"), UpdateMethod::Available);
        assert_eq!(
            UpdateMethod::parse("Price_Abs"),
            UpdateMethod::Unknown("Price_Abs".to_string())
        );
    }

    #[test]
    fn test_update_method_round_trip_tag() {
        for tag in [
            "price_abs",
            "price_percent",
            "quantity_add",
            "quantity_sub",
            "remove",
            "available",
            "restock",
        ] {
            assert_eq!(UpdateMethod::parse(tag).as_str(), tag);
        }
    }

    #[test]
    fn test_update_method_flags() {
        assert!(UpdateMethod::Remove.is_known());
        assert!(!UpdateMethod::parse("discount").is_known());
    }

    #[test]
    fn test_product_deserialize_source_aliases() {
        let product: Product = serde_json::from_value(json!({
            "name": "Lamp",
            "price": 120,
            "quantity": 4,
            "category": "Home",
            "fromCity": "Kazan",
            "isAvailable": true,
            "views": 900
        }))
        .unwrap();

        assert_eq!(product.name, "Lamp");
        assert!((product.price - 120.0).abs() < f64::EPSILON);
        assert_eq!(product.origin.as_deref(), Some("Kazan"));
        assert!(product.is_available);
        assert_eq!(product.update_count, 0);
    }

    #[test]
    fn test_product_null_fields_default() {
        let product: Product = serde_json::from_value(json!({
            "name": "Lamp",
            "price": null,
            "quantity": null,
            "category": null,
            "isAvailable": null,
            "views": null
        }))
        .unwrap();

        assert_eq!(product, Product::new("Lamp", 0.0, 0));
    }

    #[test]
    fn test_product_builder() {
        let product = Product::new("Pen", 2.5, 100)
            .with_category("Office")
            .with_available(true)
            .with_views(7);
        assert_eq!(product.category.as_deref(), Some("Office"));
        assert!(product.is_available);
        assert_eq!(product.views, 7);
        assert!(product.origin.is_none());
    }
}
